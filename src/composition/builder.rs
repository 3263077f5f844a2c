//! Assembles the rule groups into the final layer stack.
//!
//! The stack is built once and memoized; its order is the paint order.

use std::collections::BTreeMap;

use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::groups::{GroupKind, RuleGroup};
use super::layer::LayerRule;
use crate::core::config::SourceConfig;
use crate::core::constants::STYLE_SPEC_VERSION;
use crate::{Error, Result};

/// The ordered, deduplicated layer stack
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    groups: Vec<RuleGroup>,
}

static COMPOSITION: Lazy<Composition> = Lazy::new(Composition::build);

/// The memoized default composition
pub fn compose() -> &'static Composition {
    &COMPOSITION
}

/// Layer ids of the default composition in paint order
pub fn layer_ids() -> Vec<&'static str> {
    compose().layer_ids()
}

/// Style document for the default composition over `source`
pub fn create_style(source: &SourceConfig) -> StyleDocument {
    compose().to_style_document(source)
}

impl Composition {
    /// Builds every group in paint order
    pub fn build() -> Self {
        let groups = GroupKind::ALL.iter().map(|kind| RuleGroup::new(*kind)).collect();
        let composition = Self::from_groups(groups);

        #[cfg(feature = "debug")]
        for group in &composition.groups {
            log::debug!("Composed {} group with {} rules", group.kind.name(), group.rules.len());
        }

        composition
    }

    /// Keeps the first rule for each id; later duplicates are dropped
    pub fn from_groups(mut groups: Vec<RuleGroup>) -> Self {
        let mut seen = FxHashSet::default();
        for group in &mut groups {
            group.rules.retain(|rule| {
                let first = seen.insert(rule.id.clone());
                #[cfg(feature = "debug")]
                if !first {
                    log::warn!("Dropping duplicate layer id '{}'", rule.id);
                }
                first
            });
        }
        Self { groups }
    }

    /// Like [`Composition::from_groups`] but rejects duplicate ids
    pub fn try_from_groups(groups: Vec<RuleGroup>) -> Result<Self> {
        let mut seen = FxHashSet::default();
        for rule in groups.iter().flat_map(|group| &group.rules) {
            if !seen.insert(rule.id.as_str()) {
                return Err(Error::DuplicateLayerId(rule.id.clone()));
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    pub fn group(&self, kind: GroupKind) -> Option<&RuleGroup> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    /// Every rule in paint order
    pub fn layers(&self) -> impl Iterator<Item = &LayerRule> + '_ {
        self.groups.iter().flat_map(|group| group.rules.iter())
    }

    pub fn layer(&self, id: &str) -> Option<&LayerRule> {
        self.layers().find(|rule| rule.id == id)
    }

    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers().map(|rule| rule.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_style_document(&self, source: &SourceConfig) -> StyleDocument {
        let mut sources = BTreeMap::new();
        sources.insert(
            source.source_id.clone(),
            VectorSource {
                kind: "vector".to_string(),
                url: source.tiles_url(),
                attribution: source.attribution.clone(),
            },
        );
        StyleDocument {
            version: STYLE_SPEC_VERSION,
            sources,
            layers: self
                .layers()
                .map(|rule| rule.to_json(&source.source_id))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub attribution: String,
}

/// A MapLibre style document with a single vector source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    pub version: u8,
    pub sources: BTreeMap<String, VectorSource>,
    pub layers: Vec<Value>,
}

impl StyleDocument {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter_map(|layer| layer.get("id").and_then(Value::as_str))
            .collect()
    }
}
