//! Static `(layer, class)` to directive lookup.
//!
//! Keys follow the pattern `"layer"` (layer default) or `"layer:class"`
//! (class-specific). Lookup probes the class entry first, then the layer
//! default; the caller substitutes the global fallback when both miss.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

use super::directive::{styles, Style, StyleDirective};
use crate::core::constants::layers;
use crate::{Error, Result};

/// A rule table key: a layer, optionally narrowed to one class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub layer: String,
    pub class: Option<String>,
}

impl RuleKey {
    pub fn layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            class: None,
        }
    }

    pub fn class(layer: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            class: Some(class.into()),
        }
    }

    pub fn is_composite(&self) -> bool {
        self.class.is_some()
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class {
            Some(class) => write!(f, "{}:{}", self.layer, class),
            None => write!(f, "{}", self.layer),
        }
    }
}

impl FromStr for RuleKey {
    type Err = Error;

    /// Parses `"layer"` or `"layer:class"`; classes are opaque and may contain `:`
    fn from_str(s: &str) -> Result<Self> {
        let key = match s.split_once(':') {
            Some((layer, class)) => {
                if class.is_empty() {
                    return Err(Error::InvalidRuleKey(s.to_string()));
                }
                RuleKey::class(layer, class)
            }
            None => RuleKey::layer(s),
        };
        if key.layer.is_empty() {
            return Err(Error::InvalidRuleKey(s.to_string()));
        }
        Ok(key)
    }
}

#[derive(Debug, Clone, Default)]
struct LayerRules {
    default: Option<StyleDirective>,
    classes: FxHashMap<String, StyleDirective>,
}

/// Immutable lookup table from rule keys to pre-built directives
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    layers: FxHashMap<String, LayerRules>,
    len: usize,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// Exact `layer:class` entry, then the bare `layer` entry
    ///
    /// Class tokens are compared verbatim, without normalization.
    pub fn lookup(&self, layer: &str, class: Option<&str>) -> Option<StyleDirective> {
        let rules = self.layers.get(layer)?;
        class
            .and_then(|c| rules.classes.get(c))
            .or(rules.default.as_ref())
            .copied()
    }

    /// Exact match on a key, without falling back to the layer default
    pub fn get(&self, key: &RuleKey) -> Option<StyleDirective> {
        let rules = self.layers.get(&key.layer)?;
        match &key.class {
            Some(class) => rules.classes.get(class).copied(),
            None => rules.default,
        }
    }

    pub fn contains_layer(&self, layer: &str) -> bool {
        self.layers.contains_key(layer)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All keys, sorted for stable output
    pub fn keys(&self) -> Vec<RuleKey> {
        let mut keys: Vec<RuleKey> = self
            .layers
            .iter()
            .flat_map(|(layer, rules)| {
                let default = rules.default.map(|_| RuleKey::layer(layer.clone()));
                let classes = rules
                    .classes
                    .keys()
                    .map(move |class| RuleKey::class(layer.clone(), class.clone()));
                default.into_iter().chain(classes)
            })
            .collect();
        keys.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
        keys
    }
}

/// Collects rules and rejects duplicate keys
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    table: RuleTable,
}

impl RuleTableBuilder {
    pub fn insert(&mut self, key: RuleKey, directive: StyleDirective) -> Result<&mut Self> {
        let rules = self.table.layers.entry(key.layer.clone()).or_default();
        let duplicate = match &key.class {
            Some(class) => rules.classes.contains_key(class),
            None => rules.default.is_some(),
        };
        if duplicate {
            return Err(Error::DuplicateRule(key.to_string()));
        }
        match key.class {
            Some(class) => {
                rules.classes.insert(class, directive);
            }
            None => rules.default = Some(directive),
        }
        self.table.len += 1;
        Ok(self)
    }

    /// Inserts a rule given as `"layer"` or `"layer:class"`
    pub fn rule(&mut self, key: &str, directive: StyleDirective) -> Result<&mut Self> {
        self.insert(key.parse()?, directive)
    }

    /// Registers the same directive for several classes of one layer
    pub fn classes(
        &mut self,
        layer: &str,
        classes: &[&str],
        directive: StyleDirective,
    ) -> Result<&mut Self> {
        for class in classes {
            self.insert(RuleKey::class(layer, *class), directive)?;
        }
        Ok(self)
    }

    pub fn build(self) -> RuleTable {
        #[cfg(feature = "debug")]
        log::debug!(
            "Built rule table: {} rules across {} layers",
            self.table.len,
            self.table.layers.len()
        );
        self.table
    }
}

fn single(style: &'static Style) -> StyleDirective {
    StyleDirective::Single(style)
}

fn layered(styles: &'static [Style]) -> StyleDirective {
    StyleDirective::Layered(styles)
}

fn default_rules() -> Result<RuleTable> {
    use layers::*;

    let mut b = RuleTable::builder();

    b.rule(WATER, single(&styles::WATER))?
        .rule("water:swimming_pool", single(&styles::POOL))?
        .classes(WATER, &["lake", "river", "pond", "dock"], single(&styles::WATER))?;

    b.rule(WATERWAY, single(&styles::WATERWAY))?
        .classes(WATERWAY, &["river", "canal"], single(&styles::WATERWAY))?
        .classes(WATERWAY, &["ditch", "drain"], single(&styles::WATERWAY_SMALL))?;

    b.rule(LANDCOVER, single(&styles::GRASS))?
        .classes(LANDCOVER, &["wood", "forest"], single(&styles::FOREST))?
        .rule("landcover:grass", single(&styles::GRASS))?
        .rule("landcover:wetland", single(&styles::WETLAND))?
        .rule("landcover:farmland", single(&styles::FARMLAND))?;

    b.rule(PARK, single(&styles::PARK))?
        .rule("park:protected_area", single(&styles::PARK))?;

    b.rule(LANDUSE, single(&styles::DEFAULT))?
        .rule("landuse:residential", single(&styles::RESIDENTIAL))?
        .classes(
            LANDUSE,
            &["industrial", "railway", "bus_station"],
            single(&styles::INDUSTRIAL),
        )?
        .rule("landuse:commercial", single(&styles::COMMERCIAL))?
        .rule("landuse:retail", single(&styles::RETAIL))?
        .rule("landuse:institutional", single(&styles::INSTITUTIONAL))?
        .rule("landuse:military", single(&styles::MILITARY))?
        .rule("landuse:hospital", single(&styles::HOSPITAL))?
        .classes(LANDUSE, &["school", "university", "college"], single(&styles::SCHOOL))?
        .classes(
            LANDUSE,
            &["stadium", "pitch", "track", "playground"],
            single(&styles::STADIUM),
        )?
        .rule("landuse:cemetery", single(&styles::CEMETERY))?;

    b.rule(BUILDING, single(&styles::BUILDING))?;

    b.rule(TRANSPORTATION, layered(&styles::MINOR_ROAD))?
        .classes(TRANSPORTATION, &["motorway", "trunk"], layered(&styles::MOTORWAY))?
        .rule("transportation:primary", layered(&styles::PRIMARY))?
        .rule("transportation:secondary", layered(&styles::SECONDARY))?
        .rule("transportation:tertiary", layered(&styles::TERTIARY))?
        .classes(TRANSPORTATION, &["minor", "street"], layered(&styles::MINOR_ROAD))?
        .rule("transportation:service", layered(&styles::SERVICE_ROAD))?
        .rule("transportation:busway", layered(&styles::BUSWAY))?
        .rule("transportation:raceway", single(&styles::RACEWAY))?
        .classes(
            TRANSPORTATION,
            &["path", "footway", "cycleway"],
            single(&styles::PATH),
        )?
        .rule("transportation:track", single(&styles::TRACK))?
        .classes(TRANSPORTATION, &["rail", "transit"], single(&styles::RAILWAY))?
        .rule("transportation:ferry", single(&styles::FERRY))?
        .rule("transportation:pier", single(&styles::PIER))?
        .rule("transportation:bridge", single(&styles::BRIDGE))?
        // Construction variants are listed explicitly, no substring matching
        .classes(
            TRANSPORTATION,
            &[
                "motorway_construction",
                "trunk_construction",
                "primary_construction",
                "secondary_construction",
                "tertiary_construction",
                "minor_construction",
                "service_construction",
            ],
            single(&styles::CONSTRUCTION),
        )?;

    b.rule(AEROWAY, single(&styles::AEROWAY))?;

    b.rule(MOUNTAIN_PEAK, single(&styles::MOUNTAIN_PEAK))?
        .rule(POI, single(&styles::POI))?;

    Ok(b.build())
}

/// The built-in basemap rule table
pub static DEFAULT_RULES: Lazy<RuleTable> =
    Lazy::new(|| default_rules().expect("built-in rule table has no duplicate keys"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parse_and_display() {
        let key: RuleKey = "transportation:motorway".parse().unwrap();
        assert_eq!(key, RuleKey::class("transportation", "motorway"));
        assert_eq!(key.to_string(), "transportation:motorway");

        let bare: RuleKey = "building".parse().unwrap();
        assert!(!bare.is_composite());

        assert!("".parse::<RuleKey>().is_err());
        assert!(":motorway".parse::<RuleKey>().is_err());
        assert!("transportation:".parse::<RuleKey>().is_err());
    }

    #[test]
    fn test_exact_then_layer_default() {
        let table = &*DEFAULT_RULES;
        let pool = table.lookup("water", Some("swimming_pool")).unwrap();
        assert!(pool.same_instance(&StyleDirective::Single(&styles::POOL)));

        let unknown_class = table.lookup("water", Some("reservoir")).unwrap();
        assert!(unknown_class.same_instance(&StyleDirective::Single(&styles::WATER)));

        let no_class = table.lookup("building", None).unwrap();
        assert!(no_class.same_instance(&StyleDirective::Single(&styles::BUILDING)));
    }

    #[test]
    fn test_unknown_layer_misses() {
        assert!(DEFAULT_RULES.lookup("housenumber", Some("x")).is_none());
        assert!(DEFAULT_RULES.lookup("housenumber", None).is_none());
    }

    #[test]
    fn test_class_tokens_are_opaque() {
        // No case folding
        let upper = DEFAULT_RULES.lookup("transportation", Some("MOTORWAY")).unwrap();
        assert!(upper.same_instance(&StyleDirective::Layered(&styles::MINOR_ROAD)));
    }

    #[test]
    fn test_every_registered_key_resolves_to_itself() {
        let table = &*DEFAULT_RULES;
        let keys = table.keys();
        assert_eq!(keys.len(), table.len());
        for key in keys {
            let registered = table.get(&key).unwrap();
            let looked_up = table.lookup(&key.layer, key.class.as_deref()).unwrap();
            assert!(registered.same_instance(&looked_up), "{key}");
        }
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let mut builder = RuleTable::builder();
        builder.rule("water", StyleDirective::Single(&styles::WATER)).unwrap();
        assert!(builder.rule("water", StyleDirective::Single(&styles::POOL)).is_err());

        builder.rule("water:lake", StyleDirective::Single(&styles::WATER)).unwrap();
        let err = builder
            .rule("water:lake", StyleDirective::Single(&styles::POOL))
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate rule: water:lake");
    }

    #[test]
    fn test_layer_without_default() {
        let mut builder = RuleTable::builder();
        builder.rule("poi:museum", StyleDirective::Single(&styles::POI)).unwrap();
        let table = builder.build();
        assert!(table.lookup("poi", Some("museum")).is_some());
        assert!(table.lookup("poi", Some("cafe")).is_none());
        assert!(table.contains_layer("poi"));
    }
}
