//! Typed, defensive access to vector-tile feature properties.
//!
//! Tile decoders hand us loosely typed property bags. Everything that reaches the
//! style engine goes through [`FeatureView`], which treats wrongly typed values as
//! absent instead of failing.

use fxhash::FxHashMap;
use serde_json::Value;
use std::collections::HashMap;

/// Property keys the engine interprets
pub mod keys {
    pub const LAYER: &str = "layer";
    pub const CLASS: &str = "class";
    pub const SUBCLASS: &str = "subclass";
    pub const RANK: &str = "rank";
    pub const ADMIN_LEVEL: &str = "admin_level";
    pub const CAPITAL: &str = "capital";
    pub const NAME: &str = "name";
    pub const NAME_EN: &str = "name_en";
    pub const NAME_EN_COLON: &str = "name:en";
}

/// A borrowed property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    String(&'a str),
    Number(f64),
    Bool(bool),
    /// Null, arrays and objects
    Other,
}

impl<'a> PropertyValue<'a> {
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::String(s) => PropertyValue::String(s),
            Value::Number(n) => n.as_f64().map_or(PropertyValue::Other, PropertyValue::Number),
            Value::Bool(b) => PropertyValue::Bool(*b),
            _ => PropertyValue::Other,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Finite numbers only; NaN and infinities are treated as absent
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

/// Read-only access to a feature's named properties
pub trait FeatureProperties {
    fn get(&self, key: &str) -> Option<PropertyValue<'_>>;

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_number())
    }

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl FeatureProperties for serde_json::Map<String, Value> {
    fn get(&self, key: &str) -> Option<PropertyValue<'_>> {
        serde_json::Map::get(self, key).map(PropertyValue::from_json)
    }
}

impl FeatureProperties for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<PropertyValue<'_>> {
        HashMap::get(self, key).map(PropertyValue::from_json)
    }
}

impl FeatureProperties for FxHashMap<String, Value> {
    fn get(&self, key: &str) -> Option<PropertyValue<'_>> {
        FxHashMap::get(self, key).map(PropertyValue::from_json)
    }
}

impl FeatureProperties for Value {
    fn get(&self, key: &str) -> Option<PropertyValue<'_>> {
        self.as_object().and_then(|map| FeatureProperties::get(map, key))
    }
}

/// The subset of a feature the style engine reads, validated once per feature
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureView<'a> {
    pub layer: Option<&'a str>,
    pub class: Option<&'a str>,
    pub subclass: Option<&'a str>,
    pub rank: Option<f64>,
    pub admin_level: Option<f64>,
    pub capital: Option<f64>,
    pub name: Option<&'a str>,
}

impl<'a> FeatureView<'a> {
    /// Builds a view for a feature in `layer` with an optional class
    pub fn new(layer: &'a str, class: Option<&'a str>) -> Self {
        Self {
            layer: Some(layer),
            class,
            ..Self::default()
        }
    }

    /// Reads and type-checks the interpreted properties of a feature
    pub fn from_properties<P: FeatureProperties + ?Sized>(properties: &'a P) -> Self {
        Self {
            layer: properties.get_str(keys::LAYER),
            class: non_empty(properties.get_str(keys::CLASS)),
            subclass: non_empty(properties.get_str(keys::SUBCLASS)),
            rank: properties.get_number(keys::RANK),
            admin_level: properties.get_number(keys::ADMIN_LEVEL),
            capital: properties.get_number(keys::CAPITAL),
            name: localized_name(properties),
        }
    }

    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = Some(rank).filter(|r| r.is_finite());
        self
    }

    pub fn with_admin_level(mut self, level: f64) -> Self {
        self.admin_level = Some(level).filter(|l| l.is_finite());
        self
    }

    pub fn with_subclass(mut self, subclass: &'a str) -> Self {
        self.subclass = Some(subclass);
        self
    }

    pub fn with_capital(mut self, capital: f64) -> Self {
        self.capital = Some(capital).filter(|c| c.is_finite());
        self
    }

    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn layer(&self) -> Option<&'a str> {
        self.layer
    }

    pub fn class(&self) -> Option<&'a str> {
        self.class
    }
}

/// An empty class string carries no information and is treated as absent
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// English name with fallbacks: `name_en`, then `name:en`, then `name`
fn localized_name<P: FeatureProperties + ?Sized>(properties: &P) -> Option<&str> {
    [keys::NAME_EN, keys::NAME_EN_COLON, keys::NAME]
        .into_iter()
        .find_map(|key| non_empty(properties.get_str(key)))
}
