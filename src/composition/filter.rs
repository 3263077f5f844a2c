//! Layer filters over feature properties.
//!
//! Semantics follow the legacy MapLibre filter syntax: comparisons against a
//! missing property are false, except `!=` and `!in` which are true.

use serde_json::{json, Value};

use crate::core::feature::{keys, FeatureView, PropertyValue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Str(&'static str),
    Number(f64),
}

impl Literal {
    fn matches(&self, value: PropertyValue<'_>) -> bool {
        match (self, value) {
            (Literal::Str(expected), PropertyValue::String(actual)) => *expected == actual,
            (Literal::Number(expected), PropertyValue::Number(actual)) => *expected == actual,
            _ => false,
        }
    }

    fn to_json(self) -> Value {
        match self {
            Literal::Str(s) => json!(s),
            Literal::Number(n) => json!(n),
        }
    }
}

impl From<&'static str> for Literal {
    fn from(value: &'static str) -> Self {
        Literal::Str(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All(Vec<Filter>),
    Any(Vec<Filter>),
    Has(&'static str),
    NotHas(&'static str),
    Eq(&'static str, Literal),
    Ne(&'static str, Literal),
    Le(&'static str, f64),
    Ge(&'static str, f64),
    In(&'static str, &'static [&'static str]),
    NotIn(&'static str, &'static [&'static str]),
}

impl Filter {
    pub fn eq(key: &'static str, value: impl Into<Literal>) -> Self {
        Filter::Eq(key, value.into())
    }

    pub fn ne(key: &'static str, value: impl Into<Literal>) -> Self {
        Filter::Ne(key, value.into())
    }

    /// `class` is one of `classes`
    pub fn classes(classes: &'static [&'static str]) -> Self {
        Filter::In(keys::CLASS, classes)
    }

    /// Unranked features pass, ranked ones only up to `max_rank`
    pub fn rank_limit(max_rank: f64) -> Self {
        Filter::Any(vec![Filter::NotHas(keys::RANK), Filter::Le(keys::RANK, max_rank)])
    }

    pub fn matches(&self, feature: &FeatureView<'_>) -> bool {
        match self {
            Filter::All(filters) => filters.iter().all(|f| f.matches(feature)),
            Filter::Any(filters) => filters.iter().any(|f| f.matches(feature)),
            Filter::Has(key) => property(feature, key).is_some(),
            Filter::NotHas(key) => property(feature, key).is_none(),
            Filter::Eq(key, literal) => {
                property(feature, key).map_or(false, |v| literal.matches(v))
            }
            Filter::Ne(key, literal) => {
                !property(feature, key).map_or(false, |v| literal.matches(v))
            }
            Filter::Le(key, bound) => number(feature, key).map_or(false, |n| n <= *bound),
            Filter::Ge(key, bound) => number(feature, key).map_or(false, |n| n >= *bound),
            Filter::In(key, values) => {
                string(feature, key).map_or(false, |s| values.contains(&s))
            }
            Filter::NotIn(key, values) => {
                !string(feature, key).map_or(false, |s| values.contains(&s))
            }
        }
    }

    /// Legacy filter array, e.g. `["in", "class", "river", "canal"]`
    pub fn to_expression(&self) -> Value {
        match self {
            Filter::All(filters) => combinator("all", filters),
            Filter::Any(filters) => combinator("any", filters),
            Filter::Has(key) => json!(["has", key]),
            Filter::NotHas(key) => json!(["!has", key]),
            Filter::Eq(key, literal) => json!(["==", key, literal.to_json()]),
            Filter::Ne(key, literal) => json!(["!=", key, literal.to_json()]),
            Filter::Le(key, bound) => json!(["<=", key, bound]),
            Filter::Ge(key, bound) => json!([">=", key, bound]),
            Filter::In(key, values) => membership("in", key, values),
            Filter::NotIn(key, values) => membership("!in", key, values),
        }
    }
}

fn combinator(op: &str, filters: &[Filter]) -> Value {
    let mut expression = vec![json!(op)];
    expression.extend(filters.iter().map(Filter::to_expression));
    Value::Array(expression)
}

fn membership(op: &str, key: &str, values: &[&str]) -> Value {
    let mut expression = vec![json!(op), json!(key)];
    expression.extend(values.iter().map(|v| json!(v)));
    Value::Array(expression)
}

/// The interpreted properties a filter can reference
fn property<'a>(feature: &FeatureView<'a>, key: &str) -> Option<PropertyValue<'a>> {
    match key {
        keys::CLASS => feature.class.map(PropertyValue::String),
        keys::SUBCLASS => feature.subclass.map(PropertyValue::String),
        keys::NAME => feature.name.map(PropertyValue::String),
        keys::RANK => feature.rank.map(PropertyValue::Number),
        keys::ADMIN_LEVEL => feature.admin_level.map(PropertyValue::Number),
        keys::CAPITAL => feature.capital.map(PropertyValue::Number),
        _ => None,
    }
}

fn number(feature: &FeatureView<'_>, key: &str) -> Option<f64> {
    property(feature, key).and_then(|v| v.as_number())
}

fn string<'a>(feature: &FeatureView<'a>, key: &str) -> Option<&'a str> {
    property(feature, key).and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_membership() {
        let filter = Filter::classes(&["river", "canal", "stream"]);
        assert!(filter.matches(&FeatureView::new("waterway", Some("canal"))));
        assert!(!filter.matches(&FeatureView::new("waterway", Some("ditch"))));
        assert!(!filter.matches(&FeatureView::new("waterway", None)));
    }

    #[test]
    fn test_missing_property_semantics() {
        let unranked = FeatureView::new("poi", Some("cafe"));
        assert!(!Filter::Le(keys::RANK, 14.0).matches(&unranked));
        assert!(!Filter::eq(keys::CAPITAL, 2.0).matches(&unranked));
        assert!(Filter::ne(keys::CAPITAL, 2.0).matches(&unranked));
        assert!(Filter::NotIn(keys::SUBCLASS, &["station"]).matches(&unranked));
        assert!(Filter::rank_limit(5.0).matches(&unranked));
    }

    #[test]
    fn test_combinators() {
        let capital = Filter::All(vec![
            Filter::eq(keys::CLASS, "city"),
            Filter::eq(keys::CAPITAL, 2.0),
        ]);
        let bangkok = FeatureView::new("place", Some("city")).with_capital(2.0);
        let chiang_mai = FeatureView::new("place", Some("city")).with_capital(4.0);
        assert!(capital.matches(&bangkok));
        assert!(!capital.matches(&chiang_mai));
    }

    #[test]
    fn test_rank_limit() {
        let filter = Filter::rank_limit(5.0);
        assert!(filter.matches(&FeatureView::new("poi", None).with_rank(5.0)));
        assert!(!filter.matches(&FeatureView::new("poi", None).with_rank(6.0)));
    }

    #[test]
    fn test_expression_export() {
        assert_eq!(
            Filter::classes(&["rail", "transit"]).to_expression(),
            json!(["in", "class", "rail", "transit"])
        );
        assert_eq!(
            Filter::All(vec![Filter::Has(keys::NAME), Filter::Ge(keys::RANK, 25.0)])
                .to_expression(),
            json!(["all", ["has", "name"], [">=", "rank", 25.0]])
        );
        assert_eq!(
            Filter::eq(keys::ADMIN_LEVEL, 2.0).to_expression(),
            json!(["==", "admin_level", 2.0])
        );
    }
}
