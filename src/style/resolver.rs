//! Per-feature style resolution.
//!
//! Resolution order:
//! 1. hidden layers and resolution-gated category filters
//! 2. per-layer special cases (boundary tiering, road width scaling)
//! 3. the rule table (`layer:class`, then `layer`)
//! 4. the global fallback directive
//!
//! Every step is a lookup or a small arithmetic expression. Nothing here
//! allocates, logs or fails.

use crate::core::config::StyleOptions;
use crate::core::feature::{FeatureProperties, FeatureView};

use super::directive::{styles, StyleDirective};
use super::filter::{FilterThresholds, VisibilityFilter};
use super::rules::{RuleTable, DEFAULT_RULES};
use super::special::{RoadWidthScaling, SpecialCase};

/// Resolves features to directives against one rule table and configuration
#[derive(Debug, Clone)]
pub struct StyleResolver<'t> {
    rules: &'t RuleTable,
    thresholds: FilterThresholds,
    road_scaling: RoadWidthScaling,
    fallback: StyleDirective,
}

impl StyleResolver<'static> {
    /// Resolver over the built-in rule table with default configuration
    pub fn new() -> Self {
        Self::with_rules(&DEFAULT_RULES)
    }

    pub fn from_options(options: &StyleOptions) -> Self {
        Self::new()
            .with_thresholds(options.thresholds)
            .with_road_scaling(options.road_scaling)
    }
}

impl Default for StyleResolver<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> StyleResolver<'t> {
    pub fn with_rules(rules: &'t RuleTable) -> Self {
        Self {
            rules,
            thresholds: FilterThresholds::DEFAULT,
            road_scaling: RoadWidthScaling::DEFAULT,
            fallback: StyleDirective::Single(&styles::DEFAULT),
        }
    }

    pub fn with_thresholds(mut self, thresholds: FilterThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_road_scaling(mut self, road_scaling: RoadWidthScaling) -> Self {
        self.road_scaling = road_scaling;
        self
    }

    /// Replaces the global fallback; it must be one of the pre-built directives
    pub fn with_fallback(mut self, fallback: StyleDirective) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn thresholds(&self) -> &FilterThresholds {
        &self.thresholds
    }

    pub fn rules(&self) -> &'t RuleTable {
        self.rules
    }

    pub fn fallback(&self) -> StyleDirective {
        self.fallback
    }

    /// Resolves a feature with the configured thresholds
    pub fn resolve(&self, feature: &FeatureView<'_>, resolution: Option<f64>) -> StyleDirective {
        self.resolve_with(feature, resolution, &self.thresholds)
    }

    /// Resolves a feature with thresholds overridden for this call only
    pub fn resolve_with(
        &self,
        feature: &FeatureView<'_>,
        resolution: Option<f64>,
        thresholds: &FilterThresholds,
    ) -> StyleDirective {
        if VisibilityFilter::is_hidden(feature, resolution, thresholds) {
            return StyleDirective::Hidden;
        }

        let Some(layer) = feature.layer else {
            return self.fallback;
        };

        if let Some(special) = SpecialCase::for_layer(layer) {
            if let Some(directive) = special.resolve(feature, resolution, &self.road_scaling) {
                return directive;
            }
        }

        self.rules
            .lookup(layer, feature.class)
            .unwrap_or(self.fallback)
    }

    /// Reads the interpreted properties straight from a property bag
    pub fn resolve_properties<P: FeatureProperties + ?Sized>(
        &self,
        properties: &P,
        resolution: Option<f64>,
    ) -> StyleDirective {
        self.resolve(&FeatureView::from_properties(properties), resolution)
    }

    /// A style callback suitable for a vector-tile layer's style hook
    pub fn style_function(&self) -> impl Fn(&FeatureView<'_>, Option<f64>) -> StyleDirective + '_ {
        move |feature, resolution| self.resolve(feature, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hidden_layer_short_circuits() {
        let resolver = StyleResolver::new();
        let place = FeatureView::new("place", Some("city"));
        assert!(resolver.resolve(&place, None).is_hidden());
    }

    #[test]
    fn test_filter_before_special_case() {
        // Service roads are hidden zoomed out even though transportation has a resolver
        let resolver = StyleResolver::new();
        let service = FeatureView::new("transportation", Some("service"));
        assert!(resolver.resolve(&service, Some(1_000.0)).is_hidden());
        let directive = resolver.resolve(&service, Some(50.0));
        assert!(directive.same_instance(&StyleDirective::Layered(&styles::SERVICE_ROAD)));
    }

    #[test]
    fn test_special_case_before_rule_table() {
        let resolver = StyleResolver::new();
        let motorway = FeatureView::new("transportation", Some("motorway"));
        assert!(matches!(
            resolver.resolve(&motorway, Some(200.0)),
            StyleDirective::Scaled(_)
        ));

        let boundary = FeatureView::new("boundary", None).with_admin_level(2.0);
        assert!(resolver
            .resolve(&boundary, None)
            .same_instance(&StyleDirective::Single(&styles::ADMIN_BOUNDARY)));
    }

    #[test]
    fn test_special_case_falls_through() {
        let resolver = StyleResolver::new();
        let primary = FeatureView::new("transportation", Some("primary"));
        assert!(resolver
            .resolve(&primary, Some(200.0))
            .same_instance(&StyleDirective::Layered(&styles::PRIMARY)));
    }

    #[test]
    fn test_global_fallback() {
        let resolver = StyleResolver::new();
        let fallback = StyleDirective::Single(&styles::DEFAULT);
        let unknown = FeatureView::new("housenumber", Some("x"));
        assert!(resolver.resolve(&unknown, Some(1.0)).same_instance(&fallback));
        assert!(resolver
            .resolve(&FeatureView::default(), None)
            .same_instance(&fallback));
    }

    #[test]
    fn test_per_call_threshold_override() {
        let resolver = StyleResolver::new();
        let building = FeatureView::new("building", None);
        let lenient = FilterThresholds::new(100.0, 150.0, 300.0, 600.0).unwrap();
        assert!(resolver.resolve(&building, Some(45.0)).is_hidden());
        assert!(!resolver.resolve_with(&building, Some(45.0), &lenient).is_hidden());
    }

    #[test]
    fn test_resolve_properties() {
        let resolver = StyleResolver::new();
        let props = json!({ "layer": "landcover", "class": "wood" });
        assert!(resolver
            .resolve_properties(&props, Some(20.0))
            .same_instance(&StyleDirective::Single(&styles::FOREST)));

        // Mistyped class falls back to the layer default
        let props = json!({ "layer": "landcover", "class": 42 });
        assert!(resolver
            .resolve_properties(&props, Some(20.0))
            .same_instance(&StyleDirective::Single(&styles::GRASS)));
    }

    #[test]
    fn test_style_function_matches_resolve() {
        let resolver = StyleResolver::new();
        let style = resolver.style_function();
        let water = FeatureView::new("water", Some("lake"));
        assert_eq!(style(&water, Some(3.0)), resolver.resolve(&water, Some(3.0)));
    }

    #[test]
    fn test_custom_rule_table() {
        let mut builder = RuleTable::builder();
        builder
            .rule("water", StyleDirective::Single(&styles::POOL))
            .unwrap();
        let table = builder.build();
        let resolver = StyleResolver::with_rules(&table);
        let water = FeatureView::new("water", Some("lake"));
        assert!(resolver
            .resolve(&water, None)
            .same_instance(&StyleDirective::Single(&styles::POOL)));
    }
}
