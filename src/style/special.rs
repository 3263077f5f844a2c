//! Per-layer overrides for features whose style depends on more than
//! `(layer, class)`.
//!
//! Consulted after the visibility filter and before the rule table. `None`
//! means "no override, fall through to the rule table".

use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::directive::{colors, styles, Stroke, Style, StyleDirective};
use crate::core::constants::{layers, ADMIN_BOUNDARY_MAX_LEVEL};
use crate::core::feature::FeatureView;
use crate::{Error, Result};

fn invalid(name: &str, reason: impl Into<String>) -> Error {
    Error::InvalidRoadScaling {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Logarithmic stroke-width curve over resolution
///
/// `width = base * (1 + log2(reference / resolution + 1) * dampening)`, clamped to
/// `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidthScale {
    pub base: f64,
    pub reference_resolution: f64,
    pub min: f64,
    pub max: f64,
    pub dampening: f64,
}

impl WidthScale {
    pub const fn new(base: f64, min: f64, max: f64) -> Self {
        Self {
            base,
            reference_resolution: 100.0,
            min,
            max,
            dampening: 0.5,
        }
    }

    /// Bounds must be positive and finite with `min <= max`
    pub fn validate(&self, name: &str) -> Result<()> {
        let fields = [
            ("base", self.base),
            ("referenceResolution", self.reference_resolution),
            ("min", self.min),
            ("max", self.max),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(
                    name,
                    format!("{field} = {value} (must be positive and finite)"),
                ));
            }
        }
        if !self.dampening.is_finite() {
            return Err(invalid(name, format!("dampening = {}", self.dampening)));
        }
        if self.min > self.max {
            return Err(invalid(
                name,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }

    /// Width at `resolution`, always within `[min, max]`
    ///
    /// Non-positive resolutions are treated as infinitely zoomed in and
    /// infinite ones as infinitely zoomed out.
    pub fn width_at(&self, resolution: f64) -> f64 {
        let width = if resolution <= 0.0 {
            self.max
        } else {
            let ratio = self.reference_resolution / resolution;
            self.base * (1.0 + (ratio + 1.0).log2() * self.dampening)
        };
        if width.is_nan() {
            return self.base.clamp(self.min, self.max);
        }
        width.clamp(self.min, self.max)
    }
}

/// Continuous casing/fill widths for motorways and trunk roads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadWidthScaling {
    pub casing: WidthScale,
    pub fill: WidthScale,
    /// Below this resolution the fixed deep-zoom widths apply
    pub deep_zoom_cutoff: f64,
    pub deep_zoom_casing_width: f64,
    pub deep_zoom_fill_width: f64,
    pub casing_color: Color,
    pub fill_color: Color,
}

impl RoadWidthScaling {
    /// Road classes this scaling applies to
    pub const CLASSES: &'static [&'static str] = &["motorway", "trunk"];

    pub const DEFAULT: RoadWidthScaling = RoadWidthScaling {
        casing: WidthScale::new(7.0, 2.0, 8.0),
        fill: WidthScale::new(5.0, 1.5, 6.0),
        deep_zoom_cutoff: 10.0,
        deep_zoom_casing_width: 8.0,
        deep_zoom_fill_width: 6.0,
        casing_color: colors::MOTORWAY_OUTLINE,
        fill_color: colors::MOTORWAY,
    };

    pub fn validate(&self) -> Result<()> {
        self.casing.validate("casing")?;
        self.fill.validate("fill")?;
        if !self.deep_zoom_cutoff.is_finite() || self.deep_zoom_cutoff <= 0.0 {
            return Err(invalid(
                "deepZoomCutoff",
                format!("{} (must be positive and finite)", self.deep_zoom_cutoff),
            ));
        }
        let widths = [
            ("deepZoomCasingWidth", self.deep_zoom_casing_width),
            ("deepZoomFillWidth", self.deep_zoom_fill_width),
        ];
        for (name, width) in widths {
            if !width.is_finite() {
                return Err(invalid(name, format!("{width} (must be finite)")));
            }
        }
        Ok(())
    }

    pub fn applies_to(class: Option<&str>) -> bool {
        class.map_or(false, |c| Self::CLASSES.contains(&c))
    }

    /// `(casing, fill)` widths at `resolution`
    pub fn widths(&self, resolution: f64) -> (f64, f64) {
        if resolution < self.deep_zoom_cutoff {
            (
                self.deep_zoom_casing_width.clamp(self.casing.min, self.casing.max),
                self.deep_zoom_fill_width.clamp(self.fill.min, self.fill.max),
            )
        } else {
            (self.casing.width_at(resolution), self.fill.width_at(resolution))
        }
    }

    /// Two-stroke directive; the static motorway style when resolution is unknown
    pub fn directive(&self, resolution: Option<f64>) -> StyleDirective {
        match resolution.filter(|r| !r.is_nan()) {
            None => StyleDirective::Layered(&styles::MOTORWAY),
            Some(resolution) => {
                let (casing, fill) = self.widths(resolution);
                StyleDirective::Scaled([
                    Style::line(Stroke::new(self.casing_color, casing)),
                    Style::line(Stroke::new(self.fill_color, fill)),
                ])
            }
        }
    }
}

impl Default for RoadWidthScaling {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Boundary style chosen by administrative level
///
/// Levels at or below 4 (countries, states) get the bolder dashed style; a
/// missing level counts as non-administrative.
pub fn boundary_directive(feature: &FeatureView<'_>) -> StyleDirective {
    match feature.admin_level {
        Some(level) if level <= ADMIN_BOUNDARY_MAX_LEVEL => {
            StyleDirective::Single(&styles::ADMIN_BOUNDARY)
        }
        _ => StyleDirective::Single(&styles::BOUNDARY),
    }
}

/// The closed set of per-layer overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialCase {
    BoundaryTiering,
    RoadWidthScaling,
}

impl SpecialCase {
    /// The override registered for `layer`, if any
    pub fn for_layer(layer: &str) -> Option<SpecialCase> {
        SPECIAL_CASES.get(layer).copied()
    }

    pub fn resolve(
        &self,
        feature: &FeatureView<'_>,
        resolution: Option<f64>,
        road_scaling: &RoadWidthScaling,
    ) -> Option<StyleDirective> {
        match self {
            SpecialCase::BoundaryTiering => Some(boundary_directive(feature)),
            SpecialCase::RoadWidthScaling => RoadWidthScaling::applies_to(feature.class)
                .then(|| road_scaling.directive(resolution)),
        }
    }
}

/// Layer name to override, built once
pub static SPECIAL_CASES: Lazy<FxHashMap<&'static str, SpecialCase>> = Lazy::new(|| {
    [
        (layers::BOUNDARY, SpecialCase::BoundaryTiering),
        (layers::TRANSPORTATION, SpecialCase::RoadWidthScaling),
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESOLUTIONS: [f64; 12] = [
        0.0, 1e-9, 0.5, 9.99, 10.0, 25.0, 100.0, 150.0, 1_000.0, 1e6, 1e300, f64::INFINITY,
    ];

    #[test]
    fn test_widths_stay_in_bounds() {
        let scaling = RoadWidthScaling::DEFAULT;
        for r in SAMPLE_RESOLUTIONS {
            let (casing, fill) = scaling.widths(r);
            assert!((2.0..=8.0).contains(&casing), "casing {casing} at {r}");
            assert!((1.5..=6.0).contains(&fill), "fill {fill} at {r}");
        }
    }

    #[test]
    fn test_reference_resolution_width() {
        // ratio 1 => log2(2) = 1 => base * 1.5, then clamped
        let casing = WidthScale::new(7.0, 2.0, 8.0).width_at(100.0);
        assert_eq!(casing, 8.0);
        let unclamped = WidthScale::new(4.0, 1.0, 10.0).width_at(100.0);
        assert!((unclamped - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_widths_approach_bounds() {
        let scale = WidthScale::new(4.0, 1.0, 10.0);
        // Zoomed far out the log term vanishes and the base width remains
        assert!((scale.width_at(1e12) - 4.0).abs() < 1e-6);
        // Zoomed far in the width saturates at max
        assert_eq!(scale.width_at(1e-6), 10.0);
    }

    #[test]
    fn test_widths_monotonic_in_resolution() {
        let scale = WidthScale::new(3.0, 1.0, 20.0);
        let mut previous = f64::INFINITY;
        for r in [1.0, 5.0, 20.0, 100.0, 500.0, 5_000.0] {
            let w = scale.width_at(r);
            assert!(w <= previous);
            previous = w;
        }
    }

    #[test]
    fn test_deep_zoom_fixed_widths() {
        let scaling = RoadWidthScaling::DEFAULT;
        assert_eq!(scaling.widths(5.0), (8.0, 6.0));
        assert_eq!(scaling.widths(0.0), (8.0, 6.0));
        assert_eq!(scaling.widths(-3.0), (8.0, 6.0));
    }

    #[test]
    fn test_unknown_resolution_uses_static_style() {
        let directive = RoadWidthScaling::DEFAULT.directive(None);
        assert!(directive.same_instance(&StyleDirective::Layered(&styles::MOTORWAY)));
        let nan = RoadWidthScaling::DEFAULT.directive(Some(f64::NAN));
        assert!(nan.same_instance(&StyleDirective::Layered(&styles::MOTORWAY)));
    }

    #[test]
    fn test_scaled_directive_colors() {
        let directive = RoadWidthScaling::DEFAULT.directive(Some(500.0));
        let layers = directive.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].stroke.unwrap().color, colors::MOTORWAY_OUTLINE);
        assert_eq!(layers[1].stroke.unwrap().color, colors::MOTORWAY);
        assert!(layers[0].stroke.unwrap().width >= layers[1].stroke.unwrap().width);
    }

    #[test]
    fn test_default_scaling_is_valid() {
        assert!(RoadWidthScaling::DEFAULT.validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut scaling = RoadWidthScaling::DEFAULT;
        scaling.casing.min = 8.0;
        scaling.casing.max = 2.0;
        let err = scaling.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidRoadScaling { ref name, .. } if name == "casing"));
    }

    #[test]
    fn test_non_finite_scaling_rejected() {
        let mut scaling = RoadWidthScaling::DEFAULT;
        scaling.fill.max = f64::NAN;
        assert!(scaling.validate().is_err());

        let mut scaling = RoadWidthScaling::DEFAULT;
        scaling.fill.base = 0.0;
        assert!(scaling.validate().is_err());

        let mut scaling = RoadWidthScaling::DEFAULT;
        scaling.deep_zoom_cutoff = -1.0;
        assert!(scaling.validate().is_err());

        let mut scaling = RoadWidthScaling::DEFAULT;
        scaling.deep_zoom_fill_width = f64::INFINITY;
        assert!(scaling.validate().is_err());
    }

    #[test]
    fn test_boundary_tiering() {
        let country = FeatureView::new("boundary", None).with_admin_level(2.0);
        let state = FeatureView::new("boundary", None).with_admin_level(4.0);
        let district = FeatureView::new("boundary", None).with_admin_level(6.0);
        let unknown = FeatureView::new("boundary", None);

        let admin = StyleDirective::Single(&styles::ADMIN_BOUNDARY);
        let generic = StyleDirective::Single(&styles::BOUNDARY);
        assert!(boundary_directive(&country).same_instance(&admin));
        assert!(boundary_directive(&state).same_instance(&admin));
        assert!(boundary_directive(&district).same_instance(&generic));
        assert!(boundary_directive(&unknown).same_instance(&generic));
    }

    #[test]
    fn test_road_override_only_for_major_classes() {
        let scaling = RoadWidthScaling::DEFAULT;
        let case = SpecialCase::for_layer("transportation").unwrap();
        let trunk = FeatureView::new("transportation", Some("trunk"));
        let primary = FeatureView::new("transportation", Some("primary"));
        assert!(case.resolve(&trunk, Some(200.0), &scaling).is_some());
        assert!(case.resolve(&primary, Some(200.0), &scaling).is_none());
        assert!(SpecialCase::for_layer("water").is_none());
    }
}
