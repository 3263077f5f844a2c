//! Resolution-dependent feature culling.
//!
//! Higher resolution means more zoomed out. Each category rule hides its
//! features once the resolution exceeds the category's cutoff; an unknown
//! resolution never hides anything.

use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::constants::layers;
use crate::core::feature::FeatureView;
use crate::{Error, Result};

/// Layers that are never drawn by the per-feature path
///
/// Place and road names are rendered as symbols by the layer stack instead.
pub static HIDDEN_LAYERS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        layers::PLACE,
        layers::TRANSPORTATION_NAME,
        layers::AERODROME_LABEL,
    ]
    .into_iter()
    .collect()
});

/// Road classes dropped when zoomed out; a road with no class counts as minor
pub const MINOR_ROAD_CLASSES: &[&str] = &["minor", "service", "street"];

pub const SMALL_WATERWAY_CLASSES: &[&str] = &["ditch", "drain"];

/// Land-use classes kept at every resolution
pub const MAJOR_LANDUSE_CLASSES: &[&str] = &["residential", "commercial", "industrial", "retail"];

/// Resolution cutoffs in meters per pixel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterThresholds {
    /// Hide buildings above this resolution (zoom < 12)
    pub building_max_resolution: f64,
    /// Hide minor roads above this resolution (zoom < 10)
    pub minor_roads_max_resolution: f64,
    /// Hide small waterways above this resolution (zoom < 9)
    pub small_waterways_max_resolution: f64,
    /// Hide minor land use above this resolution (zoom < 8)
    pub minor_landuse_max_resolution: f64,
}

impl FilterThresholds {
    /// The process-wide default cutoffs
    pub const DEFAULT: FilterThresholds = FilterThresholds {
        building_max_resolution: 40.0,
        minor_roads_max_resolution: 150.0,
        small_waterways_max_resolution: 300.0,
        minor_landuse_max_resolution: 600.0,
    };

    pub fn new(
        building_max_resolution: f64,
        minor_roads_max_resolution: f64,
        small_waterways_max_resolution: f64,
        minor_landuse_max_resolution: f64,
    ) -> Result<Self> {
        let thresholds = Self {
            building_max_resolution,
            minor_roads_max_resolution,
            small_waterways_max_resolution,
            minor_landuse_max_resolution,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Every cutoff must be a positive, finite resolution
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("buildingMaxResolution", self.building_max_resolution),
            ("minorRoadsMaxResolution", self.minor_roads_max_resolution),
            ("smallWaterwaysMaxResolution", self.small_waterways_max_resolution),
            ("minorLanduseMaxResolution", self.minor_landuse_max_resolution),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidThreshold {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Multiplies every cutoff by `factor`; larger factors keep features longer
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        Self::new(
            self.building_max_resolution * factor,
            self.minor_roads_max_resolution * factor,
            self.small_waterways_max_resolution * factor,
            self.minor_landuse_max_resolution * factor,
        )
    }
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Returns the resolution if it is usable for comparisons
fn known(resolution: Option<f64>) -> Option<f64> {
    resolution.filter(|r| !r.is_nan())
}

pub fn should_hide_building(resolution: Option<f64>, thresholds: &FilterThresholds) -> bool {
    known(resolution).map_or(false, |r| r > thresholds.building_max_resolution)
}

pub fn should_hide_minor_road(
    layer: &str,
    class: Option<&str>,
    resolution: Option<f64>,
    thresholds: &FilterThresholds,
) -> bool {
    let Some(resolution) = known(resolution) else {
        return false;
    };
    if layer != layers::TRANSPORTATION || resolution <= thresholds.minor_roads_max_resolution {
        return false;
    }
    class.map_or(true, |c| MINOR_ROAD_CLASSES.contains(&c))
}

pub fn should_hide_small_waterway(
    layer: &str,
    class: Option<&str>,
    resolution: Option<f64>,
    thresholds: &FilterThresholds,
) -> bool {
    let Some(resolution) = known(resolution) else {
        return false;
    };
    if layer != layers::WATERWAY || resolution <= thresholds.small_waterways_max_resolution {
        return false;
    }
    class.map_or(false, |c| SMALL_WATERWAY_CLASSES.contains(&c))
}

/// Unclassified land use is kept: there is nothing to rank it by
pub fn should_hide_minor_landuse(
    layer: &str,
    class: Option<&str>,
    resolution: Option<f64>,
    thresholds: &FilterThresholds,
) -> bool {
    let Some(resolution) = known(resolution) else {
        return false;
    };
    if layer != layers::LANDUSE || resolution <= thresholds.minor_landuse_max_resolution {
        return false;
    }
    class.map_or(false, |c| !MAJOR_LANDUSE_CLASSES.contains(&c))
}

/// Decides whether a feature is dropped before any style lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityFilter;

impl VisibilityFilter {
    /// True when the layer is in [`HIDDEN_LAYERS`]
    pub fn is_hidden_layer(layer: &str) -> bool {
        HIDDEN_LAYERS.contains(layer)
    }

    /// True when any resolution-gated category rule hides the feature
    pub fn is_hidden_by_zoom(
        feature: &FeatureView<'_>,
        resolution: Option<f64>,
        thresholds: &FilterThresholds,
    ) -> bool {
        let Some(layer) = feature.layer else {
            return false;
        };
        let class = feature.class;

        (layer == layers::BUILDING && should_hide_building(resolution, thresholds))
            || should_hide_minor_road(layer, class, resolution, thresholds)
            || should_hide_small_waterway(layer, class, resolution, thresholds)
            || should_hide_minor_landuse(layer, class, resolution, thresholds)
    }

    pub fn is_hidden(
        feature: &FeatureView<'_>,
        resolution: Option<f64>,
        thresholds: &FilterThresholds,
    ) -> bool {
        feature.layer.map_or(false, Self::is_hidden_layer)
            || Self::is_hidden_by_zoom(feature, resolution, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: FilterThresholds = FilterThresholds::DEFAULT;

    #[test]
    fn test_hidden_layers_ignore_resolution() {
        for layer in ["place", "transportation_name", "aerodrome_label"] {
            let feature = FeatureView::new(layer, None);
            assert!(VisibilityFilter::is_hidden(&feature, None, &DEFAULTS));
            assert!(VisibilityFilter::is_hidden(&feature, Some(0.1), &DEFAULTS));
        }
    }

    #[test]
    fn test_building_threshold() {
        let building = FeatureView::new("building", None);
        assert!(VisibilityFilter::is_hidden(&building, Some(45.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&building, Some(40.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&building, None, &DEFAULTS));
    }

    #[test]
    fn test_minor_roads() {
        for class in [Some("minor"), Some("service"), Some("street"), None] {
            let road = FeatureView::new("transportation", class);
            assert!(VisibilityFilter::is_hidden(&road, Some(151.0), &DEFAULTS));
            assert!(!VisibilityFilter::is_hidden(&road, Some(150.0), &DEFAULTS));
        }
        let primary = FeatureView::new("transportation", Some("primary"));
        assert!(!VisibilityFilter::is_hidden(&primary, Some(10_000.0), &DEFAULTS));
    }

    #[test]
    fn test_small_waterways() {
        let ditch = FeatureView::new("waterway", Some("ditch"));
        let river = FeatureView::new("waterway", Some("river"));
        let unclassed = FeatureView::new("waterway", None);
        assert!(VisibilityFilter::is_hidden(&ditch, Some(301.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&ditch, Some(299.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&river, Some(5_000.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&unclassed, Some(5_000.0), &DEFAULTS));
    }

    #[test]
    fn test_minor_landuse() {
        let cemetery = FeatureView::new("landuse", Some("cemetery"));
        let residential = FeatureView::new("landuse", Some("residential"));
        let unclassed = FeatureView::new("landuse", None);
        assert!(VisibilityFilter::is_hidden(&cemetery, Some(601.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&cemetery, Some(600.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&residential, Some(10_000.0), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&unclassed, Some(10_000.0), &DEFAULTS));
    }

    #[test]
    fn test_rules_do_not_leak_across_layers() {
        // "minor" only matters on transportation, "ditch" only on waterway
        let minor_landcover = FeatureView::new("landcover", Some("minor"));
        let ditch_landuse = FeatureView::new("water", Some("ditch"));
        assert!(!VisibilityFilter::is_hidden(&minor_landcover, Some(1e6), &DEFAULTS));
        assert!(!VisibilityFilter::is_hidden(&ditch_landuse, Some(1e6), &DEFAULTS));
    }

    #[test]
    fn test_unknown_resolution_fails_open() {
        let building = FeatureView::new("building", None);
        assert!(!VisibilityFilter::is_hidden(&building, Some(f64::NAN), &DEFAULTS));
        let no_layer = FeatureView::default();
        assert!(!VisibilityFilter::is_hidden(&no_layer, Some(1e9), &DEFAULTS));
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = FilterThresholds::new(10.0, 50.0, 100.0, 200.0).unwrap();
        let building = FeatureView::new("building", None);
        assert!(VisibilityFilter::is_hidden(&building, Some(20.0), &strict));
        assert!(!VisibilityFilter::is_hidden(&building, Some(20.0), &DEFAULTS));
    }

    #[test]
    fn test_threshold_validation() {
        assert!(FilterThresholds::new(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(FilterThresholds::new(1.0, -1.0, 1.0, 1.0).is_err());
        assert!(FilterThresholds::new(1.0, 1.0, f64::INFINITY, 1.0).is_err());
        assert!(FilterThresholds::DEFAULT.validate().is_ok());
        assert!(FilterThresholds::DEFAULT.scaled(0.0).is_err());
        assert_eq!(
            FilterThresholds::DEFAULT.scaled(2.0).unwrap().building_max_resolution,
            80.0
        );
    }
}
