//! Configuration presets for the style engine
//!
//! A [`StyleProfile`] picks a preset of culling thresholds and road scaling;
//! `Custom` carries fully specified [`StyleOptions`], usually loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_ATTRIBUTION, DEFAULT_SOURCE_ID, DEFAULT_TILES_URL};
use crate::style::{FilterThresholds, RoadWidthScaling};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleProfile {
    Balanced,
    /// Culls detail earlier when zooming out
    Performance,
    /// Keeps detail longer when zooming out
    Detailed,
    Custom(StyleOptions),
}

impl StyleProfile {
    pub fn resolve(&self) -> StyleOptions {
        match self {
            Self::Balanced => StyleOptions {
                thresholds: FilterThresholds::DEFAULT,
                road_scaling: RoadWidthScaling::DEFAULT,
                source: SourceConfig::default(),
            },
            Self::Performance => StyleOptions {
                thresholds: FilterThresholds {
                    building_max_resolution: 20.0,
                    minor_roads_max_resolution: 75.0,
                    small_waterways_max_resolution: 150.0,
                    minor_landuse_max_resolution: 300.0,
                },
                road_scaling: RoadWidthScaling::DEFAULT,
                source: SourceConfig::default(),
            },
            Self::Detailed => StyleOptions {
                thresholds: FilterThresholds {
                    building_max_resolution: 80.0,
                    minor_roads_max_resolution: 300.0,
                    small_waterways_max_resolution: 600.0,
                    minor_landuse_max_resolution: 1_200.0,
                },
                road_scaling: RoadWidthScaling::DEFAULT,
                source: SourceConfig::default(),
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOptions {
    pub thresholds: FilterThresholds,
    pub road_scaling: RoadWidthScaling,
    pub source: SourceConfig,
}

impl StyleOptions {
    /// Parses options from JSON; omitted sections take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: StyleOptions = serde_json::from_str(json)?;
        options.validate()?;

        #[cfg(feature = "debug")]
        log::info!(
            "Loaded style options (building cutoff {} m/px, source '{}')",
            options.thresholds.building_max_resolution,
            options.source.source_id
        );

        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.road_scaling.validate()
    }

    pub fn with_thresholds(mut self, thresholds: FilterThresholds) -> Self {
        #[cfg(feature = "debug")]
        log::debug!("Overriding filter thresholds: {:?}", thresholds);

        self.thresholds = thresholds;
        self
    }

    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = source;
        self
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleProfile::default().resolve()
    }
}

/// Declarative vector tile source, passed through to exported style documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    /// Location of the PMTiles archive, without the `pmtiles://` scheme
    pub url: String,
    pub attribution: String,
    pub source_id: String,
}

impl SourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    /// Source URL as understood by the PMTiles protocol handler
    pub fn tiles_url(&self) -> String {
        if self.url.starts_with("pmtiles://") {
            self.url.clone()
        } else {
            format!("pmtiles://{}", self.url)
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TILES_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            source_id: DEFAULT_SOURCE_ID.to_string(),
        }
    }
}
