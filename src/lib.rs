//! # tilestyle
//!
//! Rendering-directive resolution for vector-tile basemaps.
//!
//! Per-feature styling runs a fixed chain: hidden layers and resolution
//! filters, per-layer special cases, the `(layer, class)` rule table and a
//! global fallback. Labels get tiered fade-in curves and sort keys, and the
//! whole basemap is composed into an ordered layer stack that can be exported
//! as a MapLibre style document.

pub mod animation;
pub mod composition;
pub mod core;
pub mod labels;
pub mod prelude;
pub mod style;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{SourceConfig, StyleOptions, StyleProfile},
    feature::{FeatureProperties, FeatureView, PropertyValue},
    viewport::Viewport,
};

pub use style::{
    Color, FilterThresholds, RoadWidthScaling, RuleKey, RuleTable, Style, StyleDirective,
    StyleResolver, VisibilityFilter,
};

pub use labels::{PoiTier, RankTier};

pub use composition::{compose, create_style, Composition, LayerRule, StyleDocument};

pub use animation::{building_fade::BuildingFade, interpolation::EasingFunction};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration and construction errors
///
/// Per-feature resolution never fails; these only arise while building rule
/// tables, compositions or options.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Invalid threshold {name}: {value} (must be positive and finite)")]
    InvalidThreshold { name: String, value: f64 },

    #[error("Invalid road scaling {name}: {reason}")]
    InvalidRoadScaling { name: String, reason: String },

    #[error("Invalid rule key: {0:?}")]
    InvalidRuleKey(String),

    #[error("Duplicate rule: {0}")]
    DuplicateRule(String),

    #[error("Duplicate layer id: {0}")]
    DuplicateLayerId(String),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = StyleError;
