//! Prelude module for common tilestyle types and traits
//!
//! `use tilestyle::prelude::*;` brings in everything needed to resolve
//! features and compose a style.

pub use crate::core::{
    config::{SourceConfig, StyleOptions, StyleProfile},
    feature::{FeatureProperties, FeatureView, PropertyValue},
    viewport::{resolution_for_zoom, zoom_for_resolution, Viewport},
};

pub use crate::style::{
    styles, Color, FilterThresholds, RoadWidthScaling, RuleKey, RuleTable, Stroke, Style,
    StyleDirective, StyleResolver, VisibilityFilter,
};

pub use crate::labels::{
    fade_in_by_zoom, fade_in_by_zoom_and_rank, poi_label_visible, stepped_fade_by_rank,
    symbol_sort_key, PoiTier, RankTier,
};

pub use crate::composition::{
    compose, create_style, layer_ids, Composition, Filter, GroupKind, LayerRule, StyleDocument,
    SymbolState,
};

pub use crate::animation::{BuildingFade, EasingFunction, Interpolation};

pub use crate::{Error, Result};
