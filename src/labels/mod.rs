//! Label priority: tiered fade-in, minzoom gating and placement order.

pub mod fade;
pub mod sort;
pub mod tiers;

pub use fade::{
    fade_in_by_zoom, fade_in_by_zoom_and_rank, stepped_fade_by_rank, FadeStop, RankFadeCurve,
    RANK_FADE, STEPPED_RANK_FADE,
};
pub use sort::{
    class_priority, descending, poi_rank_sort_key, symbol_sort_key, waterway_sort_key,
    LANDMARK_PRIORITIES,
};
pub use tiers::{poi_label_visible, PoiTier, RankTier, TierBands};
