//! Zoom-indexed label opacity curves.
//!
//! A rank fade curve is a family of piecewise-linear curves, one per rank
//! tier, anchored at a per-category base zoom. Every curve is exactly 0 up to
//! `base_zoom - 0.5` and reaches 1 at its last stop; more important tiers
//! reach full opacity sooner.

use super::tiers::{RankTier, TierBands, FADE_BANDS, STEPPED_BANDS};
use crate::animation::{Interpolatable, Interpolation};

/// Ranks considered by the rank fade; missing ranks default to half of it
pub const DEFAULT_MAX_RANK: f64 = 20.0;

/// Opacity of each tier at `base_zoom + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStop {
    pub offset: f64,
    pub opacity: [f64; 4],
}

impl FadeStop {
    pub const fn new(offset: f64, opacity: [f64; 4]) -> Self {
        Self { offset, opacity }
    }

    pub const fn uniform(offset: f64, opacity: f64) -> Self {
        Self::new(offset, [opacity; 4])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankFadeCurve {
    pub bands: TierBands,
    /// Rank assumed for features without one; must fall in a middle tier
    pub default_rank: f64,
    /// Offset from the base zoom at or below which opacity is 0
    pub cutoff_offset: f64,
    pub stops: &'static [FadeStop],
}

/// Tiered reveal: high tier starts visible at the base zoom, minimal tier
/// needs four more zoom levels
pub const RANK_FADE: RankFadeCurve = RankFadeCurve {
    bands: FADE_BANDS,
    default_rank: DEFAULT_MAX_RANK / 2.0,
    cutoff_offset: -0.5,
    stops: &[
        FadeStop::new(0.0, [0.3, 0.1, 0.0, 0.0]),
        FadeStop::new(1.0, [0.7, 0.4, 0.15, 0.0]),
        FadeStop::new(2.0, [1.0, 0.75, 0.5, 0.2]),
        FadeStop::new(3.0, [1.0, 1.0, 0.85, 0.6]),
        FadeStop::uniform(4.0, 1.0),
    ],
};

/// Faster, wave-like reveal over three and a half zoom levels
pub const STEPPED_RANK_FADE: RankFadeCurve = RankFadeCurve {
    bands: STEPPED_BANDS,
    default_rank: 15.0,
    cutoff_offset: -0.5,
    stops: &[
        FadeStop::new(0.0, [0.4, 0.0, 0.0, 0.0]),
        FadeStop::new(0.75, [0.8, 0.3, 0.0, 0.0]),
        FadeStop::new(1.5, [1.0, 0.7, 0.3, 0.0]),
        FadeStop::new(2.5, [1.0, 1.0, 0.8, 0.4]),
        FadeStop::uniform(3.5, 1.0),
    ],
};

impl RankFadeCurve {
    pub fn tier(&self, rank: Option<f64>) -> RankTier {
        let rank = rank.filter(|r| r.is_finite()).unwrap_or(self.default_rank);
        self.bands.tier(rank)
    }

    /// Opacity for a feature of `rank` at `zoom`, within `[0, 1]`
    pub fn opacity(&self, rank: Option<f64>, zoom: f64, base_zoom: f64) -> f64 {
        self.tier_opacity(self.tier(rank), zoom - base_zoom)
    }

    /// Opacity of `tier` at `offset` zoom levels past the base zoom
    pub fn tier_opacity(&self, tier: RankTier, offset: f64) -> f64 {
        if offset.is_nan() || offset <= self.cutoff_offset {
            return 0.0;
        }
        let column = tier.index();
        let mut previous = (self.cutoff_offset, 0.0);
        for stop in self.stops {
            let value = stop.opacity[column];
            if offset == stop.offset {
                return value.clamp(0.0, 1.0);
            }
            if offset < stop.offset {
                let t = Interpolation::progress(previous.0, stop.offset, offset);
                return previous.1.lerp(&value, t).clamp(0.0, 1.0);
            }
            previous = (stop.offset, value);
        }
        previous.1.clamp(0.0, 1.0)
    }

    /// Zoom offset at which `tier` first reaches full opacity
    pub fn full_opacity_offset(&self, tier: RankTier) -> Option<f64> {
        self.stops
            .iter()
            .find(|stop| stop.opacity[tier.index()] >= 1.0)
            .map(|stop| stop.offset)
    }
}

/// Rank-aware fade anchored at `base_zoom`
pub fn fade_in_by_zoom_and_rank(rank: Option<f64>, zoom: f64, base_zoom: f64) -> f64 {
    RANK_FADE.opacity(rank, zoom, base_zoom)
}

/// Stepped rank fade anchored at `base_zoom`
pub fn stepped_fade_by_rank(rank: Option<f64>, zoom: f64, base_zoom: f64) -> f64 {
    STEPPED_RANK_FADE.opacity(rank, zoom, base_zoom)
}

/// Rank-independent fade: 0 at `start_zoom`, 0.45 at +0.8, 1 at +2
pub fn fade_in_by_zoom(start_zoom: f64, zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 0.0;
    }
    let stops = [
        (start_zoom, 0.0),
        (start_zoom + 0.8, 0.45),
        (start_zoom + 2.0, 1.0),
    ];
    Interpolation::piecewise(&stops, zoom)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0)
}
