//! Rank bands shared by fade curves and POI minzoom gating.

use serde::Serialize;

/// Priority band derived from a feature's rank (lower rank = more important)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RankTier {
    High,
    Medium,
    Low,
    Minimal,
}

impl RankTier {
    pub const ALL: [RankTier; 4] = [
        RankTier::High,
        RankTier::Medium,
        RankTier::Low,
        RankTier::Minimal,
    ];

    /// Column of this tier in per-tier value tables
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Inclusive upper rank bounds of the first three tiers; anything above is `Minimal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBands {
    pub bounds: [f64; 3],
}

impl TierBands {
    pub const fn new(high: f64, medium: f64, low: f64) -> Self {
        Self {
            bounds: [high, medium, low],
        }
    }

    pub fn tier(&self, rank: f64) -> RankTier {
        let [high, medium, low] = self.bounds;
        if rank <= high {
            RankTier::High
        } else if rank <= medium {
            RankTier::Medium
        } else if rank <= low {
            RankTier::Low
        } else {
            RankTier::Minimal
        }
    }
}

/// Bands used by the rank-aware fade curve
pub const FADE_BANDS: TierBands = TierBands::new(3.0, 7.0, 12.0);

/// Bands used by the stepped fade curve
pub const STEPPED_BANDS: TierBands = TierBands::new(5.0, 10.0, 15.0);

/// POI label tier; each tier is absent below its own minimum zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PoiTier {
    /// rank <= 14
    Level1,
    /// rank 15 to 24
    Level2,
    /// rank >= 25
    Level3,
}

impl PoiTier {
    pub const ALL: [PoiTier; 3] = [PoiTier::Level1, PoiTier::Level2, PoiTier::Level3];

    /// Tier for a rank; unranked POIs belong to no tier and are never labelled
    pub fn for_rank(rank: Option<f64>) -> Option<PoiTier> {
        let rank = rank.filter(|r| r.is_finite())?;
        Some(if rank <= 14.0 {
            PoiTier::Level1
        } else if rank < 25.0 {
            PoiTier::Level2
        } else {
            PoiTier::Level3
        })
    }

    pub fn min_zoom(self) -> f64 {
        match self {
            PoiTier::Level1 => 14.0,
            PoiTier::Level2 => 15.0,
            PoiTier::Level3 => 16.0,
        }
    }

    pub fn layer_id(self) -> &'static str {
        match self {
            PoiTier::Level1 => "poi-level-1",
            PoiTier::Level2 => "poi-level-2",
            PoiTier::Level3 => "poi-level-3",
        }
    }

    pub fn is_visible_at(self, zoom: f64) -> bool {
        zoom >= self.min_zoom()
    }
}

/// Whether a POI label with `rank` is in the render set at `zoom`
pub fn poi_label_visible(rank: Option<f64>, zoom: f64) -> bool {
    PoiTier::for_rank(rank).map_or(false, |tier| tier.is_visible_at(zoom))
}
