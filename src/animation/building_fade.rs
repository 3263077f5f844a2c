//! Time-indexed fade-in of the building layer after the style loads.
//!
//! Only the sampled curve lives here; frame scheduling belongs to the
//! renderer driving it.

use serde::{Deserialize, Serialize};

use super::interpolation::{EasingFunction, Interpolation};

pub const BUILDING_ANIMATION_DURATION_MS: f64 = 900.0;
pub const BUILDING_TARGET_OPACITY: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingFade {
    pub duration_ms: f64,
    pub target_opacity: f64,
    #[serde(skip)]
    pub easing: EasingFunction,
}

impl BuildingFade {
    pub fn new(duration_ms: f64, target_opacity: f64) -> Self {
        Self {
            duration_ms,
            target_opacity,
            easing: EasingFunction::EaseOutCubic,
        }
    }

    /// Fill opacity `elapsed_ms` after the fade started, always within `[0, 1]`
    pub fn opacity_at(&self, elapsed_ms: f64) -> f64 {
        let progress = self.progress(elapsed_ms);
        let opacity = Interpolation::ease(0.0, self.target_opacity, progress, self.easing);
        if opacity.is_nan() {
            return 0.0;
        }
        opacity.clamp(0.0, 1.0)
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        Interpolation::progress(0.0, self.duration_ms, elapsed_ms)
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}

impl Default for BuildingFade {
    fn default() -> Self {
        Self::new(BUILDING_ANIMATION_DURATION_MS, BUILDING_TARGET_OPACITY)
    }
}
