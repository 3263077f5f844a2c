use serde::{Deserialize, Serialize};

use super::constants::{EARTH_CIRCUMFERENCE, TILE_SIZE};

/// Meters per pixel at `zoom` for square tiles of `TILE_SIZE` pixels
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    EARTH_CIRCUMFERENCE / (TILE_SIZE as f64 * 2f64.powf(zoom))
}

/// Inverse of [`resolution_for_zoom`]. Returns `None` for non-positive or non-finite input.
pub fn zoom_for_resolution(resolution: f64) -> Option<f64> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return None;
    }
    Some((EARTH_CIRCUMFERENCE / (TILE_SIZE as f64 * resolution)).log2())
}

/// The zoom state of a single render pass
///
/// Label curves are indexed by zoom, visibility filters by resolution; the
/// viewport carries one and derives the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The current (fractional) zoom level
    pub zoom: f64,
}

impl Viewport {
    pub fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    pub fn from_resolution(resolution: f64) -> Option<Self> {
        zoom_for_resolution(resolution).map(Self::new)
    }

    /// Gets the resolution in meters per pixel at the current zoom level
    pub fn resolution(&self) -> f64 {
        resolution_for_zoom(self.zoom)
    }

    /// Scale factor relative to zoom 0
    pub fn scale(&self) -> f64 {
        2f64.powf(self.zoom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0)
    }
}
