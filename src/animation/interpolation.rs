/// Interpolation trait for values that can be smoothly transitioned
pub trait Interpolatable {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

/// Easing functions available to zoom- and time-indexed curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    #[default]
    Linear,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInCubic => t * t * t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * t
    }

    /// Interpolation with easing function
    pub fn ease(start: f64, end: f64, t: f64, easing: EasingFunction) -> f64 {
        let eased_t = easing.apply(t);
        Self::linear(start, end, eased_t)
    }

    /// Position of `value` between `start` and `end`, clamped to `0.0..=1.0`
    pub fn progress(start: f64, end: f64, value: f64) -> f64 {
        if end <= start {
            return if value >= end { 1.0 } else { 0.0 };
        }
        ((value - start) / (end - start)).clamp(0.0, 1.0)
    }

    /// Piecewise-linear curve through `(x, y)` stops sorted by `x`
    ///
    /// Outside the stop range the first or last `y` is held. Returns `None`
    /// only for an empty stop list.
    pub fn piecewise(stops: &[(f64, f64)], x: f64) -> Option<f64> {
        let (first, last) = (stops.first()?, stops.last()?);
        if x <= first.0 {
            return Some(first.1);
        }
        if x >= last.0 {
            return Some(last.1);
        }
        let value = stops
            .windows(2)
            .find(|pair| x <= pair[1].0)
            .map(|pair| {
                let t = Self::progress(pair[0].0, pair[1].0, x);
                Self::linear(pair[0].1, pair[1].1, t)
            })
            .unwrap_or(last.1);
        Some(value)
    }
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Interpolation::linear(*self, *other, t)
    }
}
