pub mod building_fade;
pub mod interpolation;

// Re-export commonly used types and functions for convenience
pub use building_fade::BuildingFade;
pub use interpolation::{EasingFunction, Interpolatable, Interpolation};
