pub mod color;
pub mod directive;
pub mod filter;
pub mod resolver;
pub mod rules;
pub mod special;

// Re-export commonly used types and functions for convenience
pub use color::Color;
pub use directive::{styles, CircleMarker, Fill, Stroke, Style, StyleDirective};
pub use filter::{FilterThresholds, VisibilityFilter, HIDDEN_LAYERS};
pub use resolver::StyleResolver;
pub use rules::{RuleKey, RuleTable, RuleTableBuilder, DEFAULT_RULES};
pub use special::{RoadWidthScaling, SpecialCase, WidthScale};
