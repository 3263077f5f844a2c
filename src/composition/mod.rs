//! The declarative layer stack handed to the renderer.

pub mod builder;
pub mod expressions;
pub mod filter;
pub mod groups;
pub mod layer;
pub mod palette;

pub use builder::{compose, create_style, layer_ids, Composition, StyleDocument, VectorSource};
pub use expressions::{localized_name_expression, SortKey, TextOpacity, ZoomCurve, ZoomValue};
pub use filter::{Filter, Literal};
pub use groups::{expand_road_rules, GroupKind, RoadRule, RuleGroup, ROAD_RULES};
pub use layer::{LayerKind, LayerRule, Paint, SymbolPaint, SymbolState};
