//! Zoom- and rank-indexed values of the layer stack.
//!
//! Each value is evaluated natively and can also be exported as the
//! equivalent MapLibre expression for the renderer.

use serde_json::{json, Value};

use crate::animation::Interpolation;
use crate::core::feature::FeatureView;
use crate::labels::fade::{fade_in_by_zoom, RankFadeCurve, RANK_FADE, STEPPED_RANK_FADE};
use crate::labels::sort::{
    poi_rank_sort_key, symbol_sort_key, waterway_sort_key, DEFAULT_CLASS_PRIORITY,
    DEFAULT_SORT_RANK, LANDMARK_PRIORITIES, POI_RANK_CEILING,
};
use crate::labels::tiers::RankTier;

/// Piecewise-linear value over zoom
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomCurve {
    stops: Vec<(f64, f64)>,
}

impl ZoomCurve {
    /// Stops must be sorted by zoom
    pub fn linear(stops: &[(f64, f64)]) -> Self {
        Self {
            stops: stops.to_vec(),
        }
    }

    /// Road widths: 0.35x at z6, 1x at z10, 1.6x at z16
    pub fn width_by_zoom(base: f64) -> Self {
        Self::linear(&[(6.0, base * 0.35), (10.0, base), (16.0, base * 1.6)])
    }

    /// Thin line widths: 0.2x at z6, 1x at z12, 1.4x at z16
    pub fn subtle_width_by_zoom(base: f64) -> Self {
        Self::linear(&[(6.0, base * 0.2), (12.0, base), (16.0, base * 1.4)])
    }

    pub fn stops(&self) -> &[(f64, f64)] {
        &self.stops
    }

    pub fn evaluate(&self, zoom: f64) -> f64 {
        Interpolation::piecewise(&self.stops, zoom).unwrap_or(0.0)
    }

    pub fn to_expression(&self) -> Value {
        let mut expression = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
        for (zoom, value) in &self.stops {
            expression.push(json!(zoom));
            expression.push(json!(value));
        }
        Value::Array(expression)
    }
}

/// A paint or layout number that is either fixed or zoom-dependent
#[derive(Debug, Clone, PartialEq)]
pub enum ZoomValue {
    Fixed(f64),
    Curve(ZoomCurve),
}

impl ZoomValue {
    pub fn evaluate(&self, zoom: f64) -> f64 {
        match self {
            ZoomValue::Fixed(value) => *value,
            ZoomValue::Curve(curve) => curve.evaluate(zoom),
        }
    }

    pub fn to_expression(&self) -> Value {
        match self {
            ZoomValue::Fixed(value) => json!(value),
            ZoomValue::Curve(curve) => curve.to_expression(),
        }
    }
}

impl From<f64> for ZoomValue {
    fn from(value: f64) -> Self {
        ZoomValue::Fixed(value)
    }
}

impl From<ZoomCurve> for ZoomValue {
    fn from(curve: ZoomCurve) -> Self {
        ZoomValue::Curve(curve)
    }
}

/// Label text opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextOpacity {
    Fixed(f64),
    /// Rank-independent fade starting at the given zoom
    FadeIn { start_zoom: f64 },
    /// Tiered fade anchored at the given zoom
    RankFade { base_zoom: f64 },
    SteppedRankFade { base_zoom: f64 },
}

impl TextOpacity {
    pub fn evaluate(&self, rank: Option<f64>, zoom: f64) -> f64 {
        match *self {
            TextOpacity::Fixed(value) => value.clamp(0.0, 1.0),
            TextOpacity::FadeIn { start_zoom } => fade_in_by_zoom(start_zoom, zoom),
            TextOpacity::RankFade { base_zoom } => RANK_FADE.opacity(rank, zoom, base_zoom),
            TextOpacity::SteppedRankFade { base_zoom } => {
                STEPPED_RANK_FADE.opacity(rank, zoom, base_zoom)
            }
        }
    }

    pub fn to_expression(&self) -> Value {
        match *self {
            TextOpacity::Fixed(value) => json!(value),
            TextOpacity::FadeIn { start_zoom } => json!([
                "interpolate", ["linear"], ["zoom"],
                start_zoom, 0,
                start_zoom + 0.8, 0.45,
                start_zoom + 2.0, 1
            ]),
            TextOpacity::RankFade { base_zoom } => rank_fade_expression(&RANK_FADE, base_zoom),
            TextOpacity::SteppedRankFade { base_zoom } => {
                rank_fade_expression(&STEPPED_RANK_FADE, base_zoom)
            }
        }
    }
}

fn coalesced_rank(default: f64) -> Value {
    json!(["coalesce", ["to-number", ["get", "rank"]], default])
}

/// Expands a rank fade curve into `interpolate` over zoom with a `case` per stop
fn rank_fade_expression(curve: &RankFadeCurve, base_zoom: f64) -> Value {
    let rank = coalesced_rank(curve.default_rank);
    let mut expression = vec![
        json!("interpolate"),
        json!(["linear"]),
        json!(["zoom"]),
        json!(base_zoom + curve.cutoff_offset),
        json!(0),
    ];
    for stop in curve.stops {
        expression.push(json!(base_zoom + stop.offset));
        let values = stop.opacity;
        if values.iter().all(|v| *v == values[0]) {
            expression.push(json!(values[0]));
            continue;
        }
        let mut case = vec![json!("case")];
        for (tier, bound) in RankTier::ALL.iter().zip(curve.bands.bounds) {
            case.push(json!(["<=", rank.clone(), bound]));
            case.push(json!(values[tier.index()]));
        }
        case.push(json!(values[RankTier::Minimal.index()]));
        expression.push(Value::Array(case));
    }
    Value::Array(expression)
}

/// Symbol placement order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// `200 - rank`
    PoiRank,
    /// `rank + landmark priority`
    Landmark,
    Waterway,
}

impl SortKey {
    pub fn evaluate(&self, feature: &FeatureView<'_>) -> f64 {
        match self {
            SortKey::PoiRank => poi_rank_sort_key(feature.rank),
            SortKey::Landmark => symbol_sort_key(feature.rank, feature.class),
            SortKey::Waterway => waterway_sort_key(feature.class),
        }
    }

    pub fn to_expression(&self) -> Value {
        match self {
            SortKey::PoiRank => json!(["-", POI_RANK_CEILING, coalesced_rank(POI_RANK_CEILING)]),
            SortKey::Landmark => {
                let priorities: serde_json::Map<String, Value> = LANDMARK_PRIORITIES
                    .iter()
                    .map(|(class, priority)| (class.to_string(), json!(priority)))
                    .collect();
                json!([
                    "+",
                    coalesced_rank(DEFAULT_SORT_RANK),
                    [
                        "coalesce",
                        [
                            "get",
                            ["to-string", ["coalesce", ["get", "class"], "other"]],
                            ["literal", priorities]
                        ],
                        DEFAULT_CLASS_PRIORITY
                    ]
                ])
            }
            SortKey::Waterway => json!([
                "case",
                ["==", ["get", "class"], "river"], 1,
                ["==", ["get", "class"], "canal"], 2,
                ["==", ["get", "class"], "stream"], 3,
                4
            ]),
        }
    }
}

/// English name with fallbacks, matching the feature view's name lookup
pub fn localized_name_expression() -> Value {
    json!(["coalesce", ["get", "name_en"], ["get", "name:en"], ["get", "name"]])
}
