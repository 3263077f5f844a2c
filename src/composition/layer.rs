//! A single entry of the layer stack.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::expressions::{localized_name_expression, SortKey, TextOpacity, ZoomCurve, ZoomValue};
use super::filter::Filter;
use crate::core::feature::FeatureView;
use crate::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Background,
    Fill,
    Line,
    Symbol,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Background => "background",
            LayerKind::Fill => "fill",
            LayerKind::Line => "line",
            LayerKind::Symbol => "symbol",
        }
    }
}

pub const DEFAULT_FONTS: &[&str] = &["Open Sans Semibold", "Open Sans Regular"];

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolPaint {
    pub text_size: ZoomValue,
    pub text_color: Color,
    pub halo_color: Color,
    pub halo_width: f64,
    pub halo_blur: f64,
    pub text_opacity: Option<TextOpacity>,
    pub sort_key: Option<SortKey>,
    pub font: &'static [&'static str],
    pub symbol_spacing: f64,
    pub text_padding: f64,
    pub letter_spacing: f64,
    pub line_height: f64,
    pub radial_offset: f64,
}

impl SymbolPaint {
    pub fn new(text_size: impl Into<ZoomValue>, text_color: Color, halo_color: Color) -> Self {
        Self {
            text_size: text_size.into(),
            text_color,
            halo_color,
            halo_width: 1.2,
            halo_blur: 0.15,
            text_opacity: None,
            sort_key: None,
            font: DEFAULT_FONTS,
            symbol_spacing: 250.0,
            text_padding: 2.0,
            letter_spacing: 0.02,
            line_height: 1.1,
            radial_offset: 0.15,
        }
    }

    pub fn halo(mut self, width: f64, blur: f64) -> Self {
        self.halo_width = width;
        self.halo_blur = blur;
        self
    }

    pub fn opacity(mut self, opacity: TextOpacity) -> Self {
        self.text_opacity = Some(opacity);
        self
    }

    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn font(mut self, font: &'static [&'static str]) -> Self {
        self.font = font;
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.symbol_spacing = spacing;
        self
    }

    pub fn letter_spacing(mut self, spacing: f64) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn radial_offset(mut self, offset: f64) -> Self {
        self.radial_offset = offset;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Background {
        color: Color,
    },
    Fill {
        color: Color,
        opacity: Option<f64>,
        outline_color: Option<Color>,
    },
    Line {
        color: Color,
        width: ZoomValue,
        opacity: Option<f64>,
        dash: Option<&'static [f64]>,
    },
    Symbol(SymbolPaint),
}

/// What a label feature looks like under a symbol rule at one zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SymbolState {
    /// In the render set: zoom range, source layer and filter all match
    pub visible: bool,
    pub opacity: f64,
    pub sort_key: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerRule {
    pub id: String,
    pub source_layer: Option<&'static str>,
    pub filter: Option<Filter>,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub paint: Paint,
}

impl LayerRule {
    fn new(id: impl Into<String>, source_layer: Option<&'static str>, paint: Paint) -> Self {
        Self {
            id: id.into(),
            source_layer,
            filter: None,
            min_zoom: None,
            max_zoom: None,
            paint,
        }
    }

    pub fn background(id: impl Into<String>, color: Color) -> Self {
        Self::new(id, None, Paint::Background { color })
    }

    pub fn fill(id: impl Into<String>, source_layer: &'static str, color: Color) -> Self {
        Self::new(
            id,
            Some(source_layer),
            Paint::Fill {
                color,
                opacity: None,
                outline_color: None,
            },
        )
    }

    pub fn line(
        id: impl Into<String>,
        source_layer: &'static str,
        color: Color,
        width: impl Into<ZoomValue>,
    ) -> Self {
        Self::new(
            id,
            Some(source_layer),
            Paint::Line {
                color,
                width: width.into(),
                opacity: None,
                dash: None,
            },
        )
    }

    pub fn symbol(id: impl Into<String>, source_layer: &'static str, paint: SymbolPaint) -> Self {
        Self::new(id, Some(source_layer), Paint::Symbol(paint))
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Visible for `min_zoom <= zoom < max_zoom`
    pub fn with_zoom_range(mut self, min_zoom: Option<f64>, max_zoom: Option<f64>) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Fill or line opacity; ignored by other kinds
    pub fn with_opacity(mut self, value: f64) -> Self {
        match &mut self.paint {
            Paint::Fill { opacity, .. } | Paint::Line { opacity, .. } => *opacity = Some(value),
            Paint::Background { .. } | Paint::Symbol(_) => {}
        }
        self
    }

    pub fn with_outline(mut self, color: Color) -> Self {
        if let Paint::Fill { outline_color, .. } = &mut self.paint {
            *outline_color = Some(color);
        }
        self
    }

    pub fn with_dash(mut self, pattern: &'static [f64]) -> Self {
        if let Paint::Line { dash, .. } = &mut self.paint {
            *dash = Some(pattern);
        }
        self
    }

    pub fn kind(&self) -> LayerKind {
        match self.paint {
            Paint::Background { .. } => LayerKind::Background,
            Paint::Fill { .. } => LayerKind::Fill,
            Paint::Line { .. } => LayerKind::Line,
            Paint::Symbol(_) => LayerKind::Symbol,
        }
    }

    pub fn in_zoom_range(&self, zoom: f64) -> bool {
        self.min_zoom.map_or(true, |min| zoom >= min)
            && self.max_zoom.map_or(true, |max| zoom < max)
    }

    /// True when this rule draws `feature` at `zoom`
    ///
    /// Background rules apply to no feature.
    pub fn applies_to(&self, feature: &FeatureView<'_>, zoom: f64) -> bool {
        let Some(source_layer) = self.source_layer else {
            return false;
        };
        feature.layer == Some(source_layer)
            && self.in_zoom_range(zoom)
            && self.filter.as_ref().map_or(true, |f| f.matches(feature))
    }

    /// Line width at `zoom`, for line rules
    pub fn line_width_at(&self, zoom: f64) -> Option<f64> {
        match &self.paint {
            Paint::Line { width, .. } => Some(width.evaluate(zoom)),
            _ => None,
        }
    }

    /// Opacity and placement order of a label feature, for symbol rules
    pub fn symbol_state(&self, feature: &FeatureView<'_>, zoom: f64) -> Option<SymbolState> {
        let Paint::Symbol(paint) = &self.paint else {
            return None;
        };
        let visible = self.applies_to(feature, zoom);
        let opacity = if visible {
            paint
                .text_opacity
                .map_or(1.0, |o| o.evaluate(feature.rank, zoom))
        } else {
            0.0
        };
        Some(SymbolState {
            visible,
            opacity,
            sort_key: paint.sort_key.map(|key| key.evaluate(feature)),
        })
    }

    /// MapLibre layer object referencing the vector source `source_id`
    pub fn to_json(&self, source_id: &str) -> Value {
        let mut layer = Map::new();
        layer.insert("id".into(), json!(self.id));
        layer.insert("type".into(), json!(self.kind().as_str()));
        if let Some(source_layer) = self.source_layer {
            layer.insert("source".into(), json!(source_id));
            layer.insert("source-layer".into(), json!(source_layer));
        }

        let (paint, layout) = self.paint_and_layout();
        if let Some(layout) = layout {
            layer.insert("layout".into(), Value::Object(layout));
        }
        layer.insert("paint".into(), Value::Object(paint));

        if let Some(filter) = &self.filter {
            layer.insert("filter".into(), filter.to_expression());
        }
        if let Some(min_zoom) = self.min_zoom {
            layer.insert("minzoom".into(), json!(min_zoom));
        }
        if let Some(max_zoom) = self.max_zoom {
            layer.insert("maxzoom".into(), json!(max_zoom));
        }
        Value::Object(layer)
    }

    fn paint_and_layout(&self) -> (Map<String, Value>, Option<Map<String, Value>>) {
        let mut paint = Map::new();
        match &self.paint {
            Paint::Background { color } => {
                paint.insert("background-color".into(), json!(color));
                (paint, None)
            }
            Paint::Fill {
                color,
                opacity,
                outline_color,
            } => {
                paint.insert("fill-color".into(), json!(color));
                if let Some(opacity) = opacity {
                    paint.insert("fill-opacity".into(), json!(opacity));
                }
                if let Some(outline) = outline_color {
                    paint.insert("fill-outline-color".into(), json!(outline));
                }
                (paint, None)
            }
            Paint::Line {
                color,
                width,
                opacity,
                dash,
            } => {
                paint.insert("line-color".into(), json!(color));
                paint.insert("line-width".into(), width.to_expression());
                if let Some(opacity) = opacity {
                    paint.insert("line-opacity".into(), json!(opacity));
                }
                if let Some(dash) = dash {
                    paint.insert("line-dasharray".into(), json!(dash));
                }
                let mut layout = Map::new();
                layout.insert("line-cap".into(), json!("round"));
                layout.insert("line-join".into(), json!("round"));
                (paint, Some(layout))
            }
            Paint::Symbol(symbol) => {
                paint.insert("text-color".into(), json!(symbol.text_color));
                paint.insert("text-halo-color".into(), json!(symbol.halo_color));
                paint.insert("text-halo-width".into(), json!(symbol.halo_width));
                paint.insert("text-halo-blur".into(), json!(symbol.halo_blur));
                if let Some(opacity) = &symbol.text_opacity {
                    paint.insert("text-opacity".into(), opacity.to_expression());
                }

                let mut layout = Map::new();
                layout.insert("text-field".into(), localized_name_expression());
                layout.insert("text-font".into(), json!(symbol.font));
                layout.insert("text-size".into(), symbol.text_size.to_expression());
                layout.insert("symbol-placement".into(), json!("point"));
                layout.insert("text-allow-overlap".into(), json!(false));
                layout.insert(
                    "text-variable-anchor".into(),
                    json!(["top", "bottom", "left", "right"]),
                );
                layout.insert("text-radial-offset".into(), json!(symbol.radial_offset));
                layout.insert("text-max-width".into(), json!(8));
                layout.insert("text-letter-spacing".into(), json!(symbol.letter_spacing));
                layout.insert("text-line-height".into(), json!(symbol.line_height));
                layout.insert("symbol-spacing".into(), json!(symbol.symbol_spacing));
                layout.insert("text-padding".into(), json!(symbol.text_padding));
                layout.insert("text-optional".into(), json!(false));
                layout.insert("icon-optional".into(), json!(true));
                if let Some(sort_key) = &symbol.sort_key {
                    layout.insert("symbol-sort-key".into(), sort_key.to_expression());
                }
                (paint, Some(layout))
            }
        }
    }
}

/// Interpolated text size between two zoom stops
pub fn text_size_ramp(from: (f64, f64), to: (f64, f64)) -> ZoomValue {
    ZoomCurve::linear(&[from, to]).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::keys;

    fn city_label() -> LayerRule {
        LayerRule::symbol(
            "place-city",
            "place",
            SymbolPaint::new(14.0, Color::hex(0x9b6b3d), Color::WHITE)
                .opacity(TextOpacity::FadeIn { start_zoom: 7.0 }),
        )
        .with_filter(Filter::eq(keys::CLASS, "city"))
        .with_zoom_range(Some(7.0), Some(14.0))
    }

    #[test]
    fn test_zoom_range_is_half_open() {
        let rule = city_label();
        assert!(!rule.in_zoom_range(6.9));
        assert!(rule.in_zoom_range(7.0));
        assert!(rule.in_zoom_range(13.9));
        assert!(!rule.in_zoom_range(14.0));
    }

    #[test]
    fn test_symbol_state() {
        let rule = city_label();
        let city = FeatureView::new("place", Some("city"));
        let state = rule.symbol_state(&city, 8.0).unwrap();
        assert!(state.visible);
        // 0.45 at z7.8, 1 at z9
        let expected = 0.45 + 0.55 * (0.2 / 1.2);
        assert!((state.opacity - expected).abs() < 1e-9);
        assert_eq!(state.sort_key, None);

        let hidden = rule.symbol_state(&city, 5.0).unwrap();
        assert!(!hidden.visible);
        assert_eq!(hidden.opacity, 0.0);

        let town = FeatureView::new("place", Some("town"));
        assert!(!rule.symbol_state(&town, 9.0).unwrap().visible);
    }

    #[test]
    fn test_non_symbol_has_no_symbol_state() {
        let water = LayerRule::fill("water", "water", Color::hex(0xa6c8ff));
        assert!(water
            .symbol_state(&FeatureView::new("water", None), 10.0)
            .is_none());
        assert!(water.applies_to(&FeatureView::new("water", Some("lake")), 0.0));
        assert!(!water.applies_to(&FeatureView::new("waterway", None), 0.0));
    }

    #[test]
    fn test_builders_target_their_paint() {
        let line = LayerRule::line("rail", "transportation", Color::hex(0x8c8a86), 1.5)
            .with_opacity(0.8)
            .with_dash(&[2.0, 2.0])
            .with_outline(Color::WHITE);
        match &line.paint {
            Paint::Line { opacity, dash, .. } => {
                assert_eq!(*opacity, Some(0.8));
                assert_eq!(*dash, Some(&[2.0, 2.0][..]));
            }
            other => panic!("unexpected paint {other:?}"),
        }
        assert_eq!(line.line_width_at(3.0), Some(1.5));
    }

    #[test]
    fn test_line_json() {
        let rule = LayerRule::line(
            "motorway-fill",
            "transportation",
            Color::hex(0xffd78c),
            ZoomCurve::width_by_zoom(4.4),
        )
        .with_opacity(0.98)
        .with_filter(Filter::classes(&["motorway", "trunk"]));
        let layer = rule.to_json("pmtiles_source");
        assert_eq!(layer["id"], "motorway-fill");
        assert_eq!(layer["type"], "line");
        assert_eq!(layer["source"], "pmtiles_source");
        assert_eq!(layer["source-layer"], "transportation");
        assert_eq!(layer["paint"]["line-color"], "#ffd78c");
        assert_eq!(layer["layout"]["line-cap"], "round");
        assert_eq!(layer["filter"], json!(["in", "class", "motorway", "trunk"]));
        assert!(layer.get("minzoom").is_none());
    }

    #[test]
    fn test_background_json_has_no_source() {
        let layer = LayerRule::background("background", Color::hex(0xf6f2ea)).to_json("src");
        assert!(layer.get("source").is_none());
        assert_eq!(layer["paint"]["background-color"], "#f6f2ea");
    }

    #[test]
    fn test_symbol_json() {
        let layer = city_label().to_json("src");
        assert_eq!(layer["type"], "symbol");
        assert_eq!(layer["minzoom"], 7.0);
        assert_eq!(layer["layout"]["text-font"], json!(DEFAULT_FONTS));
        assert_eq!(layer["paint"]["text-opacity"][0], "interpolate");
    }
}
