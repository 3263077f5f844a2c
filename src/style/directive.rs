//! Rendering directives and the set of pre-built instances shared by every feature.
//!
//! Every directive handed to the renderer is either one of the `static` styles
//! in [`styles`] or a two-stroke road casing computed inline on the stack. The
//! per-feature path never allocates.

use serde::Serialize;

use super::color::Color;

/// Polygon fill parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Line stroke parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static [f64]>,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub const fn dashed(self, pattern: &'static [f64]) -> Self {
        Self {
            dash: Some(pattern),
            ..self
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.dash.is_some()
    }

    #[cfg(feature = "egui")]
    pub fn to_egui(&self) -> egui::Stroke {
        egui::Stroke::new(self.width as f32, egui::Color32::from(self.color))
    }
}

/// Point symbol drawn as a filled, outlined circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleMarker {
    pub radius: f64,
    pub fill: Fill,
    pub stroke: Stroke,
}

/// A single paint/layout descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<CircleMarker>,
}

impl Style {
    /// Draws nothing
    pub const EMPTY: Style = Style {
        fill: None,
        stroke: None,
        marker: None,
    };

    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(Fill::new(color)),
            ..Self::EMPTY
        }
    }

    pub const fn line(stroke: Stroke) -> Self {
        Self {
            stroke: Some(stroke),
            ..Self::EMPTY
        }
    }

    pub const fn outlined(color: Color, outline: Stroke) -> Self {
        Self {
            fill: Some(Fill::new(color)),
            stroke: Some(outline),
            marker: None,
        }
    }

    pub const fn marker(marker: CircleMarker) -> Self {
        Self {
            marker: Some(marker),
            ..Self::EMPTY
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none() && self.marker.is_none()
    }
}

/// The resolved rendering instruction for one feature
///
/// `Layered` and `Scaled` are drawn in order: the first entry is painted first
/// (road casing below road fill).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleDirective {
    /// The feature is not drawn at all
    Hidden,
    Single(&'static Style),
    Layered(&'static [Style]),
    /// Casing and fill strokes whose widths depend on the current resolution
    Scaled([Style; 2]),
}

impl StyleDirective {
    /// Descriptors in paint order
    pub fn layers(&self) -> &[Style] {
        match self {
            StyleDirective::Hidden => &[],
            StyleDirective::Single(style) => std::slice::from_ref(*style),
            StyleDirective::Layered(styles) => styles,
            StyleDirective::Scaled(pair) => pair,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, StyleDirective::Hidden)
    }

    /// Returns true when both directives point at the same pre-built instance
    pub fn same_instance(&self, other: &StyleDirective) -> bool {
        match (self, other) {
            (StyleDirective::Hidden, StyleDirective::Hidden) => true,
            (StyleDirective::Single(a), StyleDirective::Single(b)) => std::ptr::eq(*a, *b),
            (StyleDirective::Layered(a), StyleDirective::Layered(b)) => {
                std::ptr::eq(a.as_ptr(), b.as_ptr()) && a.len() == b.len()
            }
            _ => false,
        }
    }

    /// Stroke widths in paint order, useful for road casings
    pub fn stroke_widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.layers()
            .iter()
            .filter_map(|style| style.stroke.map(|stroke| stroke.width))
    }
}

/// Colours used by the per-feature directives
pub mod colors {
    use super::Color;

    pub const LAND: Color = Color::hex(0xf5f5f5);

    pub const WATER: Color = Color::hex(0xaadaff);
    pub const WATER_DARK: Color = Color::hex(0x7eb8da);
    pub const WATER_POOL: Color = Color::hex(0x9fd5d1);

    pub const PARK: Color = Color::hex(0xc8facc);
    pub const FOREST: Color = Color::hex(0xc8e6c0);
    pub const GRASS: Color = Color::hex(0xd4edda);
    pub const WETLAND: Color = Color::hex(0xd4e8d4);
    pub const FARMLAND: Color = Color::hex(0xeef3d8);

    pub const MOTORWAY: Color = Color::hex(0xffd54f);
    pub const MOTORWAY_OUTLINE: Color = Color::hex(0xe6ac00);
    pub const PRIMARY: Color = Color::hex(0xffffff);
    pub const PRIMARY_OUTLINE: Color = Color::hex(0xc0c0c0);
    pub const SECONDARY: Color = Color::hex(0xffffff);
    pub const SECONDARY_OUTLINE: Color = Color::hex(0xd0d0d0);
    pub const TERTIARY: Color = Color::hex(0xffffff);
    pub const TERTIARY_OUTLINE: Color = Color::hex(0xe0e0e0);
    pub const MINOR: Color = Color::hex(0xffffff);
    pub const MINOR_OUTLINE: Color = Color::hex(0xe8e8e8);
    pub const PATH: Color = Color::hex(0xf0e6d2);
    pub const TRACK: Color = Color::hex(0xe8dcc8);
    pub const CONSTRUCTION: Color = Color::hex(0xf5f5dc);

    pub const BUILDING: Color = Color::hex(0xe0e0e0);
    pub const BUILDING_OUTLINE: Color = Color::hex(0xc0c0c0);

    pub const BOUNDARY: Color = Color::hex(0x9e9e9e);
    pub const BOUNDARY_ADMIN: Color = Color::hex(0xb0b0b0);

    pub const INDUSTRIAL: Color = Color::hex(0xebdbe8);
    pub const COMMERCIAL: Color = Color::hex(0xf5e6e8);
    pub const RETAIL: Color = Color::hex(0xfce4ec);
    pub const RESIDENTIAL: Color = Color::hex(0xf0f0f0);
    pub const INSTITUTIONAL: Color = Color::hex(0xf3e5f5);
    pub const MILITARY: Color = Color::hex(0xf5e0dc);
    pub const HOSPITAL: Color = Color::hex(0xffe0e0);
    pub const SCHOOL: Color = Color::hex(0xfff8e1);
    pub const STADIUM: Color = Color::hex(0xe8f5e9);
    pub const CEMETERY: Color = Color::hex(0xd5e8d4);
    pub const AEROWAY: Color = Color::hex(0xe8e8f0);

    pub const RAILWAY: Color = Color::hex(0x888888);
    pub const FERRY: Color = Color::hex(0x7eb8da);
    pub const PIER: Color = Color::hex(0xe0e0e0);
    pub const BUSWAY: Color = Color::hex(0xf5deb3);
}

/// Pre-built directive instances, created once and shared by every feature
pub mod styles {
    use super::{colors, CircleMarker, Color, Fill, Stroke, Style};

    // Water
    pub static WATER: Style = Style::fill(colors::WATER);
    pub static WATERWAY: Style = Style::line(Stroke::new(colors::WATER_DARK, 1.5));
    pub static WATERWAY_SMALL: Style = Style::line(Stroke::new(colors::WATER_DARK, 0.8));
    pub static POOL: Style = Style::fill(colors::WATER_POOL);

    // Green space
    pub static PARK: Style = Style::fill(colors::PARK);
    pub static FOREST: Style = Style::fill(colors::FOREST);
    pub static GRASS: Style = Style::fill(colors::GRASS);
    pub static WETLAND: Style = Style::fill(colors::WETLAND);
    pub static FARMLAND: Style = Style::fill(colors::FARMLAND);

    // Land use
    pub static RESIDENTIAL: Style = Style::fill(colors::RESIDENTIAL);
    pub static INDUSTRIAL: Style = Style::fill(colors::INDUSTRIAL);
    pub static COMMERCIAL: Style = Style::fill(colors::COMMERCIAL);
    pub static RETAIL: Style = Style::fill(colors::RETAIL);
    pub static INSTITUTIONAL: Style = Style::fill(colors::INSTITUTIONAL);
    pub static MILITARY: Style = Style::outlined(
        colors::MILITARY,
        Stroke::new(Color::hex(0xd0b0b0), 1.0).dashed(&[4.0, 4.0]),
    );
    pub static HOSPITAL: Style = Style::fill(colors::HOSPITAL);
    pub static SCHOOL: Style = Style::fill(colors::SCHOOL);
    pub static STADIUM: Style = Style::fill(colors::STADIUM);
    pub static CEMETERY: Style = Style::fill(colors::CEMETERY);

    pub static BUILDING: Style =
        Style::outlined(colors::BUILDING, Stroke::new(colors::BUILDING_OUTLINE, 0.5));

    // Roads: casing first, fill on top
    pub static MOTORWAY: [Style; 2] = [
        Style::line(Stroke::new(colors::MOTORWAY_OUTLINE, 7.0)),
        Style::line(Stroke::new(colors::MOTORWAY, 5.0)),
    ];
    pub static PRIMARY: [Style; 2] = [
        Style::line(Stroke::new(colors::PRIMARY_OUTLINE, 6.0)),
        Style::line(Stroke::new(colors::PRIMARY, 4.0)),
    ];
    pub static SECONDARY: [Style; 2] = [
        Style::line(Stroke::new(colors::SECONDARY_OUTLINE, 5.0)),
        Style::line(Stroke::new(colors::SECONDARY, 3.5)),
    ];
    pub static TERTIARY: [Style; 2] = [
        Style::line(Stroke::new(colors::TERTIARY_OUTLINE, 4.0)),
        Style::line(Stroke::new(colors::TERTIARY, 2.5)),
    ];
    pub static MINOR_ROAD: [Style; 2] = [
        Style::line(Stroke::new(colors::MINOR_OUTLINE, 3.0)),
        Style::line(Stroke::new(colors::MINOR, 2.0)),
    ];
    pub static SERVICE_ROAD: [Style; 2] = [
        Style::line(Stroke::new(colors::MINOR_OUTLINE, 2.0)),
        Style::line(Stroke::new(colors::MINOR, 1.5)),
    ];
    pub static BUSWAY: [Style; 2] = [
        Style::line(Stroke::new(Color::hex(0xd4a574), 4.0)),
        Style::line(Stroke::new(colors::BUSWAY, 2.5)),
    ];

    pub static PATH: Style = Style::line(Stroke::new(colors::PATH, 1.5).dashed(&[4.0, 4.0]));
    pub static TRACK: Style = Style::line(Stroke::new(colors::TRACK, 2.0).dashed(&[6.0, 3.0]));
    pub static CONSTRUCTION: Style =
        Style::line(Stroke::new(colors::CONSTRUCTION, 3.0).dashed(&[8.0, 8.0]));
    pub static RACEWAY: Style = Style::line(Stroke::new(Color::hex(0xc0c0c0), 3.0));

    // Other transport
    pub static RAILWAY: Style = Style::line(Stroke::new(colors::RAILWAY, 2.0).dashed(&[8.0, 4.0]));
    pub static FERRY: Style = Style::line(Stroke::new(colors::FERRY, 1.5).dashed(&[10.0, 10.0]));
    pub static PIER: Style = Style::outlined(colors::PIER, Stroke::new(Color::hex(0xc0c0c0), 1.0));
    pub static BRIDGE: Style = Style::line(Stroke::new(Color::hex(0xa0a0a0), 4.0));

    // Boundaries
    pub static BOUNDARY: Style =
        Style::line(Stroke::new(colors::BOUNDARY, 1.0).dashed(&[6.0, 3.0]));
    pub static ADMIN_BOUNDARY: Style =
        Style::line(Stroke::new(colors::BOUNDARY_ADMIN, 2.0).dashed(&[10.0, 5.0]));

    pub static AEROWAY: Style =
        Style::outlined(colors::AEROWAY, Stroke::new(Color::hex(0xc0c0c8), 1.0));

    // Points
    pub static MOUNTAIN_PEAK: Style = Style::marker(CircleMarker {
        radius: 4.0,
        fill: Fill::new(Color::hex(0x8b7355)),
        stroke: Stroke::new(Color::WHITE, 1.5),
    });
    pub static POI: Style = Style::marker(CircleMarker {
        radius: 3.0,
        fill: Fill::new(Color::hex(0x666666)),
        stroke: Stroke::new(Color::WHITE, 1.0),
    });

    /// Global fallback for features no other rule matches
    pub static DEFAULT: Style = Style::outlined(
        Color::rgba(220, 220, 220, 77),
        Stroke::new(Color::hex(0xb0b0b0), 0.5),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_in_paint_order() {
        let road = StyleDirective::Layered(&styles::MOTORWAY);
        let widths: Vec<f64> = road.stroke_widths().collect();
        assert_eq!(widths, vec![7.0, 5.0]);

        assert!(StyleDirective::Hidden.layers().is_empty());
        assert_eq!(StyleDirective::Single(&styles::WATER).layers().len(), 1);
    }

    #[test]
    fn test_same_instance_is_identity() {
        let a = StyleDirective::Single(&styles::PRIMARY[0]);
        let b = StyleDirective::Single(&styles::PRIMARY[0]);
        assert!(a.same_instance(&b));

        // Equal by value, distinct instances
        let c = StyleDirective::Single(&styles::SECONDARY[1]);
        let d = StyleDirective::Single(&styles::TERTIARY[1]);
        assert_eq!(c.layers()[0].stroke.unwrap().color, d.layers()[0].stroke.unwrap().color);
        assert!(!c.same_instance(&d));

        let scaled = StyleDirective::Scaled(styles::MOTORWAY);
        assert!(!scaled.same_instance(&StyleDirective::Layered(&styles::MOTORWAY)));
    }

    #[test]
    fn test_default_is_translucent() {
        let fill = styles::DEFAULT.fill.unwrap();
        assert!(!fill.color.is_opaque());
        assert!((fill.color.opacity() - 0.3).abs() < 0.01);
    }

    #[test]
    fn test_empty_style() {
        assert!(Style::EMPTY.is_empty());
        assert!(!styles::BUILDING.is_empty());
    }

    #[test]
    fn test_directive_serializes_as_descriptor_list() {
        let json = serde_json::to_value(StyleDirective::Single(&styles::RAILWAY)).unwrap();
        assert_eq!(json["stroke"]["color"], "#888888");
        assert_eq!(json["stroke"]["dash"], serde_json::json!([8.0, 4.0]));
    }
}
