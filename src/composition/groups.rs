//! The rule groups of the basemap, in paint order.

use serde::Serialize;

use super::expressions::{SortKey, TextOpacity, ZoomCurve};
use super::filter::Filter;
use super::layer::{text_size_ramp, LayerRule, SymbolPaint};
use super::palette;
use crate::core::constants::layers;
use crate::core::feature::keys;
use crate::labels::tiers::PoiTier;
use crate::style::Color;

pub const SYMBOL_SPACING_MAJOR: f64 = 420.0;
pub const SYMBOL_SPACING_GENERAL: f64 = 260.0;
pub const SYMBOL_SPACING_MOUNTAIN: f64 = 520.0;

/// POI classes labelled by the transport rules instead of the POI tiers
pub const POI_TRANSPORT_CLASSES: &[&str] = &[
    "ferry_terminal",
    "pier",
    "bus_station",
    "tram_stop",
    "station",
    "subway",
];

const MOUNTAIN_FONTS: &[&str] = &["Open Sans Italic", "Open Sans Regular"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Background,
    Water,
    Landcover,
    Landuse,
    Buildings,
    Roads,
    Boundaries,
    Labels,
}

impl GroupKind {
    /// Paint order, bottom first
    pub const ALL: [GroupKind; 8] = [
        GroupKind::Background,
        GroupKind::Water,
        GroupKind::Landcover,
        GroupKind::Landuse,
        GroupKind::Buildings,
        GroupKind::Roads,
        GroupKind::Boundaries,
        GroupKind::Labels,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::Background => "background",
            GroupKind::Water => "water",
            GroupKind::Landcover => "landcover",
            GroupKind::Landuse => "landuse",
            GroupKind::Buildings => "buildings",
            GroupKind::Roads => "roads",
            GroupKind::Boundaries => "boundaries",
            GroupKind::Labels => "labels",
        }
    }

    pub fn rules(&self) -> Vec<LayerRule> {
        match self {
            GroupKind::Background => background(),
            GroupKind::Water => water(),
            GroupKind::Landcover => landcover(),
            GroupKind::Landuse => landuse(),
            GroupKind::Buildings => buildings(),
            GroupKind::Roads => roads(),
            GroupKind::Boundaries => boundaries(),
            GroupKind::Labels => labels(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleGroup {
    pub kind: GroupKind,
    pub rules: Vec<LayerRule>,
}

impl RuleGroup {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            rules: kind.rules(),
        }
    }
}

pub fn background() -> Vec<LayerRule> {
    vec![LayerRule::background(layers::BACKGROUND, palette::land::BASE)]
}

pub fn water() -> Vec<LayerRule> {
    use palette::water;
    vec![
        LayerRule::fill("water", layers::WATER, water::FILL),
        LayerRule::line(
            "water-border",
            layers::WATER,
            water::EDGE,
            ZoomCurve::subtle_width_by_zoom(1.1),
        )
        .with_opacity(0.45),
        LayerRule::line(
            "waterway",
            layers::WATERWAY,
            water::EDGE,
            ZoomCurve::subtle_width_by_zoom(1.0),
        )
        .with_opacity(0.65)
        .with_filter(Filter::classes(&["river", "canal", "stream"])),
        LayerRule::line(
            "waterway-minor",
            layers::WATERWAY,
            water::EDGE,
            ZoomCurve::subtle_width_by_zoom(0.6),
        )
        .with_opacity(0.45)
        .with_filter(Filter::classes(&["drain", "ditch"])),
    ]
}

pub fn landcover() -> Vec<LayerRule> {
    use palette::vegetation;
    vec![
        LayerRule::fill("landcover-forest", layers::LANDCOVER, vegetation::FOREST)
            .with_filter(Filter::classes(&["wood", "forest"]))
            .with_opacity(0.9),
        LayerRule::fill("landcover-grass", layers::LANDCOVER, vegetation::GRASS)
            .with_filter(Filter::eq(keys::CLASS, "grass")),
        LayerRule::fill("landcover-wetland", layers::LANDCOVER, vegetation::WETLAND)
            .with_filter(Filter::eq(keys::CLASS, "wetland")),
        LayerRule::fill("landcover-farmland", layers::LANDCOVER, vegetation::FARMLAND)
            .with_filter(Filter::eq(keys::CLASS, "farmland")),
        LayerRule::fill("landcover-sand", layers::LANDCOVER, vegetation::SAND)
            .with_filter(Filter::eq(keys::CLASS, "sand")),
        LayerRule::fill("park", layers::PARK, vegetation::PARK).with_opacity(0.95),
    ]
}

pub fn landuse() -> Vec<LayerRule> {
    use palette::landuse as colors;
    let zone = |id: &str, color: Color, classes: &'static [&'static str]| {
        let filter = match classes {
            [single] => Filter::eq(keys::CLASS, *single),
            _ => Filter::classes(classes),
        };
        LayerRule::fill(format!("landuse-{id}"), layers::LANDUSE, color).with_filter(filter)
    };
    vec![
        zone("residential", colors::RESIDENTIAL, &["residential"]),
        zone("commercial", colors::COMMERCIAL, &["commercial"]),
        zone("industrial", colors::INDUSTRIAL, &["industrial"]),
        zone("institutional", colors::INSTITUTIONAL, &["institutional"]),
        zone("hospital", colors::HOSPITAL, &["hospital"]),
        zone("school", colors::SCHOOL, &["school", "university", "college"]),
        zone(
            "stadium",
            colors::STADIUM,
            &["stadium", "pitch", "track", "playground"],
        ),
        zone("cemetery", colors::CEMETERY, &["cemetery"]),
    ]
}

/// Buildings start fully transparent and are faded in once tiles settle
pub fn buildings() -> Vec<LayerRule> {
    vec![
        LayerRule::fill("building", layers::BUILDING, palette::building::FILL)
            .with_outline(palette::building::OUTLINE)
            .with_opacity(0.0),
        LayerRule::fill("aeroway", layers::AEROWAY, palette::transit::AEROWAY)
            .with_outline(palette::transit::AEROWAY_OUTLINE)
            .with_opacity(0.85),
    ]
}

/// One road class expanded into a casing rule and a fill rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadRule {
    pub id: &'static str,
    pub classes: &'static [&'static str],
    pub base_width: f64,
    pub color: Color,
    pub casing_color: Color,
}

impl RoadRule {
    /// Casing width over the fill width
    pub const CASING_EXTRA_WIDTH: f64 = 0.6;

    pub fn casing(&self) -> LayerRule {
        LayerRule::line(
            format!("{}-casing", self.id),
            layers::TRANSPORTATION,
            self.casing_color,
            ZoomCurve::width_by_zoom(self.base_width + Self::CASING_EXTRA_WIDTH),
        )
        .with_opacity(0.95)
        .with_filter(Filter::classes(self.classes))
    }

    pub fn fill(&self) -> LayerRule {
        LayerRule::line(
            format!("{}-fill", self.id),
            layers::TRANSPORTATION,
            self.color,
            ZoomCurve::width_by_zoom(self.base_width),
        )
        .with_opacity(0.98)
        .with_filter(Filter::classes(self.classes))
    }
}

/// Road classes, most important first
pub const ROAD_RULES: [RoadRule; 6] = {
    use palette::road;
    [
        RoadRule {
            id: "motorway",
            classes: &["motorway", "trunk"],
            base_width: 4.4,
            color: road::MOTORWAY,
            casing_color: road::MOTORWAY_CASING,
        },
        RoadRule {
            id: "primary",
            classes: &["primary"],
            base_width: 3.4,
            color: road::PRIMARY,
            casing_color: road::PRIMARY_CASING,
        },
        RoadRule {
            id: "secondary",
            classes: &["secondary"],
            base_width: 3.0,
            color: road::SECONDARY,
            casing_color: road::SECONDARY_CASING,
        },
        RoadRule {
            id: "tertiary",
            classes: &["tertiary"],
            base_width: 2.5,
            color: road::TERTIARY,
            casing_color: road::TERTIARY_CASING,
        },
        RoadRule {
            id: "minor",
            classes: &["minor", "street"],
            base_width: 2.1,
            color: road::MINOR,
            casing_color: road::MINOR_CASING,
        },
        RoadRule {
            id: "service",
            classes: &["service"],
            base_width: 1.6,
            color: road::SERVICE,
            casing_color: road::SERVICE_CASING,
        },
    ]
};

/// Each road rule becomes its casing immediately followed by its fill
pub fn expand_road_rules(rules: &[RoadRule]) -> Vec<LayerRule> {
    rules
        .iter()
        .flat_map(|rule| [rule.casing(), rule.fill()])
        .collect()
}

pub fn roads() -> Vec<LayerRule> {
    use palette::{road, transit};
    let mut rules = expand_road_rules(&ROAD_RULES);
    rules.extend([
        LayerRule::line(
            "transportation-path",
            layers::TRANSPORTATION,
            road::PATH,
            ZoomCurve::subtle_width_by_zoom(1.2),
        )
        .with_dash(&[4.0, 3.0])
        .with_opacity(0.8)
        .with_filter(Filter::classes(&[
            "path",
            "footway",
            "cycleway",
            "steps",
            "pedestrian",
        ])),
        LayerRule::line(
            "transportation-track",
            layers::TRANSPORTATION,
            road::TRACK,
            ZoomCurve::subtle_width_by_zoom(1.4),
        )
        .with_dash(&[6.0, 3.0])
        .with_opacity(0.8)
        .with_filter(Filter::classes(&["track"])),
        LayerRule::line(
            "transportation-busway",
            layers::TRANSPORTATION,
            road::BUSWAY,
            ZoomCurve::width_by_zoom(2.2),
        )
        .with_opacity(0.9)
        .with_filter(Filter::classes(&["busway"])),
        LayerRule::line(
            "transportation-rail",
            layers::TRANSPORTATION,
            transit::RAILWAY,
            ZoomCurve::subtle_width_by_zoom(1.5),
        )
        .with_opacity(0.8)
        .with_dash(&[2.0, 2.0])
        .with_filter(Filter::classes(&["rail", "transit"])),
        LayerRule::line(
            "transportation-ferry",
            layers::TRANSPORTATION,
            transit::FERRY,
            ZoomCurve::subtle_width_by_zoom(1.4),
        )
        .with_opacity(0.7)
        .with_dash(&[6.0, 4.0])
        .with_filter(Filter::classes(&["ferry"])),
        LayerRule::fill("transportation-pier", layers::TRANSPORTATION, transit::PIER)
            .with_outline(transit::PIER_OUTLINE)
            .with_filter(Filter::classes(&["pier"])),
    ]);
    rules
}

pub fn boundaries() -> Vec<LayerRule> {
    use palette::boundary;
    vec![
        LayerRule::line(
            "boundary-country",
            layers::BOUNDARY,
            boundary::COUNTRY,
            ZoomCurve::subtle_width_by_zoom(1.6),
        )
        .with_opacity(0.6)
        .with_dash(&[3.0, 2.0])
        .with_filter(Filter::eq(keys::ADMIN_LEVEL, 2.0)),
        LayerRule::line(
            "boundary-region",
            layers::BOUNDARY,
            boundary::REGION,
            ZoomCurve::subtle_width_by_zoom(1.2),
        )
        .with_opacity(0.4)
        .with_dash(&[2.0, 2.0])
        .with_filter(Filter::eq(keys::ADMIN_LEVEL, 4.0)),
    ]
}

fn country_label(rank: f64, min_zoom: f64, max_zoom: f64, size_end_zoom: f64) -> LayerRule {
    use palette::label;
    let rank_filter = if rank >= 3.0 {
        Filter::Ge(keys::RANK, rank)
    } else {
        Filter::eq(keys::RANK, rank)
    };
    LayerRule::symbol(
        format!("place-country-{rank}"),
        layers::PLACE,
        SymbolPaint::new(
            text_size_ramp((min_zoom, 11.0), (size_end_zoom, 17.0)),
            label::COUNTRY_TEXT,
            label::COUNTRY_HALO,
        )
        .halo(2.0, 1.0)
        .opacity(TextOpacity::FadeIn {
            start_zoom: min_zoom,
        })
        .letter_spacing(0.1),
    )
    .with_filter(Filter::All(vec![
        Filter::eq(keys::CLASS, "country"),
        rank_filter,
    ]))
    .with_zoom_range(Some(min_zoom), Some(max_zoom))
}

fn place_label(
    id: &str,
    text: (Color, Color),
    size: ((f64, f64), (f64, f64)),
    fade_start: f64,
    filter: Filter,
    zoom_range: (f64, Option<f64>),
) -> LayerRule {
    LayerRule::symbol(
        id,
        layers::PLACE,
        SymbolPaint::new(text_size_ramp(size.0, size.1), text.0, text.1).opacity(
            TextOpacity::FadeIn {
                start_zoom: fade_start,
            },
        ),
    )
    .with_filter(filter)
    .with_zoom_range(Some(zoom_range.0), zoom_range.1)
}

fn poi_tier_label(tier: PoiTier) -> LayerRule {
    use palette::label;
    let (text, halo, spacing, rank_filters) = match tier {
        PoiTier::Level1 => (
            label::POI_MAJOR_TEXT,
            label::POI_MAJOR_HALO,
            SYMBOL_SPACING_MAJOR,
            vec![Filter::Le(keys::RANK, 14.0)],
        ),
        PoiTier::Level2 => (
            label::POI_GENERAL_TEXT,
            label::POI_GENERAL_HALO,
            SYMBOL_SPACING_GENERAL,
            vec![Filter::Ge(keys::RANK, 15.0), Filter::Le(keys::RANK, 24.0)],
        ),
        PoiTier::Level3 => (
            label::POI_GENERAL_TEXT,
            label::POI_GENERAL_HALO,
            SYMBOL_SPACING_GENERAL,
            vec![Filter::Ge(keys::RANK, 25.0)],
        ),
    };
    let mut filters = vec![Filter::Has(keys::NAME)];
    filters.extend(rank_filters);
    filters.push(Filter::NotIn(keys::CLASS, POI_TRANSPORT_CLASSES));

    LayerRule::symbol(
        tier.layer_id(),
        layers::POI,
        SymbolPaint::new(12.0, text, halo)
            .halo(1.0, 0.5)
            .opacity(TextOpacity::FadeIn {
                start_zoom: tier.min_zoom(),
            })
            .spacing(spacing)
            .sort_key(SortKey::PoiRank),
    )
    .with_filter(Filter::All(filters))
    .with_zoom_range(Some(tier.min_zoom()), None)
}

/// Place hierarchy, then POI tiers, then railway stations and peaks
pub fn labels() -> Vec<LayerRule> {
    use palette::label;
    let city = (label::CITY_TEXT, label::CITY_HALO);

    let mut rules = vec![
        country_label(1.0, 1.0, 7.0, 4.0),
        country_label(2.0, 2.0, 7.0, 5.0),
        country_label(3.0, 3.0, 8.0, 7.0),
        place_label(
            "place-state",
            (label::REGION_TEXT, label::REGION_HALO),
            ((4.0, 10.0), (8.0, 14.0)),
            4.0,
            Filter::eq(keys::CLASS, "state"),
            (4.0, Some(9.0)),
        ),
        place_label(
            "place-city-capital",
            city,
            ((7.0, 14.0), (11.0, 24.0)),
            5.0,
            Filter::All(vec![
                Filter::eq(keys::CLASS, "city"),
                Filter::eq(keys::CAPITAL, 2.0),
            ]),
            (5.0, Some(14.0)),
        ),
        place_label(
            "place-city",
            city,
            ((7.0, 14.0), (11.0, 24.0)),
            7.0,
            Filter::All(vec![
                Filter::eq(keys::CLASS, "city"),
                Filter::ne(keys::CAPITAL, 2.0),
            ]),
            (7.0, Some(14.0)),
        ),
        place_label(
            "place-town",
            city,
            ((10.0, 14.0), (15.0, 24.0)),
            10.0,
            Filter::eq(keys::CLASS, "town"),
            (10.0, Some(16.0)),
        ),
        place_label(
            "place-village",
            city,
            ((10.0, 12.0), (15.0, 22.0)),
            12.0,
            Filter::eq(keys::CLASS, "village"),
            (12.0, Some(17.0)),
        ),
        place_label(
            "place-other",
            (label::POI_GENERAL_TEXT, label::POI_GENERAL_HALO),
            ((12.0, 10.0), (15.0, 14.0)),
            13.0,
            Filter::NotIn(
                keys::CLASS,
                &["city", "town", "village", "state", "country", "continent"],
            ),
            (13.0, None),
        ),
    ];

    rules.extend(PoiTier::ALL.into_iter().map(poi_tier_label));

    rules.push(
        LayerRule::symbol(
            "poi-railway",
            layers::POI,
            SymbolPaint::new(12.0, label::TRANSPORT_TEXT, label::TRANSPORT_HALO)
                .halo(1.0, 0.5)
                .opacity(TextOpacity::FadeIn { start_zoom: 13.0 })
                .spacing(SYMBOL_SPACING_MAJOR),
        )
        .with_filter(Filter::All(vec![
            Filter::Has(keys::NAME),
            Filter::eq(keys::CLASS, "railway"),
            Filter::eq(keys::SUBCLASS, "station"),
        ]))
        .with_zoom_range(Some(13.0), None),
    );

    rules.push(
        LayerRule::symbol(
            "poi-mountain-labels",
            layers::MOUNTAIN_PEAK,
            SymbolPaint::new(
                text_size_ramp((10.0, 10.0), (15.0, 14.0)),
                label::MOUNTAIN_TEXT,
                label::MOUNTAIN_HALO,
            )
            .halo(1.1, 0.15)
            .opacity(TextOpacity::FadeIn { start_zoom: 11.0 })
            .font(MOUNTAIN_FONTS)
            .spacing(SYMBOL_SPACING_MOUNTAIN)
            .letter_spacing(0.05)
            .line_height(1.2)
            .radial_offset(0.2)
            .sort_key(SortKey::PoiRank),
        )
        .with_filter(Filter::Has(keys::NAME))
        .with_zoom_range(Some(11.0), None),
    );

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::FeatureView;

    fn ids(rules: &[LayerRule]) -> Vec<&str> {
        rules.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_road_expansion_pairs() {
        let rules = expand_road_rules(&ROAD_RULES);
        assert_eq!(rules.len(), ROAD_RULES.len() * 2);
        for (pair, road) in rules.chunks(2).zip(ROAD_RULES.iter()) {
            assert_eq!(pair[0].id, format!("{}-casing", road.id));
            assert_eq!(pair[1].id, format!("{}-fill", road.id));
            assert_eq!(pair[0].filter, pair[1].filter);
            assert!(pair[0].line_width_at(12.0) > pair[1].line_width_at(12.0));
        }
    }

    #[test]
    fn test_road_order_most_important_first() {
        let rules = roads();
        assert_eq!(
            &ids(&rules)[..4],
            ["motorway-casing", "motorway-fill", "primary-casing", "primary-fill"]
        );
        assert_eq!(rules.last().map(|r| r.id.as_str()), Some("transportation-pier"));
    }

    #[test]
    fn test_label_order() {
        let rules = labels();
        assert_eq!(
            ids(&rules),
            [
                "place-country-1",
                "place-country-2",
                "place-country-3",
                "place-state",
                "place-city-capital",
                "place-city",
                "place-town",
                "place-village",
                "place-other",
                "poi-level-1",
                "poi-level-2",
                "poi-level-3",
                "poi-railway",
                "poi-mountain-labels",
            ]
        );
    }

    #[test]
    fn test_poi_tiers_gate_by_rank_and_zoom() {
        let rules = labels();
        let level2 = rules.iter().find(|r| r.id == "poi-level-2").unwrap();
        let poi = FeatureView::new("poi", Some("cafe"))
            .with_rank(20.0)
            .with_name("Cafe");
        assert!(!level2.symbol_state(&poi, 14.5).unwrap().visible);
        assert!(level2.symbol_state(&poi, 15.0).unwrap().visible);

        let ferry = FeatureView::new("poi", Some("ferry_terminal"))
            .with_rank(20.0)
            .with_name("Pier 1");
        assert!(!level2.symbol_state(&ferry, 18.0).unwrap().visible);
    }

    #[test]
    fn test_capital_split() {
        let rules = labels();
        let capital = rules.iter().find(|r| r.id == "place-city-capital").unwrap();
        let city = rules.iter().find(|r| r.id == "place-city").unwrap();
        let bangkok = FeatureView::new("place", Some("city")).with_capital(2.0);
        assert!(capital.applies_to(&bangkok, 8.0));
        assert!(!city.applies_to(&bangkok, 8.0));
    }

    #[test]
    fn test_country_label_ids() {
        let label = country_label(3.0, 3.0, 8.0, 7.0);
        assert_eq!(label.id, "place-country-3");
        let small = FeatureView::new("place", Some("country")).with_rank(6.0);
        assert!(label.applies_to(&small, 5.0));
    }

    #[test]
    fn test_group_kinds_cover_all_rules() {
        let total: usize = GroupKind::ALL.iter().map(|k| k.rules().len()).sum();
        assert_eq!(total, 1 + 4 + 6 + 8 + 2 + 18 + 2 + 14);
    }
}
