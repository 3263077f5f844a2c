//! Core constants shared by the style engine.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Earth circumference at the equator in meters (Web Mercator).
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_016.0;

/// Layer names used by the OpenMapTiles-style schema.
pub mod layers {
    pub const BACKGROUND: &str = "background";
    pub const WATER: &str = "water";
    pub const WATERWAY: &str = "waterway";
    pub const LANDCOVER: &str = "landcover";
    pub const PARK: &str = "park";
    pub const LANDUSE: &str = "landuse";
    pub const BUILDING: &str = "building";
    pub const AEROWAY: &str = "aeroway";
    pub const TRANSPORTATION: &str = "transportation";
    pub const TRANSPORTATION_NAME: &str = "transportation_name";
    pub const BOUNDARY: &str = "boundary";
    pub const PLACE: &str = "place";
    pub const POI: &str = "poi";
    pub const MOUNTAIN_PEAK: &str = "mountain_peak";
    pub const AERODROME_LABEL: &str = "aerodrome_label";
}

/// Default identifier of the vector tile source in exported style documents.
pub const DEFAULT_SOURCE_ID: &str = "pmtiles_source";

/// Default attribution for OpenStreetMap-derived tiles.
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Mapbox/MapLibre style specification version emitted by the exporter.
pub const STYLE_SPEC_VERSION: u8 = 8;

/// Administrative levels at or below this value use the bold boundary style.
pub const ADMIN_BOUNDARY_MAX_LEVEL: f64 = 4.0;

/// Default PMTiles archive, resolved relative to the serving origin.
pub const DEFAULT_TILES_URL: &str = "thailand.pmtiles";
