//! Basemap palette for the composed layer stack: soft neutral land, blue
//! water, warm road casings and brown label text.

use crate::style::Color;

pub mod land {
    use super::Color;
    pub const BASE: Color = Color::hex(0xf6f2ea);
    pub const TINT: Color = Color::hex(0xf1ece3);
}

pub mod water {
    use super::Color;
    pub const FILL: Color = Color::hex(0xa6c8ff);
    pub const INNER: Color = Color::hex(0xc5ddff);
    pub const EDGE: Color = Color::hex(0x5f8ed8);
}

pub mod vegetation {
    use super::Color;
    pub const PARK: Color = Color::hex(0xd5f0c8);
    pub const FOREST: Color = Color::hex(0xb9ddad);
    pub const GRASS: Color = Color::hex(0xe5f3d6);
    pub const WETLAND: Color = Color::hex(0xe0eee2);
    pub const FARMLAND: Color = Color::hex(0xf3e5c3);
    pub const SAND: Color = Color::hex(0xf9ebcf);
}

pub mod landuse {
    use super::Color;
    pub const RESIDENTIAL: Color = Color::hex(0xf2f0ea);
    pub const COMMERCIAL: Color = Color::hex(0xf9e5e0);
    pub const INDUSTRIAL: Color = Color::hex(0xeee1df);
    pub const INSTITUTIONAL: Color = Color::hex(0xf2e8fb);
    pub const HOSPITAL: Color = Color::hex(0xffe3e3);
    pub const SCHOOL: Color = Color::hex(0xfff4da);
    pub const STADIUM: Color = Color::hex(0xe6f6ee);
    pub const CEMETERY: Color = Color::hex(0xdceadd);
}

pub mod building {
    use super::Color;
    pub const FILL: Color = Color::hex(0xe4e1db);
    pub const OUTLINE: Color = Color::hex(0xc7c2ba);
}

pub mod road {
    use super::Color;
    pub const MOTORWAY: Color = Color::hex(0xffd78c);
    pub const MOTORWAY_CASING: Color = Color::hex(0xe6b259);
    pub const PRIMARY: Color = Color::hex(0xffffff);
    pub const PRIMARY_CASING: Color = Color::hex(0xd6d2cc);
    pub const SECONDARY: Color = Color::hex(0xfcfbf7);
    pub const SECONDARY_CASING: Color = Color::hex(0xdad6cf);
    pub const TERTIARY: Color = Color::hex(0xfbfaf5);
    pub const TERTIARY_CASING: Color = Color::hex(0xdcd8d1);
    pub const MINOR: Color = Color::hex(0xfbfaf7);
    pub const MINOR_CASING: Color = Color::hex(0xe5e2db);
    pub const SERVICE: Color = Color::hex(0xfbfaf5);
    pub const SERVICE_CASING: Color = Color::hex(0xe8e4dc);
    pub const PATH: Color = Color::hex(0xd9c8b1);
    pub const TRACK: Color = Color::hex(0xcdb38f);
    pub const BUSWAY: Color = Color::hex(0xf4d0a6);
}

pub mod transit {
    use super::Color;
    pub const RAILWAY: Color = Color::hex(0x8c8a86);
    pub const FERRY: Color = Color::hex(0x6aa4d8);
    pub const PIER: Color = Color::hex(0xe1dfd6);
    pub const PIER_OUTLINE: Color = Color::hex(0xcfcfcf);
    pub const AEROWAY: Color = Color::hex(0xeceaf3);
    pub const AEROWAY_OUTLINE: Color = Color::hex(0xcfd0d5);
}

pub mod boundary {
    use super::Color;
    pub const COUNTRY: Color = Color::hex(0xb5b0a8);
    pub const REGION: Color = Color::hex(0xd0ccc4);
}

pub mod label {
    use super::Color;
    pub const COUNTRY_TEXT: Color = Color::hex(0xb99760);
    pub const COUNTRY_HALO: Color = Color::hex(0xfff7ec);
    pub const REGION_TEXT: Color = Color::hex(0xb98c4f);
    pub const REGION_HALO: Color = Color::hex(0xfff7ec);
    pub const CITY_TEXT: Color = Color::hex(0x9b6b3d);
    pub const CITY_HALO: Color = Color::hex(0xfff4e6);
    pub const POI_MAJOR_TEXT: Color = Color::hex(0x7d5b3c);
    pub const POI_MAJOR_HALO: Color = Color::hex(0xfff9ef);
    pub const POI_GENERAL_TEXT: Color = Color::hex(0x6a5c51);
    pub const POI_GENERAL_HALO: Color = Color::hex(0xfffdf7);
    pub const MOUNTAIN_TEXT: Color = Color::hex(0x805f45);
    pub const MOUNTAIN_HALO: Color = Color::hex(0xfffbf3);
    pub const TRANSPORT_TEXT: Color = Color::hex(0xb79a7c);
    pub const TRANSPORT_HALO: Color = Color::hex(0xfffbf4);
}
