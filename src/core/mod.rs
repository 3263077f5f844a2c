pub mod config;
pub mod constants;
pub mod feature;
pub mod viewport;
