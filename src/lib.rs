pub mod arecord;
pub mod common;
pub mod config;
pub mod constellix;

pub use config::*;
