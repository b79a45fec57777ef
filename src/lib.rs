pub mod browser;
pub mod common;
pub mod config;
pub mod credentials;
pub mod data_loader;
pub mod dataset;
pub mod errors;
pub mod export;
pub mod generate_commands;
pub mod geo_interface;
pub mod kepler;
#[cfg(test)]
mod test_utils;
pub mod visualize;

pub use dataset::{DataInput, Names, Payload};
pub use errors::{MapError, MapResult};
pub use geo_interface::GeoInterface;
pub use kepler::KeplerGl;
pub use visualize::{Visualize, VisualizeOptions};
