//! Seeded Voronoi biome map generation.
//!
//! Re-exports the pipeline modules for use by the CLI binary and tools.

pub mod biomes;
pub mod elevation;
pub mod error;
pub mod export;
pub mod grid;
pub mod noise_field;
pub mod pipeline;
pub mod points;
pub mod raster;
pub mod voronoi;
pub mod warp;

pub use error::GenerationError;
pub use pipeline::{generate, generate_final, GenerationConfig, MapData};
