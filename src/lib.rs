pub mod utils;
pub mod error;
pub mod pipeline;
pub mod config;
pub mod helper;
pub mod modules;

#[cfg(test)]
mod testing;

pub use config::config::PipelineConfig;
pub use error::{QualityRejection, SkinAgeError};
pub use helper::landmarks::LandmarkSet;
pub use pipeline::pipeline::{SkinAgePipeline, SkinAgeReport};
pub use utils::image::{PixelSource, RgbImage};
