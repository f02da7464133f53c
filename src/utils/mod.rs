pub mod coordinate;
pub mod image;
pub mod logging;
pub mod polygon;
pub mod utils;
