pub mod cli;
pub mod codec;
pub mod commands;
pub mod error;
pub mod export;
pub mod gfx;
pub mod img;
pub mod logger;
pub mod scale;
pub mod util;

pub use codec::{SampleWidth, decode, encode};
pub use error::{Error, Result};
pub use img::RasterImage;
