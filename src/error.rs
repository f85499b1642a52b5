use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Type must be uint8, uint16 or uint32, got {0:?}")]
    InvalidType(String),

    #[error("File too short for the 8 byte header ({0} bytes)")]
    TruncatedHeader(usize),

    #[error("Payload holds {actual} samples but the header declares {expected}")]
    PayloadLengthMismatch { expected: usize, actual: usize },

    #[error("Image dimensions too large")]
    DimensionsTooLarge,

    #[error("Row {row} has {actual} samples, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid scale factor {0}, must be one of -4..=-1 or 1..=4")]
    InvalidScale(i32),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Output would overwrite the source {}", .0.display())]
    WouldOverwrite(std::path::PathBuf),

    #[error("Cannot export an image with no pixels")]
    EmptyImage,

    #[error(transparent)]
    Png(#[from] png::EncodingError),

    #[error("Display failed: {0}")]
    Display(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
