use thiserror::Error;

/// Hard failures that prevent a verdict from being produced.
///
/// Rule violations are never reported through this type; they come back as
/// a failing [`ValidationVerdict`](crate::validation::ValidationVerdict).
#[derive(Error, Debug)]
pub enum SitingError {
    #[error("Unsupported file format: {filename} (supported formats: {supported})")]
    UnsupportedFormat { filename: String, supported: String },

    #[error("File size {size} bytes exceeds the maximum of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Height field {width}x{height} is below the minimum of {min}x{min}")]
    TooSmall { width: usize, height: usize, min: usize },

    #[error("Height field {width}x{height} given {actual} samples")]
    SampleCount {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("Height field is flat ({value} everywhere) and cannot support slope analysis")]
    Degenerate { value: f64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SitingError>;
