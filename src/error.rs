use thiserror::Error;

/// Everything that can go wrong between a file path and a fitted, rendered
/// model.
#[derive(Debug, Error)]
pub enum Error {
    /// The model's bounding box cannot anchor a fit: no vertices, zero
    /// extent in every axis, or non-finite coordinates.
    #[error("model geometry is degenerate: bounding box has no usable extent")]
    DegenerateGeometry,

    /// The file extension names a format no loader handles.
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    /// A loader crate rejected the file's contents.
    #[error("failed to parse model: {0}")]
    ModelParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The viewer configuration is unreadable or holds invalid values.
    #[error("configuration error: {0}")]
    Config(String),

    /// Screenshot or GIF encoding failed.
    #[error("image export error: {0}")]
    Image(String),
}

pub type Result<T> = std::result::Result<T, Error>;
