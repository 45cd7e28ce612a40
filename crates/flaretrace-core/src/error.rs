use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlareError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FITS file: {0}")]
    InvalidFits(String),

    #[error("Unsupported BITPIX value: {0}")]
    UnsupportedBitpix(i64),

    #[error("Missing header keyword: {0}")]
    MissingKeyword(String),

    #[error("Invalid header value for {keyword}: {value}")]
    InvalidKeywordValue { keyword: String, value: String },

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("No FITS files matching {pattern} in {dir}")]
    NoFilesFound { dir: String, pattern: String },

    #[error("Not enough frames: {found} found, {required} required")]
    NotEnoughFrames { found: usize, required: usize },

    #[error("Frame shape mismatch: {0}x{1} vs {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),

    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Degenerate series: all values are zero")]
    DegenerateSeries,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Chart rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, FlareError>;
