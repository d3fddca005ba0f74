use thiserror::Error;

#[derive(Error, Debug)]
pub enum OskError {
    #[error("Invalid magic code: expected 'OSKB', got {0:?}")]
    InvalidMagicCode([u8; 4]),

    #[error("Unsupported version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("File too small: {0} bytes")]
    FileTooSmall(usize),

    #[error("Invalid UTF-16 string at offset {0}")]
    InvalidUtf16(usize),

    #[error("Invalid table index: {0} (max: {1})")]
    InvalidIndex(usize, usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OskError>;
