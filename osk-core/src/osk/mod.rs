pub mod error;
pub mod loader;

pub use error::{OskError, Result};
pub use loader::OskLoader;

/// Magic code of the compiled table file.
pub const MAGIC: &[u8; 4] = b"OSKB";
/// Current format version.
pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 0;
