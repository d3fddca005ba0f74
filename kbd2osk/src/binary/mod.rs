pub mod writer;

pub use writer::OskWriter;
