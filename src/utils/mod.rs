//! Utility helpers: output file writing and case-insensitive text comparison.
pub mod files;
pub mod text;

pub use files::OutputWriter;
