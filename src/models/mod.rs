//! Data models for the books server

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookInput};
