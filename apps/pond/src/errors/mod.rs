//! Error handling for the pond turn layer.

pub mod error_code;

pub use error_code::ErrorCode;
