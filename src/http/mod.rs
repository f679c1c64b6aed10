//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! user and file handlers.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_413_response, file_not_found, file_response,
    invalid_json, json_response, user_not_found,
};
