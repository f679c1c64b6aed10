//! Request handler module
//!
//! Responsible for request routing dispatch and the user/file handlers.

mod body;
pub mod router;
mod static_files;
mod users;

// Re-export main entry point
pub use router::handle_request;
