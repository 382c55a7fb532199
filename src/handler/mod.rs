//! Request handler module
//!
//! Responsible for request routing dispatch: the fixed greeting and health
//! routes, the optional static-file fallback, and not-found handling.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
