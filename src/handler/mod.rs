//! Request handler module
//!
//! Responsible for method dispatch and static file serving from the document root.

pub mod listing;
pub mod router;
pub mod static_files;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main entry point
pub use router::{handle_request, RequestContext};
