//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! request dispatch in `handler`.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cors::inject_headers;
pub use response::{
    build_304_response, build_403_response, build_404_response, build_500_response,
    build_501_response, build_file_response, build_html_response, build_options_response,
    build_redirect_response,
};
