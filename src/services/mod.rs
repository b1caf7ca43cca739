//! Service layer for business logic
//!
//! Shortcode generation and the short URL store, shared by the CLI and
//! library callers.

mod shortcode;
mod url_service;

pub use shortcode::ShortcodeGenerator;
pub use url_service::*;
