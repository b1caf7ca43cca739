//! CLI command implementations

pub mod config_management;
mod link_management;
mod log;

pub use link_management::*;
pub use log::send_log;
