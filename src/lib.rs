//! urlkeeper - a local URL shortener
//!
//! Shortcodes map to original URLs with an expiry time and a click counter.
//! The record set lives in a local key store and is written back in full on
//! every change. A small client forwards structured log events to a remote
//! HTTP endpoint.
//!
//! # Architecture
//! - `services`: shortcode generation and the short URL service
//! - `storage`: snapshot stores (JSON file, in-memory)
//! - `logclient`: remote log client with closed enumerations
//! - `config`: TOML + environment configuration
//! - `interfaces`: command-line interface
//! - `system`: logging initialization
//! - `utils`: validation helpers and clocks

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod logclient;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
