//! Core module - configuration
//!
//! - [`Config`] - back-office configuration

pub mod config;

pub use config::Config;
