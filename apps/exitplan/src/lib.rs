//! # Exitplan Library
//!
//! This library exposes the Exitplan modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod config;
pub mod session;

// Re-export exitplan_core for convenience
pub use exitplan_core;
