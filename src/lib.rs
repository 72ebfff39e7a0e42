//! Bandwave - wave-distorted band gradients from color palettes
//!
//! CLI and HTTP control panel around the `wave-gradient` core.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
