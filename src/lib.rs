//! Farbvelo - seeded color palettes
//!
//! Palette sessions, settings tokens, exports and the HTTP API.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
