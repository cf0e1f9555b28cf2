//! Altitudes
//!
//! Signed CDN URLs and media listings for a drone photography portfolio.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
