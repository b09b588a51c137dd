//! HTTP API: configuration, routing, auth and request/response mapping.

pub mod app;
pub mod config;
pub mod middleware;

pub use app::{build_app, AppServices};
pub use config::{Config, Environment};
