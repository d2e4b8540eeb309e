//! Palette Picker: a JSON API over projects and their color palettes.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod store;

pub use config::AppConfig;
pub use http::AppServer;
pub use lifecycle::Shutdown;
pub use store::Store;
