// src/infrastructure/mod.rs
pub mod config;
pub mod export;
pub mod http;
pub mod renderer;
pub mod wire;

pub use config::Config;
pub use http::HttpBackend;
pub use renderer::PageRenderer;
