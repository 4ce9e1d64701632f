//! Bounded USD/BRL quote relay library.

pub mod config;
pub mod http;
pub mod quote;
pub mod store;
pub mod upstream;

pub use config::AppConfig;
pub use http::HttpServer;
pub use quote::QuoteRecord;
pub use store::QuoteStore;
