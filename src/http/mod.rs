//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, shared state)
//!     → quote.rs (/cotacao orchestration, /get-data history)
//!     → upstream + store subsystems
//! ```

pub mod quote;
pub mod server;

pub use server::{AppState, HttpServer};
