//! Quote persistence subsystem.
//!
//! # Data Flow
//! ```text
//! QuoteRecord
//!     → writer.rs (spawn insert, race against the write deadline)
//!     → sqlite.rs (bounded pool, append-only insert)
//!
//! GET /get-data
//!     → sqlite.rs (full-table read, rows mapped back to records)
//! ```
//!
//! # Design Decisions
//! - The table is append-only; overlapping requests insert independent rows
//! - A write that loses its deadline race is abandoned, not rolled back
//! - Pool bounds (size, idle, lifetime) are operational config, not part of
//!   the per-request protocol

pub mod sqlite;
pub mod writer;

pub use sqlite::{QuoteStore, StoreError};
pub use writer::persist;
