//! Quote normalization subsystem.
//!
//! # Data Flow
//! ```text
//! raw upstream bytes
//!     → normalize.rs (parse as untyped JSON, match on payload shape)
//!     → types.rs (canonical QuoteRecord, per-field defaults)
//!     → handed to the store writer and the HTTP response
//! ```
//!
//! # Design Decisions
//! - Normalization never fails; unknown shapes degrade to defaults
//! - A record always carries a non-empty bid
//! - Shape dispatch is a match over a parsed JSON value, one branch per
//!   observed upstream variant

pub mod normalize;
pub mod types;

pub use normalize::normalize;
pub use types::QuoteRecord;
