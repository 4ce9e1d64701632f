//! Upstream quote API subsystem.
//!
//! One bounded GET per incoming request; timeouts are distinguishable from
//! other transport failures so callers can branch on them if they need to.

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
