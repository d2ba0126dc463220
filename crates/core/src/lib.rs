//! `stocklens-core`: shared building blocks for the analytics workspace.
//!
//! This crate contains **pure** primitives (no IO, no threads, no HTTP).

pub mod code;
pub mod error;
pub mod rounding;

pub use code::ItemCode;
pub use error::{AnalyticsError, AnalyticsResult, DateField};
pub use rounding::{round_to, round2, round3};
