//! Core tool logic
//!
//! - [`naming`]: Naming convention detection and conversion
//! - [`timestamp`]: Unix timestamp parsing and date rendering
//! - [`history`]: Saved timestamp conversions and their persistence
//! - [`batch`]: Batch input splitting and QR code history
//! - [`error`]: Error types and user-facing translations

pub mod batch;
pub mod error;
pub mod history;
pub mod naming;
pub mod timestamp;
