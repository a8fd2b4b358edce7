//! Shared utilities.
//!
//! Point-sequence hashing for change detection.

pub mod hash;
