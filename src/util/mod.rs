//! Shared utilities

pub mod fs;
pub mod hash;

pub use hash::Fingerprint;
