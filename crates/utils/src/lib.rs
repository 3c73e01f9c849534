//! Shared utilities for envgen

pub mod atomic_file;
pub mod logging;
