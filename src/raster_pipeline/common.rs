//! Common utilities module
//!
//! This module contains shared utilities used across the raster pipeline.

pub mod error;

pub use error::{AdjustError, Result};
