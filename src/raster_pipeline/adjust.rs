//! Raster adjustment orchestration
//!
//! This module turns band statistics into transfer functions, applies them
//! row by row, and writes the resulting images through the storage backend.

mod engine;
mod naming;
mod adjuster;


pub use engine::apply_transfer_functions;
pub use naming::OutputKind;
pub use adjuster::RasterAdjuster;

/// Sentinel used when the caller does not pick one.
pub const DEFAULT_NO_DATA_VALUE: u16 = 0;
