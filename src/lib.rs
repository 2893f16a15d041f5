//! chart-timeseries: a time-series chart axis.
//!
//! The axis turns labels and point data into a sorted, deduplicated
//! timeline, picks a tick unit plus a coarser major unit, decimates the
//! timeline into ticks that fit the available label space (snapping to
//! major boundaries where it can), and maps timeline positions to pixels
//! with equal-width slots.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{Axis, TimeSeriesScale, TimeSeriesScaleConfig};
pub use error::{ChartError, ChartResult};
