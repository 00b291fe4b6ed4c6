//! VGA timing verification and frame-capture harness.
//!
//! Drives a device under test through a clock/reset sequence, measures
//! the horizontal sync pulse against the VGA 640x480@60 standard, and
//! reconstructs a small preview image from the 2-bit colour outputs.
//!
//! The run is one deterministic pass over simulated time: initialise,
//! measure, capture, emit artifacts. A timing deviation is a hard
//! failure with measured vs. expected values; there is no retry logic.

pub mod bench;
pub mod capture;
pub mod config;
pub mod frame;
pub mod pins;
pub mod report;
pub mod timing;

pub use bench::{BenchError, BenchOutcome, VgaBench};
pub use config::BenchConfig;
pub use frame::{CaptureWindow, FrameBuffer};
pub use pins::OutputPins;
pub use timing::SyncMeasurement;
