//! Harness configuration.

use crate::frame::CaptureWindow;

/// Configuration for one verification run.
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    /// Mode/palette input port value (bits 2:0 select the pattern).
    pub mode: u8,
    /// Auxiliary input port value.
    pub aux: u8,
    /// Capture window for the preview frame.
    pub window: CaptureWindow,
    /// Number of consecutive HSYNC pulses to measure and check.
    pub sync_pulses: u32,
    /// Cycles to hold reset low.
    pub reset_cycles: u64,
    /// Cycles to wait after reset release before sampling.
    pub settle_cycles: u64,
}

impl Default for BenchConfig {
    /// The original verification run: mode port 3, aux 0, a 200x150
    /// preview window, 10 reset + 10 settle cycles.
    fn default() -> Self {
        Self {
            mode: 3,
            aux: 0,
            window: CaptureWindow::default(),
            sync_pulses: 3,
            reset_cycles: 10,
            settle_cycles: 10,
        }
    }
}
