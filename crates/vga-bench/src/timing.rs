//! VGA 640x480@60 timing reference and HSYNC pulse measurement.
//!
//! The measurement loops are the bounded reimplementation of a
//! cooperative "wait for next edge" pattern: every scan takes a maximum
//! cycle budget and reports timeout instead of suspending forever on a
//! device that stops toggling.

use bench_core::{Dut, Ticks};

use crate::pins::OutputPins;

/// Pixel clocks per line.
pub const H_TOTAL: u64 = 800;
/// Visible pixels per line.
pub const H_VISIBLE: u64 = 640;
/// Horizontal sync pulse width in pixel clocks.
pub const H_SYNC: u64 = 96;
/// Horizontal front porch in pixel clocks.
pub const H_FRONT_PORCH: u64 = 16;
/// Horizontal back porch in pixel clocks.
pub const H_BACK_PORCH: u64 = 48;

/// Lines per frame.
pub const V_TOTAL: u64 = 525;
/// Visible lines per frame.
pub const V_VISIBLE: u64 = 480;
/// Vertical sync width in lines.
pub const V_SYNC: u64 = 2;
/// Vertical front porch in lines.
pub const V_FRONT_PORCH: u64 = 10;
/// Vertical back porch in lines.
pub const V_BACK_PORCH: u64 = 33;

/// Pixel clocks per frame (one full raster).
pub const RASTER_TICKS: u64 = H_TOTAL * V_TOTAL;

/// Allowed deviation of the measured sync low width from `H_SYNC`.
pub const LOW_WIDTH_TOLERANCE: u64 = 1;
/// Allowed deviation of the measured line period from `H_TOTAL`.
pub const PERIOD_TOLERANCE: u64 = 2;

/// One measured horizontal sync pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncMeasurement {
    /// Consecutive cycles with HSYNC low, anchor sample included.
    pub low_width: u64,
    /// Cycles from this pulse's falling edge to the next one.
    pub period: u64,
}

impl SyncMeasurement {
    /// Is the low width within `LOW_WIDTH_TOLERANCE` of `H_SYNC`?
    #[must_use]
    pub fn low_width_ok(&self) -> bool {
        self.low_width.abs_diff(H_SYNC) <= LOW_WIDTH_TOLERANCE
    }

    /// Is the line period within `PERIOD_TOLERANCE` of `H_TOTAL`?
    #[must_use]
    pub fn period_ok(&self) -> bool {
        self.period.abs_diff(H_TOTAL) <= PERIOD_TOLERANCE
    }

    /// Does the measurement fall within the VGA tolerances?
    #[must_use]
    pub fn within_tolerance(&self) -> bool {
        self.low_width_ok() && self.period_ok()
    }
}

/// Sample the HSYNC level after the most recent edge.
fn hsync_level(dut: &impl Dut) -> bool {
    OutputPins::decode(dut.output()).hsync_n
}

/// Advance the device until a falling (1 to 0) transition on HSYNC.
///
/// Returns the number of ticks consumed, or `None` if the budget is
/// exhausted first. On success the device sits on the first low sample
/// of a sync pulse (the anchor).
pub fn wait_hsync_falling_edge(dut: &mut impl Dut, budget: Ticks) -> Option<Ticks> {
    let mut last = hsync_level(dut);
    for spent in 1..=budget.get() {
        dut.tick();
        let cur = hsync_level(dut);
        if last && !cur {
            return Some(Ticks::new(spent));
        }
        last = cur;
    }
    None
}

/// Measure one sync pulse starting from its anchor sample.
///
/// The device must currently sit on the first low sample of a pulse
/// (see [`wait_hsync_falling_edge`]). Counts the low phase, then keeps
/// scanning until the next falling edge; the cycle count from anchor to
/// anchor is the line period. On success the device sits on the next
/// pulse's anchor, so consecutive calls measure consecutive pulses.
///
/// Returns `None` if no complete period fits within the budget.
pub fn measure_pulse(dut: &mut impl Dut, budget: Ticks) -> Option<SyncMeasurement> {
    let mut low_width: u64 = 1; // The anchor sample is low.
    let mut period: u64 = 0;
    let mut in_low_phase = true;
    let mut last = false;

    while period < budget.get() {
        dut.tick();
        period += 1;
        let cur = hsync_level(dut);

        if in_low_phase {
            if cur {
                in_low_phase = false;
            } else {
                low_width += 1;
            }
        } else if last && !cur {
            // Next pulse's falling edge: one full line elapsed.
            return Some(SyncMeasurement { low_width, period });
        }
        last = cur;
    }
    None
}
