//! The three-phase verification procedure.
//!
//! Phase A applies enable/mode/reset and lets the device settle.
//! Phase B anchors on a falling HSYNC edge and measures the sync low
//! width and line period against the VGA tolerances, for a configured
//! number of consecutive pulses. Phase C waits (bounded) for VSYNC to
//! assert, then sweeps one raster while sampling colour bits into the
//! capture window.
//!
//! One deterministic pass, no retries: a timing deviation means the
//! device is wrong, not flaky.

use std::fmt;

use bench_core::{Dut, MasterClock, Ticks};

use crate::config::BenchConfig;
use crate::frame::FrameBuffer;
use crate::pins::OutputPins;
use crate::timing::{
    self, H_SYNC, H_TOTAL, LOW_WIDTH_TOLERANCE, PERIOD_TOLERANCE, RASTER_TICKS, SyncMeasurement,
};

/// The 25 MHz pixel clock driving the device (40 ns period; the VGA
/// standard's 25.175 MHz rounded to the simulator's integer grid).
pub const PIXEL_CLOCK: MasterClock = MasterClock::new(25_000_000);

/// Budget for finding a falling HSYNC edge: two full lines.
const EDGE_BUDGET: Ticks = Ticks::new(2 * H_TOTAL);

/// Budget for waiting on VSYNC assertion: two full rasters.
const FRAME_SYNC_BUDGET: Ticks = Ticks::new(2 * RASTER_TICKS);

/// Fatal verification failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchError {
    /// HSYNC never produced a falling edge within the scan budget.
    SyncEdgeTimeout { budget: u64 },
    /// Measured sync low width outside tolerance.
    SyncLowWidth { measured: u64, expected: u64 },
    /// Measured line period outside tolerance.
    SyncPeriod { measured: u64, expected: u64 },
    /// VSYNC never asserted within the bounded scan.
    FrameSyncTimeout { budget: u64 },
    /// Capture window exceeds the raster (or is empty).
    WindowTooLarge { width: u16, height: u16 },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SyncEdgeTimeout { budget } => {
                write!(f, "no HSYNC falling edge within {budget} cycles")
            }
            Self::SyncLowWidth { measured, expected } => write!(
                f,
                "HSYNC low width {measured}, expected {expected} (tolerance ±{LOW_WIDTH_TOLERANCE})",
            ),
            Self::SyncPeriod { measured, expected } => write!(
                f,
                "HSYNC period {measured}, expected {expected} (tolerance ±{PERIOD_TOLERANCE})",
            ),
            Self::FrameSyncTimeout { budget } => {
                write!(f, "VSYNC never asserted within {budget} cycles")
            }
            Self::WindowTooLarge { width, height } => write!(
                f,
                "capture window {width}x{height} exceeds the {H_TOTAL}x{} raster",
                timing::V_TOTAL,
            ),
        }
    }
}

impl std::error::Error for BenchError {}

/// Everything a successful run produces.
#[derive(Debug)]
pub struct BenchOutcome {
    /// One measurement per checked HSYNC pulse, all within tolerance.
    pub pulses: Vec<SyncMeasurement>,
    /// The captured preview frame, filled to the window size.
    pub frame: FrameBuffer,
    /// Total simulated ticks consumed across all phases.
    pub elapsed: Ticks,
}

/// The verification harness: a device under test plus a configuration.
pub struct VgaBench<D: Dut> {
    dut: D,
    config: BenchConfig,
    elapsed: Ticks,
}

impl<D: Dut> VgaBench<D> {
    #[must_use]
    pub fn new(dut: D, config: BenchConfig) -> Self {
        Self {
            dut,
            config,
            elapsed: Ticks::ZERO,
        }
    }

    /// Access the device (for inspection after a run).
    #[must_use]
    pub fn dut(&self) -> &D {
        &self.dut
    }

    /// Simulated ticks consumed so far.
    #[must_use]
    pub fn elapsed(&self) -> Ticks {
        self.elapsed
    }

    /// Run all three phases.
    pub fn run(&mut self) -> Result<BenchOutcome, BenchError> {
        self.apply_reset();
        let pulses = self.check_hsync()?;
        let frame = self.capture_frame()?;
        Ok(BenchOutcome {
            pulses,
            frame,
            elapsed: self.elapsed,
        })
    }

    /// Phase A: drive enable and the input ports, hold reset low, then
    /// release it and let the device settle before any sampling.
    pub fn apply_reset(&mut self) {
        self.dut.set_enable(true);
        self.dut.set_mode(self.config.mode);
        self.dut.set_aux(self.config.aux);

        self.dut.set_reset_n(false);
        self.dut.tick_n(Ticks::new(self.config.reset_cycles));
        self.dut.set_reset_n(true);
        self.dut.tick_n(Ticks::new(self.config.settle_cycles));
        self.elapsed += Ticks::new(self.config.reset_cycles + self.config.settle_cycles);
    }

    /// Phase B: measure the configured number of consecutive HSYNC
    /// pulses and check each against the VGA tolerances.
    pub fn check_hsync(&mut self) -> Result<Vec<SyncMeasurement>, BenchError> {
        let spent = timing::wait_hsync_falling_edge(&mut self.dut, EDGE_BUDGET).ok_or(
            BenchError::SyncEdgeTimeout {
                budget: EDGE_BUDGET.get(),
            },
        )?;
        self.elapsed += spent;

        let mut pulses = Vec::with_capacity(self.config.sync_pulses as usize);
        for _ in 0..self.config.sync_pulses {
            let m = timing::measure_pulse(&mut self.dut, EDGE_BUDGET).ok_or(
                BenchError::SyncEdgeTimeout {
                    budget: EDGE_BUDGET.get(),
                },
            )?;
            self.elapsed += Ticks::new(m.period);

            if !m.low_width_ok() {
                return Err(BenchError::SyncLowWidth {
                    measured: m.low_width,
                    expected: H_SYNC,
                });
            }
            if !m.period_ok() {
                return Err(BenchError::SyncPeriod {
                    measured: m.period,
                    expected: H_TOTAL,
                });
            }
            pulses.push(m);
        }
        Ok(pulses)
    }

    /// Phase C: wait (bounded) for VSYNC to read low, then sweep at most
    /// one raster with an (x, y) cursor, sampling colour bits into the
    /// capture window and stopping early once the window is filled.
    pub fn capture_frame(&mut self) -> Result<FrameBuffer, BenchError> {
        let mut frame_start = false;
        for spent in 1..=FRAME_SYNC_BUDGET.get() {
            self.dut.tick();
            if !OutputPins::decode(self.dut.output()).vsync_n {
                self.elapsed += Ticks::new(spent);
                frame_start = true;
                break;
            }
        }
        if !frame_start {
            return Err(BenchError::FrameSyncTimeout {
                budget: FRAME_SYNC_BUDGET.get(),
            });
        }

        let window = self.config.window;
        let mut frame = FrameBuffer::new(window);
        let (w, h) = (u64::from(window.width()), u64::from(window.height()));

        let mut x: u64 = 0;
        let mut y: u64 = 0;
        let mut swept: u64 = 0;
        for _ in 0..RASTER_TICKS {
            self.dut.tick();
            swept += 1;
            if x < w && y < h {
                frame.push(OutputPins::decode(self.dut.output()).rgb());
            }

            x += 1;
            if x == H_TOTAL {
                x = 0;
                y += 1;
                if y == h {
                    break;
                }
            }
        }
        self.elapsed += Ticks::new(swept);
        Ok(frame)
    }
}
