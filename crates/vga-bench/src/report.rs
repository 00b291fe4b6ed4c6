//! Machine-readable run report (JSON).

use std::error::Error;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::bench::BenchOutcome;
use crate::config::BenchConfig;
use crate::timing::{H_SYNC, H_TOTAL};

/// One measured HSYNC pulse alongside the expected values.
#[derive(Debug, Serialize)]
pub struct PulseReport {
    pub low_width: u64,
    pub expected_low_width: u64,
    pub period: u64,
    pub expected_period: u64,
}

/// Summary of a completed verification run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub pixel_clock_hz: u64,
    pub clock_period_ns: u64,
    pub mode: u8,
    pub aux: u8,
    pub window_width: u16,
    pub window_height: u16,
    pub pulses: Vec<PulseReport>,
    pub captured_pixels: usize,
    pub simulated_ticks: u64,
}

impl RunReport {
    #[must_use]
    pub fn new(config: &BenchConfig, outcome: &BenchOutcome) -> Self {
        let clock = crate::bench::PIXEL_CLOCK;
        Self {
            pixel_clock_hz: clock.frequency_hz,
            clock_period_ns: clock.period_ns(),
            mode: config.mode,
            aux: config.aux,
            window_width: config.window.width(),
            window_height: config.window.height(),
            pulses: outcome
                .pulses
                .iter()
                .map(|m| PulseReport {
                    low_width: m.low_width,
                    expected_low_width: H_SYNC,
                    period: m.period,
                    expected_period: H_TOTAL,
                })
                .collect(),
            captured_pixels: outcome.frame.len(),
            simulated_ticks: outcome.elapsed.get(),
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn save_report(report: &RunReport, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::create(path)?;
    let w = BufWriter::new(file);
    serde_json::to_writer_pretty(w, report)?;
    Ok(())
}
