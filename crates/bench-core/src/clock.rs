//! Master clock configuration.

/// Master clock configuration for a device under test.
///
/// The device is driven from a single free-running clock. Every tick is
/// one period of this clock (e.g. 40 ns for a 25 MHz VGA pixel clock).
#[derive(Debug, Clone, Copy)]
pub struct MasterClock {
    /// Clock frequency in Hz (e.g. `25_000_000` for a 40 ns period).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Clock period in nanoseconds (integer division).
    #[must_use]
    pub const fn period_ns(&self) -> u64 {
        1_000_000_000 / self.frequency_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vga_pixel_clock_period() {
        let clock = MasterClock::new(25_000_000);
        assert_eq!(clock.period_ns(), 40);
    }
}
