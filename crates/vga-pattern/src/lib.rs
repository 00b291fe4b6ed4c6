//! VGA 640x480@60 sync and test-pattern generator.
//!
//! A cycle-accurate model of the device the harness verifies: two beam
//! counters clocked at the 25 MHz pixel clock, active-low sync pulses on
//! the standard VGA schedule, and a 2-bit-per-channel test pattern on
//! the colour outputs during the visible area.
//!
//! # Timing (640x480@60, pixel clock ~25.175 MHz)
//!
//! - 800 pixel clocks per line: 640 visible + 16 front porch
//!   + 96 sync + 48 back porch
//! - 525 lines per frame: 480 visible + 10 front porch
//!   + 2 sync + 33 back porch
//! - 420,000 pixel clocks per frame (~59.5 Hz at an even 25 MHz)
//!
//! # Output port
//!
//! One 8-bit port, two bits per colour channel:
//!
//! - bit 7: HSYNC (active low)
//! - bit 3: VSYNC (active low)
//! - bits 0/4: R1/R0, bits 1/5: G1/G0, bits 2/6: B1/B0
//!
//! R1 is the high-order colour bit (reconstruction weight 170), R0 the
//! low-order bit (weight 85). Colour bits are blanked outside the
//! visible area.
//!
//! # Mode port
//!
//! Bits 2:0 select the pattern (0-5, anything else is black). Bits 7:3
//! are a palette adjustment: the low three bits of that field invert
//! R/G/B, the next bit swaps red and blue, and the top bit is reserved.

use bench_core::{Dut, Tickable};

/// Pixel clocks per line.
pub const H_TOTAL: u16 = 800;
/// Visible pixels per line.
pub const H_VISIBLE: u16 = 640;
/// Horizontal front porch (visible end to sync start).
pub const H_FRONT_PORCH: u16 = 16;
/// Horizontal sync pulse width.
pub const H_SYNC: u16 = 96;
/// Horizontal back porch (sync end to line end).
pub const H_BACK_PORCH: u16 = 48;

/// Lines per frame.
pub const V_TOTAL: u16 = 525;
/// Visible lines per frame.
pub const V_VISIBLE: u16 = 480;
/// Vertical front porch in lines.
pub const V_FRONT_PORCH: u16 = 10;
/// Vertical sync width in lines.
pub const V_SYNC: u16 = 2;
/// Vertical back porch in lines.
pub const V_BACK_PORCH: u16 = 33;

/// First pixel clock of the horizontal sync pulse (656).
const H_SYNC_START: u16 = H_VISIBLE + H_FRONT_PORCH;
/// First pixel clock after the horizontal sync pulse (752).
const H_SYNC_END: u16 = H_SYNC_START + H_SYNC;
/// First line of the vertical sync pulse (490).
const V_SYNC_START: u16 = V_VISIBLE + V_FRONT_PORCH;
/// First line after the vertical sync pulse (492).
const V_SYNC_END: u16 = V_SYNC_START + V_SYNC;

/// VGA test-pattern generator.
pub struct PatternGenerator {
    /// Current pixel clock within the line (0-799).
    h: u16,
    /// Current line within the frame (0-524).
    v: u16,
    /// Active-low reset pin.
    reset_n: bool,
    /// Enable pin; counting is gated while low.
    enable: bool,
    /// Mode/palette input port.
    mode: u8,
    /// Auxiliary input port (solid-colour source for mode 5).
    aux: u8,
    /// Registered output port, updated on each rising edge.
    uo_out: u8,
}

impl PatternGenerator {
    #[must_use]
    pub fn new() -> Self {
        let mut dut = Self {
            h: 0,
            v: 0,
            reset_n: false,
            enable: false,
            mode: 0,
            aux: 0,
            uo_out: 0,
        };
        dut.uo_out = dut.encode_output();
        dut
    }

    /// Current beam position (pixel clock within line, line within frame).
    #[must_use]
    pub fn beam(&self) -> (u16, u16) {
        (self.h, self.v)
    }

    /// Position the beam directly (for testing).
    #[doc(hidden)]
    pub fn set_beam(&mut self, h: u16, v: u16) {
        self.h = h % H_TOTAL;
        self.v = v % V_TOTAL;
        self.uo_out = self.encode_output();
    }

    /// Compute the output byte for the current beam position and inputs.
    fn encode_output(&self) -> u8 {
        let hsync_n = !(self.h >= H_SYNC_START && self.h < H_SYNC_END);
        let vsync_n = !(self.v >= V_SYNC_START && self.v < V_SYNC_END);

        let (r, g, b) = if self.h < H_VISIBLE && self.v < V_VISIBLE {
            self.pattern_rgb()
        } else {
            (0, 0, 0) // Blanking
        };

        // Bit n of the 2-bit level: x1 = high bit (weight 170), x0 = low
        // bit (weight 85). x1 lands on bits 0-2, x0 on bits 4-6.
        let hi = |level: u8| (level >> 1) & 1;
        let lo = |level: u8| level & 1;

        (u8::from(hsync_n) << 7)
            | (lo(b) << 6)
            | (lo(g) << 5)
            | (lo(r) << 4)
            | (u8::from(vsync_n) << 3)
            | (hi(b) << 2)
            | (hi(g) << 1)
            | hi(r)
    }

    /// 2-bit RGB levels (each 0-3) for the current visible position.
    fn pattern_rgb(&self) -> (u8, u8, u8) {
        let (h, v) = (self.h, self.v);

        let (r, g, b) = match self.mode & 0x07 {
            // Colour bars: 8 bars of 80 pixels, white to black.
            0 => BARS[(h / 80) as usize % 8],
            // Horizontal red gradient, 4 steps of 160 pixels.
            1 => ((h / 160) as u8 & 3, 0, 0),
            // Vertical green gradient, 4 steps of 120 lines.
            2 => (0, (v / 120) as u8 & 3, 0),
            // 32x32 checkerboard.
            3 => {
                if (h / 32 + v / 32) % 2 == 0 {
                    (3, 3, 3)
                } else {
                    (0, 0, 0)
                }
            }
            // Diagonal XOR weave.
            4 => {
                let level = (((h >> 4) ^ (v >> 4)) & 3) as u8;
                (level, level, 3 - level)
            }
            // Solid colour from the auxiliary port: aux[1:0]=R,
            // aux[3:2]=G, aux[5:4]=B.
            5 => (self.aux & 3, (self.aux >> 2) & 3, (self.aux >> 4) & 3),
            // Modes 6-7 unassigned.
            _ => (0, 0, 0),
        };

        self.apply_palette(r, g, b)
    }

    /// Apply the palette field (mode bits 7:3) to a 2-bit RGB triple.
    ///
    /// Palette bit 0 inverts red, bit 1 green, bit 2 blue; bit 3 swaps
    /// the red and blue channels. Bit 4 is reserved.
    fn apply_palette(&self, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
        let palette = self.mode >> 3;
        let mut r = if palette & 0x01 != 0 { 3 - r } else { r };
        let g = if palette & 0x02 != 0 { 3 - g } else { g };
        let mut b = if palette & 0x04 != 0 { 3 - b } else { b };
        if palette & 0x08 != 0 {
            core::mem::swap(&mut r, &mut b);
        }
        (r, g, b)
    }
}

/// Colour bar levels, left to right: white, yellow, cyan, green,
/// magenta, red, blue, black.
const BARS: [(u8, u8, u8); 8] = [
    (3, 3, 3),
    (3, 3, 0),
    (0, 3, 3),
    (0, 3, 0),
    (3, 0, 3),
    (3, 0, 0),
    (0, 0, 3),
    (0, 0, 0),
];

impl Tickable for PatternGenerator {
    fn tick(&mut self) {
        if !self.reset_n {
            // Synchronous reset: counters held at the frame origin.
            self.h = 0;
            self.v = 0;
            self.uo_out = self.encode_output();
            return;
        }
        if !self.enable {
            return;
        }

        self.h += 1;
        if self.h >= H_TOTAL {
            self.h = 0;
            self.v += 1;
            if self.v >= V_TOTAL {
                self.v = 0;
            }
        }
        self.uo_out = self.encode_output();
    }
}

impl Dut for PatternGenerator {
    fn set_reset_n(&mut self, level: bool) {
        self.reset_n = level;
    }

    fn set_enable(&mut self, level: bool) {
        self.enable = level;
    }

    fn set_mode(&mut self, value: u8) {
        self.mode = value;
    }

    fn set_aux(&mut self, value: u8) {
        self.aux = value;
    }

    fn output(&self) -> u8 {
        self.uo_out
    }
}

impl Default for PatternGenerator {
    fn default() -> Self {
        Self::new()
    }
}
