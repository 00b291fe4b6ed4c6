//! Structured decode of the device's 8-bit output port.
//!
//! Wire mapping, LSB first:
//!
//! ```text
//! [0]=R1 [1]=G1 [2]=B1 [3]=VSYNC_n [4]=R0 [5]=G0 [6]=B0 [7]=HSYNC_n
//! ```
//!
//! Both syncs are active low. Each colour channel is two bits: X1 is
//! the high-order bit (reconstruction weight 170), X0 the low-order
//! bit (weight 85), giving the quantised levels {0, 85, 170, 255}.

/// Named decode of one output port sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPins {
    /// Horizontal sync, active low (bit 7).
    pub hsync_n: bool,
    /// Vertical sync, active low (bit 3).
    pub vsync_n: bool,
    /// Red high bit, weight 170 (bit 0).
    pub red1: bool,
    /// Red low bit, weight 85 (bit 4).
    pub red0: bool,
    /// Green high bit, weight 170 (bit 1).
    pub green1: bool,
    /// Green low bit, weight 85 (bit 5).
    pub green0: bool,
    /// Blue high bit, weight 170 (bit 2).
    pub blue1: bool,
    /// Blue low bit, weight 85 (bit 6).
    pub blue0: bool,
}

impl OutputPins {
    /// Decode one sampled output byte.
    #[must_use]
    pub fn decode(byte: u8) -> Self {
        let bit = |index: u8| (byte >> index) & 1 != 0;
        Self {
            red1: bit(0),
            green1: bit(1),
            blue1: bit(2),
            vsync_n: bit(3),
            red0: bit(4),
            green0: bit(5),
            blue0: bit(6),
            hsync_n: bit(7),
        }
    }

    /// Reconstruct an 8-bit channel from its two sampled bits.
    fn channel(hi: bool, lo: bool) -> u8 {
        u8::from(hi) * 170 + u8::from(lo) * 85
    }

    /// Reconstructed red value (0, 85, 170 or 255).
    #[must_use]
    pub fn red(&self) -> u8 {
        Self::channel(self.red1, self.red0)
    }

    /// Reconstructed green value.
    #[must_use]
    pub fn green(&self) -> u8 {
        Self::channel(self.green1, self.green0)
    }

    /// Reconstructed blue value.
    #[must_use]
    pub fn blue(&self) -> u8 {
        Self::channel(self.blue1, self.blue0)
    }

    /// Reconstructed (R, G, B) triple.
    #[must_use]
    pub fn rgb(&self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_bits_decode() {
        // Both syncs idle (high), no colour.
        let pins = OutputPins::decode(0b1000_1000);
        assert!(pins.hsync_n);
        assert!(pins.vsync_n);
        assert_eq!(pins.rgb(), [0, 0, 0]);

        // HSYNC asserted (low), VSYNC idle.
        let pins = OutputPins::decode(0b0000_1000);
        assert!(!pins.hsync_n);
        assert!(pins.vsync_n);

        // VSYNC asserted, HSYNC idle.
        let pins = OutputPins::decode(0b1000_0000);
        assert!(pins.hsync_n);
        assert!(!pins.vsync_n);
    }

    #[test]
    fn channel_weighting() {
        // Bit 0 alone (R1): 170. Bit 4 alone (R0): 85. Both: 255.
        assert_eq!(OutputPins::decode(0b0000_0001).red(), 170);
        assert_eq!(OutputPins::decode(0b0001_0000).red(), 85);
        assert_eq!(OutputPins::decode(0b0001_0001).red(), 255);
        assert_eq!(OutputPins::decode(0).red(), 0);
    }

    #[test]
    fn all_three_channels_decode() {
        // R=255 (bits 0,4), G=170 (bit 1), B=85 (bit 6).
        let pins = OutputPins::decode(0b0101_0011);
        assert_eq!(pins.rgb(), [255, 170, 85]);
    }

    #[test]
    fn red_bits_cycle_through_all_levels() {
        // The four {bit0, bit4} combinations, in the order none, bit 0,
        // bit 4, both, reconstruct as 0, 170, 85, 255.
        let sequence = [0b0000_0000u8, 0b0000_0001, 0b0001_0000, 0b0001_0001];
        let levels: Vec<u8> = sequence
            .iter()
            .map(|&byte| OutputPins::decode(byte).red())
            .collect();
        assert_eq!(levels, [0, 170, 85, 255]);
    }
}
