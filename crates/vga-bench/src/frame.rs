//! Capture window and frame buffer.

use crate::bench::BenchError;
use crate::timing::{H_TOTAL, V_TOTAL};

/// The sub-window of the raster that gets captured.
///
/// Validated at construction: a window larger than the raster can never
/// fill, so it is rejected up front rather than producing a short
/// buffer at the end of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureWindow {
    width: u16,
    height: u16,
}

impl CaptureWindow {
    /// Create a window, rejecting dimensions that exceed the raster
    /// (800 pixel clocks by 525 lines) or are zero.
    pub fn new(width: u16, height: u16) -> Result<Self, BenchError> {
        if width == 0
            || height == 0
            || u64::from(width) > H_TOTAL
            || u64::from(height) > V_TOTAL
        {
            return Err(BenchError::WindowTooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Window width in pixels.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Window height in lines.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total pixels in the window.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for CaptureWindow {
    /// The 200x150 preview window of the original verification run.
    fn default() -> Self {
        Self {
            width: 200,
            height: 150,
        }
    }
}

/// Captured (R, G, B) triples in row-major order.
///
/// Created empty, filled exactly once across one raster sweep, then
/// serialized and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    window: CaptureWindow,
    pixels: Vec<[u8; 3]>,
}

impl FrameBuffer {
    #[must_use]
    pub fn new(window: CaptureWindow) -> Self {
        Self {
            window,
            pixels: Vec::with_capacity(window.pixel_count()),
        }
    }

    /// Append one pixel in row-major order.
    pub fn push(&mut self, rgb: [u8; 3]) {
        self.pixels.push(rgb);
    }

    /// The window this buffer was captured through.
    #[must_use]
    pub fn window(&self) -> CaptureWindow {
        self.window
    }

    /// Captured pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Number of captured pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Has the buffer received every pixel of its window?
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.pixels.len() == self.window.pixel_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_within_raster_is_accepted() {
        let window = CaptureWindow::new(200, 150).expect("valid window");
        assert_eq!(window.pixel_count(), 30_000);

        // The full raster is the upper bound.
        assert!(CaptureWindow::new(800, 525).is_ok());
    }

    #[test]
    fn window_larger_than_raster_is_rejected() {
        assert!(matches!(
            CaptureWindow::new(900, 600),
            Err(BenchError::WindowTooLarge { width: 900, height: 600 })
        ));
        assert!(CaptureWindow::new(801, 100).is_err());
        assert!(CaptureWindow::new(100, 526).is_err());
    }

    #[test]
    fn empty_window_is_rejected() {
        assert!(CaptureWindow::new(0, 150).is_err());
        assert!(CaptureWindow::new(200, 0).is_err());
    }

    #[test]
    fn buffer_fills_to_window_size() {
        let window = CaptureWindow::new(2, 2).expect("valid window");
        let mut frame = FrameBuffer::new(window);
        assert!(frame.is_empty());
        assert!(!frame.is_full());

        for level in [0u8, 85, 170, 255] {
            frame.push([level, 0, 0]);
        }
        assert!(frame.is_full());
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.pixels()[3], [255, 0, 0]);
    }
}
