//! The device-under-test boundary.

use crate::Tickable;

/// A clocked device under test.
///
/// This is the seam between the harness and whatever produces the
/// signals: a Rust device model, an FFI-wrapped simulator, a replayed
/// waveform. The harness only ever drives the named input pins and
/// samples the output port; it does not know how the outputs are made.
///
/// Input pins are driven between clock edges and take effect on the
/// next `tick()`. The output port reflects the device state after the
/// most recent edge.
pub trait Dut: Tickable {
    /// Drive the active-low reset pin.
    fn set_reset_n(&mut self, level: bool);

    /// Drive the enable pin.
    fn set_enable(&mut self, level: bool);

    /// Drive the 8-bit mode/configuration input port.
    fn set_mode(&mut self, value: u8);

    /// Drive the 8-bit auxiliary input port.
    fn set_aux(&mut self, value: u8);

    /// Sample the 8-bit output port.
    fn output(&self) -> u8;
}
