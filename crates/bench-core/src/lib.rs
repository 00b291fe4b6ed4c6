//! Core traits and types for cycle-accurate device verification.
//!
//! Everything advances one master clock edge at a time. All timing is
//! counted in ticks of that clock. No exceptions.

mod clock;
mod dut;
mod tickable;
mod ticks;

pub use clock::MasterClock;
pub use dut::Dut;
pub use tickable::Tickable;
pub use ticks::Ticks;
