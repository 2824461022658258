//! Instrument signals and timing primitives for tankloop.
//!
//! The plant model is driven by a fixed-step loop. This crate holds the small
//! pieces that sit between raw balance results and what an operator sees:
//!
//! - Signals are typed instrument readings (scalar or boolean)
//! - Hold timers debounce derived booleans such as "pipe is flowing"
//! - Sample accumulators decide when a trend sample is due

pub mod error;
pub mod hold;
pub mod sampled;
pub mod signal;

pub use error::{ControlError, ControlResult};
pub use hold::HoldTimer;
pub use sampled::SampleAccumulator;
pub use signal::{BoolSignal, ScalarSignal, Signal, SignalValue};
