//! tl-components: equipment models for the four-tank plant.
//!
//! Provides:
//! - Tanks with a bounded quantity, derived level and a temperature
//! - Pump and heater holding their operator settings
//! - Pipes carrying a debounced "flowing" indicator and diagram geometry
//!
//! Components do not know about each other. The process model in tl-sim
//! moves volume and heat between them and decides what each pipe shows.

pub mod common;
pub mod error;
pub mod heater;
pub mod pipe;
pub mod pump;
pub mod tank;
pub mod traits;

// Re-exports
pub use common::{Point, Rect, l_path};
pub use error::{ComponentError, ComponentResult};
pub use heater::Heater;
pub use pipe::Pipe;
pub use pump::Pump;
pub use tank::Tank;
pub use traits::{Instrumented, Reading};
