//! Fixed-step process simulation for the four-tank plant.
//!
//! Provides:
//! - The plant model: mass balance, junction split, gravity drain, return
//!   flow, overflow valve, heating and cooling
//! - Debounced pipe flow indicators
//! - Alarms as a tagged enumeration evaluated on an immutable process state
//! - A bounded trend history
//! - Read-only snapshots for presentation code
//! - A fixed-step run driver with optional real-time pacing

pub mod alarm;
pub mod constants;
pub mod error;
pub mod history;
pub mod layout;
pub mod model;
pub mod params;
pub mod sim;
pub mod snapshot;

// Re-exports for public API
pub use alarm::{Alarm, AlarmKind, AlarmTransition};
pub use constants::{MAX_HISTORY_LEN, PlantConstants};
pub use error::{SimError, SimResult};
pub use history::{TrendHistory, TrendSample};
pub use layout::{PipeId, TankId};
pub use model::{ProcessModel, StepFlows, StepReport};
pub use params::StartupParams;
pub use sim::{RunOptions, RunSummary, run, run_with_observer};
pub use snapshot::{
    AlarmView, HeaterView, PipeView, PlantSnapshot, ProcessState, PumpView, TankView,
};
