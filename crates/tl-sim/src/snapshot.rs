//! Read-only views of the plant for presentation code.
//!
//! Everything here is an owned copy. Holding a snapshot never borrows the
//! model, so a renderer cannot observe a half-applied step or mutate
//! simulation state.

use crate::layout::{HEATED_TANK, TankId};
use serde::{Deserialize, Serialize};
use tl_components::Point;

/// Minimal process state that alarms are evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessState {
    /// Elapsed simulated time (s)
    pub time_s: f64,
    /// Levels in tank order T1..T4, each in `[0, 1]`
    pub levels: [f64; 4],
    /// Temperatures in tank order T1..T4 (°C)
    pub temps_c: [f64; 4],
    pub pump_running: bool,
    pub pump_speed: f64,
    pub heater_on: bool,
    pub heater_power: f64,
}

impl ProcessState {
    pub fn level(&self, tank: TankId) -> f64 {
        self.levels[tank.index()]
    }

    pub fn temp_c(&self, tank: TankId) -> f64 {
        self.temps_c[tank.index()]
    }

    /// Temperature of the heated tank.
    pub fn heated_temp_c(&self) -> f64 {
        self.temp_c(HEATED_TANK)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TankView {
    pub name: String,
    pub level: f64,
    pub quantity: f64,
    pub temp_c: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub name: String,
    pub waypoints: Vec<Point>,
    pub flowing: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PumpView {
    pub name: String,
    pub running: bool,
    pub speed: f64,
    pub angle_rad: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaterView {
    pub name: String,
    pub on: bool,
    pub power: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlarmView {
    pub tag: String,
    pub description: String,
    pub active: bool,
}

/// Everything a diagram, alarm table or status line needs.
///
/// The trend history is not copied here; read it through
/// [`crate::ProcessModel::history`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    pub time_s: f64,
    pub tanks: Vec<TankView>,
    pub pipes: Vec<PipeView>,
    pub pump: PumpView,
    pub heater: HeaterView,
    pub alarms: Vec<AlarmView>,
}

impl PlantSnapshot {
    /// Alarms currently active.
    pub fn active_alarms(&self) -> impl Iterator<Item = &AlarmView> {
        self.alarms.iter().filter(|a| a.active)
    }
}
