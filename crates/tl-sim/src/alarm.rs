//! Process alarms.
//!
//! Each alarm is a raw comparison on the current [`ProcessState`]. There is
//! no hysteresis, latching or acknowledgement: the active flag is overwritten
//! on every evaluation.

use crate::layout::TankId;
use crate::snapshot::{AlarmView, ProcessState};
use serde::{Deserialize, Serialize};

/// Level above which a tank is in high-high alarm.
pub const LEVEL_HH: f64 = 0.95;

/// Heated tank temperature above which the high-temperature alarm is raised (°C).
pub const TEMP_HI_C: f64 = 80.0;

/// Source level above which a stopped pump counts as tripped.
pub const TRIP_DEMAND_LEVEL: f64 = 0.20;

/// The alarms configured on the plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlarmKind {
    /// Level high-high on a tank
    LevelHighHigh(TankId),
    /// Heated tank temperature high
    TempHigh(TankId),
    /// Pump stopped while the source tank still has demand
    PumpTrip,
}

impl AlarmKind {
    /// Alarm list in display order.
    pub const PLANT: [AlarmKind; 5] = [
        AlarmKind::LevelHighHigh(TankId::T2),
        AlarmKind::LevelHighHigh(TankId::T3),
        AlarmKind::LevelHighHigh(TankId::T4),
        AlarmKind::TempHigh(TankId::T3),
        AlarmKind::PumpTrip,
    ];

    /// Evaluate the alarm condition. Pure.
    pub fn evaluate(self, state: &ProcessState) -> bool {
        match self {
            AlarmKind::LevelHighHigh(tank) => state.level(tank) > LEVEL_HH,
            AlarmKind::TempHigh(tank) => state.temp_c(tank) > TEMP_HI_C,
            AlarmKind::PumpTrip => {
                !state.pump_running && state.level(TankId::T1) > TRIP_DEMAND_LEVEL
            }
        }
    }

    pub fn tag(self) -> String {
        match self {
            AlarmKind::LevelHighHigh(tank) => format!("{}.HH", tank.name()),
            AlarmKind::TempHigh(tank) => format!("{}.HI", tank.name()),
            AlarmKind::PumpTrip => "P1.TRIP".to_string(),
        }
    }

    pub fn description(self) -> String {
        match self {
            AlarmKind::LevelHighHigh(tank) => {
                format!("{} overfill (>{:.0}%)", tank.name(), LEVEL_HH * 100.0)
            }
            AlarmKind::TempHigh(tank) => {
                format!("{} high temperature (>{:.0}°C)", tank.name(), TEMP_HI_C)
            }
            AlarmKind::PumpTrip => "Pump stopped while demand exists".to_string(),
        }
    }
}

/// An alarm and its last evaluated state.
#[derive(Clone, Debug, PartialEq)]
pub struct Alarm {
    pub kind: AlarmKind,
    active: bool,
}

impl Alarm {
    pub fn new(kind: AlarmKind) -> Self {
        Self {
            kind,
            active: false,
        }
    }

    /// Re-evaluate and overwrite the active flag. Returns the previous flag.
    pub fn update(&mut self, state: &ProcessState) -> bool {
        let previous = self.active;
        self.active = self.kind.evaluate(state);
        previous
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn view(&self) -> AlarmView {
        AlarmView {
            tag: self.kind.tag(),
            description: self.kind.description(),
            active: self.active,
        }
    }
}

/// An alarm that changed state during a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlarmTransition {
    pub tag: String,
    /// `true` when the alarm was raised, `false` when it cleared
    pub raised: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ProcessState {
        ProcessState {
            time_s: 0.0,
            levels: [0.5, 0.5, 0.5, 0.5],
            temps_c: [20.0; 4],
            pump_running: true,
            pump_speed: 1.0,
            heater_on: true,
            heater_power: 3.0,
        }
    }

    #[test]
    fn level_hh_threshold() {
        let mut s = state();
        s.levels[TankId::T2.index()] = 0.96;
        assert!(AlarmKind::LevelHighHigh(TankId::T2).evaluate(&s));
        s.levels[TankId::T2.index()] = 0.94;
        assert!(!AlarmKind::LevelHighHigh(TankId::T2).evaluate(&s));
        s.levels[TankId::T2.index()] = 0.95;
        assert!(!AlarmKind::LevelHighHigh(TankId::T2).evaluate(&s));
    }

    #[test]
    fn temp_high_watches_only_its_tank() {
        let mut s = state();
        s.temps_c[TankId::T1.index()] = 95.0;
        assert!(!AlarmKind::TempHigh(TankId::T3).evaluate(&s));
        s.temps_c[TankId::T3.index()] = 80.5;
        assert!(AlarmKind::TempHigh(TankId::T3).evaluate(&s));
    }

    #[test]
    fn pump_trip_needs_demand() {
        let mut s = state();
        s.pump_running = false;
        s.levels[TankId::T1.index()] = 0.21;
        assert!(AlarmKind::PumpTrip.evaluate(&s));
        s.levels[TankId::T1.index()] = 0.20;
        assert!(!AlarmKind::PumpTrip.evaluate(&s));
        s.levels[TankId::T1.index()] = 0.9;
        s.pump_running = true;
        assert!(!AlarmKind::PumpTrip.evaluate(&s));
    }

    #[test]
    fn plant_tags() {
        let tags: Vec<String> = AlarmKind::PLANT.iter().map(|k| k.tag()).collect();
        assert_eq!(tags, ["T2.HH", "T3.HH", "T4.HH", "T3.HI", "P1.TRIP"]);
    }

    #[test]
    fn update_overwrites_without_latching() {
        let mut alarm = Alarm::new(AlarmKind::LevelHighHigh(TankId::T4));
        let mut s = state();
        s.levels[TankId::T4.index()] = 0.99;
        assert!(!alarm.update(&s));
        assert!(alarm.is_active());
        s.levels[TankId::T4.index()] = 0.5;
        assert!(alarm.update(&s));
        assert!(!alarm.is_active());
    }
}
