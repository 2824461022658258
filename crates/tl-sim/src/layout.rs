//! Fixed plant topology and diagram placement.
//!
//! ```text
//!   T1 ──► P1 ──► junction ─┬─► T2 ─┐
//!   ▲                       └─► T3 ─┴─► T4
//!   └──────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tl_components::{Point, Rect};

/// Tank positions in the plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankId {
    /// Source tank feeding the pump
    T1,
    /// First branch after the junction
    T2,
    /// Second branch after the junction, fitted with the heater
    T3,
    /// Sump collecting the gravity drains
    T4,
}

impl TankId {
    pub const ALL: [TankId; 4] = [TankId::T1, TankId::T2, TankId::T3, TankId::T4];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TankId::T1 => "T1",
            TankId::T2 => "T2",
            TankId::T3 => "T3",
            TankId::T4 => "T4",
        }
    }

    pub(crate) fn outline(self) -> Rect {
        match self {
            TankId::T1 => Rect::new(60.0, 70.0, 110.0, 150.0),
            TankId::T2 => Rect::new(270.0, 70.0, 110.0, 150.0),
            TankId::T3 => Rect::new(480.0, 70.0, 110.0, 150.0),
            TankId::T4 => Rect::new(270.0, 320.0, 110.0, 150.0),
        }
    }
}

/// Links drawn on the plant diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeId {
    T1ToPump,
    PumpToJunction,
    JunctionToT2,
    JunctionToT3,
    T2ToT4,
    T3ToT4,
    T4ToT1,
}

impl PipeId {
    pub const ALL: [PipeId; 7] = [
        PipeId::T1ToPump,
        PipeId::PumpToJunction,
        PipeId::JunctionToT2,
        PipeId::JunctionToT3,
        PipeId::T2ToT4,
        PipeId::T3ToT4,
        PipeId::T4ToT1,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PipeId::T1ToPump => "T1-P1",
            PipeId::PumpToJunction => "P1-J",
            PipeId::JunctionToT2 => "J-T2",
            PipeId::JunctionToT3 => "J-T3",
            PipeId::T2ToT4 => "T2-T4",
            PipeId::T3ToT4 => "T3-T4",
            PipeId::T4ToT1 => "T4-T1",
        }
    }
}

pub(crate) const PUMP_NAME: &str = "P1";
pub(crate) const PUMP_CENTER: Point = Point::new(200.0, 300.0);
pub(crate) const HEATER_NAME: &str = "H1";
pub(crate) const HEATER_ORIGIN: Point = Point::new(535.0, 255.0);
pub(crate) const JUNCTION: Point = Point::new(400.0, 250.0);

/// Tank heated by the heater.
pub const HEATED_TANK: TankId = TankId::T3;
