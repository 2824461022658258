//! Scenario file schema.

use serde::{Deserialize, Serialize};
use tl_sim::{PlantConstants, RunOptions, StartupParams};

/// Schema version written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub startup: StartupParams,
    #[serde(default)]
    pub run: RunDef,
    /// Overrides for the plant tuning constants; absent means defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<PlantConstants>,
}

impl ScenarioFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            name: name.into(),
            startup: StartupParams::default(),
            run: RunDef::default(),
            constants: None,
        }
    }

    /// Constants to build the plant with.
    pub fn plant_constants(&self) -> PlantConstants {
        self.constants.unwrap_or_default()
    }
}

impl Default for ScenarioFile {
    fn default() -> Self {
        Self::new("Default scenario")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunDef {
    pub dt_s: f64,
    pub steps: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub realtime: bool,
}

impl Default for RunDef {
    fn default() -> Self {
        let opts = RunOptions::default();
        Self {
            dt_s: opts.dt,
            steps: opts.steps,
            realtime: opts.realtime,
        }
    }
}

impl RunDef {
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            dt: self.dt_s,
            steps: self.steps,
            realtime: self.realtime,
        }
    }
}
