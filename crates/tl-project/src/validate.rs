//! Scenario validation logic.

use crate::schema::{RunDef, SCHEMA_VERSION, ScenarioFile};
use tl_sim::SimError;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid startup parameters: {0}")]
    Startup(SimError),

    #[error("Invalid plant constants: {0}")]
    Constants(SimError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &ScenarioFile) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", scenario.name),
            reason: "must not be empty".to_string(),
        });
    }

    scenario
        .startup
        .validate()
        .map_err(ValidationError::Startup)?;

    if let Some(constants) = &scenario.constants {
        constants.validate().map_err(ValidationError::Constants)?;
    }

    validate_run(&scenario.run)?;

    let hold_s = scenario.plant_constants().flow_hold_s;
    if scenario.run.dt_s > hold_s {
        tracing::warn!(
            dt_s = scenario.run.dt_s,
            hold_s,
            "time step longer than the pipe hold; flow indicators will flicker"
        );
    }

    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    if !(run.dt_s.is_finite() && run.dt_s > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "run.dt_s".to_string(),
            value: run.dt_s.to_string(),
            reason: "must be finite and positive".to_string(),
        });
    }
    if run.steps == 0 {
        return Err(ValidationError::InvalidValue {
            field: "run.steps".to_string(),
            value: run.steps.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
