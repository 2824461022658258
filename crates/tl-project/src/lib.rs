//! tl-project: scenario file format, validation and trend export.

pub mod export;
pub mod schema;
pub mod validate;

pub use export::{TREND_CSV_HEADER, trend_csv, write_trend_csv};
pub use schema::*;
pub use validate::{ValidationError, validate_scenario};

use tl_sim::{ProcessModel, SimError};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<ScenarioFile> {
    let content = std::fs::read_to_string(path)?;
    let scenario: ScenarioFile = serde_yaml::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_yaml(path: &std::path::Path, scenario: &ScenarioFile) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<ScenarioFile> {
    let content = std::fs::read_to_string(path)?;
    let scenario: ScenarioFile = serde_json::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_json(path: &std::path::Path, scenario: &ScenarioFile) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load_scenario(path: &std::path::Path) -> ProjectResult<ScenarioFile> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json { load_json(path) } else { load_yaml(path) }
}

/// Build a plant from the scenario's constants and apply its startup
/// parameters.
pub fn build_model(scenario: &ScenarioFile) -> ProjectResult<ProcessModel> {
    let mut model = ProcessModel::with_constants(scenario.plant_constants())?;
    model.initialize(&scenario.startup)?;
    Ok(model)
}
