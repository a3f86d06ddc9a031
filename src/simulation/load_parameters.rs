// src/simulation/load_parameters.rs

use std::error::Error;
use std::fs::File;
use std::path::Path;
use serde_yaml::from_reader;
use tracing::info;

use crate::config::scenario::Scenario;

/// シナリオの読み込み
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, Box<dyn Error>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let scenario: Scenario = from_reader(file)?;
    info!(path = %path.display(), "scenario loaded");
    Ok(scenario)
}
