// src/config/scenario.rs

use serde::Deserialize;

use crate::config::parameters::{DriverParameters, OrbitParameters};

/// 設定ファイル全体。省略した項目は基準値になる
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub orbit: OrbitParameters,
    pub driver: DriverParameters,
}
