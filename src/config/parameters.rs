// src/config/parameters.rs

use serde::Deserialize;

use crate::math::error::{require_positive, MathError};
use crate::math::integrator::DEFAULT_RESOLUTION;
use crate::math::OrbitIntegrator;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OrbitParameters {
    pub initial_radius: f64, // 初期動径
    pub angular_speed: f64,  // 初期角速度
    pub gm: f64,             // 重力パラメータ
    pub resolution: u32,     // 基準周期あたりのステップ数
}

impl Default for OrbitParameters {
    fn default() -> Self {
        OrbitParameters {
            initial_radius: 50.0,
            angular_speed: 1.1,
            gm: 16.6644447407,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl OrbitParameters {
    /// パラメータから積分器を生成する
    pub fn build_integrator(&self) -> Result<OrbitIntegrator, MathError> {
        OrbitIntegrator::with_resolution(
            self.initial_radius,
            self.angular_speed,
            self.gm,
            self.resolution,
        )
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DriverParameters {
    pub display_bound: f64,      // 脱出とみなす表示範囲 (|x|, |y|)
    pub capture_half_width: f64, // 原点周りの捕獲判定の半幅
    pub max_frames: usize,       // 最大フレーム数
}

impl Default for DriverParameters {
    fn default() -> Self {
        DriverParameters {
            display_bound: 100.0,
            capture_half_width: 1.0,
            max_frames: 10_000,
        }
    }
}

impl DriverParameters {
    pub fn validate(&self) -> Result<(), MathError> {
        require_positive("display_bound", self.display_bound)?;
        require_positive("capture_half_width", self.capture_half_width)?;
        require_positive("max_frames", self.max_frames as f64)?;
        Ok(())
    }
}
