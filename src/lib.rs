// src/lib.rs

//! シュワルツシルト時空における粒子軌道の差分積分と、フレーム単位の描画ドライバ

pub mod config;
pub mod math;
pub mod models;
pub mod simulation;
