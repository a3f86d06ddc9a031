// src/simulation/mod.rs

pub mod load_parameters;
pub mod csv;
pub mod framework;
use crate::models::Termination;

/// 1フレーム分の描画データ
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,             // フレーム番号（0始まり）
    pub real_time: f64,           // このフレームのステップ後の経過時間
    pub radius: f64,              // R[index]
    pub angle: f64,               // PHI[index]
    pub marker: (f64, f64),       // マーカーの直交座標
    pub trace_len: usize,         // 航跡の点数
    pub termination: Option<Termination>, // このフレームで終了した場合の理由
}
