// src/models/termination.rs

use std::fmt;

use crate::config::DriverParameters;

/// フレーム列が終了した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// 原点周りの正方形に入った（ホライズンへの落下）
    HorizonCapture,
    /// 表示範囲の外に出た
    Escape,
    /// 最大フレーム数に達した
    FrameLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Termination::HorizonCapture => "horizon_capture",
            Termination::Escape => "escape",
            Termination::FrameLimit => "frame_limit",
        };
        f.write_str(label)
    }
}

/// マーカー位置に対して終了条件を判定する関数
///
/// # 引数
/// - `x`, `y`: マーカーの直交座標
/// - `params`: 表示範囲と捕獲判定の半幅
///
/// # 戻り値
/// - 捕獲を先に判定し、該当すれば `Some(HorizonCapture)`、範囲外なら `Some(Escape)`、
///   それ以外は `None`。NaN はどちらの条件にも該当しない
pub fn check_termination(x: f64, y: f64, params: &DriverParameters) -> Option<Termination> {
    let half = params.capture_half_width;
    if (x > -half && x < half) && (y > -half && y < half) {
        return Some(Termination::HorizonCapture);
    }

    if x.abs() > params.display_bound || y.abs() > params.display_bound {
        return Some(Termination::Escape);
    }

    None
}
