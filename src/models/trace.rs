// src/models/trace.rs

use crate::math::polar_to_cartesian;

/// 軌道の航跡（直交座標の点列）。追加のみ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    points: Vec<(f64, f64)>,
}

impl Trace {
    pub fn new() -> Self {
        Trace { points: Vec::new() }
    }

    /// まだ変換していない極座標の点を航跡に追加する
    ///
    /// # 引数
    /// - `radii`: 動径の全系列
    /// - `angles`: 方位角の全系列（`radii` と同じ長さ）
    ///
    /// # 戻り値
    /// - 追加した点の数
    pub fn extend_from(&mut self, radii: &[f64], angles: &[f64]) -> usize {
        let start = self.points.len();
        self.points.extend(
            radii
                .iter()
                .zip(angles.iter())
                .skip(start)
                .map(|(&rho, &phi)| polar_to_cartesian(rho, phi)),
        );
        self.points.len() - start
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }
}
