// src/math/coordinates.rs

/// 極座標を直交座標に変換する純粋関数
///
/// # 引数
/// - `rho`: 動径
/// - `phi`: 方位角（ラジアン）
///
/// # 戻り値
/// - `(x, y)` 座標
pub fn polar_to_cartesian(rho: f64, phi: f64) -> (f64, f64) {
    (rho * phi.cos(), rho * phi.sin())
}
