// src/math/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// 正の有限値でなければならないパラメータに不正な値が渡された
    #[error("パラメータ `{name}` は正の有限値である必要があります (値: {value})")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// `value` が正の有限値であることを確認する
///
/// NaN も拒否するため `value > 0.0` を否定形で判定する。
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, MathError> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(MathError::InvalidParameter { name, value });
    }
    Ok(value)
}
