// src/math/integrator.rs

use std::f64::consts::PI;

use crate::math::error::{require_positive, MathError};

/// 基準周期あたりのステップ数の既定値
pub const DEFAULT_RESOLUTION: u32 = 500;

/// 積分器の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorPhase {
    /// 初期の2点のみ
    Seeded,
    /// 1回以上 `step()` を実行済み
    Stepping,
}

/// シュワルツシルト時空の平面軌道を差分法で積分する積分器
///
/// 動径方向は3点中心差分、方位角は台形平均した動径で更新する。
/// `radii` と `angles` は追加のみで、既存要素は変更しない。
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitIntegrator {
    gm: f64,
    angular_momentum: f64,
    dt: f64,
    radii: Vec<f64>,
    angles: Vec<f64>,
    time_elapsed: usize,
    real_time: f64,
}

impl OrbitIntegrator {
    /// 既定の分解能で積分器を生成する
    ///
    /// # 引数
    /// - `r0`: 初期動径
    /// - `angular_speed`: 初期角速度
    /// - `gm`: 重力パラメータ
    pub fn new(r0: f64, angular_speed: f64, gm: f64) -> Result<Self, MathError> {
        Self::with_resolution(r0, angular_speed, gm, DEFAULT_RESOLUTION)
    }

    /// 分解能を指定して積分器を生成する
    ///
    /// # 引数
    /// - `r0`: 初期動径
    /// - `angular_speed`: 初期角速度（定数の導出にのみ使う）
    /// - `gm`: 重力パラメータ
    /// - `resolution`: 基準周期あたりのステップ数
    ///
    /// # 戻り値
    /// - 初期2点を持つ積分器、またはパラメータが不正な場合 `MathError::InvalidParameter`
    pub fn with_resolution(
        r0: f64,
        angular_speed: f64,
        gm: f64,
        resolution: u32,
    ) -> Result<Self, MathError> {
        let r0 = require_positive("r0", r0)?;
        let angular_speed = require_positive("angular_speed", angular_speed)?;
        let gm = require_positive("gm", gm)?;
        let resolution = require_positive("resolution", f64::from(resolution))?;

        let angular_momentum = require_positive("angular_momentum", r0.powi(2) * angular_speed)?;
        let dt = require_positive("dt", (2.0 * PI * angular_speed) / resolution)?;

        Ok(OrbitIntegrator {
            gm,
            angular_momentum,
            dt,
            // 初期動径速度はゼロとみなす
            radii: vec![r0, r0],
            angles: vec![0.0, 0.5 * angular_speed * dt],
            time_elapsed: 2,
            real_time: 2.0 * dt,
        })
    }

    /// 次の動径を中心差分で計算する
    fn next_radius(&self) -> f64 {
        let (gm, l, dt) = (self.gm, self.angular_momentum, self.dt);
        let past_r = self.radii[self.time_elapsed - 2];
        let curr_r = self.radii[self.time_elapsed - 1];

        // 最後の項がシュワルツシルト補正
        let acceleration = -(gm / curr_r.powi(2)) + l.powi(2) / curr_r.powi(3)
            - (3.0 * gm * l.powi(2)) / curr_r.powi(4);
        2.0 * curr_r - past_r + dt.powi(2) * acceleration
    }

    /// 次の方位角を計算する。`radii` に次の動径を追加した後に呼ぶこと
    fn next_angle(&self) -> f64 {
        let curr_phi = self.angles[self.time_elapsed - 1];
        let past_r = self.radii[self.time_elapsed - 1];
        let curr_r = self.radii[self.time_elapsed];
        let mean_r = 0.5 * (curr_r + past_r);
        curr_phi + self.dt * (self.angular_momentum / mean_r.powi(2))
    }

    /// 時間刻み dt だけ状態を進める
    ///
    /// 動径がゼロに近づいた場合も NaN や無限大をそのまま伝播させる。
    pub fn step(&mut self) {
        let r = self.next_radius();
        self.radii.push(r);
        let phi = self.next_angle();
        self.angles.push(phi);

        self.time_elapsed += 1;
        self.real_time += self.dt;
    }

    /// 最新の確定状態 `(R[time_elapsed-1], PHI[time_elapsed-1])`
    pub fn position(&self) -> (f64, f64) {
        (
            self.radii[self.time_elapsed - 1],
            self.angles[self.time_elapsed - 1],
        )
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// 保持している点の数
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn time_elapsed(&self) -> usize {
        self.time_elapsed
    }

    pub fn real_time(&self) -> f64 {
        self.real_time
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn gm(&self) -> f64 {
        self.gm
    }

    pub fn angular_momentum(&self) -> f64 {
        self.angular_momentum
    }

    pub fn phase(&self) -> IntegratorPhase {
        if self.time_elapsed > 2 {
            IntegratorPhase::Stepping
        } else {
            IntegratorPhase::Seeded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GM: f64 = 16.6644447407;
    const R0: f64 = 50.0;
    const U: f64 = 1.1;

    fn reference() -> OrbitIntegrator {
        OrbitIntegrator::new(R0, U, GM).unwrap()
    }

    #[test]
    fn test_new_seeds_two_points() {
        let orbit = reference();

        assert_eq!(orbit.time_elapsed(), 2);
        assert_eq!(orbit.len(), 2);
        assert_eq!(orbit.radii(), &[50.0, 50.0]);
        assert_eq!(orbit.angles()[0], 0.0);
        assert_relative_eq!(orbit.angles()[1], 0.5 * U * orbit.dt());
        assert_eq!(orbit.phase(), IntegratorPhase::Seeded);
    }

    #[test]
    fn test_new_derives_constants() {
        let orbit = reference();

        // L = R0^2 * U = 2500 * 1.1
        assert_relative_eq!(orbit.angular_momentum(), 2750.0, epsilon = 1e-9);
        assert_relative_eq!(orbit.dt(), 2.0 * PI * 1.1 / 500.0);
        assert_relative_eq!(orbit.dt(), 0.013823007675795, epsilon = 1e-12);
        assert_relative_eq!(orbit.real_time(), 2.0 * orbit.dt());
        assert_eq!(orbit.gm(), GM);
    }

    #[test]
    fn test_new_rejects_invalid_parameters() {
        let cases = [
            (OrbitIntegrator::new(0.0, U, GM), "r0"),
            (OrbitIntegrator::new(-5.0, U, GM), "r0"),
            (OrbitIntegrator::new(R0, 0.0, GM), "angular_speed"),
            (OrbitIntegrator::new(R0, U, -1.0), "gm"),
            (OrbitIntegrator::new(R0, U, f64::NAN), "gm"),
            (OrbitIntegrator::with_resolution(R0, U, GM, 0), "resolution"),
        ];

        for (result, expected) in cases {
            match result {
                Err(MathError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("Expected InvalidParameter({}), got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_new_rejects_underflowing_dt() {
        // 角速度が極小だと dt が 0 に丸められる
        let result = OrbitIntegrator::with_resolution(1.0, 1.0e-320, GM, u32::MAX);
        assert!(matches!(
            result,
            Err(MathError::InvalidParameter { name: "dt", .. })
        ));
    }

    #[test]
    fn test_first_step_matches_central_difference() {
        let mut orbit = reference();
        orbit.step();

        let l = 2750.0_f64;
        let dt = 2.0 * PI * 1.1 / 500.0;
        let expected = 2.0 * 50.0 - 50.0
            + dt * dt
                * (-GM / (50.0 * 50.0) + l * l / (50.0 * 50.0 * 50.0)
                    - 3.0 * GM * l * l / (50.0 * 50.0 * 50.0 * 50.0));

        assert_eq!(orbit.time_elapsed(), 3);
        assert_relative_eq!(orbit.radii()[2], expected, max_relative = 1e-14);
        assert_relative_eq!(orbit.radii()[2], 50.0000002674701, epsilon = 1e-10);
        assert_eq!(orbit.phase(), IntegratorPhase::Stepping);
    }

    #[test]
    fn test_first_step_angle_uses_trapezoid_radius() {
        let mut orbit = reference();
        orbit.step();

        let r = orbit.radii();
        let mean_r = 0.5 * (r[2] + r[1]);
        let expected = orbit.angles()[1] + orbit.dt() * orbit.angular_momentum() / (mean_r * mean_r);

        assert_relative_eq!(orbit.angles()[2], expected, max_relative = 1e-14);
        assert_relative_eq!(orbit.angles()[2], 0.0228079625837226, epsilon = 1e-12);
    }

    #[test]
    fn test_step_grows_sequences_by_one() {
        let mut orbit = reference();

        for n in 0..10 {
            let before_time = orbit.real_time();
            orbit.step();
            assert_eq!(orbit.radii().len(), 3 + n);
            assert_eq!(orbit.angles().len(), 3 + n);
            assert_eq!(orbit.time_elapsed(), 3 + n);
            assert_relative_eq!(orbit.real_time() - before_time, orbit.dt(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_step_never_mutates_existing_points() {
        let mut orbit = reference();
        for _ in 0..5 {
            orbit.step();
        }
        let snapshot = orbit.radii().to_vec();
        orbit.step();
        assert_eq!(&orbit.radii()[..snapshot.len()], snapshot.as_slice());
    }

    #[test]
    fn test_position_returns_latest_finalized_point() {
        let mut orbit = reference();
        assert_eq!(orbit.position(), (orbit.radii()[1], orbit.angles()[1]));

        orbit.step();
        orbit.step();
        let te = orbit.time_elapsed();
        assert_eq!(orbit.position(), (orbit.radii()[te - 1], orbit.angles()[te - 1]));
    }

    #[test]
    fn test_determinism() {
        let mut a = reference();
        let mut b = reference();
        for _ in 0..250 {
            a.step();
            b.step();
        }

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.radii()), bits(b.radii()));
        assert_eq!(bits(a.angles()), bits(b.angles()));
    }

    #[test]
    fn test_reference_orbit_stays_bounded_after_500_steps() {
        let mut orbit = reference();
        for _ in 0..500 {
            orbit.step();
        }

        assert_eq!(orbit.len(), 502);
        for &r in orbit.radii() {
            assert!(r.is_finite());
            assert!(r >= 49.9 && r < 52.0, "radius {} left the envelope", r);
        }
        assert_relative_eq!(orbit.position().0, 51.1313483432262, epsilon = 1e-6);
    }

    #[test]
    fn test_collapse_propagates_non_finite_values() {
        // 角運動量が小さいと粒子は落下し、数値は発散する
        let mut orbit = OrbitIntegrator::new(1.0, 1.0e-3, 100.0).unwrap();
        for _ in 0..5_000 {
            orbit.step();
        }
        let (r, _) = orbit.position();
        assert!(!r.is_finite() || r < 1.0);
        assert_eq!(orbit.len(), 5_002);
    }
}
