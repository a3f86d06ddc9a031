// src/simulation/framework.rs

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::config::{DriverParameters, Scenario};
use crate::math::{polar_to_cartesian, MathError, OrbitIntegrator};
use crate::models::{check_termination, Termination, Trace};
use crate::simulation::Frame;

/// 積分器を1フレームに1ステップずつ進め、航跡と終了条件を管理するドライバ
///
/// 積分器への書き込みはこのドライバだけが行う。
#[derive(Debug)]
pub struct AnimationDriver {
    orbit: OrbitIntegrator,
    params: DriverParameters,
    trace: Trace,
    next_frame: usize,
    termination: Option<Termination>,
}

impl AnimationDriver {
    /// ドライバの生成
    ///
    /// # 引数
    /// - `orbit`: 初期化済みの積分器
    /// - `params`: 表示範囲・捕獲判定・最大フレーム数
    pub fn new(orbit: OrbitIntegrator, params: DriverParameters) -> Result<Self, MathError> {
        params.validate()?;
        Ok(AnimationDriver {
            orbit,
            params,
            trace: Trace::new(),
            next_frame: 0,
            termination: None,
        })
    }

    /// シナリオから積分器とドライバをまとめて生成する
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, MathError> {
        let orbit = scenario.orbit.build_integrator()?;
        Self::new(orbit, scenario.driver.clone())
    }

    /// フレーム `index` を描画する
    ///
    /// マーカーは `position()` ではなく全系列の `index` 番目から読む。
    /// 終了条件に該当したフレームでは航跡を更新しない。
    fn render_frame(&mut self, index: usize) -> Frame {
        self.orbit.step();

        let radius = self.orbit.radii()[index];
        let angle = self.orbit.angles()[index];
        let marker = polar_to_cartesian(radius, angle);

        let termination = check_termination(marker.0, marker.1, &self.params);
        if termination.is_none() {
            self.trace
                .extend_from(self.orbit.radii(), self.orbit.angles());
        }

        trace!(
            frame = index,
            x = marker.0,
            y = marker.1,
            radius,
            "frame rendered"
        );

        Frame {
            index,
            real_time: self.orbit.real_time(),
            radius,
            angle,
            marker,
            trace_len: self.trace.len(),
            termination,
        }
    }

    /// フレーム 0 を一度描画し、その処理時間を返す
    ///
    /// 積分器は1ステップ進むが、フレーム番号は進めない。
    pub fn warm_up(&mut self) -> Duration {
        let started = Instant::now();
        let frame = self.render_frame(0);
        let elapsed = started.elapsed();
        debug!(?elapsed, termination = ?frame.termination, "warm-up frame rendered");
        elapsed
    }

    /// フレーム列を返す
    ///
    /// 終了条件または最大フレーム数で有限となり、一度尽きると再開しない。
    pub fn frames(&mut self) -> Frames<'_> {
        Frames { driver: self }
    }

    pub fn orbit(&self) -> &OrbitIntegrator {
        &self.orbit
    }

    pub fn params(&self) -> &DriverParameters {
        &self.params
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// これまでに返したフレーム数
    pub fn frames_rendered(&self) -> usize {
        self.next_frame
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_finished(&self) -> bool {
        self.termination.is_some()
    }
}

/// `AnimationDriver::frames` が返す遅延フレーム列
pub struct Frames<'a> {
    driver: &'a mut AnimationDriver,
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let driver = &mut *self.driver;
        if driver.termination.is_some() {
            return None;
        }

        if driver.next_frame >= driver.params.max_frames {
            driver.termination = Some(Termination::FrameLimit);
            info!(frames = driver.next_frame, "frame limit reached");
            return None;
        }

        let frame = driver.render_frame(driver.next_frame);
        driver.next_frame += 1;

        if let Some(reason) = frame.termination {
            driver.termination = Some(reason);
            info!(
                frame = frame.index,
                x = frame.marker.0,
                y = frame.marker.1,
                %reason,
                "orbit terminated"
            );
        }

        Some(frame)
    }
}

/// フレーム間隔の計算
///
/// # 引数
/// - `dt`: 積分器の時間刻み（1 単位を 1 秒として扱う）
/// - `warm_up_cost`: ウォームアップフレームの処理時間
///
/// # 戻り値
/// - `1000 * dt` ミリ秒から処理時間を引いた間隔。負にはならず、`Duration` に
///   収まらない場合は `Duration::MAX`
///
/// 元のアニメーションは秒単位の処理時間をミリ秒から直接引いていたが、ここでは
/// 処理時間もミリ秒に換算してから引く。
pub fn frame_interval(dt: f64, warm_up_cost: Duration) -> Duration {
    let interval_ms = 1000.0 * dt - warm_up_cost.as_secs_f64() * 1000.0;
    if interval_ms.is_nan() || interval_ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(interval_ms / 1000.0).unwrap_or(Duration::MAX)
}
