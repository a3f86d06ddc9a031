// src/main.rs

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use schwarzsim::config::Scenario;
use schwarzsim::simulation::csv::*;
use schwarzsim::simulation::framework::*;
use schwarzsim::simulation::load_parameters::*;

/// シュワルツシルト時空における粒子軌道のシミュレーション
#[derive(Parser, Debug)]
#[command(name = "schwarzsim")]
#[command(about = "Particle orbits in Schwarzschild space-time")]
struct Cli {
    /// シナリオ YAML（省略時は基準値）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 初期動径
    #[arg(long)]
    initial_radius: Option<f64>,

    /// 初期角速度
    #[arg(long)]
    angular_speed: Option<f64>,

    /// 重力パラメータ GM
    #[arg(long)]
    gm: Option<f64>,

    /// 基準周期あたりのステップ数
    #[arg(long)]
    resolution: Option<u32>,

    /// 脱出とみなす表示範囲
    #[arg(long)]
    display_bound: Option<f64>,

    /// 原点周りの捕獲判定の半幅
    #[arg(long)]
    capture_half_width: Option<f64>,

    /// 最大フレーム数
    #[arg(long)]
    max_frames: Option<usize>,

    /// フレームごとの CSV 出力先
    #[arg(short, long, default_value = "output/orbit_frames.csv")]
    output: PathBuf,

    /// 最終的な航跡の CSV 出力先
    #[arg(long)]
    trace_output: Option<PathBuf>,

    /// dt に合わせてフレーム間で待機する
    #[arg(long, default_value = "false")]
    realtime: bool,
}

impl Cli {
    /// コマンドライン引数でシナリオを上書きする
    fn apply_overrides(&self, scenario: &mut Scenario) {
        if let Some(v) = self.initial_radius {
            scenario.orbit.initial_radius = v;
        }
        if let Some(v) = self.angular_speed {
            scenario.orbit.angular_speed = v;
        }
        if let Some(v) = self.gm {
            scenario.orbit.gm = v;
        }
        if let Some(v) = self.resolution {
            scenario.orbit.resolution = v;
        }
        if let Some(v) = self.display_bound {
            scenario.driver.display_bound = v;
        }
        if let Some(v) = self.capture_half_width {
            scenario.driver.capture_half_width = v;
        }
        if let Some(v) = self.max_frames {
            scenario.driver.max_frames = v;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // シナリオの読み込み
    let mut scenario = match &cli.config {
        Some(path) => load_scenario(path)?,
        None => Scenario::default(),
    };
    cli.apply_overrides(&mut scenario);

    // 積分器とドライバの初期化
    let mut driver = AnimationDriver::from_scenario(&scenario)?;
    let dt = driver.orbit().dt();
    info!(
        r0 = scenario.orbit.initial_radius,
        gm = driver.orbit().gm(),
        l = driver.orbit().angular_momentum(),
        dt,
        display_bound = driver.params().display_bound,
        "orbit initialized"
    );

    // ウォームアップフレームでフレーム間隔を決める
    let warm_up_cost = driver.warm_up();
    let interval = frame_interval(dt, warm_up_cost);
    info!(?interval, "frame interval");

    // CSV出力の設定
    let mut writer: Box<dyn Write> = setup_csv_output(&cli.output)?;

    // フレームループ
    for frame in driver.frames() {
        writer.write_all(create_csv_row(&frame).as_bytes())?;
        if cli.realtime && frame.termination.is_none() {
            thread::sleep(interval);
        }
    }
    writer.flush()?;

    if let Some(path) = &cli.trace_output {
        write_trace_csv(path, driver.trace())?;
    }

    let (radius, phi) = driver.orbit().position();
    if !radius.is_finite() {
        warn!(radius, "final radius is not finite");
    }
    info!(
        frames = driver.frames_rendered(),
        termination = ?driver.termination(),
        phase = ?driver.orbit().phase(),
        radius,
        phi,
        real_time = driver.orbit().real_time(),
        output = %cli.output.display(),
        "simulation finished"
    );

    Ok(())
}
