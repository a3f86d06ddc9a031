// src/simulation/csv.rs

use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::Trace;
use crate::simulation::Frame;

/// 出力ファイルを作成する。親ディレクトリがなければ作る
fn create_output_file(path: &Path) -> Result<BufWriter<File>, Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// CSV出力の設定とヘッダーの書き込み
pub fn setup_csv_output<P: AsRef<Path>>(path: P) -> Result<Box<dyn Write>, Box<dyn Error>> {
    let mut writer = create_output_file(path.as_ref())?;
    write_csv_header(&mut writer)?;
    Ok(Box::new(writer))
}

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write>(writer: &mut W) -> Result<(), std::io::Error> {
    writer.write_all(b"frame,time,x,y,radius,phi,trace_len,termination\n")
}

/// フレームごとのCSV行の作成
pub fn create_csv_row(frame: &Frame) -> String {
    let termination = frame
        .termination
        .map(|t| t.to_string())
        .unwrap_or_default();

    format!(
        "{},{},{},{},{},{},{},{}\n",
        frame.index,
        frame.real_time,
        frame.marker.0,
        frame.marker.1,
        frame.radius,
        frame.angle,
        frame.trace_len,
        termination
    )
}

/// 航跡の全点をCSVに書き出す
pub fn write_trace_csv<P: AsRef<Path>>(path: P, trace: &Trace) -> Result<(), Box<dyn Error>> {
    let mut writer = create_output_file(path.as_ref())?;
    write_trace(&mut writer, trace)?;
    writer.flush()?;
    Ok(())
}

fn write_trace<W: Write>(writer: &mut W, trace: &Trace) -> Result<(), std::io::Error> {
    writer.write_all(b"index,x,y\n")?;
    for (i, (x, y)) in trace.points().iter().enumerate() {
        writeln!(writer, "{},{},{}", i, x, y)?;
    }
    Ok(())
}
