//! Session recordings: per-tick engine telemetry written as CSV.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use flick_core::{Recorder, TickTelemetry};

use crate::error::Result;
use crate::time;

pub const RECORDING_HEADER: [&str; 9] = ["FRM", "UX", "UY", "UZ", "ANG", "SPK", "AX", "AY", "AZ"];

/// Buffers telemetry while recording and writes `Gest_<MMdd_HHmmss>.csv`
/// into its directory when the session finishes.
#[derive(Debug)]
pub struct SessionRecorder {
    dir: PathBuf,
    rows: Option<Vec<TickTelemetry>>,
}

impl SessionRecorder {
    /// A stopped recorder writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            rows: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_recording(&self) -> bool {
        self.rows.is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map_or(0, Vec::len)
    }

    /// Start a fresh session, dropping anything buffered.
    pub fn start(&mut self) {
        self.rows = Some(Vec::new());
        tracing::info!("recording started");
    }

    /// Stop and write the session. `None` when nothing was being recorded.
    pub fn finish(&mut self) -> Result<Option<PathBuf>> {
        let Some(rows) = self.rows.take() else {
            return Ok(None);
        };
        fs::create_dir_all(&self.dir)?;
        let stamp = time::session_stamp(time::now_unix_secs());
        let path = self.dir.join(format!("Gest_{stamp}.csv"));
        let file = File::create(&path)?;
        write_session_to(file, &rows)?;
        tracing::info!("recorded {} ticks to {}", rows.len(), path.display());
        Ok(Some(path))
    }

    /// Start when stopped, finish when recording.
    pub fn toggle(&mut self) -> Result<Option<PathBuf>> {
        if self.is_recording() {
            self.finish()
        } else {
            self.start();
            Ok(None)
        }
    }
}

impl Recorder for SessionRecorder {
    fn record(&mut self, telemetry: &TickTelemetry) {
        if let Some(rows) = self.rows.as_mut() {
            rows.push(*telemetry);
        }
    }
}

pub fn write_session_to<W: Write>(writer: W, rows: &[TickTelemetry]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(RECORDING_HEADER)?;
    for t in rows {
        writer.write_record([
            t.frame.to_string(),
            format!("{:.5}", t.user_accel.x),
            format!("{:.5}", t.user_accel.y),
            format!("{:.5}", t.user_accel.z),
            format!("{:.2}", t.dot),
            format!("{:.1}", t.spike_magnitude),
            format!("{:.5}", t.attitude_euler.x),
            format!("{:.5}", t.attitude_euler.y),
            format!("{:.5}", t.attitude_euler.z),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
