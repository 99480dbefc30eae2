//! Sample traces on disk.
//!
//! One row per sample: `time,ux,uy,uz,gx,gy,gz,qw,qx,qy,qz`. Fused rows fill
//! every column. Raw rows carry total acceleration in `ux,uy,uz` and leave the
//! gravity and attitude columns empty.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use flick_core::{Capabilities, Quaternion, Reading, Sample, Vec3};

use crate::error::{Result, StoreError};

pub const TRACE_HEADER: [&str; 11] = [
    "time", "ux", "uy", "uz", "gx", "gy", "gz", "qw", "qx", "qy", "qz",
];

pub fn read_trace(path: &Path) -> Result<Vec<Sample>> {
    let file = File::open(path)?;
    let samples = read_trace_from(file)?;
    tracing::debug!("read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

pub fn read_trace_from<R: Read>(reader: R) -> Result<Vec<Sample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut last_time = f64::NEG_INFINITY;
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let row = idx + 2;
        let record = result?;
        let sample = parse_row(&record, row)?;
        if sample.time < last_time {
            return Err(StoreError::InvalidData(format!(
                "row {row}: time {} goes backwards (previous {last_time})",
                sample.time
            )));
        }
        last_time = sample.time;
        samples.push(sample);
    }
    Ok(samples)
}

fn parse_row(record: &StringRecord, row: usize) -> Result<Sample> {
    if record.len() != TRACE_HEADER.len() && record.len() != 4 {
        return Err(StoreError::InvalidData(format!(
            "row {row}: expected {} columns, found {}",
            TRACE_HEADER.len(),
            record.len()
        )));
    }

    let field = |i: usize| -> Result<Option<f64>> {
        let text = record.get(i).unwrap_or("");
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| {
                StoreError::InvalidData(format!(
                    "row {row}: column {} is not a number: {text:?}",
                    TRACE_HEADER[i]
                ))
            })
    };
    let required = |i: usize| -> Result<f64> {
        field(i)?.ok_or_else(|| {
            StoreError::InvalidData(format!("row {row}: column {} is empty", TRACE_HEADER[i]))
        })
    };

    let time = required(0)?;
    let accel = Vec3::new(required(1)?, required(2)?, required(3)?);

    let rest = (4..TRACE_HEADER.len())
        .map(field)
        .collect::<Result<Vec<_>>>()?;
    if rest.iter().all(Option::is_none) {
        return Ok(Sample::raw(time, accel));
    }
    let rest = rest.into_iter().collect::<Option<Vec<f64>>>().ok_or_else(|| {
        StoreError::InvalidData(format!(
            "row {row}: gravity and attitude columns must be all set or all empty"
        ))
    })?;

    let gravity = Vec3::new(rest[0], rest[1], rest[2]);
    let attitude = Quaternion::new(rest[3], rest[4], rest[5], rest[6]);
    Ok(Sample::fused(time, accel, gravity, attitude))
}

pub fn write_trace(path: &Path, samples: &[Sample]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_trace_to(file, samples)?;
    tracing::debug!("wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

pub fn write_trace_to<W: Write>(writer: W, samples: &[Sample]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(TRACE_HEADER)?;
    for sample in samples {
        let mut row = vec![sample.time.to_string()];
        match sample.reading {
            Reading::Fused {
                user_accel,
                gravity,
                attitude,
            } => {
                row.extend(user_accel.to_array().iter().map(f64::to_string));
                row.extend(gravity.to_array().iter().map(f64::to_string));
                row.extend(attitude.to_array().iter().map(f64::to_string));
            }
            Reading::Raw { accel } => {
                row.extend(accel.to_array().iter().map(f64::to_string));
                row.extend(std::iter::repeat_n(String::new(), 7));
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Sensors a trace implies: attitude columns mean a gyroscope was present.
pub fn trace_capabilities(samples: &[Sample]) -> Capabilities {
    if samples.is_empty() {
        return Capabilities::NONE;
    }
    let fused = samples
        .iter()
        .all(|s| matches!(s.reading, Reading::Fused { .. }));
    if fused {
        Capabilities::FULL
    } else {
        Capabilities::ACCELEROMETER_ONLY
    }
}
