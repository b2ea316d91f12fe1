//! Per-frame signal file parser.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::shot::FrameSignals;
use crate::{Error, Result};

/// Parser for recorded detector signals.
///
/// Reads CSV files with one frame per line:
/// `frame,jump,layup,ball`
///
/// Flags accept `0`/`1` or `true`/`false` (any case). Blank lines and lines
/// starting with `#` are skipped, as is a leading header row whose first
/// column is `frame` or `frame_index`.
#[derive(Debug, Clone)]
pub struct SignalFileParser {
    signals: Vec<FrameSignals>,
    current_frame: usize,
}

impl SignalFileParser {
    /// Read and parse the signal file at `file_path`.
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let file = File::open(&file_path).map_err(|e| {
            Error::IoError(std::io::Error::new(
                e.kind(),
                format!(
                    "failed to open signal file '{}': {}",
                    file_path.as_ref().display(),
                    e
                ),
            ))
        })?;

        Self::from_reader(BufReader::new(file))
    }

    /// Parse signals from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut signals = Vec::new();
        let mut seen_data = false;

        for (idx, line_result) in reader.lines().enumerate() {
            let line_number = idx + 1;
            let line = line_result?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(str::trim).collect();

            if !seen_data && is_header(&parts) {
                seen_data = true;
                continue;
            }
            seen_data = true;

            signals.push(parse_record(&parts, line_number)?);
        }

        Ok(Self {
            signals,
            current_frame: 0,
        })
    }

    /// All parsed frames, in file order.
    pub fn signals(&self) -> &[FrameSignals] {
        &self.signals
    }

    /// Get the number of frames.
    pub fn num_frames(&self) -> usize {
        self.signals.len()
    }

    pub fn into_signals(self) -> Vec<FrameSignals> {
        self.signals
    }
}

impl Iterator for SignalFileParser {
    type Item = FrameSignals;

    fn next(&mut self) -> Option<Self::Item> {
        let signals = self.signals.get(self.current_frame).copied()?;
        self.current_frame += 1;
        Some(signals)
    }
}

fn is_header(parts: &[&str]) -> bool {
    parts
        .first()
        .map(|first| first.eq_ignore_ascii_case("frame") || first.eq_ignore_ascii_case("frame_index"))
        .unwrap_or(false)
}

fn parse_record(parts: &[&str], line: usize) -> Result<FrameSignals> {
    if parts.len() != 4 {
        return Err(Error::InvalidSignalRecord {
            line,
            reason: format!("expected 4 columns, got {}", parts.len()),
        });
    }

    let frame_index: i64 = parts[0].parse().map_err(|_| Error::InvalidSignalRecord {
        line,
        reason: format!("invalid frame index {:?}", parts[0]),
    })?;

    Ok(FrameSignals {
        frame_index,
        has_jump_shot: parse_flag(parts[1], "jump", line)?,
        has_layup_dunk: parse_flag(parts[2], "layup", line)?,
        has_ball_in_basket: parse_flag(parts[3], "ball", line)?,
    })
}

fn parse_flag(value: &str, column: &str, line: usize) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(Error::InvalidSignalRecord {
            line,
            reason: format!("invalid {column} flag {value:?}"),
        }),
    }
}
