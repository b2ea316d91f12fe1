//! Shot event log writer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::players::PlayerShotEvent;
use crate::shot::ShotEventRecord;
use crate::{Error, Result};

/// Output layout of an [`EventLogFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventLogFormat {
    /// `frame,event,type` rows after a header line.
    #[default]
    Csv,
    /// One JSON object per line.
    JsonLines,
}

/// Writer for emitted shot events.
pub struct EventLogFile {
    format: EventLogFormat,
    writer: BufWriter<File>,
    records_written: usize,
}

impl EventLogFile {
    /// Create the log file, including missing parent directories.
    pub fn new<P: AsRef<Path>>(path: P, format: EventLogFormat) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::IoError(std::io::Error::new(
                    e.kind(),
                    format!("failed to create event log folder: {}", e),
                ))
            })?;
        }

        let file = File::create(path).map_err(|e| {
            Error::IoError(std::io::Error::new(
                e.kind(),
                format!("failed to create event log '{}': {}", path.display(), e),
            ))
        })?;

        let mut writer = BufWriter::new(file);
        if format == EventLogFormat::Csv {
            writeln!(writer, "frame,event,type")?;
        }

        Ok(Self {
            format,
            writer,
            records_written: 0,
        })
    }

    /// Append records in emission order.
    pub fn write_records(&mut self, records: &[ShotEventRecord]) -> Result<()> {
        for record in records {
            match self.format {
                EventLogFormat::Csv => writeln!(
                    self.writer,
                    "{},{},{}",
                    record.frame, record.event, record.shot_type
                )?,
                EventLogFormat::JsonLines => {
                    serde_json::to_writer(&mut self.writer, record)?;
                    writeln!(self.writer)?;
                }
            }
            self.records_written += 1;
        }
        Ok(())
    }

    /// Append player-attributed events.
    ///
    /// In CSV mode the player id is dropped; use JSON Lines to keep it.
    pub fn write_player_events(&mut self, events: &[PlayerShotEvent]) -> Result<()> {
        match self.format {
            EventLogFormat::Csv => {
                let records: Vec<ShotEventRecord> = events.iter().map(|e| e.record).collect();
                self.write_records(&records)
            }
            EventLogFormat::JsonLines => {
                for event in events {
                    serde_json::to_writer(&mut self.writer, event)?;
                    writeln!(self.writer)?;
                    self.records_written += 1;
                }
                Ok(())
            }
        }
    }

    pub fn format(&self) -> EventLogFormat {
        self.format
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(Error::IoError)
    }
}

impl Drop for EventLogFile {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
