//! Offline replay of recorded signal sequences.
//!
//! - `SignalFileParser` - Parse per-frame detector signals from CSV
//! - `EventLogFile` - Write emitted events as CSV or JSON Lines
//! - `replay` - Drive a tracker over a whole sequence

mod event_log;
mod signal_parser;

pub use event_log::{EventLogFile, EventLogFormat};
pub use signal_parser::SignalFileParser;

use crate::shot::{FrameSignals, ShotEventRecord};
use crate::tracker::ShotEventTracker;
use crate::Result;

/// Feed every frame of `signals` to `tracker` and collect the emitted records.
///
/// # Arguments
/// * `tracker` - Tracker to drive; its state carries over from earlier calls
/// * `signals` - Frames in non-decreasing frame order
/// * `flush_at_end` - Resolve a shot left in progress as MISSED at the last frame
pub fn replay<I>(tracker: &mut ShotEventTracker, signals: I, flush_at_end: bool) -> Result<Vec<ShotEventRecord>>
where
    I: IntoIterator<Item = FrameSignals>,
{
    let mut records = Vec::new();
    let mut last_frame = None;

    for frame in signals {
        records.extend(tracker.update_signals(&frame)?);
        last_frame = Some(frame.frame_index);
    }

    if flush_at_end {
        if let Some(frame_index) = last_frame {
            records.extend(tracker.flush(frame_index)?);
        }
    }

    Ok(records)
}
