//! Shot record and enumeration types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of shot attempt.
///
/// `None` is the placeholder held by an idle tracker and never appears on an
/// emitted [`ShotEventRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShotType {
    #[default]
    None,
    Jump,
    Layup,
}

impl ShotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Jump => "JUMP",
            Self::Layup => "LAYUP",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "JUMP" => Ok(Self::Jump),
            "LAYUP" => Ok(Self::Layup),
            other => Err(Error::InvalidValue(format!("unknown shot type: {other:?}"))),
        }
    }
}

/// Event emitted by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShotEvent {
    /// A shot attempt was detected.
    Start,
    /// The ball was confirmed in the basket.
    Made,
    /// The attempt timed out or was pre-empted by a newer attempt.
    Missed,
}

impl ShotEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Made => "MADE",
            Self::Missed => "MISSED",
        }
    }

    /// Whether this event ends an attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Made | Self::Missed)
    }
}

impl fmt::Display for ShotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "START" => Ok(Self::Start),
            "MADE" => Ok(Self::Made),
            "MISSED" => Ok(Self::Missed),
            other => Err(Error::InvalidValue(format!("unknown shot event: {other:?}"))),
        }
    }
}

/// A single event produced by [`crate::ShotEventTracker::update`].
///
/// Records are plain values; the tracker keeps no reference to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShotEventRecord {
    pub event: ShotEvent,
    pub frame: i64,
    #[serde(rename = "type")]
    pub shot_type: ShotType,
}

impl ShotEventRecord {
    pub fn new(event: ShotEvent, frame: i64, shot_type: ShotType) -> Self {
        Self { event, frame, shot_type }
    }

    pub fn start(frame: i64, shot_type: ShotType) -> Self {
        Self::new(ShotEvent::Start, frame, shot_type)
    }

    pub fn made(frame: i64, shot_type: ShotType) -> Self {
        Self::new(ShotEvent::Made, frame, shot_type)
    }

    pub fn missed(frame: i64, shot_type: ShotType) -> Self {
        Self::new(ShotEvent::Missed, frame, shot_type)
    }
}

impl fmt::Display for ShotEventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} frame={} type={}", self.event, self.frame, self.shot_type)
    }
}

/// The upstream detector signals for one video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameSignals {
    pub frame_index: i64,
    #[serde(default)]
    pub has_jump_shot: bool,
    #[serde(default)]
    pub has_layup_dunk: bool,
    #[serde(default)]
    pub has_ball_in_basket: bool,
}

impl FrameSignals {
    pub fn new(
        frame_index: i64,
        has_jump_shot: bool,
        has_layup_dunk: bool,
        has_ball_in_basket: bool,
    ) -> Self {
        Self {
            frame_index,
            has_jump_shot,
            has_layup_dunk,
            has_ball_in_basket,
        }
    }

    /// A frame with every signal off.
    pub fn idle(frame_index: i64) -> Self {
        Self {
            frame_index,
            ..Self::default()
        }
    }
}

/// Observable state of the tracker's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotState {
    #[default]
    Idle,
    InProgress,
}
