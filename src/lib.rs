//! # shot-tracker-rs - Basketball Shot Event Detection
//!
//! Detects basketball shot attempts and resolves their outcome from a live,
//! per-frame stream of three detector signals: jump-shot motion, layup/dunk
//! motion and ball-in-basket overlap.
//!
//! ## Features
//!
//! - Causal shot event state machine with debounced starts and confirmed makes
//! - Resolution deadline, minimum re-trigger spacing and post-make cooldown
//! - One tracker per player via [`PlayerShotTrackers`], advanced together
//!   once per video frame with [`PlayerShotTrackers::update_frame`]
//! - Shot statistics and shot chart collection for downstream overlays
//! - CSV signal replay and event log writing
//! - Python bindings (feature `python`)
//!
//! ## Example
//!
//! ```rust
//! use shot_tracker_rs::{ShotEvent, ShotEventTracker, ShotTrackerConfig, ShotType};
//!
//! let config = ShotTrackerConfig::new(10, 5, 8);
//! let mut tracker = ShotEventTracker::new(config).unwrap();
//!
//! tracker.update(0, true, false, false).unwrap();
//! tracker.update(1, true, false, false).unwrap();
//! let events = tracker.update(2, true, false, false).unwrap();
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].event, ShotEvent::Start);
//! assert_eq!(events[0].shot_type, ShotType::Jump);
//! ```

// Public modules
pub mod shot;
pub mod tracker;
pub mod players;
pub mod stats;
pub mod replay;

// Optional modules
#[cfg(feature = "python")]
pub mod python;

// Re-exports for convenience
pub use shot::{FrameSignals, ShotEvent, ShotEventRecord, ShotState, ShotType};
pub use tracker::{
    ShotEventTracker, ShotTrackerConfig, BALL_IN_BASKET_MIN_CONSECUTIVE_FRAMES,
    JUMP_SHOT_MIN_CONSECUTIVE_FRAMES, LAYUP_DUNK_MIN_CONSECUTIVE_FRAMES,
};
pub use players::{PlayerShotEvent, PlayerShotTrackers};
pub use stats::{ShotChart, ShotStatistics, ShotTotals};
pub use replay::{replay, EventLogFile, EventLogFormat, SignalFileParser};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur in the shot tracker library
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Frame index went backwards: previous {previous}, got {got}")]
        NonMonotonicFrame { previous: i64, got: i64 },

        #[error("Invalid value: {0}")]
        InvalidValue(String),

        #[error("Invalid signal record on line {line}: {reason}")]
        InvalidSignalRecord { line: usize, reason: String },

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),

        #[error("JSON error: {0}")]
        JsonError(#[from] serde_json::Error),
    }

    /// Result type for shot tracker operations
    pub type Result<T> = std::result::Result<T, Error>;
}
