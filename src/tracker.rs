//! Shot event tracker.
//!
//! A causal two-state machine (idle / in progress) driven by one call per video
//! frame. Three debounced detector signals decide when an attempt starts and
//! whether it ends as a make. Attempts that are not confirmed before their
//! deadline, or that are pre-empted by a newer attempt, end as misses.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::shot::{FrameSignals, ShotEventRecord, ShotState, ShotType};
use crate::{Error, Result};

/// Consecutive jump-shot frames required to start a JUMP attempt.
pub const JUMP_SHOT_MIN_CONSECUTIVE_FRAMES: u64 = 3;

/// Consecutive layup/dunk frames required to start a LAYUP attempt.
pub const LAYUP_DUNK_MIN_CONSECUTIVE_FRAMES: u64 = 3;

/// Consecutive ball-in-basket frames required to confirm a make.
pub const BALL_IN_BASKET_MIN_CONSECUTIVE_FRAMES: u64 = 2;

/// Timing configuration for a [`ShotEventTracker`]. All values are in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotTrackerConfig {
    /// Maximum frames an attempt may stay unresolved before it is declared missed.
    pub reset_time_frames: i64,

    /// Minimum age an in-progress attempt must reach before a newly detected
    /// start may pre-empt it.
    pub minimum_frames_between_starts: i64,

    /// Frames after a make during which new starts are suppressed.
    pub cooldown_frames_after_made: i64,
}

impl Default for ShotTrackerConfig {
    /// Defaults tuned for 30 fps footage: 3 s to resolve, 0.5 s spacing, 1 s cooldown.
    fn default() -> Self {
        Self {
            reset_time_frames: 90,
            minimum_frames_between_starts: 15,
            cooldown_frames_after_made: 30,
        }
    }
}

impl ShotTrackerConfig {
    pub fn new(
        reset_time_frames: i64,
        minimum_frames_between_starts: i64,
        cooldown_frames_after_made: i64,
    ) -> Self {
        Self {
            reset_time_frames,
            minimum_frames_between_starts,
            cooldown_frames_after_made,
        }
    }

    /// Build a configuration from durations in seconds.
    ///
    /// Each duration is converted to frames at `fps`. Durations that are a
    /// whole number of frames convert exactly (2.2 s at 25 fps is 55 frames);
    /// any other duration is rounded up, so a window is never shorter than
    /// requested.
    pub fn from_seconds(
        fps: f64,
        reset_time_seconds: f64,
        minimum_seconds_between_starts: f64,
        cooldown_seconds_after_made: f64,
    ) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "fps must be a positive finite number, got {fps}"
            )));
        }

        let to_frames = |name: &str, seconds: f64| -> Result<i64> {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative finite number, got {seconds}"
                )));
            }
            let frames = seconds * fps;
            // Whole frame counts that picked up rounding noise stay whole.
            let nearest = frames.round();
            if (frames - nearest).abs() < 1e-9 {
                Ok(nearest as i64)
            } else {
                Ok(frames.ceil() as i64)
            }
        };

        let config = Self {
            reset_time_frames: to_frames("reset_time_seconds", reset_time_seconds)?,
            minimum_frames_between_starts: to_frames(
                "minimum_seconds_between_starts",
                minimum_seconds_between_starts,
            )?,
            cooldown_frames_after_made: to_frames(
                "cooldown_seconds_after_made",
                cooldown_seconds_after_made,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if self.reset_time_frames <= 0 {
            return Err(Error::InvalidConfig(format!(
                "reset_time_frames must be positive, got {}",
                self.reset_time_frames
            )));
        }

        if self.minimum_frames_between_starts <= 0 {
            return Err(Error::InvalidConfig(format!(
                "minimum_frames_between_starts must be positive, got {}",
                self.minimum_frames_between_starts
            )));
        }

        if self.cooldown_frames_after_made < 0 {
            return Err(Error::InvalidConfig(format!(
                "cooldown_frames_after_made must be non-negative, got {}",
                self.cooldown_frames_after_made
            )));
        }

        Ok(())
    }
}

/// Detects shot attempts and resolves their outcome for one tracked entity.
///
/// Feed exactly one [`update`](Self::update) per frame with non-decreasing
/// frame indices. Each call returns zero, one or two records; a pre-empted
/// attempt yields `[MISSED, START]` in that order.
///
/// A shot still in progress when the stream ends is not resolved
/// automatically. Call [`flush`](Self::flush) to close it as a miss.
#[derive(Debug, Clone)]
pub struct ShotEventTracker {
    config: ShotTrackerConfig,

    shot_in_progress: bool,
    shot_type: ShotType,
    shot_start_frame: Option<i64>,
    shot_deadline_frame: Option<i64>,
    frames_since_start: i64,

    consecutive_jump_shot_frames: u64,
    consecutive_layup_frames: u64,
    consecutive_ball_in_basket_frames: u64,

    last_made_frame: Option<i64>,
    last_frame_index: Option<i64>,
}

impl ShotEventTracker {
    /// Create a new tracker, rejecting invalid timing values.
    pub fn new(config: ShotTrackerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            shot_in_progress: false,
            shot_type: ShotType::None,
            shot_start_frame: None,
            shot_deadline_frame: None,
            frames_since_start: 0,
            consecutive_jump_shot_frames: 0,
            consecutive_layup_frames: 0,
            consecutive_ball_in_basket_frames: 0,
            last_made_frame: None,
            last_frame_index: None,
        })
    }

    /// Advance the tracker by one frame.
    ///
    /// # Arguments
    /// * `frame_index` - Index of the current frame; must not be lower than the previous call's
    /// * `has_jump_shot` - Pose classifier reports jump-shot motion
    /// * `has_layup_dunk` - Pose classifier reports layup/dunk motion
    /// * `has_ball_in_basket` - Ball overlaps the basket region
    ///
    /// # Returns
    /// Records emitted on this frame, in order. Fails only with
    /// [`Error::NonMonotonicFrame`], in which case no state is changed.
    pub fn update(
        &mut self,
        frame_index: i64,
        has_jump_shot: bool,
        has_layup_dunk: bool,
        has_ball_in_basket: bool,
    ) -> Result<Vec<ShotEventRecord>> {
        self.check_frame_order(frame_index)?;
        self.last_frame_index = Some(frame_index);

        let mut events = Vec::new();

        self.consecutive_jump_shot_frames =
            updated_consecutive_frames(self.consecutive_jump_shot_frames, has_jump_shot);
        self.consecutive_layup_frames =
            updated_consecutive_frames(self.consecutive_layup_frames, has_layup_dunk);
        self.consecutive_ball_in_basket_frames =
            updated_consecutive_frames(self.consecutive_ball_in_basket_frames, has_ball_in_basket);

        // Exact equality: a sustained detection fires once, on the frame it
        // first reaches the threshold.
        let reached_jump_shot_threshold =
            self.consecutive_jump_shot_frames == JUMP_SHOT_MIN_CONSECUTIVE_FRAMES;
        let reached_layup_threshold =
            self.consecutive_layup_frames == LAYUP_DUNK_MIN_CONSECUTIVE_FRAMES;
        let mut should_start_shot = reached_jump_shot_threshold || reached_layup_threshold;

        if should_start_shot && self.within_post_made_cooldown(frame_index) {
            trace!(frame_index, last_made_frame = ?self.last_made_frame, "start suppressed by post-made cooldown");
            should_start_shot = false;
        }

        if should_start_shot && self.shot_in_progress {
            if self.frames_since_start >= self.config.minimum_frames_between_starts {
                debug!(
                    frame_index,
                    shot_type = %self.shot_type,
                    frames_since_start = self.frames_since_start,
                    "shot pre-empted by new start"
                );
                events.push(ShotEventRecord::missed(frame_index, self.shot_type));
                self.reset_shot_state();
            } else {
                trace!(
                    frame_index,
                    frames_since_start = self.frames_since_start,
                    "start rejected, current shot too recent"
                );
                should_start_shot = false;
            }
        }

        if should_start_shot {
            // JUMP wins when both thresholds are reached on the same frame.
            let shot_type = if reached_jump_shot_threshold {
                ShotType::Jump
            } else {
                ShotType::Layup
            };
            self.start_new_shot(shot_type, frame_index);
            debug!(frame_index, shot_type = %shot_type, "shot started");
            events.push(ShotEventRecord::start(frame_index, shot_type));
        }

        if self.shot_in_progress {
            self.frames_since_start += 1;

            if self.has_confirmed_make() {
                debug!(frame_index, shot_type = %self.shot_type, "shot made");
                events.push(ShotEventRecord::made(frame_index, self.shot_type));
                self.last_made_frame = Some(frame_index);
                self.reset_shot_state();
                return Ok(events);
            }

            if self.deadline_reached(frame_index) {
                debug!(frame_index, shot_type = %self.shot_type, "shot missed, deadline reached");
                events.push(ShotEventRecord::missed(frame_index, self.shot_type));
                self.reset_shot_state();
                return Ok(events);
            }
        }

        Ok(events)
    }

    /// Advance the tracker with one frame of [`FrameSignals`].
    pub fn update_signals(&mut self, signals: &FrameSignals) -> Result<Vec<ShotEventRecord>> {
        self.update(
            signals.frame_index,
            signals.has_jump_shot,
            signals.has_layup_dunk,
            signals.has_ball_in_basket,
        )
    }

    /// Close the stream at `frame_index`.
    ///
    /// A shot still in progress is resolved as MISSED at `frame_index` and the
    /// tracker returns to idle. Returns `None` when no shot was in progress.
    pub fn flush(&mut self, frame_index: i64) -> Result<Option<ShotEventRecord>> {
        self.check_frame_order(frame_index)?;
        self.last_frame_index = Some(frame_index);

        if !self.shot_in_progress {
            return Ok(None);
        }

        warn!(
            frame_index,
            shot_type = %self.shot_type,
            shot_start_frame = ?self.shot_start_frame,
            "unresolved shot flushed as missed"
        );
        let record = ShotEventRecord::missed(frame_index, self.shot_type);
        self.reset_shot_state();
        Ok(Some(record))
    }

    /// Forget all state, including the last make and the last seen frame.
    pub fn reset(&mut self) {
        self.reset_shot_state();
        self.last_made_frame = None;
        self.last_frame_index = None;
    }

    pub fn config(&self) -> &ShotTrackerConfig {
        &self.config
    }

    pub fn state(&self) -> ShotState {
        if self.shot_in_progress {
            ShotState::InProgress
        } else {
            ShotState::Idle
        }
    }

    pub fn is_shot_in_progress(&self) -> bool {
        self.shot_in_progress
    }

    /// Type of the shot in progress, `ShotType::None` when idle.
    pub fn shot_type(&self) -> ShotType {
        self.shot_type
    }

    pub fn shot_start_frame(&self) -> Option<i64> {
        self.shot_start_frame
    }

    pub fn shot_deadline_frame(&self) -> Option<i64> {
        self.shot_deadline_frame
    }

    pub fn frames_since_start(&self) -> i64 {
        self.frames_since_start
    }

    pub fn consecutive_jump_shot_frames(&self) -> u64 {
        self.consecutive_jump_shot_frames
    }

    pub fn consecutive_layup_frames(&self) -> u64 {
        self.consecutive_layup_frames
    }

    pub fn consecutive_ball_in_basket_frames(&self) -> u64 {
        self.consecutive_ball_in_basket_frames
    }

    pub fn last_made_frame(&self) -> Option<i64> {
        self.last_made_frame
    }

    /// Frame index of the most recent `update` or `flush`.
    pub fn last_frame_index(&self) -> Option<i64> {
        self.last_frame_index
    }

    fn check_frame_order(&self, frame_index: i64) -> Result<()> {
        match self.last_frame_index {
            Some(previous) if frame_index < previous => Err(Error::NonMonotonicFrame {
                previous,
                got: frame_index,
            }),
            _ => Ok(()),
        }
    }

    fn start_new_shot(&mut self, shot_type: ShotType, frame_index: i64) {
        self.shot_in_progress = true;
        self.shot_type = shot_type;
        self.shot_start_frame = Some(frame_index);
        self.shot_deadline_frame = Some(frame_index.saturating_add(self.config.reset_time_frames));
        self.frames_since_start = 0;
        self.consecutive_ball_in_basket_frames = 0;
    }

    fn has_confirmed_make(&self) -> bool {
        self.consecutive_ball_in_basket_frames >= BALL_IN_BASKET_MIN_CONSECUTIVE_FRAMES
    }

    fn deadline_reached(&self, frame_index: i64) -> bool {
        self.shot_deadline_frame
            .map_or(false, |deadline| frame_index >= deadline)
    }

    fn within_post_made_cooldown(&self, frame_index: i64) -> bool {
        match self.last_made_frame {
            Some(last_made) => {
                frame_index.saturating_sub(last_made) < self.config.cooldown_frames_after_made
            }
            None => false,
        }
    }

    fn reset_consecutive_counters(&mut self) {
        self.consecutive_jump_shot_frames = 0;
        self.consecutive_layup_frames = 0;
        self.consecutive_ball_in_basket_frames = 0;
    }

    fn reset_shot_state(&mut self) {
        self.shot_in_progress = false;
        self.shot_type = ShotType::None;
        self.shot_start_frame = None;
        self.shot_deadline_frame = None;
        self.frames_since_start = 0;
        self.reset_consecutive_counters();
    }
}

fn updated_consecutive_frames(current_count: u64, detected: bool) -> u64 {
    if detected {
        current_count + 1
    } else {
        0
    }
}
