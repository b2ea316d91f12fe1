//! Python wrapper for ShotEventTracker.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{ShotEventTracker, ShotTrackerConfig};

use super::record::PyShotEventRecord;

/// Shot attempt detector for one tracked player.
///
/// Example:
///     >>> from shot_tracker_rs import ShotEventTracker
///     >>>
///     >>> tracker = ShotEventTracker(
///     ...     reset_time_frames=90,
///     ...     minimum_frames_between_starts=15,
///     ...     cooldown_frames_after_made=30,
///     ... )
///     >>>
///     >>> # Feed one call per video frame
///     >>> events = tracker.update(frame_index, has_jump_shot, has_layup_dunk, has_ball_in_basket)
#[pyclass(name = "ShotEventTracker")]
pub struct PyShotEventTracker {
    inner: ShotEventTracker,
}

#[pymethods]
impl PyShotEventTracker {
    /// Create a new ShotEventTracker.
    ///
    /// Args:
    ///     reset_time_frames: Frames an attempt may stay unresolved before it
    ///         is declared missed. Must be positive.
    ///     minimum_frames_between_starts: Minimum age of an attempt before a new
    ///         start may pre-empt it. Must be positive.
    ///     cooldown_frames_after_made: Frames after a make during which new
    ///         starts are ignored. Must be non-negative.
    ///
    /// Raises:
    ///     ValueError: If any value is out of range.
    #[new]
    fn new(
        reset_time_frames: i64,
        minimum_frames_between_starts: i64,
        cooldown_frames_after_made: i64,
    ) -> PyResult<Self> {
        let config = ShotTrackerConfig::new(
            reset_time_frames,
            minimum_frames_between_starts,
            cooldown_frames_after_made,
        );
        let inner = ShotEventTracker::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Advance the tracker by one frame.
    ///
    /// Args:
    ///     frame_index: Index of the current frame. Must not decrease between calls.
    ///     has_jump_shot: Jump-shot motion detected on this frame.
    ///     has_layup_dunk: Layup or dunk motion detected on this frame.
    ///     has_ball_in_basket: Ball overlaps the basket on this frame.
    ///
    /// Returns:
    ///     List of ShotEventRecord emitted on this frame (0, 1 or 2).
    ///
    /// Raises:
    ///     ValueError: If frame_index is lower than on the previous call.
    fn update(
        &mut self,
        frame_index: i64,
        has_jump_shot: bool,
        has_layup_dunk: bool,
        has_ball_in_basket: bool,
    ) -> PyResult<Vec<PyShotEventRecord>> {
        let records = self
            .inner
            .update(frame_index, has_jump_shot, has_layup_dunk, has_ball_in_basket)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(records.into_iter().map(PyShotEventRecord::from_record).collect())
    }

    /// Resolve a shot still in progress as MISSED at frame_index.
    ///
    /// Returns:
    ///     The MISSED record, or None if no shot was in progress.
    fn flush(&mut self, frame_index: i64) -> PyResult<Option<PyShotEventRecord>> {
        let record = self
            .inner
            .flush(frame_index)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(record.map(PyShotEventRecord::from_record))
    }

    /// Forget all state so the tracker can be reused for a new video.
    fn reset(&mut self) {
        self.inner.reset();
    }

    #[getter]
    fn reset_time_frames(&self) -> i64 {
        self.inner.config().reset_time_frames
    }

    #[getter]
    fn minimum_frames_between_starts(&self) -> i64 {
        self.inner.config().minimum_frames_between_starts
    }

    #[getter]
    fn cooldown_frames_after_made(&self) -> i64 {
        self.inner.config().cooldown_frames_after_made
    }

    #[getter]
    fn shot_in_progress(&self) -> bool {
        self.inner.is_shot_in_progress()
    }

    /// "NONE" while idle, otherwise "JUMP" or "LAYUP".
    #[getter]
    fn shot_type(&self) -> &'static str {
        self.inner.shot_type().as_str()
    }

    #[getter]
    fn shot_start_frame(&self) -> Option<i64> {
        self.inner.shot_start_frame()
    }

    #[getter]
    fn shot_deadline_frame(&self) -> Option<i64> {
        self.inner.shot_deadline_frame()
    }

    #[getter]
    fn frames_since_start(&self) -> i64 {
        self.inner.frames_since_start()
    }

    #[getter]
    fn consecutive_jump_shot_frames(&self) -> u64 {
        self.inner.consecutive_jump_shot_frames()
    }

    #[getter]
    fn consecutive_layup_frames(&self) -> u64 {
        self.inner.consecutive_layup_frames()
    }

    #[getter]
    fn consecutive_ball_in_basket_frames(&self) -> u64 {
        self.inner.consecutive_ball_in_basket_frames()
    }

    #[getter]
    fn last_made_frame(&self) -> Option<i64> {
        self.inner.last_made_frame()
    }

    fn __repr__(&self) -> String {
        format!(
            "ShotEventTracker(shot_in_progress={}, shot_type='{}', last_made_frame={:?})",
            self.inner.is_shot_in_progress(),
            self.inner.shot_type(),
            self.inner.last_made_frame()
        )
    }
}
