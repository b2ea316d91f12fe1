//! Python bindings for shot-tracker-rs using PyO3.
//!
//! The API mirrors the pure-Python `ShotEventTracker` of the `sports`
//! package: the same required constructor arguments and `update` call, with
//! no defaults filled in on the Rust side. Records are readable either as
//! attributes or by key.

use pyo3::prelude::*;

mod record;
mod tracker;

pub use record::PyShotEventRecord;
pub use tracker::PyShotEventTracker;

use crate::{
    BALL_IN_BASKET_MIN_CONSECUTIVE_FRAMES, JUMP_SHOT_MIN_CONSECUTIVE_FRAMES,
    LAYUP_DUNK_MIN_CONSECUTIVE_FRAMES,
};

/// Python module for shot-tracker-rs.
///
/// The function is named `_shot_tracker_rs` with underscore prefix for mixed Python/Rust projects.
#[pymodule]
fn _shot_tracker_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyShotEventTracker>()?;
    m.add_class::<PyShotEventRecord>()?;

    // Debounce thresholds
    m.add("JUMP_SHOT_MIN_CONSECUTIVE_FRAMES", JUMP_SHOT_MIN_CONSECUTIVE_FRAMES)?;
    m.add("LAYUP_DUNK_MIN_CONSECUTIVE_FRAMES", LAYUP_DUNK_MIN_CONSECUTIVE_FRAMES)?;
    m.add("BALL_IN_BASKET_MIN_CONSECUTIVE_FRAMES", BALL_IN_BASKET_MIN_CONSECUTIVE_FRAMES)?;

    // Version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
