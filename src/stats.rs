//! Aggregation of emitted shot events.
//!
//! - `ShotStatistics` - made/missed totals and shooting percentages
//! - `ShotChart` - court positions of made and missed shots, in the
//!   `n x 2` layout a court-diagram renderer consumes

use nalgebra::{DMatrix, Point2};
use serde::{Deserialize, Serialize};

use crate::shot::{ShotEvent, ShotEventRecord, ShotType};

/// Counts for one category of shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShotTotals {
    pub started: u32,
    pub made: u32,
    pub missed: u32,
}

impl ShotTotals {
    /// Resolved attempts (made + missed).
    pub fn attempts(&self) -> u32 {
        self.made + self.missed
    }

    /// Fraction of resolved attempts that were made, `None` without attempts.
    pub fn percentage(&self) -> Option<f64> {
        match self.attempts() {
            0 => None,
            attempts => Some(f64::from(self.made) / f64::from(attempts)),
        }
    }

    fn record(&mut self, event: ShotEvent) {
        match event {
            ShotEvent::Start => self.started += 1,
            ShotEvent::Made => self.made += 1,
            ShotEvent::Missed => self.missed += 1,
        }
    }
}

/// Running shot totals, overall and per shot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShotStatistics {
    pub total: ShotTotals,
    pub jump: ShotTotals,
    pub layup: ShotTotals,
}

impl ShotStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record.
    pub fn record(&mut self, record: &ShotEventRecord) {
        self.total.record(record.event);
        match record.shot_type {
            ShotType::Jump => self.jump.record(record.event),
            ShotType::Layup => self.layup.record(record.event),
            ShotType::None => {}
        }
    }

    /// Count every record in `records`.
    pub fn extend<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a ShotEventRecord>,
    {
        for record in records {
            self.record(record);
        }
    }

    /// Totals for a shot type. `ShotType::None` yields the overall totals.
    pub fn by_type(&self, shot_type: ShotType) -> ShotTotals {
        match shot_type {
            ShotType::Jump => self.jump,
            ShotType::Layup => self.layup,
            ShotType::None => self.total,
        }
    }

    /// Overall field-goal percentage.
    pub fn field_goal_percentage(&self) -> Option<f64> {
        self.total.percentage()
    }
}

impl<'a> FromIterator<&'a ShotEventRecord> for ShotStatistics {
    fn from_iter<I: IntoIterator<Item = &'a ShotEventRecord>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

/// Court positions of resolved shots.
#[derive(Debug, Clone, Default)]
pub struct ShotChart {
    made: Vec<Point2<f64>>,
    missed: Vec<Point2<f64>>,
}

impl ShotChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a resolved shot at `position` (court coordinates).
    ///
    /// START records carry no outcome and are ignored; returns whether the
    /// record was added.
    pub fn push(&mut self, record: &ShotEventRecord, position: Point2<f64>) -> bool {
        match record.event {
            ShotEvent::Made => self.made.push(position),
            ShotEvent::Missed => self.missed.push(position),
            ShotEvent::Start => return false,
        }
        true
    }

    pub fn made(&self) -> &[Point2<f64>] {
        &self.made
    }

    pub fn missed(&self) -> &[Point2<f64>] {
        &self.missed
    }

    /// Made shot positions as an `n x 2` matrix, one `(x, y)` row per shot.
    pub fn made_xy(&self) -> DMatrix<f64> {
        points_to_matrix(&self.made)
    }

    /// Missed shot positions as an `n x 2` matrix, one `(x, y)` row per shot.
    pub fn missed_xy(&self) -> DMatrix<f64> {
        points_to_matrix(&self.missed)
    }

    pub fn len(&self) -> usize {
        self.made.len() + self.missed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.made.is_empty() && self.missed.is_empty()
    }

    pub fn clear(&mut self) {
        self.made.clear();
        self.missed.clear();
    }
}

fn points_to_matrix(points: &[Point2<f64>]) -> DMatrix<f64> {
    DMatrix::from_fn(points.len(), 2, |row, col| points[row][col])
}
