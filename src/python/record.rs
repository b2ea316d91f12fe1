//! Python wrapper for ShotEventRecord.

use pyo3::exceptions::PyKeyError;
use pyo3::prelude::*;

use crate::ShotEventRecord;

/// One event emitted by ShotEventTracker.update.
///
/// Fields are also reachable by key, so existing code that indexes records
/// like dictionaries (`record["event"]`) keeps working.
#[pyclass(name = "ShotEventRecord", frozen)]
#[derive(Clone)]
pub struct PyShotEventRecord {
    pub(crate) record: ShotEventRecord,
}

impl PyShotEventRecord {
    pub fn from_record(record: ShotEventRecord) -> Self {
        Self { record }
    }
}

#[pymethods]
impl PyShotEventRecord {
    /// Event name: "START", "MADE" or "MISSED".
    #[getter]
    fn event(&self) -> &'static str {
        self.record.event.as_str()
    }

    /// Frame index the event was emitted on.
    #[getter]
    fn frame(&self) -> i64 {
        self.record.frame
    }

    /// Shot type: "JUMP" or "LAYUP".
    #[getter]
    fn r#type(&self) -> &'static str {
        self.record.shot_type.as_str()
    }

    fn __getitem__(&self, py: Python<'_>, key: &str) -> PyResult<PyObject> {
        match key {
            "event" => Ok(self.record.event.as_str().into_py(py)),
            "frame" => Ok(self.record.frame.into_py(py)),
            "type" => Ok(self.record.shot_type.as_str().into_py(py)),
            _ => Err(PyKeyError::new_err(key.to_string())),
        }
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.record == other.record
    }

    fn __repr__(&self) -> String {
        format!(
            "ShotEventRecord(event='{}', frame={}, type='{}')",
            self.record.event, self.record.frame, self.record.shot_type
        )
    }
}
