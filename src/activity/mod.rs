//! Activity file reading: document model, TCX traversal and per-trackpoint samples.

pub mod document;
pub mod tcx;

use thiserror::Error;

pub use document::{Document, DocumentError, Element, XmlNode};
pub use tcx::{collect_samples, extract_sample, locate_activity};

/// One trackpoint reading.
///
/// Each field is `None` when the source node was absent. The classifier
/// treats an absent value as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    /// Heart rate in beats per minute
    pub heart_rate: Option<u16>,
    /// Speed in meters per second
    pub speed_ms: Option<f64>,
    /// Running cadence in steps per minute
    pub cadence: Option<u16>,
}

impl Sample {
    pub fn new(heart_rate: u16, speed_ms: f64) -> Self {
        Self {
            heart_rate: Some(heart_rate),
            speed_ms: Some(speed_ms),
            cadence: None,
        }
    }

    pub fn heart_rate_or_zero(&self) -> u16 {
        self.heart_rate.unwrap_or(0)
    }

    pub fn speed_or_zero(&self) -> f64 {
        self.speed_ms.unwrap_or(0.0)
    }
}

/// Errors raised while extracting samples from an activity.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}
