//! Heart rate zones and per-zone speed statistics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::Sample;

/// Meters per second to kilometers per hour.
pub const MS_TO_KMH: f64 = 3.6;

/// A heart rate interval, exclusive at both ends.
///
/// Zones in a list may overlap or leave gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZone {
    /// Lower bound in BPM (exclusive)
    pub lower_bpm: u16,
    /// Upper bound in BPM (exclusive)
    pub upper_bpm: u16,
}

impl HeartRateZone {
    pub const fn new(lower_bpm: u16, upper_bpm: u16) -> Self {
        Self {
            lower_bpm,
            upper_bpm,
        }
    }

    /// Whether `heart_rate` lies strictly between the bounds.
    pub fn contains(&self, heart_rate: u16) -> bool {
        heart_rate > self.lower_bpm && heart_rate < self.upper_bpm
    }
}

impl std::fmt::Display for HeartRateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower_bpm, self.upper_bpm)
    }
}

/// Default running zones.
pub const DEFAULT_HR_ZONES: [HeartRateZone; 6] = [
    HeartRateZone::new(0, 104),
    HeartRateZone::new(104, 128),
    HeartRateZone::new(128, 142),
    HeartRateZone::new(142, 152),
    HeartRateZone::new(152, 160),
    HeartRateZone::new(160, 255),
];

/// Zone statistics errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    #[error("Zone {zone} has no samples")]
    NoSamples { zone: usize },

    #[error("Expected {expected} zone values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Accumulated samples for one zone of one activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStats {
    /// Position in the zone list
    pub zone: usize,
    /// Zone bounds
    pub bounds: HeartRateZone,
    /// Number of samples inside the zone
    pub sample_count: u32,
    /// Sum of those samples' speeds in m/s
    pub speed_sum_ms: f64,
}

impl ZoneStats {
    fn empty(zone: usize, bounds: HeartRateZone) -> Self {
        Self {
            zone,
            bounds,
            sample_count: 0,
            speed_sum_ms: 0.0,
        }
    }

    /// Average speed in km/h.
    pub fn average_speed_kmh(&self) -> Result<f64, ZoneError> {
        if self.sample_count == 0 {
            return Err(ZoneError::NoSamples { zone: self.zone });
        }
        Ok(self.speed_sum_ms / f64::from(self.sample_count) * MS_TO_KMH)
    }
}

/// Bucket samples into zones.
///
/// Every sample is checked against every zone, so a sample inside two
/// overlapping zones counts toward both.
pub fn classify_samples(samples: &[Sample], zones: &[HeartRateZone]) -> Vec<ZoneStats> {
    let mut stats: Vec<ZoneStats> = zones
        .iter()
        .enumerate()
        .map(|(i, bounds)| ZoneStats::empty(i, *bounds))
        .collect();

    for sample in samples {
        let heart_rate = sample.heart_rate_or_zero();
        for zone in stats.iter_mut() {
            if zone.bounds.contains(heart_rate) {
                zone.sample_count += 1;
                zone.speed_sum_ms += sample.speed_or_zero();
            }
        }
    }

    stats
}

/// Average speed per zone, `None` for zones without samples.
pub fn zone_speeds(stats: &[ZoneStats]) -> Vec<Option<f64>> {
    stats
        .iter()
        .map(|zone| match zone.average_speed_kmh() {
            Ok(speed) => Some(speed),
            Err(e) => {
                tracing::debug!("{} {}, excluded from maxima", e, zone.bounds);
                None
            }
        })
        .collect()
}
