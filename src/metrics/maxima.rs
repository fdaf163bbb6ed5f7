//! Running per-zone maximum of average speed across activities.

use super::zones::ZoneError;

/// Best average speed seen so far in each zone.
///
/// A zone stays `None` until some activity has samples in it, so "no data"
/// is never confused with a real speed.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMaxima {
    values: Vec<Option<f64>>,
}

impl ZoneMaxima {
    pub fn new(zone_count: usize) -> Self {
        Self {
            values: vec![None; zone_count],
        }
    }

    /// Fold one activity's per-zone speeds into the maxima.
    ///
    /// Zones without a value in `speeds` are left unchanged.
    pub fn fold(&mut self, speeds: &[Option<f64>]) -> Result<(), ZoneError> {
        if speeds.len() != self.values.len() {
            return Err(ZoneError::LengthMismatch {
                expected: self.values.len(),
                actual: speeds.len(),
            });
        }

        for (max, speed) in self.values.iter_mut().zip(speeds) {
            if let Some(speed) = *speed {
                *max = Some(max.map_or(speed, |m| m.max(speed)));
            }
        }
        Ok(())
    }

    /// Combine with maxima collected independently.
    pub fn merge(&mut self, other: &ZoneMaxima) -> Result<(), ZoneError> {
        self.fold(&other.values)
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn get(&self, zone: usize) -> Option<f64> {
        self.values.get(zone).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether any zone has received a value.
    pub fn has_data(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}
