//! TCX activity traversal.
//!
//! Walks `TrainingCenterDatabase/Activities/Activity/Lap/Track/Trackpoint`
//! and turns each trackpoint into a [`Sample`].

use std::str::FromStr;

use super::{ActivityError, Sample, XmlNode};

/// Find the activity node of a TCX document root.
///
/// Returns `None` when the root is not a training database or the
/// `Activities/Activity` path is missing.
pub fn locate_activity<N: XmlNode>(root: &N) -> Option<&N> {
    if root.name() != "TrainingCenterDatabase" {
        return None;
    }
    root.child("Activities")?.child("Activity")
}

/// Collect samples from every trackpoint of every lap, in document order.
pub fn collect_samples<N: XmlNode>(activity: &N) -> Result<Vec<Sample>, ActivityError> {
    let mut samples = Vec::new();

    for (index, lap) in activity.children("Lap").enumerate() {
        if let Some(start_time) = lap.attribute("StartTime") {
            tracing::trace!("Lap {} starts at {}", index, start_time);
        }

        let Some(track) = lap.child("Track") else {
            continue;
        };

        for trackpoint in track.children("Trackpoint") {
            samples.push(extract_sample(trackpoint)?);
        }
    }

    Ok(samples)
}

/// Extract heart rate, speed and cadence from a single trackpoint.
///
/// Absent nodes leave the field unset. Text that is present but not a
/// number, or a speed that is not finite, is an error.
pub fn extract_sample<N: XmlNode>(trackpoint: &N) -> Result<Sample, ActivityError> {
    let mut sample = Sample::default();

    if let Some(value) = trackpoint
        .child("HeartRateBpm")
        .and_then(|hr| hr.child("Value"))
    {
        sample.heart_rate = Some(parse_value("HeartRateBpm", value)?);
    }

    if let Some(tpx) = trackpoint
        .child("Extensions")
        .and_then(|ext| ext.child("TPX"))
    {
        if let Some(speed) = tpx.child("Speed") {
            let value: f64 = parse_value("Speed", speed)?;
            // f64 parsing accepts NaN and inf
            if !value.is_finite() {
                return Err(ActivityError::InvalidValue {
                    field: "Speed".to_string(),
                    value: speed.text().trim().to_string(),
                });
            }
            sample.speed_ms = Some(value);
        }
        if let Some(cadence) = tpx.child("RunCadence") {
            sample.cadence = Some(parse_value("RunCadence", cadence)?);
        }
    }

    Ok(sample)
}

fn parse_value<N: XmlNode, T: FromStr>(field: &str, node: &N) -> Result<T, ActivityError> {
    let text = node.text().trim();
    text.parse().map_err(|_| ActivityError::InvalidValue {
        field: field.to_string(),
        value: text.to_string(),
    })
}
