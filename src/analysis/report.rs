//! Text formatting for scan output.

use crate::metrics::ZoneMaxima;

/// Prefix of the final report line.
pub const MAXIMA_PREFIX: &str = "max speed in zone";

/// Placeholder for a zone without data.
pub const NO_DATA: &str = "-";

/// Space separated zone values, [`NO_DATA`] for missing ones.
pub fn format_speeds(speeds: &[Option<f64>]) -> String {
    speeds
        .iter()
        .map(|speed| match speed {
            Some(value) => value.to_string(),
            None => NO_DATA.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The final report line.
pub fn format_maxima(maxima: &ZoneMaxima) -> String {
    format!("{} {}", MAXIMA_PREFIX, format_speeds(maxima.values()))
}
