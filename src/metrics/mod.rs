//! Zone classification and cross-activity aggregation.

pub mod maxima;
pub mod zones;

pub use maxima::ZoneMaxima;
pub use zones::{
    classify_samples, zone_speeds, HeartRateZone, ZoneError, ZoneStats, DEFAULT_HR_ZONES,
    MS_TO_KMH,
};
