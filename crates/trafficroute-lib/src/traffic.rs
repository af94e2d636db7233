//! Conversion of observed road speeds into edge weights and traffic labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::weight::Weight;

/// Speed (km/h) above which a segment counts as free-flowing.
pub const LOW_CONGESTION_KPH: f64 = 50.0;
/// Speed (km/h) above which a segment counts as moderately congested.
pub const MEDIUM_CONGESTION_KPH: f64 = 30.0;
/// Speed (km/h) above which a segment is congested but not at a standstill.
pub const HIGH_CONGESTION_KPH: f64 = 10.0;

/// Travel time in minutes for a segment driven at `speed_kph`.
pub fn travel_time_minutes(length_km: f64, speed_kph: f64) -> Result<Weight> {
    if !length_km.is_finite() || length_km < 0.0 {
        return Err(Error::InvalidMeasurement {
            quantity: "segment length",
            value: length_km,
        });
    }
    if !speed_kph.is_finite() || speed_kph <= 0.0 {
        return Err(Error::InvalidMeasurement {
            quantity: "speed",
            value: speed_kph,
        });
    }
    Weight::new(length_km / speed_kph * 60.0)
}

/// Congestion classification for a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    Severe,
}

impl CongestionLevel {
    pub fn from_speed(speed_kph: f64) -> Self {
        if speed_kph > LOW_CONGESTION_KPH {
            CongestionLevel::Low
        } else if speed_kph > MEDIUM_CONGESTION_KPH {
            CongestionLevel::Medium
        } else if speed_kph > HIGH_CONGESTION_KPH {
            CongestionLevel::High
        } else {
            CongestionLevel::Severe
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CongestionLevel::Low => "low",
            CongestionLevel::Medium => "medium",
            CongestionLevel::High => "high",
            CongestionLevel::Severe => "severe",
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall traffic on a route, judged by how much slower it is than free flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLevel {
    Light,
    Moderate,
    Heavy,
}

impl TrafficLevel {
    pub fn from_delay_factor(factor: f64) -> Self {
        if factor < 1.15 {
            TrafficLevel::Light
        } else if factor < 1.25 {
            TrafficLevel::Moderate
        } else {
            TrafficLevel::Heavy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrafficLevel::Light => "Light",
            TrafficLevel::Moderate => "Moderate",
            TrafficLevel::Heavy => "Heavy",
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ratio of in-traffic time to free-flow time; `1.0` for a zero-length trip.
pub fn delay_factor(actual_minutes: f64, free_flow_minutes: f64) -> f64 {
    if free_flow_minutes > 0.0 {
        actual_minutes / free_flow_minutes
    } else {
        1.0
    }
}

/// Aggregated speed reported for the segment `from -> to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedObservation<N> {
    pub from: N,
    pub to: N,
    pub speed_kph: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_time_is_length_over_speed() {
        let minutes = travel_time_minutes(10.0, 60.0).unwrap();
        assert!((minutes.get() - 10.0).abs() < 1e-12);
        assert_eq!(travel_time_minutes(0.0, 30.0).unwrap(), Weight::ZERO);
    }

    #[test]
    fn travel_time_rejects_bad_measurements() {
        assert!(matches!(
            travel_time_minutes(1.0, 0.0),
            Err(Error::InvalidMeasurement { quantity: "speed", .. })
        ));
        assert!(matches!(
            travel_time_minutes(-1.0, 40.0),
            Err(Error::InvalidMeasurement {
                quantity: "segment length",
                ..
            })
        ));
        assert!(travel_time_minutes(1.0, f64::NAN).is_err());
    }

    #[test]
    fn congestion_thresholds() {
        assert_eq!(CongestionLevel::from_speed(65.0), CongestionLevel::Low);
        assert_eq!(CongestionLevel::from_speed(50.0), CongestionLevel::Medium);
        assert_eq!(CongestionLevel::from_speed(30.0), CongestionLevel::High);
        assert_eq!(CongestionLevel::from_speed(10.0), CongestionLevel::Severe);
        assert_eq!(CongestionLevel::from_speed(8.7), CongestionLevel::Severe);
    }

    #[test]
    fn traffic_level_thresholds() {
        assert_eq!(TrafficLevel::from_delay_factor(1.0), TrafficLevel::Light);
        assert_eq!(TrafficLevel::from_delay_factor(1.2), TrafficLevel::Moderate);
        assert_eq!(TrafficLevel::from_delay_factor(1.25), TrafficLevel::Heavy);
        assert_eq!(delay_factor(12.0, 0.0), 1.0);
        assert!((delay_factor(12.0, 10.0) - 1.2).abs() < 1e-12);
    }
}
