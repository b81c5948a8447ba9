//! Device position types shared by geolocation providers and the locate control.

use crate::core::{constants::GEOLOCATION_TIMEOUT, geo::LatLng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for a single position request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    #[serde(with = "millis")]
    pub timeout: Duration,
    /// Oldest cached fix the device may answer with; zero forces a fresh one.
    #[serde(with = "millis")]
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: GEOLOCATION_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

/// A position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coords: LatLng,
    /// Accuracy radius in meters, when the device reports one.
    pub accuracy: Option<f64>,
}

impl Position {
    pub fn new(coords: LatLng) -> Self {
        Self {
            coords,
            accuracy: None,
        }
    }
}

/// Why a position request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
}

/// Serde helper storing a `Duration` as whole milliseconds.
pub(crate) mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
