use crate::core::geo::LatLng;
use crate::traits::MapProvider;
use serde::{Deserialize, Serialize};

/// Point-in-time view of the map camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: LatLng,
    pub zoom: f64,
    pub tilt: f64,
    pub heading: f64,
}

impl CameraState {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            tilt: 0.0,
            heading: 0.0,
        }
    }

    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    /// Reads every camera property from a live map
    pub fn read(map: &dyn MapProvider) -> Self {
        Self {
            center: map.center(),
            zoom: map.zoom(),
            tilt: map.tilt(),
            heading: map.heading(),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0)
    }
}

/// Applies a tilt delta and keeps the result inside `[0, max]`.
///
/// A non-finite current tilt (a provider that has not reported one yet) counts as 0.
pub fn step_tilt(current: f64, delta: f64, max: f64) -> f64 {
    let current = if current.is_finite() { current } else { 0.0 };
    (current + delta).clamp(0.0, max)
}
