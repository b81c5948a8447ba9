use crate::{
    core::{
        camera::step_tilt,
        config::{CameraConfig, Messages, WidgetConfig},
        geo::LatLng,
        session::MapSession,
    },
    geolocation::PositionOptions,
    layers::marker::MarkerOptions,
    prelude::{lock, Arc, Mutex},
    traits::{Geolocator, TrafficOverlay},
    ui::toast::{Severity, Toaster},
    weather::WeatherReporter,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Glyph on the locate button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocateIcon {
    Crosshairs,
    /// A position request is in flight
    Spinner,
}

impl LocateIcon {
    pub fn css_class(&self) -> &'static str {
        match self {
            LocateIcon::Crosshairs => "fa-solid fa-location-crosshairs",
            LocateIcon::Spinner => "fa-solid fa-circle-notch fa-spin",
        }
    }
}

/// Camera buttons: traffic, locate, tilt and rotate.
pub struct CameraControls {
    session: Arc<MapSession>,
    traffic: Arc<dyn TrafficOverlay>,
    geolocator: Arc<dyn Geolocator>,
    weather: Arc<WeatherReporter>,
    toaster: Arc<Toaster>,
    camera: CameraConfig,
    position_options: PositionOptions,
    messages: Messages,
    traffic_on: AtomicBool,
    locate_icon: Mutex<LocateIcon>,
}

impl CameraControls {
    pub fn new(
        session: Arc<MapSession>,
        traffic: Arc<dyn TrafficOverlay>,
        geolocator: Arc<dyn Geolocator>,
        weather: Arc<WeatherReporter>,
        toaster: Arc<Toaster>,
        config: &WidgetConfig,
    ) -> Self {
        Self {
            session,
            traffic,
            geolocator,
            weather,
            toaster,
            camera: config.camera.clone(),
            position_options: config.geolocation.clone(),
            messages: config.messages.clone(),
            traffic_on: AtomicBool::new(false),
            locate_icon: Mutex::new(LocateIcon::Crosshairs),
        }
    }

    /// Flips the traffic overlay and returns the new pressed state.
    pub fn toggle_traffic(&self) -> bool {
        let on = !self.traffic_on.fetch_xor(true, Ordering::SeqCst);
        self.traffic.set_attached(on);
        on
    }

    pub fn traffic_on(&self) -> bool {
        self.traffic_on.load(Ordering::SeqCst)
    }

    pub fn locate_icon(&self) -> LocateIcon {
        *lock(&self.locate_icon)
    }

    /// Centers the map on the device position. Returns the fix on success.
    ///
    /// Every failure ends in an error toast; only a successful fix moves the
    /// camera, places the marker and refreshes the weather. The icon and the
    /// success toast do not wait for the weather answer.
    pub async fn locate(&self) -> Option<LatLng> {
        if !self.geolocator.is_supported() {
            self.toaster
                .notify(self.messages.geolocation_unsupported.clone(), Severity::Error);
            return None;
        }

        *lock(&self.locate_icon) = LocateIcon::Spinner;
        let result = self
            .geolocator
            .current_position(&self.position_options)
            .await;

        match result {
            Ok(position) => {
                let here = position.coords;
                log::info!("device located at {}", here);
                let map = self.session.map();
                map.pan_to(here);
                map.set_zoom(self.camera.locate_zoom);
                map.set_tilt(self.camera.locate_tilt);
                self.session
                    .replace_marker(MarkerOptions::current_location(here));
                *lock(&self.locate_icon) = LocateIcon::Crosshairs;
                self.toaster
                    .notify(self.messages.location_found.clone(), Severity::Success);

                // the fix is already on screen; weather fills in when it arrives
                self.weather.refresh(here).await;
                Some(here)
            }
            Err(e) => {
                log::info!("geolocation failed: {}", e);
                *lock(&self.locate_icon) = LocateIcon::Crosshairs;
                self.toaster
                    .notify(self.messages.location_failed.clone(), Severity::Error);
                None
            }
        }
    }

    /// Tilts the camera up by one step, never past the maximum.
    pub fn tilt_up(&self) -> f64 {
        self.apply_tilt(self.camera.tilt_step)
    }

    /// Tilts the camera down by one step, never below flat.
    pub fn tilt_down(&self) -> f64 {
        self.apply_tilt(-self.camera.tilt_step)
    }

    fn apply_tilt(&self, delta: f64) -> f64 {
        let map = self.session.map();
        let tilt = step_tilt(map.tilt(), delta, self.camera.max_tilt);
        map.set_tilt(tilt);
        tilt
    }

    /// Turns the heading by one step; wrapping is left to the map.
    pub fn rotate(&self) -> f64 {
        let map = self.session.map();
        let current = map.heading();
        let current = if current.is_finite() { current } else { 0.0 };
        let heading = current + self.camera.heading_step;
        map.set_heading(heading);
        heading
    }
}
