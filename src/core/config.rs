//! Configuration for the map widget
//!
//! Two presets cover the two ways the widget is deployed: a street-level map
//! that keeps the weather in sync with every camera move, and a globe-level
//! start that plays a scripted intro. Everything can also be loaded from JSON;
//! missing fields fall back to the continuous preset.

use crate::{
    animation::sequence::IntroSequence,
    core::{constants::*, geo::LatLng},
    geolocation::{millis, PositionOptions},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetProfile {
    Continuous,
    Intro,
    Custom(Box<WidgetConfig>),
}

impl WidgetProfile {
    pub fn resolve(&self) -> WidgetConfig {
        match self {
            Self::Continuous => WidgetConfig {
                map: MapInit {
                    zoom: STREET_ZOOM,
                    tilt: STREET_TILT,
                    ..MapInit::default()
                },
                mode: BootstrapMode {
                    continuous_weather: true,
                    intro_animation: false,
                },
                ..WidgetConfig::base()
            },
            Self::Intro => WidgetConfig {
                map: MapInit {
                    center: LatLng::new(0.0, DEFAULT_CENTER.1),
                    zoom: GLOBE_ZOOM,
                    tilt: 0.0,
                    ..MapInit::default()
                },
                mode: BootstrapMode {
                    continuous_weather: false,
                    intro_animation: true,
                },
                ..WidgetConfig::base()
            },
            Self::Custom(config) => config.as_ref().clone(),
        }
    }
}

impl Default for WidgetProfile {
    fn default() -> Self {
        Self::Continuous
    }
}

/// Vector maps support tilt and heading, raster maps do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderingType {
    Vector,
    Raster,
}

/// How gestures are split between the map and the surrounding page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureHandling {
    /// Every gesture moves the map, never the page
    Greedy,
    Cooperative,
    None,
    Auto,
}

/// Everything the map provider needs to construct the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapInit {
    pub center: LatLng,
    pub zoom: f64,
    pub heading: f64,
    pub tilt: f64,
    pub map_id: String,
    pub rendering: RenderingType,
    pub disable_default_ui: bool,
    pub gesture_handling: GestureHandling,
}

impl Default for MapInit {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: STREET_ZOOM,
            heading: 0.0,
            tilt: STREET_TILT,
            map_id: DEFAULT_MAP_ID.to_string(),
            rendering: RenderingType::Vector,
            disable_default_ui: true,
            gesture_handling: GestureHandling::Greedy,
        }
    }
}

/// Selects between the continuous-weather and intro-animation behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapMode {
    /// Fetch weather at startup and after every camera-idle event
    pub continuous_weather: bool,
    /// Start at globe level and play the scripted intro
    pub intro_animation: bool,
}

impl Default for BootstrapMode {
    fn default() -> Self {
        Self {
            continuous_weather: true,
            intro_animation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub place_zoom: f64,
    pub locate_zoom: f64,
    pub locate_tilt: f64,
    pub tilt_step: f64,
    pub max_tilt: f64,
    pub heading_step: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            place_zoom: PLACE_ZOOM,
            locate_zoom: LOCATE_ZOOM,
            locate_tilt: LOCATE_TILT,
            tilt_step: TILT_STEP,
            max_tilt: MAX_TILT,
            heading_step: HEADING_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    #[serde(with = "millis")]
    pub loader_delay: Duration,
    #[serde(with = "millis")]
    pub loader_fade: Duration,
    #[serde(with = "millis")]
    pub toast_duration: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loader_delay: LOADER_DELAY,
            loader_fade: LOADER_FADE,
            toast_duration: TOAST_DURATION,
        }
    }
}

/// User-facing notification texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Prepended to the place name after navigating
    pub destination_prefix: String,
    pub location_found: String,
    pub location_failed: String,
    pub geolocation_unsupported: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            destination_prefix: "Destination: ".to_string(),
            location_found: "Location found".to_string(),
            location_failed: "Weak signal or permission denied.".to_string(),
            geolocation_unsupported: "Geolocation is not supported".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub map: MapInit,
    pub mode: BootstrapMode,
    pub camera: CameraConfig,
    pub timing: TimingConfig,
    pub geolocation: PositionOptions,
    pub intro: IntroSequence,
    pub messages: Messages,
    /// Base URL of the Open-Meteo compatible forecast endpoint
    pub weather_base_url: String,
    pub min_query_chars: usize,
    /// Refresh weather for a place picked from the search results
    pub refresh_weather_on_select: bool,
    /// Drop responses that arrive after a newer request was issued
    pub discard_stale_responses: bool,
}

impl WidgetConfig {
    fn base() -> Self {
        Self {
            map: MapInit::default(),
            mode: BootstrapMode::default(),
            camera: CameraConfig::default(),
            timing: TimingConfig::default(),
            geolocation: PositionOptions::default(),
            intro: IntroSequence::default(),
            messages: Messages::default(),
            weather_base_url: OPEN_METEO_BASE_URL.to_string(),
            min_query_chars: MIN_QUERY_CHARS,
            refresh_weather_on_select: true,
            discard_stale_responses: true,
        }
    }

    /// Parses a configuration document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.map.center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "start center {} is out of range",
                self.map.center
            )));
        }
        if !(0.0..=90.0).contains(&self.camera.max_tilt) {
            return Err(MapError::InvalidConfig(format!(
                "max_tilt must be within [0, 90], got {}",
                self.camera.max_tilt
            )));
        }
        if !(self.camera.tilt_step.is_finite() && self.camera.tilt_step > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "tilt_step must be positive, got {}",
                self.camera.tilt_step
            )));
        }
        if !self.camera.heading_step.is_finite() {
            return Err(MapError::InvalidConfig(
                "heading_step must be finite".to_string(),
            ));
        }
        if self.min_query_chars == 0 {
            return Err(MapError::InvalidConfig(
                "min_query_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetProfile::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_in_start_and_mode() {
        let continuous = WidgetProfile::Continuous.resolve();
        let intro = WidgetProfile::Intro.resolve();

        assert!(continuous.mode.continuous_weather);
        assert!(!continuous.mode.intro_animation);
        assert_eq!(continuous.map.zoom, 17.0);
        assert_eq!(continuous.map.tilt, 55.0);

        assert!(!intro.mode.continuous_weather);
        assert!(intro.mode.intro_animation);
        assert_eq!(intro.map.zoom, 3.0);
        assert_eq!(intro.map.center.lat, 0.0);

        assert_eq!(continuous.camera, intro.camera);
        assert_eq!(continuous.intro, intro.intro);
    }

    #[test]
    fn map_chrome_defaults() {
        let init = MapInit::default();
        assert!(init.disable_default_ui);
        assert_eq!(init.gesture_handling, GestureHandling::Greedy);
        assert_eq!(init.rendering, RenderingType::Vector);
        assert_eq!(init.map_id, "DEMO_MAP_ID");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WidgetConfig::from_json(
            r#"{
                "mode": { "intro_animation": true, "continuous_weather": false },
                "timing": { "toast_duration": 1000 },
                "refresh_weather_on_select": false
            }"#,
        )
        .unwrap();

        assert!(config.mode.intro_animation);
        assert!(!config.refresh_weather_on_select);
        assert_eq!(config.timing.toast_duration, Duration::from_secs(1));
        assert_eq!(config.timing.loader_delay, Duration::from_millis(1500));
        assert_eq!(config.camera.max_tilt, 67.5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = WidgetConfig::default();
        config.camera.max_tilt = 120.0;
        assert!(matches!(config.validate(), Err(MapError::InvalidConfig(_))));

        let mut config = WidgetConfig::default();
        config.map.center = LatLng::new(100.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(MapError::InvalidCoordinates(_))
        ));

        assert!(matches!(
            WidgetConfig::from_json("{ not json"),
            Err(MapError::Serialization(_))
        ));
    }
}
