//! Live weather for the visible map center.
//!
//! [`WeatherReporter`] asks a [`WeatherSource`] for the current conditions,
//! turns the numeric condition code into a description and icon, and keeps the
//! single display the widget shows. Failures are logged and leave the previous
//! display in place.

mod condition;

pub use condition::{format_temperature, WeatherCondition, WeatherIcon};

use crate::{
    core::geo::LatLng,
    prelude::{lock, Arc, Mutex},
    runtime::async_utils::RequestSequence,
    traits::WeatherSource,
    Result,
};
use serde::{Deserialize, Serialize};

/// Raw conditions as reported by the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius
    pub temperature: f64,
    /// WMO weather interpretation code
    pub weathercode: i64,
}

impl CurrentWeather {
    pub fn new(temperature: f64, weathercode: i64) -> Self {
        Self {
            temperature,
            weathercode,
        }
    }
}

/// Weather readings with their derived presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub at: LatLng,
    pub temperature: f64,
    pub code: i64,
    pub condition: WeatherCondition,
}

impl WeatherSnapshot {
    pub fn new(at: LatLng, current: CurrentWeather) -> Self {
        Self {
            at,
            temperature: current.temperature,
            code: current.weathercode,
            condition: WeatherCondition::from_code(current.weathercode),
        }
    }

    /// Text shown in the temperature slot, e.g. `21°C`
    pub fn temperature_label(&self) -> String {
        format_temperature(self.temperature)
    }
}

/// What the weather panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherDisplay {
    pub temperature: Option<String>,
    pub description: Option<String>,
    pub icon: Option<WeatherIcon>,
}

impl WeatherDisplay {
    fn show(&mut self, snapshot: &WeatherSnapshot) {
        self.temperature = Some(snapshot.temperature_label());
        self.description = Some(snapshot.condition.description().to_string());
        self.icon = Some(snapshot.condition.icon());
    }
}

pub struct WeatherReporter {
    source: Arc<dyn WeatherSource>,
    display: Mutex<WeatherDisplay>,
    latest: Mutex<Option<WeatherSnapshot>>,
    requests: RequestSequence,
    discard_stale: bool,
}

impl WeatherReporter {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            display: Mutex::new(WeatherDisplay::default()),
            latest: Mutex::new(None),
            requests: RequestSequence::new(),
            discard_stale: true,
        }
    }

    /// Whether a response that lost the race to a newer request is dropped.
    pub fn with_discard_stale(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    /// Fetches conditions at `at` without touching the display.
    pub async fn fetch(&self, at: LatLng) -> Result<WeatherSnapshot> {
        let current = self.source.current(at).await?;
        Ok(WeatherSnapshot::new(at, current))
    }

    /// Fetches conditions at `at` and updates the display.
    ///
    /// Errors are logged; the display keeps whatever it showed before. Returns
    /// whether the display changed.
    pub async fn refresh(&self, at: LatLng) -> bool {
        let ticket = self.requests.issue();
        match self.fetch(at).await {
            Ok(snapshot) => {
                if self.discard_stale && !self.requests.is_latest(ticket) {
                    log::warn!("dropping stale weather for {} (request #{})", at, ticket);
                    return false;
                }
                lock(&self.display).show(&snapshot);
                *lock(&self.latest) = Some(snapshot);
                true
            }
            Err(e) => {
                log::error!("failed to load weather for {}: {}", at, e);
                false
            }
        }
    }

    pub fn display(&self) -> WeatherDisplay {
        lock(&self.display).clone()
    }

    /// Last snapshot that reached the display
    pub fn latest(&self) -> Option<WeatherSnapshot> {
        lock(&self.latest).clone()
    }
}
