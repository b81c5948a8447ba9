//! Current conditions from the Open-Meteo forecast API.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::{
    core::{
        constants::{OPEN_METEO_BASE_URL, USER_AGENT},
        geo::LatLng,
    },
    prelude::Duration,
    traits::WeatherSource,
    weather::CurrentWeather,
    MapError, Result,
};

/// Shared async HTTP client for every web-backed provider.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(15))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

/// Parses a `/v1/forecast` body that was requested with `current_weather=true`.
pub fn parse_current_weather(body: &str) -> Result<CurrentWeather> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    response
        .current_weather
        .ok_or_else(|| MapError::ParseError("response has no current_weather".to_string()))
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.base_url)
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn current(&self, at: LatLng) -> Result<CurrentWeather> {
        log::debug!("requesting weather for {}", at);
        let body = HTTP_CLIENT
            .get(self.forecast_url())
            .query(&[
                ("latitude", at.lat.to_string()),
                ("longitude", at.lng.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_current_weather(&body)
    }
}
