//! # geoscout
//!
//! A location exploration widget: a 3D-capable map with place search, live
//! weather for the visible area, traffic and geolocation controls, and an
//! optional cinematic intro.
//!
//! The map SDK, place search, positioning and weather service are reached
//! through the traits in [`traits`]. [`MapBootstrapper`] wires them into a
//! [`MapWidget`], which a host drives with [`WidgetEvent`]s and renders from
//! [`WidgetSnapshot`]s.

pub mod animation;
pub mod core;
pub mod geolocation;
pub mod input;
pub mod layers;
pub mod navigation;
pub mod places;
pub mod prelude;
pub mod providers;
pub mod runtime;
pub mod traits;
pub mod ui;
pub mod weather;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bootstrap::{LoaderState, MapBootstrapper, MapWidget, Providers, WidgetSnapshot},
    camera::CameraState,
    clock::{Clock, ManualClock, SystemClock},
    config::{BootstrapMode, WidgetConfig, WidgetProfile},
    geo::{LatLng, LatLngBounds},
};

pub use input::events::WidgetEvent;

pub use layers::marker::{build_marker, MarkerOptions};

pub use places::{PlaceCandidate, PlaceDetail, ProviderStatus};

pub use providers::{NominatimPlaces, OpenMeteoClient};

pub use weather::{WeatherCondition, WeatherReporter};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Provider status: {0}")]
    Provider(places::ProviderStatus),

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] geolocation::GeolocationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
