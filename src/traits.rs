//! Seams to the external collaborators the widget orchestrates.
//!
//! The widget never renders a map, geocodes a query or measures the weather
//! itself. Hosts plug those capabilities in through the traits below; the
//! `providers` module ships in-memory, Open-Meteo and Nominatim implementations.
//!
//! Camera and marker calls are synchronous, matching how map SDKs expose them.
//! Everything that crosses the network or waits on the device is `async`.

use async_trait::async_trait;

use crate::{
    core::{
        config::MapInit,
        geo::{LatLng, LatLngBounds},
    },
    geolocation::{Position, PositionOptions},
    layers::marker::MarkerOptions,
    places::{PlaceCandidate, PlaceDetail},
    weather::CurrentWeather,
    Result,
};

/// Handle to the map instance.
pub trait MapProvider: Send + Sync {
    /// Builds the map with its initial camera and chrome settings.
    fn create(&self, init: &MapInit) -> Result<()>;

    fn center(&self) -> LatLng;

    /// Jumps to `center` without animation.
    fn set_center(&self, center: LatLng);

    /// Moves to `center`, animating when the provider supports it.
    fn pan_to(&self, center: LatLng);

    fn zoom(&self) -> f64;

    fn set_zoom(&self, zoom: f64);

    fn heading(&self) -> f64;

    fn set_heading(&self, heading: f64);

    fn tilt(&self) -> f64;

    fn set_tilt(&self, tilt: f64);

    /// Adjusts center and zoom so the whole box is visible.
    fn fit_bounds(&self, bounds: &LatLngBounds);
}

/// Live traffic layer drawn over the map.
pub trait TrafficOverlay: Send + Sync {
    fn set_attached(&self, attached: bool);
}

/// Places marker visuals on the map.
pub trait MarkerProvider: Send + Sync {
    fn place(&self, options: MarkerOptions) -> Box<dyn MarkerHandle>;
}

/// A marker currently on the map.
pub trait MarkerHandle: Send + Sync {
    fn position(&self) -> LatLng;

    /// Detaches the marker from the map. Calling it twice is harmless.
    fn remove(&mut self);
}

/// Place predictions for a partial query.
#[async_trait]
pub trait AutocompleteProvider: Send + Sync {
    async fn predictions(&self, query: &str) -> Result<Vec<PlaceCandidate>>;
}

/// Resolves a candidate identifier into a full place.
#[async_trait]
pub trait PlaceDetailsProvider: Send + Sync {
    async fn details(&self, place_id: &str) -> Result<PlaceDetail>;
}

/// Device positioning.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Whether the runtime can answer position requests at all.
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self, options: &PositionOptions) -> Result<Position>;
}

/// Current weather conditions at a coordinate.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, at: LatLng) -> Result<CurrentWeather>;
}
