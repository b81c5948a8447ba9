//! Moves the map to a place picked from the search results.

use crate::{
    core::{config::WidgetConfig, session::MapSession},
    layers::marker::MarkerOptions,
    places::PlaceDetail,
    prelude::Arc,
    traits::PlaceDetailsProvider,
    ui::toast::{Severity, Toaster},
    weather::WeatherReporter,
    Result,
};

pub struct Navigator {
    session: Arc<MapSession>,
    details: Arc<dyn PlaceDetailsProvider>,
    weather: Arc<WeatherReporter>,
    toaster: Arc<Toaster>,
    place_zoom: f64,
    refresh_weather: bool,
    destination_prefix: String,
}

impl Navigator {
    pub fn new(
        session: Arc<MapSession>,
        details: Arc<dyn PlaceDetailsProvider>,
        weather: Arc<WeatherReporter>,
        toaster: Arc<Toaster>,
        config: &WidgetConfig,
    ) -> Self {
        Self {
            session,
            details,
            weather,
            toaster,
            place_zoom: config.camera.place_zoom,
            refresh_weather: config.refresh_weather_on_select,
            destination_prefix: config.messages.destination_prefix.clone(),
        }
    }

    /// Resolves `place_id` and brings it into view.
    ///
    /// On a provider failure nothing on screen changes and the error is
    /// returned for the caller to log.
    pub async fn go_to_place(&self, place_id: &str) -> Result<PlaceDetail> {
        let place = self.details.details(place_id).await?;
        log::info!("navigating to '{}' at {}", place.name, place.location);

        self.session.clear_marker();
        let map = self.session.map();
        match &place.viewport {
            Some(viewport) => map.fit_bounds(viewport),
            None => {
                map.set_center(place.location);
                map.set_zoom(self.place_zoom);
            }
        }
        self.session
            .replace_marker(MarkerOptions::destination(place.location, place.name.clone()));

        self.toaster.notify(
            format!("{}{}", self.destination_prefix, place.name),
            Severity::Success,
        );

        if self.refresh_weather {
            self.weather.refresh(place.location).await;
        }
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{clock::ManualClock, geo::{LatLng, LatLngBounds}};
    use crate::places::{PlaceCandidate, ProviderStatus};
    use crate::providers::memory::{MemoryMap, MemoryMarkers, StaticPlaces, StaticWeather};
    use crate::traits::MapProvider;
    use crate::weather::CurrentWeather;
    use crate::MapError;

    struct Fixture {
        map: Arc<MemoryMap>,
        markers: Arc<MemoryMarkers>,
        places: Arc<StaticPlaces>,
        weather: Arc<StaticWeather>,
        toaster: Arc<Toaster>,
        navigator: Navigator,
    }

    fn fixture(config: WidgetConfig) -> Fixture {
        let map = Arc::new(MemoryMap::new());
        map.create(&config.map).unwrap();
        let markers = Arc::new(MemoryMarkers::new());
        let places = Arc::new(
            StaticPlaces::new()
                .with_place(
                    PlaceCandidate::new("point", "Rodoviária", "Muriaé"),
                    PlaceDetail::new("Rodoviária", LatLng::new(-21.12, -42.37)),
                )
                .with_place(
                    PlaceCandidate::new("area", "Muriaé", "MG, Brasil"),
                    PlaceDetail::new("Muriaé", LatLng::new(-21.13, -42.36))
                        .with_viewport(LatLngBounds::from_coords(-21.2, -42.5, -21.0, -42.2)),
                ),
        );
        let weather = Arc::new(StaticWeather::new(CurrentWeather::new(24.0, 0)));
        let toaster = Arc::new(Toaster::new(Arc::new(ManualClock::new())));
        let session = Arc::new(MapSession::new(map.clone(), markers.clone()));
        let navigator = Navigator::new(
            session,
            places.clone(),
            Arc::new(WeatherReporter::new(weather.clone())),
            toaster.clone(),
            &config,
        );
        Fixture {
            map,
            markers,
            places,
            weather,
            toaster,
            navigator,
        }
    }

    #[tokio::test]
    async fn point_place_centers_and_zooms() {
        let f = fixture(WidgetConfig::default());
        f.map.set_zoom(5.0);

        f.navigator.go_to_place("point").await.unwrap();

        let camera = f.map.camera();
        assert_eq!(camera.center, LatLng::new(-21.12, -42.37));
        assert_eq!(camera.zoom, 17.0);

        let live = f.markers.live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].options.title.as_deref(), Some("Rodoviária"));
        assert_eq!(live[0].options.visual.color.to_hex(), "#ef4444");
        assert!(live[0].options.visual.pulse);

        assert_eq!(f.weather.requests(), vec![LatLng::new(-21.12, -42.37)]);
        let toast = f.toaster.current().unwrap();
        assert_eq!(toast.message, "Destination: Rodoviária");
        assert_eq!(toast.severity, Severity::Success);
    }

    #[tokio::test]
    async fn viewport_place_fits_bounds() {
        let f = fixture(WidgetConfig::default());
        f.navigator.go_to_place("area").await.unwrap();

        let fitted = f.map.fitted_bounds();
        assert_eq!(fitted.len(), 1);
        assert_eq!(f.map.camera().center, fitted[0].center());
        assert_eq!(f.markers.live()[0].options.position, LatLng::new(-21.13, -42.36));
    }

    #[tokio::test]
    async fn second_navigation_replaces_marker() {
        let f = fixture(WidgetConfig::default());
        f.navigator.go_to_place("point").await.unwrap();
        f.navigator.go_to_place("area").await.unwrap();

        assert_eq!(f.markers.live().len(), 1);
        assert_eq!(f.markers.removed_count(), 1);
    }

    #[tokio::test]
    async fn failed_lookup_changes_nothing() {
        let f = fixture(WidgetConfig::default());
        let before = f.map.camera();
        f.places.set_details_status(Some(ProviderStatus::NotFound));

        let result = f.navigator.go_to_place("point").await;

        assert!(matches!(result, Err(MapError::Provider(ProviderStatus::NotFound))));
        assert_eq!(f.map.camera(), before);
        assert!(f.markers.live().is_empty());
        assert!(f.toaster.current().is_none());
        assert!(f.weather.requests().is_empty());
    }

    #[tokio::test]
    async fn weather_refresh_on_select_can_be_disabled() {
        let mut config = WidgetConfig::default();
        config.refresh_weather_on_select = false;
        let f = fixture(config);

        f.navigator.go_to_place("point").await.unwrap();

        assert!(f.weather.requests().is_empty());
        assert_eq!(f.markers.live().len(), 1);
    }
}
