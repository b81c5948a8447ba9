//! In-process providers.
//!
//! They keep camera, markers and overlay state in memory and answer place,
//! position and weather requests from fixed data. Headless hosts and the demo
//! app use them in place of a real map SDK; the test suite uses them to
//! observe what the widget did.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{
    core::{
        camera::CameraState,
        config::MapInit,
        geo::{LatLng, LatLngBounds},
    },
    geolocation::{GeolocationError, Position, PositionOptions},
    layers::marker::MarkerOptions,
    places::{PlaceCandidate, PlaceDetail, ProviderStatus},
    prelude::{lock, Arc, HashMap, Mutex},
    traits::{
        AutocompleteProvider, Geolocator, MapProvider, MarkerHandle, MarkerProvider,
        PlaceDetailsProvider, TrafficOverlay, WeatherSource,
    },
    weather::CurrentWeather,
    MapError, Result,
};

#[derive(Debug, Default)]
struct MapState {
    camera: CameraState,
    init: Option<MapInit>,
    fitted: Vec<LatLngBounds>,
}

/// Map whose camera is a plain value.
#[derive(Debug, Default)]
pub struct MemoryMap {
    state: Mutex<MapState>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> CameraState {
        lock(&self.state).camera
    }

    /// Options the map was created with
    pub fn init(&self) -> Option<MapInit> {
        lock(&self.state).init.clone()
    }

    /// Every box passed to `fit_bounds`, oldest first
    pub fn fitted_bounds(&self) -> Vec<LatLngBounds> {
        lock(&self.state).fitted.clone()
    }

    /// Simulates a user drag or pinch ending at `center` / `zoom`.
    pub fn move_camera(&self, center: LatLng, zoom: f64) {
        let mut state = lock(&self.state);
        state.camera.center = center;
        state.camera.zoom = zoom;
    }
}

impl MapProvider for MemoryMap {
    fn create(&self, init: &MapInit) -> Result<()> {
        if !init.center.is_valid() {
            return Err(MapError::InvalidCoordinates(init.center.to_string()));
        }
        let mut state = lock(&self.state);
        state.camera = CameraState::new(init.center, init.zoom)
            .with_tilt(init.tilt)
            .with_heading(init.heading);
        state.init = Some(init.clone());
        Ok(())
    }

    fn center(&self) -> LatLng {
        lock(&self.state).camera.center
    }

    fn set_center(&self, center: LatLng) {
        lock(&self.state).camera.center = center;
    }

    fn pan_to(&self, center: LatLng) {
        self.set_center(center);
    }

    fn zoom(&self) -> f64 {
        lock(&self.state).camera.zoom
    }

    fn set_zoom(&self, zoom: f64) {
        lock(&self.state).camera.zoom = zoom;
    }

    fn heading(&self) -> f64 {
        lock(&self.state).camera.heading
    }

    fn set_heading(&self, heading: f64) {
        lock(&self.state).camera.heading = heading;
    }

    fn tilt(&self) -> f64 {
        lock(&self.state).camera.tilt
    }

    fn set_tilt(&self, tilt: f64) {
        lock(&self.state).camera.tilt = tilt;
    }

    fn fit_bounds(&self, bounds: &LatLngBounds) {
        let mut state = lock(&self.state);
        state.camera.center = bounds.center();
        state.camera.zoom = bounds.fitting_zoom();
        state.fitted.push(bounds.clone());
    }
}

/// A marker that is currently on a [`MemoryMarkers`] map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    pub id: u64,
    pub options: MarkerOptions,
}

#[derive(Debug, Default)]
struct MarkerRegistry {
    next_id: u64,
    live: Vec<MarkerRecord>,
    removed: usize,
}

/// Marker layer that records which markers are on the map.
#[derive(Debug, Default)]
pub struct MemoryMarkers {
    registry: Arc<Mutex<MarkerRegistry>>,
}

impl MemoryMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> Vec<MarkerRecord> {
        lock(&self.registry).live.clone()
    }

    /// How many markers have been taken off the map so far
    pub fn removed_count(&self) -> usize {
        lock(&self.registry).removed
    }
}

impl MarkerProvider for MemoryMarkers {
    fn place(&self, options: MarkerOptions) -> Box<dyn MarkerHandle> {
        let mut registry = lock(&self.registry);
        registry.next_id += 1;
        let id = registry.next_id;
        let position = options.position;
        registry.live.push(MarkerRecord { id, options });
        Box::new(MemoryMarker {
            id,
            position,
            registry: self.registry.clone(),
            removed: false,
        })
    }
}

struct MemoryMarker {
    id: u64,
    position: LatLng,
    registry: Arc<Mutex<MarkerRegistry>>,
    removed: bool,
}

impl MarkerHandle for MemoryMarker {
    fn position(&self) -> LatLng {
        self.position
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        let mut registry = lock(&self.registry);
        registry.live.retain(|record| record.id != self.id);
        registry.removed += 1;
    }
}

/// Traffic overlay reduced to an attached flag.
#[derive(Debug, Default)]
pub struct MemoryTraffic {
    attached: AtomicBool,
}

impl MemoryTraffic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

impl TrafficOverlay for MemoryTraffic {
    fn set_attached(&self, attached: bool) {
        self.attached.store(attached, Ordering::SeqCst);
    }
}

/// Place search over a fixed catalogue.
///
/// Autocomplete matches the query case-insensitively against both labels.
#[derive(Debug, Default)]
pub struct StaticPlaces {
    candidates: Vec<PlaceCandidate>,
    details: HashMap<String, PlaceDetail>,
    queries: Mutex<Vec<String>>,
    autocomplete_status: Mutex<Option<ProviderStatus>>,
    details_status: Mutex<Option<ProviderStatus>>,
}

impl StaticPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, candidate: PlaceCandidate, detail: PlaceDetail) -> Self {
        self.details.insert(candidate.id.clone(), detail);
        self.candidates.push(candidate);
        self
    }

    /// Queries that reached the provider, oldest first
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }

    /// Makes every following autocomplete call fail with `status` (or succeed again with `None`).
    pub fn set_autocomplete_status(&self, status: Option<ProviderStatus>) {
        *lock(&self.autocomplete_status) = status;
    }

    /// Makes every following details call fail with `status` (or succeed again with `None`).
    pub fn set_details_status(&self, status: Option<ProviderStatus>) {
        *lock(&self.details_status) = status;
    }
}

#[async_trait]
impl AutocompleteProvider for StaticPlaces {
    async fn predictions(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        lock(&self.queries).push(query.to_string());
        if let Some(status) = *lock(&self.autocomplete_status) {
            return Err(MapError::Provider(status));
        }
        let needle = query.to_lowercase();
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| {
                candidate.primary_label.to_lowercase().contains(&needle)
                    || candidate.secondary_label.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PlaceDetailsProvider for StaticPlaces {
    async fn details(&self, place_id: &str) -> Result<PlaceDetail> {
        if let Some(status) = *lock(&self.details_status) {
            return Err(MapError::Provider(status));
        }
        self.details
            .get(place_id)
            .cloned()
            .ok_or(MapError::Provider(ProviderStatus::NotFound))
    }
}

#[derive(Debug, Clone, Copy)]
enum FixedAnswer {
    At(LatLng),
    Fails(GeolocationError),
    Unsupported,
}

/// Geolocator with a predetermined answer.
#[derive(Debug)]
pub struct FixedGeolocator {
    answer: FixedAnswer,
    requests: AtomicUsize,
}

impl FixedGeolocator {
    fn with_answer(answer: FixedAnswer) -> Self {
        Self {
            answer,
            requests: AtomicUsize::new(0),
        }
    }

    /// Always reports `coords`.
    pub fn at(coords: LatLng) -> Self {
        Self::with_answer(FixedAnswer::At(coords))
    }

    /// Always fails with `error`.
    pub fn failing(error: GeolocationError) -> Self {
        Self::with_answer(FixedAnswer::Fails(error))
    }

    /// Reports that the runtime has no geolocation at all.
    pub fn unsupported() -> Self {
        Self::with_answer(FixedAnswer::Unsupported)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    fn is_supported(&self) -> bool {
        !matches!(self.answer, FixedAnswer::Unsupported)
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Position> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            FixedAnswer::At(coords) => Ok(Position::new(coords)),
            FixedAnswer::Fails(error) => Err(MapError::Geolocation(error)),
            FixedAnswer::Unsupported => Err(MapError::Geolocation(GeolocationError::Unsupported)),
        }
    }
}

type FailureFactory = Box<dyn Fn() -> MapError + Send + Sync>;

/// Weather source returning a configurable reading.
pub struct StaticWeather {
    reading: Mutex<CurrentWeather>,
    failure: Mutex<Option<FailureFactory>>,
    requests: Mutex<Vec<LatLng>>,
}

impl StaticWeather {
    pub fn new(reading: CurrentWeather) -> Self {
        Self {
            reading: Mutex::new(reading),
            failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reading(&self, reading: CurrentWeather) {
        *lock(&self.reading) = reading;
    }

    /// Makes every following request fail with the error built by `failure`.
    pub fn fail_with(&self, failure: impl Fn() -> MapError + Send + Sync + 'static) {
        *lock(&self.failure) = Some(Box::new(failure));
    }

    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// Coordinates requested so far, oldest first
    pub fn requests(&self) -> Vec<LatLng> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl WeatherSource for StaticWeather {
    async fn current(&self, at: LatLng) -> Result<CurrentWeather> {
        lock(&self.requests).push(at);
        if let Some(failure) = lock(&self.failure).as_ref() {
            return Err(failure());
        }
        Ok(*lock(&self.reading))
    }
}
