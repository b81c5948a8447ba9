//! Widget assembly and event routing.
//!
//! [`MapBootstrapper`] validates the configuration, creates the map and wires
//! the controllers around one [`MapSession`]. The resulting [`MapWidget`] is
//! the only object a host talks to: it forwards input through
//! [`MapWidget::dispatch`], calls [`MapWidget::tick`] once per frame, and draws
//! whatever [`MapWidget::snapshot`] returns.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    animation::sequence::IntroSequencer,
    core::{
        camera::CameraState,
        clock::{Clock, SystemClock},
        config::WidgetConfig,
        geo::LatLng,
        session::MapSession,
    },
    input::events::WidgetEvent,
    navigation::Navigator,
    prelude::{lock, Arc, Duration, Mutex},
    traits::{
        AutocompleteProvider, Geolocator, MapProvider, MarkerProvider, PlaceDetailsProvider,
        TrafficOverlay, WeatherSource,
    },
    ui::{
        controls::{CameraControls, LocateIcon},
        search::{SearchController, SearchView},
        toast::{ToastView, Toaster},
    },
    weather::{WeatherDisplay, WeatherReporter},
    Result,
};
use serde::{Deserialize, Serialize};

/// The external collaborators a widget is built from.
#[derive(Clone)]
pub struct Providers {
    pub map: Arc<dyn MapProvider>,
    pub traffic: Arc<dyn TrafficOverlay>,
    pub markers: Arc<dyn MarkerProvider>,
    pub autocomplete: Arc<dyn AutocompleteProvider>,
    pub details: Arc<dyn PlaceDetailsProvider>,
    pub geolocator: Arc<dyn Geolocator>,
    pub weather: Arc<dyn WeatherSource>,
}

/// Loading overlay shown while the map comes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoaderState {
    Visible,
    /// Opacity transition towards zero is running
    FadingOut,
    Removed,
}

impl LoaderState {
    pub fn at(elapsed: Duration, delay: Duration, fade: Duration) -> Self {
        if elapsed < delay {
            LoaderState::Visible
        } else if elapsed < delay + fade {
            LoaderState::FadingOut
        } else {
            LoaderState::Removed
        }
    }
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub camera: CameraState,
    pub loader: LoaderState,
    pub weather: WeatherDisplay,
    pub toast: Option<ToastView>,
    pub search: SearchView,
    pub traffic_on: bool,
    pub locate_icon: LocateIcon,
    pub marker: Option<LatLng>,
    pub intro_running: bool,
}

pub struct MapBootstrapper {
    config: WidgetConfig,
    providers: Providers,
    clock: Arc<dyn Clock>,
}

impl MapBootstrapper {
    pub fn new(config: WidgetConfig, providers: Providers) -> Self {
        Self {
            config,
            providers,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Replaces the wall clock, e.g. with a `ManualClock` in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn bootstrap(self) -> Result<MapWidget> {
        let Self {
            config,
            providers,
            clock,
        } = self;

        config.validate()?;
        providers.map.create(&config.map)?;
        let started_at = clock.elapsed();
        log::info!(
            "map created at {} (zoom {}, continuous weather: {}, intro: {})",
            config.map.center,
            config.map.zoom,
            config.mode.continuous_weather,
            config.mode.intro_animation
        );

        let session = Arc::new(MapSession::new(providers.map, providers.markers));
        let weather = Arc::new(
            WeatherReporter::new(providers.weather)
                .with_discard_stale(config.discard_stale_responses),
        );
        let toaster = Arc::new(Toaster::with_duration(
            clock.clone(),
            config.timing.toast_duration,
        ));
        let search = SearchController::new(providers.autocomplete)
            .with_min_chars(config.min_query_chars)
            .with_discard_stale(config.discard_stale_responses);
        let navigator = Navigator::new(
            session.clone(),
            providers.details,
            weather.clone(),
            toaster.clone(),
            &config,
        );
        let controls = CameraControls::new(
            session.clone(),
            providers.traffic,
            providers.geolocator,
            weather.clone(),
            toaster.clone(),
            &config,
        );
        let intro = config
            .mode
            .intro_animation
            .then(|| Mutex::new(IntroSequencer::new(config.intro.clone(), started_at)));

        Ok(MapWidget {
            config,
            clock,
            started_at,
            session,
            weather,
            toaster,
            search,
            navigator,
            controls,
            intro,
            intro_reported: AtomicBool::new(false),
        })
    }
}

pub struct MapWidget {
    config: WidgetConfig,
    clock: Arc<dyn Clock>,
    started_at: Duration,
    session: Arc<MapSession>,
    weather: Arc<WeatherReporter>,
    toaster: Arc<Toaster>,
    search: SearchController,
    navigator: Navigator,
    controls: CameraControls,
    intro: Option<Mutex<IntroSequencer>>,
    intro_reported: AtomicBool,
}

impl MapWidget {
    /// Startup work that needs the network: the first weather fetch of the
    /// continuous mode.
    pub async fn start(&self) {
        if self.config.mode.continuous_weather {
            self.weather.refresh(self.config.map.center).await;
        }
    }

    /// Routes one host event to the controller that owns it.
    pub async fn dispatch(&self, event: WidgetEvent) {
        match event {
            WidgetEvent::CameraIdle => {
                if self.config.mode.continuous_weather {
                    self.refresh_center_weather().await;
                }
            }
            WidgetEvent::SearchInput(query) => {
                self.search.on_input(&query).await;
            }
            WidgetEvent::SearchFocus(focused) => self.search.set_focused(focused),
            WidgetEvent::SelectResult(index) => {
                if let Some(candidate) = self.search.select(index) {
                    if let Err(e) = self.navigator.go_to_place(&candidate.id).await {
                        log::debug!("place '{}' not resolved: {}", candidate.id, e);
                    }
                }
            }
            WidgetEvent::DocumentClick { inside_search } => {
                if !inside_search {
                    self.search.dismiss();
                }
            }
            WidgetEvent::ToggleTraffic => {
                self.controls.toggle_traffic();
            }
            WidgetEvent::Locate => {
                self.controls.locate().await;
            }
            WidgetEvent::TiltUp => {
                self.controls.tilt_up();
            }
            WidgetEvent::TiltDown => {
                self.controls.tilt_down();
            }
            WidgetEvent::Rotate => {
                self.controls.rotate();
            }
            WidgetEvent::IntroCompleted => self.refresh_center_weather().await,
        }
    }

    async fn refresh_center_weather(&self) {
        let center = self.session.map().center();
        self.weather.refresh(center).await;
    }

    /// Advances timed effects. Returns `IntroCompleted` exactly once, on the
    /// tick where the intro ran its last step; the host should dispatch it.
    pub fn tick(&self) -> Option<WidgetEvent> {
        let intro = self.intro.as_ref()?;
        let finished = {
            let mut sequencer = lock(intro);
            sequencer.advance(self.clock.elapsed(), self.session.map());
            sequencer.is_finished()
        };
        if finished && !self.intro_reported.swap(true, Ordering::SeqCst) {
            log::info!("intro finished");
            return Some(WidgetEvent::IntroCompleted);
        }
        None
    }

    /// Time left until the next intro step is due, while the intro runs.
    pub fn next_intro_step_in(&self) -> Option<Duration> {
        let intro = self.intro.as_ref()?;
        let deadline = lock(intro).next_deadline()?;
        Some(deadline.saturating_sub(self.clock.elapsed()))
    }

    pub fn intro_running(&self) -> bool {
        self.intro
            .as_ref()
            .map(|intro| !lock(intro).is_finished())
            .unwrap_or(false)
    }

    pub fn loader_state(&self) -> LoaderState {
        let elapsed = self.clock.elapsed().saturating_sub(self.started_at);
        LoaderState::at(
            elapsed,
            self.config.timing.loader_delay,
            self.config.timing.loader_fade,
        )
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            camera: self.session.camera(),
            loader: self.loader_state(),
            weather: self.weather.display(),
            toast: self.toaster.current(),
            search: self.search.view(),
            traffic_on: self.controls.traffic_on(),
            locate_icon: self.controls.locate_icon(),
            marker: self.session.marker_position(),
            intro_running: self.intro_running(),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn session(&self) -> &MapSession {
        &self.session
    }

    pub fn weather(&self) -> &WeatherReporter {
        &self.weather
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn controls(&self) -> &CameraControls {
        &self.controls
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }
}
