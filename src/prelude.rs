//! Prelude module for common geoscout types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use geoscout::prelude::*;`

pub use crate::core::{
    bootstrap::{LoaderState, MapBootstrapper, MapWidget, Providers, WidgetSnapshot},
    camera::CameraState,
    clock::{Clock, ManualClock, SystemClock},
    color::Color,
    config::{BootstrapMode, MapInit, WidgetConfig, WidgetProfile},
    geo::{LatLng, LatLngBounds},
    session::MapSession,
};

pub use crate::input::events::WidgetEvent;

pub use crate::layers::marker::{build_marker, MarkerOptions, MarkerVisual};

pub use crate::places::{PlaceCandidate, PlaceDetail, ProviderStatus};

pub use crate::geolocation::{GeolocationError, Position, PositionOptions};

pub use crate::weather::{
    CurrentWeather, WeatherCondition, WeatherDisplay, WeatherIcon, WeatherReporter,
    WeatherSnapshot,
};

pub use crate::ui::{
    controls::{CameraControls, LocateIcon},
    search::{SearchController, SearchView},
    toast::{Severity, Toaster, ToastView},
};

pub use crate::navigation::Navigator;

pub use crate::traits::{
    AutocompleteProvider, Geolocator, MapProvider, MarkerHandle, MarkerProvider,
    PlaceDetailsProvider, TrafficOverlay, WeatherSource,
};

pub use crate::runtime::{spawn, AsyncHandle, AsyncSpawner};

pub use crate::{Error as MapError, Result};

pub use std::{
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;

/// Locks a mutex, recovering the data if a previous holder panicked.
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
