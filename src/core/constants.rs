//! Widget-wide defaults in a single place.
//! Everything here is also reachable through `WidgetConfig`, these are only the starting values.

use std::time::Duration;

/// Initial map center (Muriaé, Minas Gerais).
pub const DEFAULT_CENTER: (f64, f64) = (-21.1366, -42.3683);

/// Embedded vector map style identifier.
pub const DEFAULT_MAP_ID: &str = "DEMO_MAP_ID";

/// Street-level zoom used by the continuous variant at startup.
pub const STREET_ZOOM: f64 = 17.0;

/// Globe-level zoom used by the intro variant at startup.
pub const GLOBE_ZOOM: f64 = 3.0;

/// Startup tilt of the continuous variant.
pub const STREET_TILT: f64 = 55.0;

/// Zoom applied when a place without viewport bounds is selected.
pub const PLACE_ZOOM: f64 = 17.0;

/// Zoom and tilt applied after a successful geolocation fix.
pub const LOCATE_ZOOM: f64 = 19.0;
pub const LOCATE_TILT: f64 = 60.0;

/// Tilt change per button press, in degrees.
pub const TILT_STEP: f64 = 20.0;

/// Largest tilt the vector renderer accepts.
pub const MAX_TILT: f64 = 67.5;

/// Heading change per rotate press, in degrees.
pub const HEADING_STEP: f64 = 45.0;

/// Queries shorter than this never reach the autocomplete provider.
pub const MIN_QUERY_CHARS: usize = 3;

/// Loader overlay stays opaque this long after bootstrap.
pub const LOADER_DELAY: Duration = Duration::from_millis(1500);

/// Length of the loader fade-out transition.
pub const LOADER_FADE: Duration = Duration::from_millis(800);

/// Toast banners disappear this long after the latest notification.
pub const TOAST_DURATION: Duration = Duration::from_millis(3500);

/// Geolocation request timeout.
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Open-Meteo forecast API root.
pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";

/// Nominatim search API root.
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// User-Agent sent with every outgoing HTTP request.
pub const USER_AGENT: &str = concat!("geoscout/", env!("CARGO_PKG_VERSION"));
