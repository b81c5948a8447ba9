pub mod memory;
pub mod nominatim;
pub mod open_meteo;

pub use memory::{
    FixedGeolocator, MemoryMap, MemoryMarkers, MemoryTraffic, StaticPlaces, StaticWeather,
};
pub use nominatim::NominatimPlaces;
pub use open_meteo::OpenMeteoClient;
