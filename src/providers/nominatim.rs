//! Place search backed by the OpenStreetMap Nominatim API.
//!
//! Nominatim has no separate details call keyed by an opaque token, so every
//! search answer is remembered in an LRU cache and `details` is served from
//! there. An id that fell out of the cache resolves to `NOT_FOUND`.

use async_trait::async_trait;
use lru::LruCache;
use serde::Deserialize;
use std::num::NonZeroUsize;

use super::open_meteo::HTTP_CLIENT;
use crate::{
    core::{
        constants::NOMINATIM_BASE_URL,
        geo::{LatLng, LatLngBounds},
    },
    places::{PlaceCandidate, PlaceDetail, ProviderStatus},
    prelude::{lock, Mutex},
    traits::{AutocompleteProvider, PlaceDetailsProvider},
    MapError, Result,
};

const DEFAULT_LIMIT: usize = 5;
const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Deserialize)]
struct SearchHit {
    place_id: u64,
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
    /// `[south, north, west, east]` as strings
    #[serde(default)]
    boundingbox: Option<Vec<String>>,
}

fn parse_coord(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| MapError::ParseError(format!("bad coordinate '{}': {}", value, e)))
}

impl SearchHit {
    fn labels(&self) -> (String, String) {
        let mut parts = self.display_name.splitn(2, ',');
        let first = parts.next().unwrap_or_default().trim().to_string();
        let rest = parts.next().unwrap_or_default().trim().to_string();
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() && name != first => {
                (name.to_string(), self.display_name.clone())
            }
            _ => (first, rest),
        }
    }

    fn viewport(&self) -> Result<Option<LatLngBounds>> {
        let Some(bbox) = &self.boundingbox else {
            return Ok(None);
        };
        if bbox.len() != 4 {
            return Ok(None);
        }
        let south = parse_coord(&bbox[0])?;
        let north = parse_coord(&bbox[1])?;
        let west = parse_coord(&bbox[2])?;
        let east = parse_coord(&bbox[3])?;
        Ok(Some(LatLngBounds::from_coords(south, west, north, east)))
    }

    fn into_place(self) -> Result<(PlaceCandidate, PlaceDetail)> {
        let location = LatLng::new(parse_coord(&self.lat)?, parse_coord(&self.lon)?);
        let (primary, secondary) = self.labels();
        let mut detail = PlaceDetail::new(primary.clone(), location);
        if let Some(viewport) = self.viewport()? {
            detail = detail.with_viewport(viewport);
        }
        let candidate = PlaceCandidate::new(self.place_id.to_string(), primary, secondary);
        Ok((candidate, detail))
    }
}

/// Parses a `format=json` search answer. Hits with unusable coordinates are
/// skipped.
pub fn parse_search(body: &str) -> Result<Vec<(PlaceCandidate, PlaceDetail)>> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;
    let places = hits
        .into_iter()
        .filter_map(|hit| {
            let id = hit.place_id;
            match hit.into_place() {
                Ok(place) => Some(place),
                Err(e) => {
                    log::debug!("skipping nominatim hit {}: {}", id, e);
                    None
                }
            }
        })
        .collect();
    Ok(places)
}

pub struct NominatimPlaces {
    base_url: String,
    resolved: Mutex<LruCache<String, PlaceDetail>>,
}

impl NominatimPlaces {
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resolved: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Remembers the detail for each candidate and returns the candidates.
    fn remember(&self, places: Vec<(PlaceCandidate, PlaceDetail)>) -> Vec<PlaceCandidate> {
        let mut cache = lock(&self.resolved);
        places
            .into_iter()
            .map(|(candidate, detail)| {
                cache.put(candidate.id.clone(), detail);
                candidate
            })
            .collect()
    }

}

impl Default for NominatimPlaces {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutocompleteProvider for NominatimPlaces {
    async fn predictions(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let body = HTTP_CLIENT
            .get(self.search_url())
            .query(&[
                ("q", query.to_string()),
                ("format", "json".to_string()),
                ("limit", DEFAULT_LIMIT.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let places = parse_search(&body)?;
        if places.is_empty() {
            return Err(MapError::Provider(ProviderStatus::ZeroResults));
        }
        Ok(self.remember(places))
    }
}

#[async_trait]
impl PlaceDetailsProvider for NominatimPlaces {
    async fn details(&self, place_id: &str) -> Result<PlaceDetail> {
        lock(&self.resolved)
            .get(place_id)
            .cloned()
            .ok_or(MapError::Provider(ProviderStatus::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"[
        {
            "place_id": 297011,
            "lat": "-21.1306",
            "lon": "-42.3664",
            "display_name": "Muriaé, Minas Gerais, Brasil",
            "name": "Muriaé",
            "boundingbox": ["-21.2", "-21.0", "-42.5", "-42.2"]
        },
        {
            "place_id": 88,
            "lat": "-21.1290",
            "lon": "-42.3700",
            "display_name": "Rodoviária, Centro, Muriaé",
            "name": ""
        },
        {
            "place_id": 3,
            "lat": "north",
            "lon": "-42.0",
            "display_name": "Broken"
        }
    ]"#;

    #[test]
    fn search_answer_splits_labels_and_reads_bounds() {
        let places = parse_search(BODY).unwrap();
        assert_eq!(places.len(), 2);

        let (city, detail) = &places[0];
        assert_eq!(city.id, "297011");
        assert_eq!(city.primary_label, "Muriaé");
        assert_eq!(city.secondary_label, "Minas Gerais, Brasil");
        assert_eq!(detail.location, LatLng::new(-21.1306, -42.3664));
        assert_eq!(
            detail.viewport,
            Some(LatLngBounds::from_coords(-21.2, -42.5, -21.0, -42.2))
        );

        let (station, detail) = &places[1];
        assert_eq!(station.primary_label, "Rodoviária");
        assert_eq!(station.secondary_label, "Centro, Muriaé");
        assert!(detail.viewport.is_none());
    }

    #[test]
    fn non_array_body_is_rejected() {
        assert!(matches!(
            parse_search(r#"{"error":"Unable to geocode"}"#),
            Err(MapError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn details_come_from_earlier_searches() {
        let places = NominatimPlaces::with_base_url("http://localhost:0/");
        assert_eq!(places.search_url(), "http://localhost:0/search");

        let candidates = places.remember(parse_search(BODY).unwrap());
        assert_eq!(candidates.len(), 2);
        assert_eq!(lock(&places.resolved).len(), 2);

        let detail = places.details("88").await.unwrap();
        assert_eq!(detail.name, "Rodoviária");
        assert!(matches!(
            places.details("1").await,
            Err(MapError::Provider(ProviderStatus::NotFound))
        ));
    }
}
