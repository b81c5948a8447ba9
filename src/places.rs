//! Place search data carried between the autocomplete, details and navigation steps.

use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// One autocomplete suggestion, alive for a single results list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub id: String,
    pub primary_label: String,
    /// May be empty when the provider has nothing to add.
    pub secondary_label: String,
}

impl PlaceCandidate {
    pub fn new(
        id: impl Into<String>,
        primary_label: impl Into<String>,
        secondary_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            primary_label: primary_label.into(),
            secondary_label: secondary_label.into(),
        }
    }
}

/// Fully resolved place, consumed right away by navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub name: String,
    pub location: LatLng,
    pub viewport: Option<LatLngBounds>,
}

impl PlaceDetail {
    pub fn new(name: impl Into<String>, location: LatLng) -> Self {
        Self {
            name: name.into(),
            location,
            viewport: None,
        }
    }

    pub fn with_viewport(mut self, viewport: LatLngBounds) -> Self {
        self.viewport = Some(viewport);
        self
    }
}

/// Non-OK answers a places provider can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderStatus {
    ZeroResults,
    NotFound,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderStatus::ZeroResults => "ZERO_RESULTS",
            ProviderStatus::NotFound => "NOT_FOUND",
            ProviderStatus::InvalidRequest => "INVALID_REQUEST",
            ProviderStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ProviderStatus::RequestDenied => "REQUEST_DENIED",
            ProviderStatus::UnknownError => "UNKNOWN_ERROR",
        };
        f.write_str(name)
    }
}
