use crate::core::{color::Color, geo::LatLng};
use serde::{Deserialize, Serialize};

/// Visual content of a map pin: accent color plus an optional pulsing highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerVisual {
    pub color: Color,
    pub pulse: bool,
}

impl MarkerVisual {
    /// Classes of the marker container element
    pub fn container_class(&self) -> &'static str {
        if self.pulse {
            "marker-container marker-pulse"
        } else {
            "marker-container"
        }
    }

    /// Classes of the pin glyph inside the container
    pub fn icon_class(&self) -> &'static str {
        "fa-solid fa-location-dot marker-icon marker-pop"
    }
}

/// Builds the marker visual. Pure, no side effects.
pub fn build_marker(color: Color, pulse: bool) -> MarkerVisual {
    MarkerVisual { color, pulse }
}

/// Everything a marker provider needs to put a pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub visual: MarkerVisual,
    pub title: Option<String>,
}

impl MarkerOptions {
    pub fn new(position: LatLng, visual: MarkerVisual) -> Self {
        Self {
            position,
            visual,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Pulsing pin marking a searched destination
    pub fn destination(position: LatLng, name: impl Into<String>) -> Self {
        Self::new(position, build_marker(Color::DESTINATION, true)).with_title(name)
    }

    /// Pulsing pin marking the device's own position
    pub fn current_location(position: LatLng) -> Self {
        Self::new(position, build_marker(Color::CURRENT_LOCATION, true))
    }
}
