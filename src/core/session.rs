use crate::{
    core::{camera::CameraState, geo::LatLng},
    layers::marker::MarkerOptions,
    prelude::{lock, Arc, Mutex},
    traits::{MapProvider, MarkerHandle, MarkerProvider},
};

/// The one map session of a widget: the map handle plus the active marker.
///
/// At most one marker exists at a time. Placing a new one removes the previous
/// one first, and dropping the session clears the map.
pub struct MapSession {
    map: Arc<dyn MapProvider>,
    markers: Arc<dyn MarkerProvider>,
    active_marker: Mutex<Option<Box<dyn MarkerHandle>>>,
}

impl MapSession {
    pub fn new(map: Arc<dyn MapProvider>, markers: Arc<dyn MarkerProvider>) -> Self {
        Self {
            map,
            markers,
            active_marker: Mutex::new(None),
        }
    }

    pub fn map(&self) -> &dyn MapProvider {
        self.map.as_ref()
    }

    pub fn camera(&self) -> CameraState {
        CameraState::read(self.map.as_ref())
    }

    /// Removes the active marker, if there is one.
    pub fn clear_marker(&self) {
        if let Some(mut marker) = lock(&self.active_marker).take() {
            marker.remove();
        }
    }

    /// Replaces the active marker with a new one built from `options`.
    pub fn replace_marker(&self, options: MarkerOptions) {
        let mut active = lock(&self.active_marker);
        if let Some(mut previous) = active.take() {
            previous.remove();
        }
        *active = Some(self.markers.place(options));
    }

    /// Position of the active marker
    pub fn marker_position(&self) -> Option<LatLng> {
        lock(&self.active_marker)
            .as_ref()
            .map(|marker| marker.position())
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.clear_marker();
    }
}
