//! Scripted camera intro.
//!
//! An [`IntroSequence`] is a finite list of named camera steps, each gated by
//! a delay measured from the previous step. [`IntroSequencer`] walks the list
//! as time passes; it holds no timers, the caller feeds it the current time.

use crate::{
    core::{
        constants::{DEFAULT_CENTER, STREET_TILT, STREET_ZOOM},
        geo::LatLng,
    },
    geolocation::millis,
    traits::MapProvider,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Camera properties a step changes; `None` leaves the property alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraChange {
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub tilt: Option<f64>,
    pub heading: Option<f64>,
}

impl CameraChange {
    pub fn apply(&self, map: &dyn MapProvider) {
        if let Some(center) = self.center {
            map.pan_to(center);
        }
        if let Some(zoom) = self.zoom {
            map.set_zoom(zoom);
        }
        if let Some(tilt) = self.tilt {
            map.set_tilt(tilt);
        }
        if let Some(heading) = self.heading {
            map.set_heading(heading);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraStep {
    pub name: String,
    /// Wait after the previous step (or after the sequence start)
    #[serde(with = "millis")]
    pub delay: Duration,
    pub change: CameraChange,
}

impl CameraStep {
    pub fn new(name: impl Into<String>, delay: Duration, change: CameraChange) -> Self {
        Self {
            name: name.into(),
            delay,
            change,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroSequence {
    pub steps: Vec<CameraStep>,
}

impl IntroSequence {
    pub fn new(steps: Vec<CameraStep>) -> Self {
        Self { steps }
    }

    /// Pull back to the whole globe, swing over `target`, then descend onto it
    /// with a tilted and rotated street-level view.
    pub fn towards(target: LatLng) -> Self {
        Self::new(vec![
            CameraStep::new(
                "zoom-out",
                Duration::from_millis(2000),
                CameraChange {
                    zoom: Some(2.0),
                    ..CameraChange::default()
                },
            ),
            CameraStep::new(
                "pan",
                Duration::from_millis(1500),
                CameraChange {
                    center: Some(target),
                    ..CameraChange::default()
                },
            ),
            CameraStep::new(
                "descend",
                Duration::from_millis(2000),
                CameraChange {
                    zoom: Some(STREET_ZOOM),
                    tilt: Some(STREET_TILT),
                    heading: Some(45.0),
                    ..CameraChange::default()
                },
            ),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for IntroSequence {
    fn default() -> Self {
        Self::towards(LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1))
    }
}

/// Plays an [`IntroSequence`] against a map.
#[derive(Debug, Clone)]
pub struct IntroSequencer {
    sequence: IntroSequence,
    next: usize,
    /// Scheduled time of the last fired step (or the start)
    anchor: Duration,
}

impl IntroSequencer {
    pub fn new(sequence: IntroSequence, started_at: Duration) -> Self {
        Self {
            sequence,
            next: 0,
            anchor: started_at,
        }
    }

    /// Fires every step that is due at `now`, in order, and returns their names.
    ///
    /// Steps are anchored to their scheduled time rather than to `now`, so a
    /// late tick does not push the remaining steps back.
    pub fn advance(&mut self, now: Duration, map: &dyn MapProvider) -> Vec<String> {
        let mut fired = Vec::new();
        while let Some(step) = self.sequence.steps.get(self.next) {
            let due = self.anchor + step.delay;
            if now < due {
                break;
            }
            log::debug!("intro step '{}' fired at {:?}", step.name, now);
            step.change.apply(map);
            fired.push(step.name.clone());
            self.anchor = due;
            self.next += 1;
        }
        fired
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.sequence.steps.len()
    }

    /// When the next step becomes due, if any is left.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.sequence
            .steps
            .get(self.next)
            .map(|step| self.anchor + step.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::memory::MemoryMap;
    use crate::core::config::MapInit;

    fn globe_map() -> MemoryMap {
        let map = MemoryMap::new();
        let init = MapInit {
            center: LatLng::new(0.0, -42.0),
            zoom: 3.0,
            tilt: 0.0,
            ..MapInit::default()
        };
        crate::traits::MapProvider::create(&map, &init).unwrap();
        map
    }

    #[test]
    fn steps_fire_in_order_as_time_passes() {
        let map = globe_map();
        let target = LatLng::new(-21.1366, -42.3683);
        let mut sequencer = IntroSequencer::new(IntroSequence::towards(target), Duration::ZERO);

        assert!(sequencer.advance(Duration::from_millis(1999), &map).is_empty());
        assert_eq!(map.camera().zoom, 3.0);

        assert_eq!(sequencer.advance(Duration::from_millis(2000), &map), vec!["zoom-out"]);
        assert_eq!(map.camera().zoom, 2.0);
        assert_eq!(sequencer.next_deadline(), Some(Duration::from_millis(3500)));

        assert_eq!(sequencer.advance(Duration::from_millis(3500), &map), vec!["pan"]);
        assert_eq!(map.camera().center, target);

        assert_eq!(sequencer.advance(Duration::from_millis(5500), &map), vec!["descend"]);
        let camera = map.camera();
        assert_eq!(camera.zoom, 17.0);
        assert_eq!(camera.tilt, 55.0);
        assert_eq!(camera.heading, 45.0);
        assert!(sequencer.is_finished());
        assert_eq!(sequencer.next_deadline(), None);
    }

    #[test]
    fn late_tick_fires_all_overdue_steps() {
        let map = globe_map();
        let mut sequencer = IntroSequencer::new(IntroSequence::default(), Duration::from_secs(1));

        let fired = sequencer.advance(Duration::from_millis(6500), &map);
        assert_eq!(fired, vec!["zoom-out", "pan", "descend"]);
        assert!(sequencer.is_finished());
        assert!(sequencer.advance(Duration::from_secs(60), &map).is_empty());
    }

    #[test]
    fn empty_sequence_is_finished_immediately() {
        let sequencer = IntroSequencer::new(IntroSequence::new(Vec::new()), Duration::ZERO);
        assert!(sequencer.is_finished());
    }

    #[test]
    fn sequence_round_trips_through_json() {
        let json = serde_json::to_string(&IntroSequence::default()).unwrap();
        assert!(json.contains("\"delay\":2000"));
        let back: IntroSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IntroSequence::default());
    }
}
