use crate::{
    core::{clock::Clock, color::Color, constants::TOAST_DURATION},
    prelude::{lock, Arc, Duration, Mutex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// Left accent of the banner: green for success, red for everything else.
    pub fn accent(&self) -> Color {
        match self {
            Severity::Success => Color::SUCCESS,
            _ => Color::ERROR,
        }
    }
}

/// Banner as the host should draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastView {
    pub message: String,
    pub severity: Severity,
    pub accent: Color,
}

#[derive(Debug)]
struct ActiveToast {
    view: ToastView,
    hide_at: Duration,
}

/// Single-slot toast banner.
///
/// A new notification replaces the current one and restarts the dismiss
/// deadline. Nothing is queued.
pub struct Toaster {
    clock: Arc<dyn Clock>,
    duration: Duration,
    slot: Mutex<Option<ActiveToast>>,
}

impl Toaster {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_duration(clock, TOAST_DURATION)
    }

    pub fn with_duration(clock: Arc<dyn Clock>, duration: Duration) -> Self {
        Self {
            clock,
            duration,
            slot: Mutex::new(None),
        }
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        log::debug!("toast ({:?}): {}", severity, message);
        let hide_at = self.clock.elapsed() + self.duration;
        *lock(&self.slot) = Some(ActiveToast {
            view: ToastView {
                message,
                severity,
                accent: severity.accent(),
            },
            hide_at,
        });
    }

    /// The banner to show right now, if any.
    pub fn current(&self) -> Option<ToastView> {
        let now = self.clock.elapsed();
        let mut slot = lock(&self.slot);
        match slot.as_ref() {
            Some(active) if now < active.hide_at => Some(active.view.clone()),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn toaster() -> (Arc<ManualClock>, Toaster) {
        let clock = Arc::new(ManualClock::new());
        let toaster = Toaster::new(clock.clone());
        (clock, toaster)
    }

    #[test]
    fn toast_hides_after_duration() {
        let (clock, toaster) = toaster();
        toaster.notify("Location found", Severity::Success);

        clock.advance(Duration::from_millis(3499));
        let view = toaster.current().unwrap();
        assert_eq!(view.message, "Location found");
        assert_eq!(view.accent.to_hex(), "#22c55e");

        clock.advance(Duration::from_millis(1));
        assert_eq!(toaster.current(), None);
    }

    #[test]
    fn newer_toast_replaces_message_and_restarts_timer() {
        let (clock, toaster) = toaster();
        toaster.notify("first", Severity::Success);
        clock.advance(Duration::from_secs(3));
        toaster.notify("second", Severity::Error);

        clock.advance(Duration::from_secs(2));
        let view = toaster.current().unwrap();
        assert_eq!(view.message, "second");
        assert_eq!(view.severity, Severity::Error);
        assert_eq!(view.accent.to_hex(), "#ef4444");

        clock.advance(Duration::from_millis(1500));
        assert!(toaster.current().is_none());
    }

    #[test]
    fn non_success_severities_use_error_accent() {
        assert_eq!(Severity::Info.accent(), Color::ERROR);
        assert_eq!(Severity::Error.accent(), Color::ERROR);
        assert_eq!(Severity::Success.accent(), Color::SUCCESS);
    }
}
