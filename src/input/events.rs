use serde::{Deserialize, Serialize};

/// User and map events a host forwards to the widget.
///
/// Hosts translate their own input (DOM listeners, egui responses) into these
/// and hand them to `MapWidget::dispatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// Camera motion settled after a pan or zoom
    CameraIdle,
    /// The search input text changed
    SearchInput(String),
    /// The search input gained (`true`) or lost focus
    SearchFocus(bool),
    /// A results row was clicked
    SelectResult(usize),
    /// A click anywhere on the page; `inside_search` is true within the search widget
    DocumentClick { inside_search: bool },
    ToggleTraffic,
    Locate,
    TiltUp,
    TiltDown,
    Rotate,
    /// The scripted intro ran its last step
    IntroCompleted,
}

impl WidgetEvent {
    /// Whether handling the event may wait on a provider
    pub fn is_async(&self) -> bool {
        matches!(
            self,
            WidgetEvent::CameraIdle
                | WidgetEvent::SearchInput(_)
                | WidgetEvent::SelectResult(_)
                | WidgetEvent::Locate
                | WidgetEvent::IntroCompleted
        )
    }
}
