pub mod events;

pub use events::WidgetEvent;
