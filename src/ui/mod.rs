pub mod controls;
pub mod search;
pub mod toast;

pub use controls::{CameraControls, LocateIcon};
pub use search::{SearchController, SearchView};
pub use toast::{Severity, ToastView, Toaster};
