pub mod bootstrap;
pub mod camera;
pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod geo;
pub mod session;
