pub mod sequence;

pub use sequence::{CameraChange, CameraStep, IntroSequence, IntroSequencer};
