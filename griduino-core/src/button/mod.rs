//! Button gesture recognition
//!
//! Classifies a stream of button-down/button-up edges plus a fixed-rate
//! tick into click, press, long press, double click, click-press and
//! click-long-press. All thresholds are tick counts (see
//! [`ButtonTiming`](crate::config::ButtonTiming)).

pub mod classifier;
pub mod events;
pub mod sampler;

pub use classifier::{ButtonClassifier, ButtonContext, ButtonState, ButtonStates};
pub use events::{ButtonEvent, Gesture};
pub use sampler::{ActiveLevel, Button, ButtonSampler};
