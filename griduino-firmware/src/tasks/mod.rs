//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod button;
pub mod gesture;

pub use button::button_task;
pub use gesture::gesture_task;
