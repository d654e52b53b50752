//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use griduino_core::button::Gesture;

/// Channel capacity for classified gestures
const GESTURE_CHANNEL_SIZE: usize = 4;

/// Gestures classified by the button task
pub static GESTURE_CHANNEL: Channel<CriticalSectionRawMutex, Gesture, GESTURE_CHANNEL_SIZE> =
    Channel::new();
