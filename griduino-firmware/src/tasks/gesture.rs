//! Gesture log task

use defmt::*;

use crate::channels::GESTURE_CHANNEL;

/// Gesture task - reports every classified gesture
#[embassy_executor::task]
pub async fn gesture_task() {
    info!("Gesture task started");

    let mut count: u32 = 0;
    loop {
        let gesture = GESTURE_CHANNEL.receive().await;
        count = count.wrapping_add(1);
        info!("Gesture #{}: {} ({})", count, gesture, gesture.label());

        if gesture.is_compound() {
            debug!("Compound gesture, started with a click");
        }
    }
}
