//! Button sampling task
//!
//! Polls the button pin once per sampling period and forwards classified
//! gestures. This task is the only owner of the classifier.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use griduino_core::button::{ActiveLevel, Button};
use griduino_core::config::ButtonTiming;

use crate::channels::GESTURE_CHANNEL;

/// Button task - samples the pin every tick and classifies gestures
#[embassy_executor::task]
pub async fn button_task(pin: Input<'static>, timing: ButtonTiming) {
    info!(
        "Button task started: {}ms period, click<{} long>={} double<{} ticks",
        timing.sample_period_ms, timing.click, timing.long_press, timing.double_click
    );

    // Wired to ground with the internal pull-up
    let mut button = Button::new(pin, ActiveLevel::Low, timing);
    let mut ticker = Ticker::every(Duration::from_millis(timing.sample_period_ms as u64));

    loop {
        ticker.next().await;

        match button.poll() {
            Ok(Some(gesture)) => {
                if GESTURE_CHANNEL.try_send(gesture).is_err() {
                    warn!("Gesture channel full, dropping {}", gesture);
                }
            }
            Ok(None) => {}
            Err(e) => match e {},
        }
    }
}
