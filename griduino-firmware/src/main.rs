//! Griduino - Button Gesture Firmware
//!
//! Firmware binary for RP2040-based Griduino boards. Samples the push
//! button at a fixed rate and classifies clicks, presses and their
//! combinations.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use {defmt_rtt as _, panic_probe as _};

use griduino_core::config::{ButtonTiming, DEFAULT_SAMPLE_PERIOD_MS};

mod channels;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Griduino firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let timing = match ButtonTiming::from_sample_period_ms(DEFAULT_SAMPLE_PERIOD_MS) {
        Ok(timing) => timing,
        Err(e) => {
            warn!("Invalid button timing ({}), using defaults", e);
            ButtonTiming::default()
        }
    };

    // Pin assignment is board-specific (button to ground on GPIO2)
    let button_pin = Input::new(p.PIN_2, Pull::Up);

    spawner.spawn(unwrap!(tasks::gesture_task()));
    spawner.spawn(unwrap!(tasks::button_task(button_pin, timing)));

    info!("All tasks spawned");
}
