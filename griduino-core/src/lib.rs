//! Board-agnostic core logic for the Griduino firmware
//!
//! This crate contains the parts of the firmware that do not depend on
//! specific hardware:
//!
//! - Table-driven state machine engine
//! - Button gesture classifier (click, press, long press, double click...)
//! - Edge sampler turning a button pin level into down/up events
//! - Button timing configuration

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod sm;
