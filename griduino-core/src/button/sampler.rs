//! Button pin sampling
//!
//! Turns the level of a (debounced) button input into down/up edges and
//! drives a [`ButtonClassifier`] from a fixed-rate polling loop.

use embedded_hal::digital::InputPin;

use super::classifier::ButtonClassifier;
use super::events::{ButtonEvent, Gesture};
use crate::config::{ButtonTiming, ConfigError};

/// Electrical level of a pressed button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed pulls the pin low (pull-up wiring)
    #[default]
    Low,
    /// Pressed drives the pin high
    High,
}

/// Edge detector on a button input pin
#[derive(Debug)]
pub struct ButtonSampler<P> {
    pin: P,
    active: ActiveLevel,
    pressed: bool,
}

impl<P: InputPin> ButtonSampler<P> {
    /// Create a sampler, treating the button as released
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self {
            pin,
            active,
            pressed: false,
        }
    }

    /// Read the pin and report a press or release since the last sample
    pub fn sample(&mut self) -> Result<Option<ButtonEvent>, P::Error> {
        let pressed = match self.active {
            ActiveLevel::Low => self.pin.is_low()?,
            ActiveLevel::High => self.pin.is_high()?,
        };

        if pressed == self.pressed {
            return Ok(None);
        }
        self.pressed = pressed;

        Ok(Some(if pressed {
            ButtonEvent::Down
        } else {
            ButtonEvent::Up
        }))
    }

    /// Button state as of the last sample
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

/// A button pin with its own gesture classifier
#[derive(Debug)]
pub struct Button<P> {
    sampler: ButtonSampler<P>,
    classifier: ButtonClassifier,
}

impl<P: InputPin> Button<P> {
    /// Create a button, falling back to default timing if `timing` is invalid
    pub fn new(pin: P, active: ActiveLevel, timing: ButtonTiming) -> Self {
        Self {
            sampler: ButtonSampler::new(pin, active),
            classifier: ButtonClassifier::new(timing),
        }
    }

    /// Create a button, rejecting invalid timing
    pub fn try_new(pin: P, active: ActiveLevel, timing: ButtonTiming) -> Result<Self, ConfigError> {
        Ok(Self {
            sampler: ButtonSampler::new(pin, active),
            classifier: ButtonClassifier::try_new(timing)?,
        })
    }

    /// Run one sampling period
    ///
    /// Must be called once per tick. Feeds any edge seen on the pin, then
    /// the tick, and hands over a gesture classified during this period.
    pub fn poll(&mut self) -> Result<Option<Gesture>, P::Error> {
        if let Some(edge) = self.sampler.sample()? {
            self.feed(edge);
        }
        self.feed(ButtonEvent::Tick);

        let gesture = self.classifier.take();
        Ok(gesture.is_some().then_some(gesture))
    }

    /// Hand one event to the classifier
    ///
    /// The classifier is initialized on construction and never paused, so
    /// the engine always dispatches; a failure here means it was broken
    /// from outside and is only logged.
    fn feed(&mut self, event: ButtonEvent) {
        if let Err(_e) = self.classifier.process(event) {
            #[cfg(feature = "defmt")]
            defmt::warn!("button event {} not classified: {}", event, _e);
        }
    }

    /// Gesture classifier driven by this button
    pub fn classifier(&self) -> &ButtonClassifier {
        &self.classifier
    }

    /// Mutable access to the classifier, e.g. to re-`init` it
    pub fn classifier_mut(&mut self) -> &mut ButtonClassifier {
        &mut self.classifier
    }

    /// Button state as of the last poll
    pub fn is_pressed(&self) -> bool {
        self.sampler.is_pressed()
    }
}
