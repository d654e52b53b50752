//! Button timing configuration
//!
//! The classifier counts time in ticks, one per sampling period. Timing is
//! specified in milliseconds by the integrator and converted to ticks here.
//! It can be stored in flash as postcard-serialized binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default sampling period (40 Hz)
pub const DEFAULT_SAMPLE_PERIOD_MS: u32 = 25;

/// No further action after a click for this long returns to idle
pub const IDLE_TIMEOUT_MS: u32 = 1000;

/// Button held for less than this is a click
pub const CLICK_MS: u32 = 100;

/// Button held this long is a long press
pub const LONG_PRESS_MS: u32 = 1200;

/// Second press within this long after a click is a double click
pub const DOUBLE_CLICK_MS: u32 = 400;

/// Upper bound of an encoded [`ButtonTiming`] (five varint-encoded u32)
pub const MAX_ENCODED_LEN: usize = 25;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sampling period of zero
    ZeroPeriod,
    /// A threshold rounds down to zero ticks
    ZeroThreshold,
    /// Click threshold must be below the long-press threshold
    ClickNotBelowLongPress,
    /// Idle timeout must cover the double-click window
    IdleBelowDoubleClick,
    /// Serialization failed (buffer too small)
    Encode,
    /// Deserialization failed
    Decode,
}

/// Gesture thresholds, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonTiming {
    /// Tick period in milliseconds
    pub sample_period_ms: u32,
    /// Ticks without action before returning to idle
    pub idle_timeout: u32,
    /// Down-to-up ticks below which a press counts as a click
    pub click: u32,
    /// Ticks held down before a press becomes a long press
    pub long_press: u32,
    /// Ticks after a click during which a second down makes a double click
    pub double_click: u32,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self::ticks_for(DEFAULT_SAMPLE_PERIOD_MS)
    }
}

impl ButtonTiming {
    /// Derive tick thresholds for a sampling period
    pub fn from_sample_period_ms(sample_period_ms: u32) -> Result<Self, ConfigError> {
        if sample_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        let timing = Self::ticks_for(sample_period_ms);
        timing.validate()?;
        Ok(timing)
    }

    const fn ticks_for(sample_period_ms: u32) -> Self {
        Self {
            sample_period_ms,
            idle_timeout: IDLE_TIMEOUT_MS / sample_period_ms,
            click: CLICK_MS / sample_period_ms,
            long_press: LONG_PRESS_MS / sample_period_ms,
            double_click: DOUBLE_CLICK_MS / sample_period_ms,
        }
    }

    /// Check that the thresholds describe a usable classifier
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.click == 0 || self.long_press == 0 || self.double_click == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.click >= self.long_press {
            return Err(ConfigError::ClickNotBelowLongPress);
        }
        if self.idle_timeout < self.double_click {
            return Err(ConfigError::IdleBelowDoubleClick);
        }
        Ok(())
    }

    /// Convert a tick count to milliseconds
    pub fn ticks_to_ms(&self, ticks: u32) -> u32 {
        ticks.saturating_mul(self.sample_period_ms)
    }
}

#[cfg(feature = "serde")]
impl ButtonTiming {
    /// Serialize into `buf`, returning the used part
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize and validate a stored timing block
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let timing: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        timing.validate()?;
        Ok(timing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_25ms_sampling() {
        let timing = ButtonTiming::default();
        assert_eq!(timing.sample_period_ms, 25);
        assert_eq!(timing.idle_timeout, 40);
        assert_eq!(timing.click, 4);
        assert_eq!(timing.long_press, 48);
        assert_eq!(timing.double_click, 16);
        assert!(timing.validate().is_ok());
    }

    #[test]
    fn test_slower_sampling() {
        let timing = ButtonTiming::from_sample_period_ms(50).unwrap();
        assert_eq!(timing.click, 2);
        assert_eq!(timing.long_press, 24);
        assert_eq!(timing.double_click, 8);
        assert_eq!(timing.ticks_to_ms(timing.long_press), 1200);
    }

    #[test]
    fn test_invalid_periods() {
        assert_eq!(
            ButtonTiming::from_sample_period_ms(0),
            Err(ConfigError::ZeroPeriod)
        );
        // Click window rounds down to zero ticks
        assert_eq!(
            ButtonTiming::from_sample_period_ms(250),
            Err(ConfigError::ZeroThreshold)
        );
    }

    #[test]
    fn test_validate_ordering() {
        let mut timing = ButtonTiming::default();
        timing.click = timing.long_press;
        assert_eq!(timing.validate(), Err(ConfigError::ClickNotBelowLongPress));

        let mut timing = ButtonTiming::default();
        timing.idle_timeout = timing.double_click - 1;
        assert_eq!(timing.validate(), Err(ConfigError::IdleBelowDoubleClick));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stored_block_restores_timing() {
        let timing = ButtonTiming::from_sample_period_ms(20).unwrap();
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let used = timing.encode(&mut buf).unwrap().len();

        assert_eq!(ButtonTiming::decode(&buf[..used]), Ok(timing));
        assert_eq!(
            ButtonTiming::decode(&buf[..used - 1]),
            Err(ConfigError::Decode)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stored_block_is_validated() {
        let mut timing = ButtonTiming::default();
        timing.click = 0;
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let used = timing.encode(&mut buf).unwrap().len();

        assert_eq!(
            ButtonTiming::decode(&buf[..used]),
            Err(ConfigError::ZeroThreshold)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_needs_room() {
        let mut buf = [0u8; 2];
        assert_eq!(
            ButtonTiming::default().encode(&mut buf),
            Err(ConfigError::Encode)
        );
    }
}
