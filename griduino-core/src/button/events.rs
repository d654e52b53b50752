//! Button input events and classified gestures

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events fed to the gesture classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// One sampling period elapsed
    Tick,
    /// Button went down
    Down,
    /// Button went up
    Up,
}

impl ButtonEvent {
    /// Raw code of this event
    pub const fn code(self) -> u8 {
        match self {
            ButtonEvent::Tick => 0,
            ButtonEvent::Down => 1,
            ButtonEvent::Up => 2,
        }
    }

    /// Check if this event is a button edge
    pub fn is_edge(&self) -> bool {
        matches!(self, ButtonEvent::Down | ButtonEvent::Up)
    }
}

impl TryFrom<u8> for ButtonEvent {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ButtonEvent::Tick),
            1 => Ok(ButtonEvent::Down),
            2 => Ok(ButtonEvent::Up),
            other => Err(other),
        }
    }
}

/// Classified button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gesture {
    /// Nothing classified yet
    #[default]
    None,
    /// Short press, no second press followed
    Click,
    /// Press longer than a click
    Press,
    /// Button held past the long-press threshold
    LongPress,
    /// Two clicks in quick succession
    DoubleClick,
    /// Click followed by a press
    ClickPress,
    /// Click followed by a long press
    ClickLongPress,
}

impl Gesture {
    /// Check if a gesture has been classified
    pub fn is_some(&self) -> bool {
        !matches!(self, Gesture::None)
    }

    /// Check if this gesture started with a click
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Gesture::DoubleClick | Gesture::ClickPress | Gesture::ClickLongPress
        )
    }

    /// Short display label
    pub const fn label(&self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::Click => "click",
            Gesture::Press => "press",
            Gesture::LongPress => "long press",
            Gesture::DoubleClick => "double click",
            Gesture::ClickPress => "click-press",
            Gesture::ClickLongPress => "click-long press",
        }
    }
}
