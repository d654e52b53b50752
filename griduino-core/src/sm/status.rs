//! Status values reported by the state machine engine

/// State identifier, used as an index into a state table
pub type StateId = u32;

/// Control marker passed to enter and exit callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Marker {
    /// First entry into the start state during `init`
    Init,
    /// Entry after a transition, a restart or a resume
    Enter,
    /// Exit before a transition or a pause
    Exit,
}

/// Successful outcome of an engine operation or state callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Machine is running normally
    Ok,
    /// Machine did not change state
    NoStateChange,
    /// A transition was requested or applied
    StateChanged,
    /// The current state will be re-entered on the next event
    StateRestart,
}

/// Errors reported by the state machine engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SmError {
    /// Machine has not been (successfully) initialized
    Generic,
    /// State index outside the machine's state count
    StateCount,
    /// Machine is paused; the operation was suppressed
    Paused,
}

impl SmError {
    /// Check if this is a control status rather than a fault
    pub fn is_control(&self) -> bool {
        matches!(self, SmError::Paused)
    }
}

/// Result returned by every engine operation and state callback
pub type SmResult = Result<Outcome, SmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_is_control_status() {
        assert!(SmError::Paused.is_control());
        assert!(!SmError::StateCount.is_control());
        assert!(!SmError::Generic.is_control());
    }
}
