//! Button gesture classifier
//!
//! A four-state machine on top of the [`sm`](crate::sm) engine that turns
//! ticks and button edges into a latched [`Gesture`].
//!
//! ```text
//!            Down                      Up (< click)
//!   Idle ──────────▶ SingleClickTest ─────────────▶ ClickIdle
//!    ▲                 │ Up (>= click): Press          │ Down (< double_click)
//!    │                 │ long_press ticks: LongPress   ▼
//!    │◀────────────────┘                         DoubleClickTest
//!    │◀── double_click ticks: Click ── ClickIdle       │ Up (< click): DoubleClick
//!    │◀────────────────────────────────────────────────┘ Up (>= click): ClickPress
//!                                          long_press ticks: ClickLongPress
//! ```
//!
//! Windows are half-open: an edge after `n` ticks is inside a window of
//! `n + 1` ticks and outside a window of `n` ticks. Timeouts fire on the
//! tick that reaches the threshold, so the window is already closed when
//! an edge arrives after exactly that many ticks.

use crate::config::{ButtonTiming, ConfigError};
use crate::sm::{Marker, Outcome, SmError, SmResult, StateId, StateMachine, StateTable};

use super::events::{ButtonEvent, Gesture};

/// Classifier states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Waiting for a press
    Idle,
    /// First press in progress
    SingleClickTest,
    /// First click done, watching for a second press
    ClickIdle,
    /// Second press in progress
    DoubleClickTest,
}

impl ButtonState {
    /// Number of classifier states
    pub const COUNT: u32 = 4;

    /// State table index
    pub const fn id(self) -> StateId {
        match self {
            ButtonState::Idle => 0,
            ButtonState::SingleClickTest => 1,
            ButtonState::ClickIdle => 2,
            ButtonState::DoubleClickTest => 3,
        }
    }

    /// State for a table index
    pub const fn from_id(id: StateId) -> Option<Self> {
        match id {
            0 => Some(ButtonState::Idle),
            1 => Some(ButtonState::SingleClickTest),
            2 => Some(ButtonState::ClickIdle),
            3 => Some(ButtonState::DoubleClickTest),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ButtonState::Idle => "idle",
            ButtonState::SingleClickTest => "single click test",
            ButtonState::ClickIdle => "click idle",
            ButtonState::DoubleClickTest => "double click test",
        }
    }
}

/// Per-machine data shared by the classifier states
#[derive(Debug, Clone)]
pub struct ButtonContext {
    timing: ButtonTiming,
    /// Ticks since the current state was entered
    elapsed: u32,
    /// Last classified gesture, kept until reset
    latched: Gesture,
}

impl ButtonContext {
    fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            elapsed: 0,
            latched: Gesture::None,
        }
    }

    /// Count one tick, returning the ticks spent in the current state
    fn tick(&mut self) -> u32 {
        self.elapsed = self.elapsed.saturating_add(1);
        self.elapsed
    }
}

/// State table of the classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonStates;

impl StateTable<ButtonEvent, ButtonContext> for ButtonStates {
    fn len(&self) -> u32 {
        ButtonState::COUNT
    }

    fn enter(
        &self,
        state: StateId,
        sm: &mut StateMachine<ButtonContext>,
        _marker: Marker,
    ) -> SmResult {
        ButtonState::from_id(state).ok_or(SmError::StateCount)?;
        // Every state times itself from entry
        sm.user_data_mut().elapsed = 0;
        Ok(Outcome::Ok)
    }

    fn process(
        &self,
        state: StateId,
        sm: &mut StateMachine<ButtonContext>,
        event: ButtonEvent,
    ) -> SmResult {
        match ButtonState::from_id(state).ok_or(SmError::StateCount)? {
            ButtonState::Idle => idle(sm, event),
            ButtonState::SingleClickTest => single_click_test(sm, event),
            ButtonState::ClickIdle => click_idle(sm, event),
            ButtonState::DoubleClickTest => double_click_test(sm, event),
        }
        Ok(Outcome::Ok)
    }

    fn exit(
        &self,
        state: StateId,
        _sm: &mut StateMachine<ButtonContext>,
        _marker: Marker,
    ) -> SmResult {
        ButtonState::from_id(state).ok_or(SmError::StateCount)?;
        Ok(Outcome::Ok)
    }

    fn name(&self, state: StateId) -> Option<&'static str> {
        ButtonState::from_id(state).map(ButtonState::name)
    }
}

fn go(sm: &mut StateMachine<ButtonContext>, state: ButtonState) {
    // All classifier states are in range
    let _ = sm.request_transition(state.id());
}

fn finish(sm: &mut StateMachine<ButtonContext>, gesture: Gesture) {
    #[cfg(feature = "defmt")]
    defmt::debug!("button gesture: {}", gesture);

    sm.user_data_mut().latched = gesture;
    go(sm, ButtonState::Idle);
}

fn idle(sm: &mut StateMachine<ButtonContext>, event: ButtonEvent) {
    if event == ButtonEvent::Down {
        go(sm, ButtonState::SingleClickTest);
    }
}

fn single_click_test(sm: &mut StateMachine<ButtonContext>, event: ButtonEvent) {
    let ctx = sm.user_data_mut();
    match event {
        ButtonEvent::Tick => {
            if ctx.tick() >= ctx.timing.long_press {
                finish(sm, Gesture::LongPress);
            }
        }
        ButtonEvent::Up => {
            if ctx.elapsed < ctx.timing.click {
                go(sm, ButtonState::ClickIdle);
            } else {
                finish(sm, Gesture::Press);
            }
        }
        ButtonEvent::Down => {}
    }
}

fn click_idle(sm: &mut StateMachine<ButtonContext>, event: ButtonEvent) {
    let ctx = sm.user_data_mut();
    match event {
        ButtonEvent::Tick => {
            if ctx.tick() >= ctx.timing.double_click {
                finish(sm, Gesture::Click);
            }
        }
        ButtonEvent::Down => {
            if ctx.elapsed < ctx.timing.double_click {
                go(sm, ButtonState::DoubleClickTest);
            } else {
                go(sm, ButtonState::Idle);
            }
        }
        ButtonEvent::Up => {}
    }
}

fn double_click_test(sm: &mut StateMachine<ButtonContext>, event: ButtonEvent) {
    let ctx = sm.user_data_mut();
    match event {
        ButtonEvent::Tick => {
            if ctx.tick() >= ctx.timing.long_press {
                finish(sm, Gesture::ClickLongPress);
            }
        }
        ButtonEvent::Up => {
            let gesture = if ctx.elapsed < ctx.timing.click {
                Gesture::DoubleClick
            } else {
                Gesture::ClickPress
            };
            finish(sm, gesture);
        }
        ButtonEvent::Down => {}
    }
}

/// Button gesture classifier
///
/// Feed it one [`ButtonEvent::Tick`] per sampling period plus the button
/// edges, then poll [`latched`](Self::latched). Each classifier owns its
/// machine, so one instance per physical button is fine.
#[derive(Debug)]
pub struct ButtonClassifier {
    sm: StateMachine<ButtonContext>,
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new(ButtonTiming::default())
    }
}

impl ButtonClassifier {
    /// Create a classifier, initialized and idle
    ///
    /// Timing that fails [`ButtonTiming::validate`] is replaced by the
    /// defaults; use [`try_new`](Self::try_new) to reject it instead.
    pub fn new(timing: ButtonTiming) -> Self {
        match Self::try_new(timing) {
            Ok(classifier) => classifier,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("invalid button timing ({}), using defaults", _e);
                Self::with_timing(ButtonTiming::default())
            }
        }
    }

    /// Create a classifier, rejecting invalid timing
    pub fn try_new(timing: ButtonTiming) -> Result<Self, ConfigError> {
        timing.validate()?;
        Ok(Self::with_timing(timing))
    }

    fn with_timing(timing: ButtonTiming) -> Self {
        let mut classifier = Self {
            sm: StateMachine::new(ButtonContext::new(timing)),
        };
        // Cannot fail: the table and the state count agree
        let _ = classifier.init();
        classifier
    }

    /// Return to idle and clear the latched gesture
    pub fn init(&mut self) -> SmResult {
        self.sm.user_data_mut().latched = Gesture::None;
        self.sm.init(&ButtonStates, ButtonState::COUNT)
    }

    /// Submit one event
    pub fn process(&mut self, event: ButtonEvent) -> SmResult {
        self.sm.process(&ButtonStates, event)
    }

    /// Submit a raw event code; unknown codes are ignored
    pub fn process_raw(&mut self, code: u8) -> SmResult {
        match ButtonEvent::try_from(code) {
            Ok(event) => self.process(event),
            Err(_) => Ok(Outcome::NoStateChange),
        }
    }

    /// Last classified gesture
    pub fn latched(&self) -> Gesture {
        self.sm.user_data().latched
    }

    /// Clear the latched gesture so it is not read twice
    pub fn reset_latched(&mut self) {
        self.sm.user_data_mut().latched = Gesture::None;
    }

    /// Read and clear the latched gesture
    pub fn take(&mut self) -> Gesture {
        core::mem::take(&mut self.sm.user_data_mut().latched)
    }

    /// Current classifier state
    pub fn state(&self) -> ButtonState {
        ButtonState::from_id(self.sm.state()).unwrap_or(ButtonState::Idle)
    }

    /// Ticks spent in the current state
    pub fn elapsed_ticks(&self) -> u32 {
        self.sm.user_data().elapsed
    }

    /// Events processed since the last `init`
    pub fn event_count(&self) -> u32 {
        self.sm.event_count()
    }

    /// Thresholds in use
    pub fn timing(&self) -> &ButtonTiming {
        &self.sm.user_data().timing
    }
}
