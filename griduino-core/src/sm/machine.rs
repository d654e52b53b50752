//! State machine engine
//!
//! Drives a [`StateTable`] through enter/process/exit callbacks. Callbacks
//! only *request* transitions; the engine applies a pending transition at
//! the end of the `process` call that staged it, running exit on the old
//! state immediately followed by enter on the new one.

use super::status::{Marker, Outcome, SmError, SmResult, StateId};
use super::table::StateTable;

/// Callback computing the start state during `init`
pub type InitFn<D> = fn(&mut StateMachine<D>) -> StateId;

/// Target of an automatic transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoTarget {
    /// Change to a concrete state
    State(StateId),
    /// Leave the machine untouched
    Ignore,
    /// Re-enter the current state on the next event
    Restart,
}

impl From<StateId> for AutoTarget {
    fn from(state: StateId) -> Self {
        AutoTarget::State(state)
    }
}

/// One running state machine
///
/// `D` is caller-chosen user data reachable from every callback. Pass a
/// `&mut T` to keep the data owned elsewhere, or `()` when unused.
#[derive(Debug)]
pub struct StateMachine<D = ()> {
    /// Active state
    current: StateId,
    /// Requested next state
    pending: StateId,
    /// State before the last transition
    previous: StateId,
    /// Result of the last operation
    status: SmResult,
    /// A transition to `pending` is staged
    change_pending: bool,
    /// The current state is re-entered on the next event
    restart_pending: bool,
    /// Event dispatch suspended
    paused: bool,
    /// Number of states; ids at or above this are rejected
    max_states: u32,
    /// Events handed to a process callback since `init`
    event_count: u32,
    /// `init` succeeded
    initialized: bool,
    init_fn: Option<InitFn<D>>,
    user_data: D,
}

impl<D: Default> Default for StateMachine<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<D> StateMachine<D> {
    /// Create an uninitialized machine starting in state 0
    pub const fn new(user_data: D) -> Self {
        Self {
            current: 0,
            pending: 0,
            previous: 0,
            status: Err(SmError::Generic),
            change_pending: false,
            restart_pending: false,
            paused: false,
            max_states: 0,
            event_count: 0,
            initialized: false,
            init_fn: None,
            user_data,
        }
    }

    /// Create an uninitialized machine whose start state comes from `init_fn`
    pub const fn with_init(user_data: D, init_fn: InitFn<D>) -> Self {
        let mut sm = Self::new(user_data);
        sm.init_fn = Some(init_fn);
        sm
    }

    /// Initialize the machine and enter its start state
    ///
    /// The start state is the init callback's answer, or 0 without one.
    /// Fails with [`SmError::StateCount`] when `max_states` is zero, larger
    /// than the table, or not above the start state. A failed machine
    /// refuses to process events until initialized again.
    pub fn init<E, T>(&mut self, table: &T, max_states: u32) -> SmResult
    where
        T: StateTable<E, D> + ?Sized,
    {
        self.initialized = false;
        if max_states == 0 || max_states > table.len() {
            self.status = Err(SmError::StateCount);
            return self.status;
        }

        self.max_states = max_states;
        self.event_count = 0;
        self.paused = false;
        self.restart_pending = false;

        let start = match self.init_fn {
            Some(init_fn) => init_fn(self),
            None => 0,
        };
        self.current = start;
        self.pending = start;
        self.previous = start;

        if start < self.max_states {
            self.initialized = true;
            self.status = table.enter(start, self, Marker::Init);
        } else {
            self.status = Err(SmError::StateCount);
        }
        self.change_pending = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("sm init: start={} states={} status={}", start, max_states, self.status);

        self.status
    }

    /// Dispatch one event to the current state
    ///
    /// A restart staged with [`auto_transition`](Self::auto_transition)
    /// re-enters the current state first and discards any transition
    /// staged alongside it. A transition requested by the process callback
    /// is applied before returning and reported as
    /// [`Outcome::StateChanged`].
    pub fn process<E, T>(&mut self, table: &T, event: E) -> SmResult
    where
        T: StateTable<E, D> + ?Sized,
    {
        if !self.initialized {
            return Err(SmError::Generic);
        }
        if self.paused {
            self.status = Err(SmError::Paused);
            return self.status;
        }

        if self.restart_pending {
            let _ = table.enter(self.current, self, Marker::Enter);
            self.restart_pending = false;
            self.change_pending = false;
        }

        self.event_count = self.event_count.wrapping_add(1);
        self.status = table.process(self.current, self, event);

        if self.change_pending {
            self.change_pending = false;
            if self.pending != self.current {
                let old = self.current;
                let _ = table.exit(old, self, Marker::Exit);
                self.previous = old;
                self.current = self.pending;
                let _ = table.enter(self.current, self, Marker::Enter);
                self.status = Ok(Outcome::StateChanged);

                #[cfg(feature = "defmt")]
                defmt::trace!("sm transition: {} -> {}", old, self.current);
            }
        }

        self.status
    }

    /// Stage a transition to `target`
    ///
    /// No callback runs here; the transition is applied by the `process`
    /// call in progress (or the next one). An uninitialized machine answers
    /// [`SmError::Generic`] and keeps its status.
    pub fn request_transition(&mut self, target: StateId) -> SmResult {
        if !self.initialized {
            return Err(SmError::Generic);
        }
        if target < self.max_states {
            self.pending = target;
            self.change_pending = true;
            self.status = Ok(Outcome::StateChanged);
        } else {
            self.status = Err(SmError::StateCount);
        }
        self.status
    }

    /// Stage a transition to `next[current]`
    ///
    /// A table too short for the current state, or an entry outside the
    /// machine's state count, is reported as [`SmError::StateCount`].
    pub fn request_from_table(&mut self, next: &[StateId]) -> SmResult {
        if !self.initialized {
            return Err(SmError::Generic);
        }
        match next.get(self.current as usize) {
            Some(&target) => self.request_transition(target),
            None => {
                self.status = Err(SmError::StateCount);
                self.status
            }
        }
    }

    /// Stage a transition back to the previous state
    pub fn request_previous(&mut self) -> SmResult {
        if !self.initialized {
            return Err(SmError::Generic);
        }
        self.pending = self.previous;
        self.change_pending = true;
        self.status = Ok(Outcome::StateChanged);
        self.status
    }

    /// Stage a transition, a restart, or nothing
    pub fn auto_transition(&mut self, target: impl Into<AutoTarget>) -> SmResult {
        if !self.initialized {
            return Err(SmError::Generic);
        }
        match target.into() {
            AutoTarget::Ignore => {}
            AutoTarget::Restart => {
                self.restart_pending = true;
                self.change_pending = false;
                self.status = Ok(Outcome::StateRestart);
            }
            AutoTarget::State(state) => {
                if self.request_transition(state).is_ok() {
                    self.restart_pending = false;
                }
            }
        }
        self.status
    }

    /// Suspend event dispatch, exiting the current state once
    pub fn pause<E, T>(&mut self, table: &T) -> SmResult
    where
        T: StateTable<E, D> + ?Sized,
    {
        if !self.initialized {
            return Err(SmError::Generic);
        }
        if !self.paused {
            let _ = table.exit(self.current, self, Marker::Exit);
            self.paused = true;
            self.status = Err(SmError::Paused);
        }
        self.status
    }

    /// Resume event dispatch, re-entering the current state once
    pub fn resume<E, T>(&mut self, table: &T) -> SmResult
    where
        T: StateTable<E, D> + ?Sized,
    {
        if !self.initialized {
            return Err(SmError::Generic);
        }
        if self.paused {
            let _ = table.enter(self.current, self, Marker::Enter);
            self.paused = false;
            self.status = Ok(Outcome::Ok);
        }
        self.status
    }

    /// Current state
    pub fn state(&self) -> StateId {
        self.current
    }

    /// State before the last transition
    pub fn previous_state(&self) -> StateId {
        self.previous
    }

    /// Result of the last operation
    pub fn status(&self) -> SmResult {
        self.status
    }

    /// Number of events dispatched since `init`
    pub fn event_count(&self) -> u32 {
        self.event_count
    }

    /// Number of valid states
    pub fn max_states(&self) -> u32 {
        self.max_states
    }

    /// Check if the last `init` succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Check if event dispatch is suspended
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Data attached to the machine
    pub fn user_data(&self) -> &D {
        &self.user_data
    }

    /// Mutable access to the attached data
    pub fn user_data_mut(&mut self) -> &mut D {
        &mut self.user_data
    }

    /// Display name of the current state, if the table has one
    pub fn state_name<E, T>(&self, table: &T) -> Option<&'static str>
    where
        T: StateTable<E, D> + ?Sized,
    {
        table.name(self.current)
    }
}
