//! State tables
//!
//! A state table maps a [`StateId`] to the enter, process and exit behavior
//! of that state. Tables are either written as a `match` over a state enum
//! (see `button::ButtonStates`) or built as data from [`StateFns`] entries.

use super::machine::StateMachine;
use super::status::{Marker, SmError, SmResult, StateId};

/// Enter or exit callback
pub type ControlFn<D> = fn(&mut StateMachine<D>, Marker) -> SmResult;

/// Event processing callback
pub type ProcessFn<E, D> = fn(&mut StateMachine<D>, E) -> SmResult;

/// Behavior of every state of a machine, indexed by state id
///
/// Callbacks receive the machine itself so they can request transitions
/// and reach the attached user data. The engine only calls a state with
/// an id below the machine's state count, which is never above `len()`.
pub trait StateTable<E, D> {
    /// Number of states in the table
    fn len(&self) -> u32;

    /// Check if the table has no states
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enter `state`
    fn enter(&self, state: StateId, sm: &mut StateMachine<D>, marker: Marker) -> SmResult;

    /// Handle one event in `state`
    fn process(&self, state: StateId, sm: &mut StateMachine<D>, event: E) -> SmResult;

    /// Exit `state`
    fn exit(&self, state: StateId, sm: &mut StateMachine<D>, marker: Marker) -> SmResult;

    /// Display name of `state`
    fn name(&self, _state: StateId) -> Option<&'static str> {
        None
    }
}

/// One entry of a data-driven state table
pub struct StateFns<E, D> {
    pub enter: ControlFn<D>,
    pub process: ProcessFn<E, D>,
    pub exit: ControlFn<D>,
    pub name: Option<&'static str>,
}

impl<E, D> StateFns<E, D> {
    /// Create an unnamed entry
    pub const fn new(enter: ControlFn<D>, process: ProcessFn<E, D>, exit: ControlFn<D>) -> Self {
        Self {
            enter,
            process,
            exit,
            name: None,
        }
    }

    /// Attach a display name
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }
}

impl<E, D> Clone for StateFns<E, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, D> Copy for StateFns<E, D> {}

impl<E, D> StateTable<E, D> for [StateFns<E, D>] {
    fn len(&self) -> u32 {
        <[StateFns<E, D>]>::len(self) as u32
    }

    fn enter(&self, state: StateId, sm: &mut StateMachine<D>, marker: Marker) -> SmResult {
        let fns = self.get(state as usize).ok_or(SmError::StateCount)?;
        (fns.enter)(sm, marker)
    }

    fn process(&self, state: StateId, sm: &mut StateMachine<D>, event: E) -> SmResult {
        let fns = self.get(state as usize).ok_or(SmError::StateCount)?;
        (fns.process)(sm, event)
    }

    fn exit(&self, state: StateId, sm: &mut StateMachine<D>, marker: Marker) -> SmResult {
        let fns = self.get(state as usize).ok_or(SmError::StateCount)?;
        (fns.exit)(sm, marker)
    }

    fn name(&self, state: StateId) -> Option<&'static str> {
        self.get(state as usize).and_then(|fns| fns.name)
    }
}

impl<E, D, const N: usize> StateTable<E, D> for [StateFns<E, D>; N] {
    fn len(&self) -> u32 {
        N as u32
    }

    fn enter(&self, state: StateId, sm: &mut StateMachine<D>, marker: Marker) -> SmResult {
        self.as_slice().enter(state, sm, marker)
    }

    fn process(&self, state: StateId, sm: &mut StateMachine<D>, event: E) -> SmResult {
        self.as_slice().process(state, sm, event)
    }

    fn exit(&self, state: StateId, sm: &mut StateMachine<D>, marker: Marker) -> SmResult {
        self.as_slice().exit(state, sm, marker)
    }

    fn name(&self, state: StateId) -> Option<&'static str> {
        self.as_slice().name(state)
    }
}
