//! Generic state machine engine
//!
//! A table-driven runtime with enter/process/exit callbacks per state,
//! explicit transition requests, automatic transitions (restart/ignore),
//! previous-state recall, and pause/resume.
//!
//! The engine never allocates and never blocks. All callbacks run
//! synchronously inside the engine call that triggered them.

pub mod machine;
pub mod status;
pub mod table;

pub use machine::{AutoTarget, InitFn, StateMachine};
pub use status::{Marker, Outcome, SmError, SmResult, StateId};
pub use table::{ControlFn, ProcessFn, StateFns, StateTable};
