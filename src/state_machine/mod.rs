// State machines supervising the query and print workflows.
//
// Transitions go through explicit event application with a shared
// (state, event) match table, and every applied transition is published on
// a broadcast channel so callers can observe lifecycle changes.

pub mod events;
pub mod notify;
pub mod print_state_machine;
pub mod query_state_machine;
pub mod states;

pub use events::{PrintEvent, QueryEvent};
pub use notify::{StateChange, StateNotifier};
pub use print_state_machine::{PrintRequest, PrintStateMachine};
pub use query_state_machine::{QueryOutcome, QueryStateMachine};
pub use states::{PrintState, QueryState};
