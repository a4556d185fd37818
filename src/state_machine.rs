//! Turn-taking state machine
//!
//! Pure state transitions that yield effects for the session to carry out.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, RequestId};
pub use state::ChatState;
pub use transition::{transition, TransitionError, TransitionResult};
