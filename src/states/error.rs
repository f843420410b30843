//! States domain: recoverable state machine failures.

use thiserror::Error;

use crate::states::ActorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no handler registered for state {0:?}")]
    UnknownState(ActorState),
    #[error("state machine used before initialize()")]
    NotInitialized,
    #[error("state machine already initialized")]
    AlreadyInitialized,
}
