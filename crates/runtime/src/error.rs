//! Runtime error types.

use battle_core::engine::ExecuteError;
use battle_core::state::SetupError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors surfaced by the battle session.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("battle setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("action execution failed: {0}")]
    Execute(#[from] ExecuteError),

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("party specs and experience totals differ in length")]
    RosterMismatch,
}
