//! Error type shared by the model, the store and the command dispatcher.
//!
//! Nothing here is fatal: the session reports every error as a line of output
//! and goes back to the prompt.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UlutoError>;

#[derive(Debug, Error)]
pub enum UlutoError {
    #[error("expected {expected} argument(s), got {got}.")]
    ArgumentCount { expected: usize, got: usize },

    #[error("{0}: Invalid command.")]
    InvalidCommand(String),

    #[error("'{0}' is not a valid todo position.")]
    InvalidPosition(String),

    #[error("todo position {index} is out of range (you have {len} todo(s)).")]
    OutOfRange { index: usize, len: usize },

    #[error("'{0}' is not 'done' or 'all'.")]
    InvalidClearKind(String),

    #[error("{0} is not a valid color.")]
    InvalidColor(String),

    /// A listed todo points at a tag that has no color.
    #[error("tag '{0}' has no color; use add_tag or change_tag_color to create it.")]
    UnregisteredTag(String),

    #[error("overwrite of {} declined.", .0.display())]
    OverwriteDeclined(PathBuf),

    #[error("input closed.")]
    InputClosed,

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl UlutoError {
    /// Some messages are printed bare rather than behind an `Error: ` prefix.
    pub fn is_bare(&self) -> bool {
        matches!(
            self,
            UlutoError::InvalidCommand(_) | UlutoError::InvalidClearKind(_) | UlutoError::InvalidColor(_)
        )
    }
}
