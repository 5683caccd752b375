use thiserror::Error;

/// An argument type rejected the text at the cursor.
///
/// This is data, not an error path: the binder records it on the binding of
/// the node that failed and keeps going with the rest of the set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: '{raw}'")]
pub struct ParseFailure {
    pub message: String,
    pub raw: String,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raw: raw.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Missing argument: {name}")]
    MissingArgument { name: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(ParseFailure),
    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Internal error: Argument '{name}' does not exist in the grammar (command registration bug)")]
    UnknownArgument { name: String },
    #[error(
        "Internal error: Argument '{name}' holds {found}, expected {expected} (command registration bug)"
    )]
    WrongArgumentType {
        name: String,
        expected: String,
        found: String,
    },
    #[error("Internal error: Grammar nodes must have a non-empty name")]
    EmptyName,
    #[error("Internal error: Alias '{alias}' is already registered")]
    AliasTaken { alias: String },
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CommandError {
    pub fn runtime(message: impl Into<String>) -> Self {
        CommandError::Runtime(RuntimeError::Message(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::Internal(InternalError::Message {
            message: message.into(),
        })
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
