use thiserror::Error;

/// Failures surfaced by the task log and the priority engine. The
/// presentation layer turns these into user-facing messages; nothing in
/// the core prints or exits.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no active task with id {0}")]
    NotFound(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("unsupported field '{0}'")]
    UnsupportedField(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Db(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
