use core::fmt;
use std::error::Error;

/// Classifies election failures. Coordination client implementations report their
/// failures with these kinds so the election can tell tolerated races from fatal errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum ErrorKind {
    /// A node already occupies the path.
    NodeExists,

    /// No node exists at the path.
    NoSuchNode,

    /// The node to delete still has children.
    NotEmpty,

    /// The store session was expired or closed.
    SessionExpired,

    /// The store cannot be reached.
    ConnectionLoss,

    /// The round was interrupted by a termination request.
    Interrupted,

    /// A registration record cannot be parsed.
    MalformedRecord,

    /// Candidate configuration is out of range.
    InvalidConfiguration,

    /// The leader task failed.
    LeaderTask,
}

/// Error type of the election crate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionError {
    kind: ErrorKind,
    text: String,
    cause: String,
}

pub(crate) type Result<T> = std::result::Result<T, ElectionError>;

/// Creates an error result of the given kind.
pub fn new_err<T>(kind: ErrorKind, text: String, cause: String) -> Result<T> {
    Err(ElectionError::new(kind, text, cause))
}

impl ElectionError {
    pub fn new(kind: ErrorKind, text: String, cause: String) -> ElectionError {
        ElectionError { kind, text, cause }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for ElectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cause_word = {
            if !self.cause.is_empty() {
                " Cause: ".to_string()
            } else {
                String::new()
            }
        };
        write!(f, "{} ({}).{}{}", self.text, self.kind, cause_word, self.cause)
    }
}

impl Error for ElectionError {}
