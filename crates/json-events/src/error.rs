use json_events_buffers::BufferError;
use thiserror::Error;

/// Every failure raised while producing, transforming or consuming events.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input, carrying the byte offset where decoding stopped.
    #[error("{message} at byte {position}")]
    Parse { position: usize, message: String },
    /// The event sequence cannot be represented in the target wire format.
    #[error("{0}")]
    Unrepresentable(String),
    /// An event arrived in a state that does not accept it.
    #[error("invalid event order: {0}")]
    EventOrder(String),
    #[error("nesting depth limit of {0} exceeded")]
    NestingDepthExceeded(usize),
    #[error("value count limit of {0} exceeded")]
    ValueCountExceeded(usize),
    #[error("invalid utf-8 in string")]
    InvalidUtf8,
    #[error("non-finite double value {0}")]
    NonFinite(f64),
    #[error("{0}")]
    Binary(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn from_buffer(position: usize, err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => Error::parse(position, "unexpected end of input"),
            BufferError::InvalidUtf8 => Error::parse(position, "invalid utf-8 in string"),
        }
    }

    /// Byte offset of a parse error.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }
}
