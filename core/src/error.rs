use thiserror::Error;

/// Failure of a single outbound request. Every variant is retried by the
/// fetch loops in [`crate::fetch`] until the attempt budget runs out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, reset, timeout).
    #[error("transport error: {0}")]
    Transport(String),
    /// The upstream answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },
    /// The upstream answered 2xx but the body was not the expected JSON.
    #[error("malformed response body: {0}")]
    Body(String),
}

impl FetchError {
    pub fn transport(message: impl std::fmt::Display) -> Self {
        Self::Transport(message.to_string())
    }

    pub fn body(message: impl std::fmt::Display) -> Self {
        Self::Body(message.to_string())
    }

    /// Status code carried by the error, if the upstream responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// A room key that cannot be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed percent-encoding at byte {0}")]
    MalformedEscape(usize),
    #[error("decoded room key is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Parse(String),
    #[error("checkout {checkout} must be after checkin {checkin}")]
    CheckoutNotAfterCheckin { checkin: String, checkout: String },
    #[error("checkin {0} is in the past")]
    CheckinInPast(String),
}
