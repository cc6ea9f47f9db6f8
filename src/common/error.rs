// src/common/error.rs

/// Errors produced by the driver.
///
/// `E` is the transport's own error type; it only needs `Debug`.
#[derive(Debug, thiserror::Error)]
pub enum TdrError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the bus implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// No byte arrived within the allotted time.
    #[error("Operation timed out")]
    Timeout,

    /// A line was received but carried no payload where one was required.
    #[error("Empty response frame")]
    EmptyFrame,

    /// Character is not a valid probe address.
    #[error("Invalid probe address character: '{0}'")]
    InvalidAddress(char),

    /// A response named a different probe than the one addressed.
    /// Usually bus contention or a wiring mix-up.
    #[error("Response address mismatch: expected '{expected}', got '{got}'")]
    AddressMismatch { expected: char, got: char },

    /// Non-numeric content where a numeric field was expected.
    #[error("Malformed numeric field in response")]
    MalformedNumber,

    /// Received response does not match any expected frame shape.
    #[error("Invalid response format")]
    InvalidFormat,

    /// Command did not fit its formatting buffer.
    #[error("Command formatting failed")]
    CommandFormat,
}

// Allow mapping from the underlying bus error via `?`
impl<E: core::fmt::Debug> From<E> for TdrError<E> {
    fn from(e: E) -> Self {
        TdrError::Io(e)
    }
}
