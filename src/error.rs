//! Our error types for the GS200 driver.

use thiserror::Error;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Errors surfaced by a [`Gs200`](crate::gs200::Gs200) session.
///
/// `I` is the error type of the underlying [`Transport`](crate::transport::Transport).
#[derive(Error, Debug)]
pub enum Error<I> {
    /// The transport failed. Propagated unmodified; this layer never retries.
    #[error("transport failure: {0:?}")]
    Transport(I),
    /// A caller-supplied argument was rejected before transmission.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// A command was issued after [`close`](crate::gs200::Gs200::close).
    #[error("session is closed")]
    SessionClosed,
    /// The instrument replied with something this driver cannot interpret.
    #[error("unexpected reply to `{command}`: {reply:?}")]
    UnexpectedReply {
        command: &'static str,
        reply: String,
    },
}

/// Argument validation failures. Raised before any transport call, so an
/// invalid command never reaches the wire.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// The value could not be read as a number.
    #[error("{label}: `{value}` is not numeric")]
    Validation { label: &'static str, value: String },
    /// The (scaled) value falls outside the feature's legal bound.
    /// Bounds are inclusive on both ends.
    #[error("{label}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        label: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// The token is not in the feature's accepted set.
    #[error("{label}: unknown token `{token}`, accepted tokens: {accepted:?}")]
    InvalidArgument {
        label: &'static str,
        token: String,
        accepted: &'static [&'static str],
    },
}
