//! Tagged result of running a callback inside a catch scope.
//!
//! [`Outcome`] is produced exactly at the `catch_unwind` boundary: either the callback
//! returned and its value is carried in [`Outcome::Completed`], or it unwound and the
//! intercepted panic is reduced to a [`Fault`].
//!
//! A [`Fault`] keeps very little of the panic. The payload object is
//! dropped, only a message (when the payload was a string or a [`FatalError`]) survives.

use std::{any::Any, fmt};

use crate::fatal::FatalError;

/// Placeholder used when a panic payload carries no readable message.
pub(crate) const OPAQUE_PAYLOAD: &str = "<opaque panic payload>";

/// Extracts a human readable message from a panic payload.
///
/// `panic!` produces either a `&'static str` (literal without arguments) or a `String`
/// (formatted message). [`FatalError`] payloads report their own message. Everything else
/// is opaque.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        Some(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        Some(message.as_str())
    } else {
        payload
            .downcast_ref::<FatalError>()
            .map(|fatal| fatal.message.as_str())
    }
}

/// An intercepted panic.
///
/// Holds the panic message if one could be recovered, and the [`FatalError`] if the
/// panic was raised through [`crate::raise_fatal_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    message: Option<String>,
    fatal: Option<FatalError>,
}

impl Fault {
    /// Reduces a raw panic payload to a `Fault`, consuming (and dropping) the payload.
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        match payload.downcast::<FatalError>() {
            Ok(fatal) => Fault {
                message: Some(fatal.message.clone()),
                fatal: Some(*fatal),
            },
            Err(payload) => Fault {
                message: payload_message(payload.as_ref()).map(str::to_string),
                fatal: None,
            },
        }
    }

    /// The panic message, if the payload carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The fatal error, if this fault was raised via [`crate::raise_fatal_error`].
    #[must_use]
    pub fn fatal_error(&self) -> Option<&FatalError> {
        self.fatal.as_ref()
    }

    /// Returns `true` if this fault was raised via [`crate::raise_fatal_error`].
    #[must_use]
    pub fn is_fatal_error(&self) -> bool {
        self.fatal.is_some()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or(OPAQUE_PAYLOAD))
    }
}

/// The result of running a callback inside a catch scope.
///
/// # Examples
///
/// ```rust
/// use faultcatch::{catch_fault, Outcome};
///
/// match catch_fault(|| 40 + 2) {
///     Outcome::Completed(value) => assert_eq!(value, 42),
///     Outcome::Faulted(fault) => panic!("unexpected fault: {}", fault),
/// }
///
/// let empty: Vec<u32> = Vec::new();
/// assert!(catch_fault(|| empty[3]).is_faulted());
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The callback returned normally.
    Completed(T),
    /// The callback panicked; the panic was intercepted.
    Faulted(Fault),
}

impl<T> Outcome<T> {
    /// Returns `true` if the callback panicked.
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        matches!(self, Outcome::Faulted(_))
    }

    /// Returns `true` if the callback returned normally.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// The value returned by the callback, discarding any fault.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Faulted(_) => None,
        }
    }

    /// The intercepted fault, if any.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Faulted(fault) => Some(fault),
        }
    }

    /// Converts into a standard `Result`, with the fault as the error.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] if the callback panicked.
    pub fn into_result(self) -> std::result::Result<T, Fault> {
        match self {
            Outcome::Completed(value) => Ok(value),
            Outcome::Faulted(fault) => Err(fault),
        }
    }
}

impl<T> From<Outcome<T>> for bool {
    /// `true` when the outcome is a fault, matching the answer of
    /// [`crate::caught_exception`].
    fn from(outcome: Outcome<T>) -> Self {
        outcome.is_faulted()
    }
}
