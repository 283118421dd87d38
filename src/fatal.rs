//! Catchable fatal errors and expectations on them.
//!
//! Code under test that hits an unrecoverable state can call [`raise_fatal_error`] (or the
//! [`crate::fatal_error!`] macro) instead of a bare `panic!`. The raised panic carries a typed
//! [`FatalError`] payload, so a test can check not only *that* the code gave up, but also *why*,
//! using [`expect_fatal_error`].
//!
//! Outside a catch scope a fatal error behaves like any other panic.
//!
//! # Examples
//!
//! ```rust
//! use faultcatch::{expect_fatal_error, fatal_error};
//!
//! fn dispatch(depth: usize) {
//!     if depth > 0 {
//!         fatal_error!("dispatch re-entered at depth {}", depth);
//!     }
//! }
//!
//! assert!(expect_fatal_error(Some("dispatch re-entered at depth 1"), || dispatch(1)).is_ok());
//! assert!(expect_fatal_error(None, || dispatch(0)).is_err());
//! ```

use std::{fmt, panic};

use crate::{
    catcher::{catch_fault, Outcome},
    Error, Result,
};

/// Payload of a panic raised through [`raise_fatal_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    /// Reason given by the caller
    pub message: String,
    /// Source file of the `raise_fatal_error` call
    pub file: &'static str,
    /// Source line of the `raise_fatal_error` call
    pub line: u32,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fatal error - {}:{}: {}", self.file, self.line, self.message)
    }
}

/// Aborts the current computation with a [`FatalError`].
///
/// The location recorded in the payload is the caller's. The call never returns: it unwinds
/// with the fatal error as panic payload, which [`crate::ExceptionCatcher`] intercepts like any
/// other panic and which [`expect_fatal_error`] can inspect.
///
/// # Arguments
///
/// * `message` - Why execution cannot continue
#[track_caller]
pub fn raise_fatal_error(message: impl Into<String>) -> ! {
    let location = panic::Location::caller();
    let fatal = FatalError {
        message: message.into(),
        file: location.file(),
        line: location.line(),
    };

    tracing::trace!(
        fatal.msg = %fatal.message,
        fatal.file = fatal.file,
        fatal.line = fatal.line,
        "Raising fatal error"
    );

    panic::panic_any(fatal)
}

/// Runs `test_case` and checks that it raised a fatal error.
///
/// # Arguments
///
/// * `expected_message` - When `Some`, the fatal error must carry exactly this message
/// * `test_case` - The callback expected to raise the fatal error
///
/// # Errors
///
/// - [`Error::FatalErrorNotRaised`] if the callback completed
/// - [`Error::FatalErrorMessageMismatch`] if the message differs from `expected_message`
/// - [`Error::UnexpectedFault`] if the callback panicked without a [`FatalError`] payload
pub fn expect_fatal_error<T, F>(expected_message: Option<&str>, test_case: F) -> Result<()>
where
    F: FnOnce() -> T,
{
    let fault = match catch_fault(test_case) {
        Outcome::Completed(_) => return Err(Error::FatalErrorNotRaised),
        Outcome::Faulted(fault) => fault,
    };

    let Some(fatal) = fault.fatal_error() else {
        return Err(Error::UnexpectedFault(fault.to_string()));
    };

    match expected_message {
        Some(expected) if expected != fatal.message => Err(Error::FatalErrorMessageMismatch {
            expected: expected.to_string(),
            actual: fatal.message.clone(),
        }),
        _ => Ok(()),
    }
}

/// Runs `f` and returns its value, turning any panic into [`Error::UnexpectedFault`].
///
/// # Errors
///
/// Returns [`Error::UnexpectedFault`] carrying the panic message if `f` panicked.
pub fn expect_no_fault<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    catch_fault(f)
        .into_result()
        .map_err(|fault| Error::UnexpectedFault(fault.to_string()))
}
