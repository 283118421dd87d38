use thiserror::Error;

/// The generic Error type, returned by the expectation helpers of this library.
///
/// The catching primitives themselves never fail: [`crate::caught_exception`] and
/// [`crate::catch_fault`] turn every fault into a value. This enum is only produced by
/// helpers that compare what a callback did against what a test expected it to do.
///
/// # Error Categories
///
/// ## Fatal Error Expectations
/// - [`Error::FatalErrorNotRaised`] - The callback completed without raising a fatal error
/// - [`Error::FatalErrorMessageMismatch`] - A fatal error was raised with a different message
///
/// ## Fault Expectations
/// - [`Error::UnexpectedFault`] - The callback panicked where it was not supposed to
///
/// # Examples
///
/// ```rust
/// use faultcatch::{expect_fatal_error, Error};
///
/// match expect_fatal_error(Some("boom"), || {}) {
///     Ok(()) => println!("fatal error raised as expected"),
///     Err(Error::FatalErrorNotRaised) => println!("callback completed normally"),
///     Err(e) => println!("other mismatch: {}", e),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The callback completed normally, but a fatal error was expected.
    #[error("Expected a fatal error to be raised, but the callback completed")]
    FatalErrorNotRaised,

    /// A fatal error was raised, but its message differs from the expected one.
    ///
    /// # Fields
    ///
    /// * `expected` - The message the test asked for
    /// * `actual` - The message the fatal error was raised with
    #[error("Fatal error raised with message {actual:?}, expected {expected:?}")]
    FatalErrorMessageMismatch {
        /// The message the test asked for
        expected: String,
        /// The message the fatal error carried
        actual: String,
    },

    /// The callback panicked with something that was not expected.
    ///
    /// Carries the panic message if the payload was a string, or a placeholder
    /// for opaque payloads.
    #[error("Unexpected fault - {0}")]
    UnexpectedFault(String),
}
