//! # faultcatch Prelude
//!
//! This module provides a convenient prelude for the most commonly used items of the
//! faultcatch library. Import it with a glob to get the catching primitives, the expectation
//! helpers and the assertion macros in one line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The error type returned by the expectation helpers
pub use crate::Error;

/// The result type used throughout faultcatch
pub use crate::Result;

// ================================================================================================
// Catching
// ================================================================================================

/// Catching primitives
pub use crate::{catch_fault, caught_exception};

/// Configurable catcher and its output
pub use crate::{CatcherConfig, ExceptionCatcher, Fault, Outcome};

// ================================================================================================
// Fatal Errors
// ================================================================================================

/// Raising and expecting fatal errors
pub use crate::{expect_fatal_error, expect_no_fault, raise_fatal_error, FatalError};

// ================================================================================================
// Macros
// ================================================================================================

/// Assertion and fatal error macros
pub use crate::{assert_completes, assert_faults, fatal_error};
