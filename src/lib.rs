// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # faultcatch
//!
//! Run a closure and find out whether it faulted, without the fault taking down the caller.
//!
//! `faultcatch` is a small building block for test harnesses that need to assert that an
//! operation panics, or that it does not, while the test itself keeps running. The primitive
//! is a catch-all scope around Rust's panic unwind: the callback runs exactly once on the
//! calling thread, and any unwinding panic is intercepted and turned into a value.
//!
//! ## Features
//!
//! - **Boolean answer** - [`caught_exception`] tells you whether the callback panicked
//! - **Tagged answer** - [`catch_fault`] returns an [`Outcome`] with the value or the [`Fault`]
//! - **Quiet by default** - intercepted panics are logged through `tracing` instead of printing
//!   the usual `thread '...' panicked at` report
//! - **Fatal errors** - [`raise_fatal_error`] and [`expect_fatal_error`] let code under test
//!   give up with a message that tests can check
//! - **Assertion macros** - [`assert_faults!`] and [`assert_completes!`]
//!
//! ## Quick Start
//!
//! ```rust
//! use faultcatch::prelude::*;
//!
//! // A callback that does nothing does not fault
//! assert!(!caught_exception(|| {}));
//!
//! // Out of bounds access on an empty container faults
//! let empty: Vec<u8> = Vec::new();
//! assert!(caught_exception(|| {
//!     let _value = empty[0];
//! }));
//!
//! // Side effects before the fault are kept
//! let mut counter = 0;
//! assert!(caught_exception(|| {
//!     counter += 1;
//!     panic!("after increment");
//! }));
//! assert_eq!(counter, 1);
//! ```
//!
//! ## Fault Boundary
//!
//! Only *unwinding* panics are intercepted. This covers explicit `panic!`, failed `unwrap`
//! and `expect`, bounds checks, division by zero, debug-build arithmetic overflow and
//! `RefCell` borrow errors. Aborting builds (`panic = "abort"`), `std::process::abort`,
//! stack overflow, double panics, foreign exceptions and memory-corruption signals terminate
//! the process no matter what. See the [`catcher`] module documentation for details.
//!
//! ## Error Handling
//!
//! The catching primitives never fail. The expectation helpers return [`Result<T>`](Result):
//!
//! ```rust
//! use faultcatch::{expect_fatal_error, raise_fatal_error, Error};
//!
//! match expect_fatal_error(Some("expected"), || raise_fatal_error("actual")) {
//!     Ok(()) => println!("matched"),
//!     Err(Error::FatalErrorMessageMismatch { expected, actual }) => {
//!         println!("wanted {}, got {}", expected, actual)
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Logging
//!
//! Intercepted faults are emitted as `tracing` events at `debug` level. The library never
//! installs a subscriber; attach one in your test harness to see them.
#[macro_use]
mod macros;

pub(crate) mod error;
pub(crate) mod utils;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types, functions and macros.
///
/// # Example
///
/// ```rust
/// use faultcatch::prelude::*;
///
/// let outcome = catch_fault(|| 1 + 1);
/// assert_eq!(outcome, Outcome::Completed(2));
/// ```
pub mod prelude;

/// Running callbacks inside a catch-all scope
///
/// This module contains the [`ExceptionCatcher`], its configuration and the tagged
/// [`Outcome`] it produces.
///
/// # Key Types
///
/// - [`catcher::ExceptionCatcher`] - Runs callbacks and converts panics into values
/// - [`catcher::Outcome`] - `Completed(value)` or `Faulted(fault)`
/// - [`catcher::Fault`] - An intercepted panic, reduced to its message
/// - [`catcher::CatcherConfig`] - Reporting options
pub mod catcher;

/// Catchable fatal errors and expectations on them
pub mod fatal;

/// `faultcatch` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `faultcatch` Error type
///
/// Returned by the expectation helpers when a callback did not behave as the test expected.
pub use error::Error;

/// Run a callback and report whether it panicked.
///
/// See [`catcher::caught_exception`].
pub use catcher::caught_exception;

/// Run a callback and return a tagged [`Outcome`].
///
/// See [`catcher::catch_fault`].
pub use catcher::catch_fault;

pub use catcher::{CatcherConfig, ExceptionCatcher, Fault, Outcome};

pub use fatal::{expect_fatal_error, expect_no_fault, raise_fatal_error, FatalError};
