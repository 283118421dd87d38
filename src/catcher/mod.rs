//! Running callbacks inside a catch-all scope.
//!
//! This module provides [`ExceptionCatcher`], which runs a caller supplied closure and
//! reports whether it faulted instead of letting the fault propagate. In Rust the platform
//! exception mechanism is the panic unwind, and the catch-all scope is
//! [`std::panic::catch_unwind`].
//!
//! # Key Components
//!
//! - [`caught_exception`] / [`ExceptionCatcher::caught_exception`] - Run a callback, answer `bool`
//! - [`catch_fault`] / [`ExceptionCatcher::catch`] - Run a callback, answer a tagged [`Outcome`]
//! - [`CatcherConfig`] - Controls how intercepted panics are reported
//!
//! # Fault Boundary
//!
//! Every *unwinding* panic raised while the callback runs is intercepted, whatever its payload.
//! This includes runtime traps Rust reports as panics: slice and `Vec` bounds checks,
//! `unwrap`/`expect` on `None` or `Err`, arithmetic overflow in debug builds, division by zero,
//! `RefCell` borrow violations.
//!
//! The following terminate the process and cannot be intercepted by any catch scope:
//!
//! - Builds with `panic = "abort"`
//! - `std::process::abort` and stack overflow
//! - A panic raised while another panic is already unwinding, including panics in `Drop`
//!   implementations during unwinding
//! - Foreign exceptions crossing an `extern "C"` boundary
//! - Signals such as `SIGSEGV` caused by memory corruption
//!
//! # Side Effects
//!
//! The callback runs exactly once, synchronously, on the calling thread. State it mutates
//! before the panic point is not rolled back. Callbacks are wrapped in
//! [`std::panic::AssertUnwindSafe`], so observing such partially updated state afterwards is
//! part of the contract rather than a compile error.
//!
//! # Examples
//!
//! ```rust
//! use faultcatch::caught_exception;
//!
//! assert!(!caught_exception(|| {}));
//!
//! let fixed = [1_u8, 2, 3];
//! let index = std::hint::black_box(fixed.len());
//! assert!(caught_exception(|| {
//!     let _value = fixed[index];
//! }));
//! ```

use std::panic::{self, AssertUnwindSafe};

use crate::utils::quiet::{self, ReportScope};

pub mod config;
pub mod outcome;

pub use config::CatcherConfig;
pub use outcome::{Fault, Outcome};

/// Runs callbacks and converts panics into values.
///
/// The catcher is stateless apart from its [`CatcherConfig`]: it can be shared between
/// threads, and calls are independent and reentrant. Catch scopes nest, so a callback may
/// itself use a catcher; the innermost scope intercepts first.
///
/// # Examples
///
/// ```rust
/// use faultcatch::{CatcherConfig, ExceptionCatcher};
///
/// // Static form with the default configuration
/// assert!(ExceptionCatcher::caught_exception(|| panic!("boom")));
///
/// // Configured instance
/// let catcher = ExceptionCatcher::with_config(CatcherConfig::verbose());
/// let outcome = catcher.catch(|| "ok");
/// assert_eq!(outcome.completed(), Some("ok"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExceptionCatcher {
    config: CatcherConfig,
}

impl ExceptionCatcher {
    /// Create a catcher with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catcher with a specific configuration.
    #[must_use]
    pub fn with_config(config: CatcherConfig) -> Self {
        ExceptionCatcher { config }
    }

    /// The configuration of this catcher.
    #[must_use]
    pub fn config(&self) -> &CatcherConfig {
        &self.config
    }

    /// Runs `handler` and returns `true` if it panicked, `false` if it completed.
    ///
    /// Uses the default configuration. The panic is intercepted and its payload discarded;
    /// it never propagates past this call.
    ///
    /// # Arguments
    ///
    /// * `handler` - The callback to run, invoked exactly once on the calling thread
    pub fn caught_exception<F>(handler: F) -> bool
    where
        F: FnOnce(),
    {
        Self::default().faulted(handler)
    }

    /// Runs `handler` with this catcher's configuration and returns `true` if it panicked.
    pub fn faulted<F>(&self, handler: F) -> bool
    where
        F: FnOnce(),
    {
        self.catch(handler).into()
    }

    /// Runs `f` and returns its value, or the intercepted fault.
    ///
    /// # Arguments
    ///
    /// * `f` - The callback to run, invoked exactly once on the calling thread
    ///
    /// # Returns
    ///
    /// [`Outcome::Completed`] with the callback's return value, or [`Outcome::Faulted`] with
    /// the panic reduced to a [`Fault`].
    pub fn catch<T, F>(&self, f: F) -> Outcome<T>
    where
        F: FnOnce() -> T,
    {
        let _scope = ReportScope::enter(self.config.quiet);

        let result = panic::catch_unwind(AssertUnwindSafe(f));
        let hidden = quiet::take_report();

        match result {
            Ok(value) => Outcome::Completed(value),
            Err(payload) => {
                let fault = Fault::from_payload(payload);
                if self.config.log_faults {
                    tracing::debug!(
                        fault = %fault,
                        fatal = fault.is_fatal_error(),
                        panic.location = hidden
                            .as_ref()
                            .map_or("unknown location", |report| report.location.as_str()),
                        "Intercepted fault in callback"
                    );
                }
                Outcome::Faulted(fault)
            }
        }
    }
}

/// Runs `handler` and returns `true` if it panicked, `false` if it completed.
///
/// Shorthand for [`ExceptionCatcher::caught_exception`].
///
/// # Examples
///
/// ```rust
/// use faultcatch::caught_exception;
///
/// let empty: Vec<i32> = Vec::new();
/// assert!(caught_exception(|| {
///     let _value = empty[0];
/// }));
/// assert!(!caught_exception(|| {
///     let _ = empty.first();
/// }));
/// ```
pub fn caught_exception<F>(handler: F) -> bool
where
    F: FnOnce(),
{
    ExceptionCatcher::caught_exception(handler)
}

/// Runs `f` with the default configuration and returns the tagged [`Outcome`].
///
/// Shorthand for `ExceptionCatcher::new().catch(f)`.
pub fn catch_fault<T, F>(f: F) -> Outcome<T>
where
    F: FnOnce() -> T,
{
    ExceptionCatcher::new().catch(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{count_events, out_of_bounds, CallCounter};

    #[test]
    fn test_noop_callback() {
        assert!(!caught_exception(|| {}));
    }

    #[test]
    fn test_out_of_bounds_empty_vec() {
        let empty: Vec<u8> = Vec::new();
        assert!(caught_exception(|| {
            out_of_bounds(&empty, 0);
        }));
    }

    #[test]
    fn test_out_of_bounds_fixed_array() {
        let fixed = [0_u16; 4];
        assert!(caught_exception(|| {
            out_of_bounds(&fixed, 4);
        }));
    }

    #[test]
    fn test_side_effect_before_fault_is_kept() {
        let counter = CallCounter::new();
        let faulted = caught_exception(|| {
            counter.hit();
            panic!("after side effect");
        });
        assert!(faulted);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_no_cross_contamination() {
        let first = caught_exception(|| panic!("first"));
        let second = caught_exception(|| {});
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn test_repeated_non_faulting_calls() {
        assert!(!caught_exception(|| {}));
        assert!(!caught_exception(|| {}));
    }

    #[test]
    fn test_callback_invoked_exactly_once() {
        let counter = CallCounter::new();
        assert!(!caught_exception(|| counter.hit()));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_runtime_traps_are_caught() {
        let none: Option<u8> = None;
        assert!(caught_exception(|| {
            let _ = none.unwrap();
        }));

        let divisor = std::hint::black_box(0_u32);
        assert!(caught_exception(|| {
            let _ = 10 / divisor;
        }));

        let cell = std::cell::RefCell::new(5);
        assert!(caught_exception(|| {
            let _first = cell.borrow_mut();
            let _second = cell.borrow_mut();
        }));
    }

    #[test]
    fn test_catch_returns_value() {
        let outcome = catch_fault(|| 6 * 7);
        assert_eq!(outcome, Outcome::Completed(42));
    }

    #[test]
    fn test_catch_keeps_message() {
        let outcome: Outcome<()> = catch_fault(|| panic!("bad state {}", 3));
        assert_eq!(outcome.fault().and_then(Fault::message), Some("bad state 3"));
    }

    #[test]
    fn test_nested_catch() {
        let outer = catch_fault(|| {
            let mut inner_depth = 0;
            let inner = caught_exception(|| {
                inner_depth = quiet::depth();
                panic!("inner");
            });
            assert!(inner);
            inner_depth
        });
        assert_eq!(outer, Outcome::Completed(2));
        assert_eq!(quiet::depth(), 0);
    }

    #[test]
    fn test_nested_catch_rethrow() {
        let outer = caught_exception(|| {
            if caught_exception(|| panic!("inner")) {
                panic!("rethrown");
            }
        });
        assert!(outer);
    }

    #[test]
    fn test_verbose_config_is_not_quiet() {
        let catcher = ExceptionCatcher::with_config(CatcherConfig::verbose());
        assert_eq!(catcher.catch(quiet::is_quiet), Outcome::Completed(false));
        assert!(!catcher.config().quiet);
    }

    #[test]
    fn test_verbose_nested_in_quiet_reports() {
        let verbose = ExceptionCatcher::with_config(CatcherConfig::verbose());
        let outer = catch_fault(|| {
            let inner = verbose.catch(quiet::is_quiet);
            (quiet::is_quiet(), inner.completed())
        });
        assert_eq!(outer, Outcome::Completed((true, Some(false))));
    }

    #[test]
    fn test_each_fault_logged_once() {
        let events = count_events(|| {
            assert!(caught_exception(|| panic!("logged")));
        });
        assert_eq!(events, 1);
    }

    #[test]
    fn test_log_faults_disabled_emits_nothing() {
        let catcher = ExceptionCatcher::with_config(CatcherConfig::new().with_log_faults(false));
        let events = count_events(|| {
            assert!(catcher.faulted(|| panic!("silent")));
        });
        assert_eq!(events, 0);
    }

    #[test]
    fn test_completion_not_logged() {
        let events = count_events(|| {
            assert!(!caught_exception(|| {}));
        });
        assert_eq!(events, 0);
    }

    #[test]
    fn test_hidden_report_cleared_after_catch() {
        assert!(caught_exception(|| panic!("first")));
        assert!(caught_exception(|| panic!("second")));
        assert_eq!(quiet::take_report(), None);
    }

    #[test]
    fn test_quiet_depth_balanced_after_fault() {
        assert!(caught_exception(|| panic!("unbalanced?")));
        assert_eq!(quiet::depth(), 0);
    }
}
