//! Configuration for the exception catcher.

/// Configuration for an [`crate::ExceptionCatcher`].
///
/// Controls how intercepted panics are reported. Neither option changes *whether* a panic
/// is caught; every unwinding panic is intercepted regardless of configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatcherConfig {
    /// Suppress the default `thread '...' panicked at` report while a callback runs
    /// (default: `true`).
    ///
    /// The panic location of a suppressed report is attached to the fault event instead (see
    /// `log_faults`). Only panics on the thread running the callback are affected, and panics
    /// that abort the process are always reported.
    pub quiet: bool,

    /// Log every intercepted fault as exactly one `tracing` debug event (default: `true`).
    pub log_faults: bool,
}

impl Default for CatcherConfig {
    fn default() -> Self {
        Self {
            quiet: true,
            log_faults: true,
        }
    }
}

impl CatcherConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that leaves panic reporting untouched.
    ///
    /// The standard panic hook prints as usual and no fault events are logged. Useful when
    /// debugging a test whose expected fault is not the one actually raised.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            quiet: false,
            log_faults: false,
        }
    }

    /// Set whether the default panic report is suppressed.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Set whether intercepted faults are logged.
    #[must_use]
    pub fn with_log_faults(mut self, log_faults: bool) -> Self {
        self.log_faults = log_faults;
        self
    }
}
