//! Thread-scoped suppression of the default panic report.
//!
//! `catch_unwind` intercepts the unwind, but the panic hook has already run by then and the
//! standard hook prints `thread '...' panicked at ...` to stderr. For a test asserting that a
//! fault happens this output is noise.
//!
//! The global hook is never swapped per catch. A single wrapper hook is installed once per
//! process and decides per panicking thread, based on the innermost [`ReportScope`]:
//!
//! - Innermost scope is quiet: the report is held back as a [`HiddenReport`] for the catcher
//!   to pick up, and the previous hook is skipped.
//! - Innermost scope is not quiet, or there is no scope: the previous hook runs unchanged.
//!
//! A report is only held back when the panic can still reach a catch scope:
//!
//! - With `panic = "abort"` nothing can be caught, so every report goes to the previous hook.
//! - A second panic while a report is still held back in the same scope (typically a `Drop`
//!   panicking during unwinding) aborts the process. The held-back report is replayed to
//!   stderr first, then the second panic and every later one in that scope go to the
//!   previous hook.
//!
//! # Thread Safety
//!
//! Scope state is thread-local. Panics on other threads are never silenced, and the
//! catcher holds no lock while a callback runs.

use std::{
    cell::RefCell,
    io::Write,
    marker::PhantomData,
    panic::{self, PanicHookInfo},
    sync::Once,
    thread,
};

use crate::catcher::outcome::{payload_message, OPAQUE_PAYLOAD};

/// A panic report that was kept off stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HiddenReport {
    /// Panic message, or a placeholder for opaque payloads
    pub(crate) message: String,
    /// `file:line:column` of the panic
    pub(crate) location: String,
    /// Name of the panicking thread
    pub(crate) thread: String,
}

impl HiddenReport {
    fn capture(info: &PanicHookInfo<'_>) -> Self {
        let location = info.location().map_or_else(
            || "unknown location".to_string(),
            |location| {
                format!(
                    "{}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                )
            },
        );

        HiddenReport {
            message: payload_message(info.payload())
                .unwrap_or(OPAQUE_PAYLOAD)
                .to_string(),
            location,
            thread: thread::current().name().unwrap_or("<unnamed>").to_string(),
        }
    }

    /// Writes the report in the format of the standard hook.
    fn replay(&self) {
        let _ = writeln!(
            std::io::stderr(),
            "thread '{}' panicked at {}:\n{}",
            self.thread,
            self.location,
            self.message
        );
    }
}

/// State of the innermost scope on a thread.
#[derive(Debug)]
struct ScopeState {
    quiet: bool,
    depth: usize,
    hidden: Option<HiddenReport>,
    /// Set once a second panic hit this scope; the process is going down
    aborting: bool,
}

thread_local! {
    static SCOPE: RefCell<Option<ScopeState>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// What the wrapper hook does with a panic.
#[derive(Debug, PartialEq, Eq)]
enum Disposition {
    Hide,
    Report,
    ReplayAndReport(HiddenReport),
}

/// Installs the wrapper panic hook, once per process.
///
/// The hook present at first use (usually the standard one, or the test harness hook) is
/// kept and called for every panic that is not held back. A hook installed later with
/// `std::panic::set_hook` replaces the wrapper entirely.
///
/// `take_hook` panics on a thread that is already panicking, so nothing is installed when
/// called from a `Drop` during unwinding; a later call on a healthy thread installs it.
pub(crate) fn install_hook() {
    if thread::panicking() {
        return;
    }

    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            match disposition(|| HiddenReport::capture(info)) {
                Disposition::Hide => {}
                Disposition::Report => previous(info),
                Disposition::ReplayAndReport(first) => {
                    first.replay();
                    previous(info);
                }
            }
        }));
    });
}

/// Decides what happens to a panic on the current thread, recording it if it is held back.
///
/// Never panics: it runs inside the panic hook.
fn disposition<C>(capture: C) -> Disposition
where
    C: FnOnce() -> HiddenReport,
{
    if !cfg!(panic = "unwind") {
        return Disposition::Report;
    }

    SCOPE
        .try_with(|scope| {
            let Ok(mut scope) = scope.try_borrow_mut() else {
                return Disposition::Report;
            };

            match scope.as_mut() {
                Some(state) if state.quiet && !state.aborting => match state.hidden.take() {
                    // the first panic has not reached the catcher yet
                    Some(first) => {
                        state.aborting = true;
                        Disposition::ReplayAndReport(first)
                    }
                    None => {
                        state.hidden = Some(capture());
                        Disposition::Hide
                    }
                },
                _ => Disposition::Report,
            }
        })
        .unwrap_or(Disposition::Report)
}

/// Takes the report held back in the innermost scope, if any.
///
/// Called once `catch_unwind` has returned, which marks the held-back panic as caught.
pub(crate) fn take_report() -> Option<HiddenReport> {
    SCOPE
        .try_with(|scope| {
            scope
                .try_borrow_mut()
                .ok()
                .and_then(|mut scope| scope.as_mut().and_then(|state| state.hidden.take()))
        })
        .ok()
        .flatten()
}

/// Returns `true` if panics on the current thread are currently held back.
pub(crate) fn is_quiet() -> bool {
    SCOPE
        .try_with(|scope| {
            scope
                .try_borrow()
                .ok()
                .and_then(|scope| scope.as_ref().map(|state| state.quiet))
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

/// Current nesting depth of scopes on this thread.
#[cfg(test)]
pub(crate) fn depth() -> usize {
    SCOPE
        .try_with(|scope| scope.borrow().as_ref().map_or(0, |state| state.depth))
        .unwrap_or(0)
}

/// RAII marker for a catch scope on the current thread.
///
/// Entering makes this scope the innermost one, dropping restores the enclosing scope
/// including any report it still holds back. Because the guard lives outside the
/// `catch_unwind` call, the state is restored even when the callback unwinds.
///
/// The guard is neither `Send` nor `Sync`: it must be dropped on the thread that created it.
pub(crate) struct ReportScope {
    previous: Option<ScopeState>,
    _not_send: PhantomData<*const ()>,
}

impl ReportScope {
    /// Enters a scope. With `quiet` set, installs the wrapper hook if needed and holds back
    /// reports of panics raised inside the scope.
    pub(crate) fn enter(quiet: bool) -> Self {
        if quiet {
            install_hook();
        }

        let previous = SCOPE
            .try_with(|scope| {
                let mut scope = scope.borrow_mut();
                let depth = scope.as_ref().map_or(0, |state| state.depth) + 1;
                scope.replace(ScopeState {
                    quiet,
                    depth,
                    hidden: None,
                    aborting: false,
                })
            })
            .ok()
            .flatten();

        ReportScope {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ReportScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        let _ = SCOPE.try_with(|scope| {
            if let Ok(mut scope) = scope.try_borrow_mut() {
                *scope = previous;
            }
        });
    }
}
