//! Panic reports on paths the catcher cannot intercept.
//!
//! Each scenario aborts (or must not abort) the whole process, so it runs in a child process:
//! the test binary re-executes itself, filtered to `scenario_entry`, with the scenario name in
//! an environment variable. The parent inspects the exit status and stderr.
//!
//! 1. A destructor panicking while a caught panic unwinds: both messages must reach stderr
//! 2. The first catch of the process running inside a destructor during unwinding

use std::{
    env,
    process::{Command, Output},
    thread,
};

use faultcatch::caught_exception;

const SCENARIO_VAR: &str = "FAULTCATCH_SCENARIO";

/// Panics from its destructor.
struct PanicOnDrop(&'static str);

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        panic!("{}", self.0);
    }
}

/// Catches from its destructor, which runs while the thread unwinds.
struct CatchOnDrop;

impl Drop for CatchOnDrop {
    fn drop(&mut self) {
        assert!(!caught_exception(|| {}));
    }
}

fn double_panic() {
    caught_exception(|| {
        let _guard = PanicOnDrop("SECOND_PANIC_FROM_DROP");
        panic!("FIRST_PANIC_IN_CALLBACK");
    });
}

fn catch_while_unwinding() {
    let joined = thread::spawn(|| {
        let _guard = CatchOnDrop;
        panic!("UNWINDING_THROUGH_CATCH");
    })
    .join();
    assert!(joined.is_err());

    // the hook can still be installed once the process is healthy again
    assert!(caught_exception(|| panic!("AFTER_UNWIND")));
}

/// Runs the scenario named in the environment; does nothing in a normal test run.
#[test]
fn scenario_entry() {
    match env::var(SCENARIO_VAR).as_deref() {
        Ok("double_panic") => double_panic(),
        Ok("catch_while_unwinding") => catch_while_unwinding(),
        _ => {}
    }
}

fn run_scenario(name: &str) -> Output {
    Command::new(env::current_exe().unwrap())
        .args(["scenario_entry", "--exact", "--nocapture", "--test-threads=1"])
        .env(SCENARIO_VAR, name)
        .output()
        .unwrap()
}

#[test]
fn double_panic_reports_both_messages() {
    let output = run_scenario("double_panic");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("FIRST_PANIC_IN_CALLBACK"),
        "first panic missing from stderr:\n{}",
        stderr
    );
    assert!(
        stderr.contains("SECOND_PANIC_FROM_DROP"),
        "second panic missing from stderr:\n{}",
        stderr
    );
}

#[test]
fn catch_while_unwinding_does_not_abort() {
    let output = run_scenario("catch_while_unwinding");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "scenario failed:\n{}", stderr);
    assert!(stderr.contains("UNWINDING_THROUGH_CATCH"));
    assert!(!stderr.contains("AFTER_UNWIND"));
}
