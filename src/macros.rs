/// Raise a [`FatalError`](crate::FatalError) with a formatted message.
///
/// Records the location of the macro invocation. A lone string literal is formatted, so
/// inline arguments such as `{limit}` capture variables the way `panic!` does.
///
/// ```rust
/// use faultcatch::{caught_exception, fatal_error};
///
/// let limit = 3;
/// assert!(caught_exception(|| fatal_error!("limit {} exceeded", limit)));
/// assert!(caught_exception(|| fatal_error!("limit {limit} exceeded")));
/// ```
#[macro_export]
macro_rules! fatal_error {
    // Literal version, captures inline arguments like `panic!`
    ($msg:literal) => {
        $crate::raise_fatal_error(format!($msg))
    };

    // Single message version
    ($msg:expr) => {
        $crate::raise_fatal_error($msg)
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        $crate::raise_fatal_error(format!($fmt, $($arg)*))
    };
}

/// Assert that evaluating an expression faults.
///
/// The expression runs inside [`caught_exception`](crate::caught_exception); the assertion
/// fails if it completes normally.
///
/// ```rust
/// use faultcatch::assert_faults;
///
/// let empty: Vec<u8> = Vec::new();
/// assert_faults!(empty[0]);
/// assert_faults!(empty[1], "index {} must be out of range", 1);
/// ```
#[macro_export]
macro_rules! assert_faults {
    ($e:expr) => {
        assert!(
            $crate::caught_exception(|| {
                $e;
            }),
            "expected `{}` to fault, but it completed",
            stringify!($e)
        )
    };

    ($e:expr, $($arg:tt)+) => {
        assert!(
            $crate::caught_exception(|| {
                $e;
            }),
            $($arg)+
        )
    };
}

/// Assert that evaluating an expression completes, yielding its value.
///
/// On a fault the assertion fails with the intercepted panic message.
///
/// ```rust
/// use faultcatch::assert_completes;
///
/// let values = vec![1, 2, 3];
/// let first = assert_completes!(values[0]);
/// assert_eq!(first, 1);
/// ```
#[macro_export]
macro_rules! assert_completes {
    ($e:expr) => {
        match $crate::catch_fault(|| $e) {
            $crate::Outcome::Completed(value) => value,
            $crate::Outcome::Faulted(fault) => panic!(
                "expected `{}` to complete, but it faulted: {}",
                stringify!($e),
                fault
            ),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::test::out_of_bounds;

    #[test]
    fn test_assert_faults() {
        let empty: Vec<u32> = Vec::new();
        assert_faults!(out_of_bounds(&empty, 2));
        assert_faults!(panic!("boom"), "custom message {}", 1);
    }

    #[test]
    #[should_panic(expected = "expected `()` to fault, but it completed")]
    fn test_assert_faults_on_completion() {
        assert_faults!(());
    }

    #[test]
    fn test_assert_completes() {
        let values = [4_u8, 5];
        assert_eq!(assert_completes!(out_of_bounds(&values, 1)), 5);
    }

    #[test]
    #[should_panic(expected = "but it faulted: no value")]
    fn test_assert_completes_on_fault() {
        let none: Option<u8> = None;
        let _ = assert_completes!(none.expect("no value"));
    }
}
