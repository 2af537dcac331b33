//! The error register: outcome of the most recent fallible entry point.
//!
//! Generated code calls an entry point and then reads [`last_error`] before
//! trusting the returned value. Only the entry points in this crate write
//! the register.

use std::cell::RefCell;

use tracing::{debug, trace};

use crate::fault::{Checked, ErrorKind};
use crate::settings;

/// Register slot plus per-thread counters for the status snapshot.
pub(crate) struct RegisterState {
    pub last: ErrorKind,
    pub calls: u64,
    pub faults: [u64; ErrorKind::ALL.len()],
}

impl RegisterState {
    const fn new() -> Self {
        Self {
            last: ErrorKind::NoError,
            calls: 0,
            faults: [0; ErrorKind::ALL.len()],
        }
    }
}

thread_local! {
    /// Per-thread register.
    ///
    /// Program threads each see only their own outcomes, so "read the
    /// register right after the call" holds without locking.
    static REGISTER: RefCell<RegisterState> = const { RefCell::new(RegisterState::new()) };
}

/// Start a fallible call: optimistically record `NoError`.
pub(crate) fn begin(op: &'static str) {
    trace!(op, "runtime call");
    REGISTER.with(|cell| {
        let mut reg = cell.borrow_mut();
        reg.last = ErrorKind::NoError;
        reg.calls += 1;
    });
}

/// Record a failed validation for the call in progress.
pub(crate) fn raise(op: &'static str, kind: ErrorKind, detail: &dyn std::fmt::Display) {
    if settings::trace_faults() {
        debug!(op, error = %kind, "{}", detail);
    }
    REGISTER.with(|cell| {
        let mut reg = cell.borrow_mut();
        reg.last = kind;
        reg.faults[kind.code() as usize] += 1;
    });
}

/// Outcome of the most recent fallible call on this thread.
pub fn last_error() -> ErrorKind {
    REGISTER.with(|cell| cell.borrow().last)
}

/// Reset the register to `NoError`. Counters are kept.
pub fn clear() {
    REGISTER.with(|cell| cell.borrow_mut().last = ErrorKind::NoError);
}

/// Run `call` and pair its value with the register state it leaves.
///
/// The register is cleared first, so a call that never touches it reports
/// `NoError` rather than a stale outcome.
pub fn checked<T>(call: impl FnOnce() -> T) -> Checked<T> {
    clear();
    let value = call();
    Checked {
        value,
        error: last_error(),
    }
}

/// Execute a closure with a read reference to this thread's register.
pub(crate) fn with_state<R>(f: impl FnOnce(&RegisterState) -> R) -> R {
    REGISTER.with(|cell| f(&cell.borrow()))
}

/// Zero the counters and clear the register.
pub(crate) fn reset_state() {
    REGISTER.with(|cell| *cell.borrow_mut() = RegisterState::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_sets_no_error() {
        reset_state();
        raise("test", ErrorKind::CastError, &"bad");
        assert_eq!(last_error(), ErrorKind::CastError);
        begin("test");
        assert_eq!(last_error(), ErrorKind::NoError);
    }

    #[test]
    fn test_register_survives_unrelated_reads() {
        reset_state();
        begin("test");
        raise("test", ErrorKind::NodeNotInGraph, &"node 9");
        assert_eq!(last_error(), ErrorKind::NodeNotInGraph);
        assert_eq!(last_error(), ErrorKind::NodeNotInGraph);
    }

    #[test]
    fn test_counters() {
        reset_state();
        begin("a");
        begin("b");
        raise("b", ErrorKind::GraphSizeMismatch, &"3 vs 4");
        with_state(|s| {
            assert_eq!(s.calls, 2);
            assert_eq!(s.faults[ErrorKind::GraphSizeMismatch.code() as usize], 1);
        });
        reset_state();
        with_state(|s| assert_eq!(s.calls, 0));
    }

    #[test]
    fn test_checked_clears_stale_state() {
        reset_state();
        raise("old", ErrorKind::CastError, &"stale");
        let out = checked(|| 5);
        assert_eq!(out.value, 5);
        assert_eq!(out.error, ErrorKind::NoError);
    }

    #[test]
    fn test_register_is_per_thread() {
        reset_state();
        raise("main", ErrorKind::CastError, &"here");
        let other = std::thread::spawn(last_error).join().unwrap();
        assert_eq!(other, ErrorKind::NoError);
        assert_eq!(last_error(), ErrorKind::CastError);
    }
}
