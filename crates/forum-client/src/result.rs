//! Observable result state for procedure invocations.
//!
//! Each logical query or mutation owns one [`QueryCell`]. Invocations drive
//! it through `Idle → Loading → {Success, Failure}`; a fresh invocation
//! returns the cell to `Loading`, clears any terminal error, and keeps the
//! previous data visible until new data lands (stale-while-revalidate).
//!
//! Re-invocation supersedes whatever is still in flight: [`QueryCell::begin`]
//! bumps a generation counter and [`QueryCell::resolve`] discards any
//! completion carrying a stale generation, so a slow old response can never
//! overwrite a newer one.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::ProcedureError;

/// Lifecycle phase of a procedure invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No invocation has started yet.
    Idle,
    /// An invocation is in flight.
    Loading,
    /// The latest invocation completed with data.
    Success,
    /// The latest invocation completed with an error.
    Failure,
}

/// Snapshot of an invocation's observable state.
///
/// Invariants:
/// - `is_loading()` is true iff the phase is [`Phase::Loading`];
/// - `error()` is present iff the phase is [`Phase::Failure`];
/// - `data()` survives re-invocation and failures until fresh data arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    phase: Phase,
    data: Option<T>,
    error: Option<ProcedureError>,
    generation: u64,
}

impl<T> QueryResult<T> {
    /// The initial state before any invocation.
    pub const fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
            generation: 0,
        }
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// True from invocation until the first terminal state.
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// The most recent successful payload, if any.
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The terminal error of the latest invocation, if it failed.
    pub const fn error(&self) -> Option<&ProcedureError> {
        self.error.as_ref()
    }

    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        // Stale data stays visible while the refresh is in flight; a stale
        // error would be misleading, so it is dropped immediately.
        self.error = None;
        self.generation
    }

    fn resolve(&mut self, generation: u64, outcome: Result<T, ProcedureError>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding superseded procedure response"
            );
            return false;
        }
        match outcome {
            Ok(data) => {
                self.phase = Phase::Success;
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => {
                self.phase = Phase::Failure;
                self.error = Some(error);
            }
        }
        true
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Shared handle to a result cell: views take snapshots, the client drives
/// transitions.
#[derive(Debug)]
pub struct QueryCell<T>(Arc<Mutex<QueryResult<T>>>);

impl<T> Clone for QueryCell<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for QueryCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryCell<T> {
    /// A cell in the idle state.
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(QueryResult::idle())))
    }

    fn lock(&self) -> MutexGuard<'_, QueryResult<T>> {
        // A panicked holder cannot leave the state machine mid-transition;
        // recover the guard rather than poisoning every later observer.
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Start a new invocation, returning its generation token.
    pub fn begin(&self) -> u64 {
        self.lock().begin()
    }

    /// Complete the invocation identified by `generation`.
    ///
    /// Returns false when the completion was superseded and discarded.
    pub fn resolve(&self, generation: u64, outcome: Result<T, ProcedureError>) -> bool {
        self.lock().resolve(generation, outcome)
    }

    /// Run `read` against the current state without cloning it.
    pub fn with<R>(&self, read: impl FnOnce(&QueryResult<T>) -> R) -> R {
        read(&self.lock())
    }
}

impl<T: Clone> QueryCell<T> {
    /// A point-in-time copy of the observable state.
    pub fn snapshot(&self) -> QueryResult<T> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ProcedureError};

    fn failure(message: &str) -> ProcedureError {
        ProcedureError::new(ErrorCode::InternalError, message)
    }

    #[test]
    fn starts_idle_with_nothing_observable() {
        let cell = QueryCell::<u32>::new();
        let snapshot = cell.snapshot();
        assert_eq!(snapshot.phase(), Phase::Idle);
        assert!(!snapshot.is_loading());
        assert!(snapshot.data().is_none());
        assert!(snapshot.error().is_none());
    }

    #[test]
    fn loading_and_terminal_error_are_mutually_exclusive() {
        let cell = QueryCell::<u32>::new();
        let generation = cell.begin();
        cell.resolve(generation, Err(failure("boom")));
        let failed = cell.snapshot();
        assert_eq!(failed.phase(), Phase::Failure);
        assert!(failed.error().is_some());

        // Re-invoking clears the error before anything completes.
        cell.begin();
        let reloading = cell.snapshot();
        assert!(reloading.is_loading());
        assert!(reloading.error().is_none());
    }

    #[test]
    fn previous_data_stays_visible_while_revalidating() {
        let cell = QueryCell::new();
        let first = cell.begin();
        cell.resolve(first, Ok(41));

        cell.begin();
        let revalidating = cell.snapshot();
        assert!(revalidating.is_loading());
        assert_eq!(revalidating.data(), Some(&41));
    }

    #[test]
    fn failure_keeps_previous_data() {
        let cell = QueryCell::new();
        let first = cell.begin();
        cell.resolve(first, Ok(41));
        let second = cell.begin();
        cell.resolve(second, Err(failure("refresh failed")));

        let snapshot = cell.snapshot();
        assert_eq!(snapshot.phase(), Phase::Failure);
        assert_eq!(snapshot.data(), Some(&41));
        assert!(snapshot.error().is_some());
    }

    #[test]
    fn stale_completions_are_discarded() {
        let cell = QueryCell::new();
        let first = cell.begin();
        let second = cell.begin();

        cell.resolve(second, Ok(2));
        // The superseded response arrives late and must not overwrite.
        assert!(!cell.resolve(first, Ok(1)));

        let snapshot = cell.snapshot();
        assert_eq!(snapshot.phase(), Phase::Success);
        assert_eq!(snapshot.data(), Some(&2));
    }

    #[test]
    fn stale_failure_cannot_taint_a_fresh_success() {
        let cell = QueryCell::new();
        let first = cell.begin();
        let second = cell.begin();
        cell.resolve(second, Ok(2));
        assert!(!cell.resolve(first, Err(failure("slow and wrong"))));
        assert!(cell.snapshot().error().is_none());
    }
}
