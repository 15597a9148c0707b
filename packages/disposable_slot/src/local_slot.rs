use std::any::type_name;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::{Disposable, TrySetOutcome};

/// The logical state of a local slot; same machine as the thread-safe slot.
enum LocalSlotState<R>
where
    R: ?Sized,
{
    Empty,
    Holding(Rc<R>),
    Disposed,
}

/// The single-threaded counterpart of [`DisposableSlot`][crate::DisposableSlot].
///
/// Same contract, same three-state machine, no atomics: a holder for at most
/// one disposable resource, assignable at most once, settled forever by
/// [`dispose`][Self::dispose]. Handles are `Rc<R>` instead of `Arc<R>` and the
/// slot is neither `Send` nor `Sync`.
///
/// Reentrancy is well defined: the state transition settles before any release
/// action runs, so a release action that calls back into the slot observes it
/// as disposed.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use disposable_slot::{LocalDisposableSlot, NoopDisposable, TrySetOutcome};
///
/// let slot = LocalDisposableSlot::new();
///
/// let outcome = slot.try_set(Rc::new(NoopDisposable));
/// assert!(matches!(outcome, TrySetOutcome::Assigned));
///
/// slot.dispose();
/// assert!(slot.is_disposed());
/// ```
pub struct LocalDisposableSlot<R>
where
    R: Disposable + ?Sized,
{
    /// The current state of the slot.
    ///
    /// Every access takes the state out of the cell, leaving `Disposed` in
    /// its place, and puts the real state back before any user code can run.
    /// The placeholder is never observable except in the one branch where it
    /// happens to also be the real next state.
    state: Cell<LocalSlotState<R>>,
}

impl<R> LocalDisposableSlot<R>
where
    R: Disposable + ?Sized,
{
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Cell::new(LocalSlotState::Empty),
        }
    }

    /// Checks whether the slot has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        let state = self.state.replace(LocalSlotState::Disposed);
        let is_disposed = matches!(&state, LocalSlotState::Disposed);
        self.state.set(state);

        is_disposed
    }

    /// Returns a handle to the held resource, or `None` if the slot is empty
    /// or already disposed.
    #[must_use]
    pub fn get(&self) -> Option<Rc<R>> {
        let state = self.state.replace(LocalSlotState::Disposed);

        let handle = match &state {
            LocalSlotState::Holding(resource) => Some(Rc::clone(resource)),
            LocalSlotState::Empty | LocalSlotState::Disposed => None,
        };

        self.state.set(state);

        handle
    }

    /// Attempts to place `resource` into the slot.
    ///
    /// This is the non-escalating assignment: every outcome is an ordinary
    /// value. At most one `try_set` call on a given slot ever returns
    /// [`TrySetOutcome::Assigned`].
    ///
    /// Offering a resource to an already disposed slot releases it
    /// synchronously inside this call, with the outcome
    /// [`TrySetOutcome::Disposed`]. If another resource is already held, the
    /// offered one is handed back untouched inside
    /// [`TrySetOutcome::AlreadyAssigned`].
    pub fn try_set(&self, resource: Rc<R>) -> TrySetOutcome<Rc<R>> {
        match self.state.replace(LocalSlotState::Disposed) {
            LocalSlotState::Empty => {
                self.state.set(LocalSlotState::Holding(resource));
                TrySetOutcome::Assigned
            }
            state @ LocalSlotState::Holding(_) => {
                self.state.set(state);
                TrySetOutcome::AlreadyAssigned(resource)
            }
            LocalSlotState::Disposed => {
                // The placeholder already put the final state back into the
                // cell, so the slot is settled before the release runs and a
                // reentrant call sees it as disposed.
                resource.dispose();
                TrySetOutcome::Disposed
            }
        }
    }

    /// Places `resource` into the slot, treating a second assignment as a
    /// caller error.
    ///
    /// Assigning after disposal is not an error: the resource is released
    /// synchronously and the call returns normally.
    ///
    /// # Panics
    ///
    /// Panics if a resource has already been assigned to this slot. The
    /// offered resource is not released in that case; callers that want to
    /// recover it should use [`try_set`][Self::try_set] instead.
    pub fn set(&self, resource: Rc<R>) {
        match self.try_set(resource) {
            TrySetOutcome::Assigned | TrySetOutcome::Disposed => {}
            TrySetOutcome::AlreadyAssigned(_) => {
                panic!("a resource has already been assigned to this slot")
            }
        }
    }

    /// Disposes the slot, releasing the held resource exactly once if one
    /// was assigned.
    ///
    /// Idempotent: calls after the first return without side effects. A
    /// failure raised by the release action propagates from the one call that
    /// ran it; the slot is already disposed by that point.
    pub fn dispose(&self) {
        match self.state.replace(LocalSlotState::Disposed) {
            LocalSlotState::Holding(resource) => {
                // The state has already settled, so the release action may
                // freely call back into the slot.
                resource.dispose();
            }
            LocalSlotState::Empty | LocalSlotState::Disposed => {}
        }
    }
}

impl<R> Default for LocalDisposableSlot<R>
where
    R: Disposable + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Disposable for LocalDisposableSlot<R>
where
    R: Disposable + ?Sized,
{
    fn dispose(&self) {
        Self::dispose(self);
    }
}

impl<R> fmt::Debug for LocalDisposableSlot<R>
where
    R: Disposable + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.replace(LocalSlotState::Disposed);

        let name = match &state {
            LocalSlotState::Empty => "empty",
            LocalSlotState::Holding(_) => "holding",
            LocalSlotState::Disposed => "disposed",
        };

        self.state.set(state);

        f.debug_struct(type_name::<Self>())
            .field("state", &name)
            .finish()
    }
}
