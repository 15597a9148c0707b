use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::{Disposable, TrySetOutcome};

/// The logical state of a slot.
///
/// Transitions only move forward: `Empty` to `Holding` to `Disposed`, or
/// `Empty` straight to `Disposed`. Nothing ever leaves `Disposed` and nothing
/// ever re-enters `Empty`.
enum SlotState<R>
where
    R: ?Sized,
{
    Empty,
    Holding(Arc<R>),
    Disposed,
}

/// A holder for at most one disposable resource, assignable at most once and
/// safely disposable from any thread.
///
/// The slot starts empty. [`try_set`][Self::try_set] attempts the one
/// assignment; [`dispose`][Self::dispose] settles the slot forever, releasing
/// the held resource exactly once if there is one. All operations are
/// lock-free and complete in a bounded number of atomic steps, so the slot is
/// safe to use from signal-sensitive or latency-sensitive code.
///
/// Races between assignment and disposal are resolved by a single atomic
/// transition: whichever side wins determines which caller releases the
/// resource, and exactly one of them does. A resource offered to an already
/// disposed slot is released synchronously inside the offering call, so
/// nothing is ever leaked by losing a race.
///
/// Dropping the slot does not dispose it. A resource still held at drop time
/// is simply dropped without its release action running, matching the
/// contract that disposal is always an explicit act.
///
/// For single-threaded code, [`LocalDisposableSlot`][crate::LocalDisposableSlot]
/// offers the same contract without atomics.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use disposable_slot::{ActionDisposable, DisposableSlot, TrySetOutcome};
///
/// let slot = DisposableSlot::new();
///
/// let outcome = slot.try_set(Arc::new(ActionDisposable::new(|| {
///     println!("resource released");
/// })));
/// assert!(matches!(outcome, TrySetOutcome::Assigned));
///
/// // Runs the release action; later disposals are no-ops.
/// slot.dispose();
/// assert!(slot.is_disposed());
/// ```
///
/// Resources of different types can share a slot through a trait object:
///
/// ```
/// use std::sync::Arc;
///
/// use disposable_slot::{Disposable, DisposableSlot, NoopDisposable};
///
/// let slot: DisposableSlot<dyn Disposable + Send + Sync> = DisposableSlot::new();
/// slot.set(Arc::new(NoopDisposable));
/// slot.dispose();
/// ```
pub struct DisposableSlot<R>
where
    R: Disposable + Send + Sync + ?Sized,
{
    /// The current state of the slot.
    ///
    /// We use `ArcSwap` because readers must be able to take an owned handle
    /// to the held resource while a concurrent disposal retires the state
    /// that handle came from, without locking either side.
    state: ArcSwap<SlotState<R>>,
}

impl<R> DisposableSlot<R>
where
    R: Disposable + Send + Sync + ?Sized,
{
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(SlotState::Empty),
        }
    }

    /// Checks whether the slot has been disposed.
    ///
    /// The answer reflects a single atomic snapshot. It may already be stale
    /// by the time the caller acts on it, as another thread is free to
    /// dispose the slot concurrently; only `true` is final.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        matches!(&**self.state.load(), SlotState::Disposed)
    }

    /// Returns a handle to the held resource, or `None` if the slot is empty
    /// or already disposed.
    ///
    /// The handle is cloned out of one atomic snapshot, so it stays valid
    /// even if the slot is disposed immediately afterwards. Disposal of the
    /// slot is not affected by outstanding handles; the release action still
    /// runs exactly once.
    #[must_use]
    pub fn get(&self) -> Option<Arc<R>> {
        match &**self.state.load() {
            SlotState::Holding(resource) => Some(Arc::clone(resource)),
            SlotState::Empty | SlotState::Disposed => None,
        }
    }

    /// Attempts to place `resource` into the slot.
    ///
    /// This is the non-escalating assignment: every outcome is an ordinary
    /// value, including losing a race. At most one `try_set` call on a given
    /// slot ever returns [`TrySetOutcome::Assigned`].
    ///
    /// If a concurrent [`dispose`][Self::dispose] got there first, the
    /// offered resource is released synchronously inside this call and the
    /// outcome is [`TrySetOutcome::Disposed`]. If another resource is already
    /// held, the offered one is handed back untouched inside
    /// [`TrySetOutcome::AlreadyAssigned`].
    pub fn try_set(&self, resource: Arc<R>) -> TrySetOutcome<Arc<R>> {
        let current = self.state.load();

        match &**current {
            SlotState::Empty => {}
            SlotState::Holding(_) => return TrySetOutcome::AlreadyAssigned(resource),
            SlotState::Disposed => {
                // Too late to assign and no future disposal will ever see
                // this resource, so it is released here and now.
                resource.dispose();
                return TrySetOutcome::Disposed;
            }
        }

        let candidate = Arc::new(SlotState::Holding(Arc::clone(&resource)));

        // This is a conditional swap - the assignment only happens onto the
        // empty state we just observed. One attempt is conclusive: a slot
        // never becomes empty again, so if someone raced ahead of us the
        // returned state tells us the final verdict.
        let previous = self.state.compare_and_swap(current, candidate);

        match &**previous {
            // The empty state value is allocated once in the constructor and
            // never installed again, so getting it back means our swap landed.
            SlotState::Empty => TrySetOutcome::Assigned,
            SlotState::Holding(_) => TrySetOutcome::AlreadyAssigned(resource),
            SlotState::Disposed => {
                resource.dispose();
                TrySetOutcome::Disposed
            }
        }
    }

    /// Places `resource` into the slot, treating a second assignment as a
    /// caller error.
    ///
    /// Losing a race against [`dispose`][Self::dispose] is not an error: the
    /// resource is released synchronously and the call returns normally, just
    /// like [`try_set`][Self::try_set] would report [`TrySetOutcome::Disposed`].
    ///
    /// # Panics
    ///
    /// Panics if a resource has already been assigned to this slot. The
    /// offered resource is not released in that case; callers that want to
    /// recover it should use [`try_set`][Self::try_set] instead.
    pub fn set(&self, resource: Arc<R>) {
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
    /// Safe to call any number of times from any thread, concurrently with
    /// every other operation. Exactly one call across all racing disposals
    /// captures the held resource and runs its release action; every other
    /// call returns without side effects.
    ///
    /// A failure raised by the release action propagates from the one call
    /// that ran it. The slot is already disposed by that point, so the
    /// failure is never duplicated and the state machine stays settled.
    #[cfg_attr(test, mutants::skip)] // Removing the fast path is not observable, it only costs an allocation.
    pub fn dispose(&self) {
        // Disposed is absorbing; repeat disposals return without swapping.
        if self.is_disposed() {
            return;
        }

        let previous = self.state.swap(Arc::new(SlotState::Disposed));

        // Racing disposals each perform their own swap, but only one of them
        // can get the holding state back, so the release below runs at most
        // once per slot.
        if let SlotState::Holding(resource) = &*previous {
            resource.dispose();
        }
    }
}

impl<R> Default for DisposableSlot<R>
where
    R: Disposable + Send + Sync + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Disposable for DisposableSlot<R>
where
    R: Disposable + Send + Sync + ?Sized,
{
    fn dispose(&self) {
        Self::dispose(self);
    }
}

impl<R> fmt::Debug for DisposableSlot<R>
where
    R: Disposable + Send + Sync + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &**self.state.load() {
            SlotState::Empty => "empty",
            SlotState::Holding(_) => "holding",
            SlotState::Disposed => "disposed",
        };

        f.debug_struct(type_name::<Self>())
            .field("state", &state)
            .finish()
    }
}
