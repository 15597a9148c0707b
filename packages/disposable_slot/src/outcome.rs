/// The verdict of an assignment attempt via
/// [`DisposableSlot::try_set`][crate::DisposableSlot::try_set] or
/// [`LocalDisposableSlot::try_set`][crate::LocalDisposableSlot::try_set].
///
/// The handle type `H` is the resource handle the slot works with, so the
/// thread-safe slot reports `TrySetOutcome<Arc<R>>` and the single-threaded
/// slot reports `TrySetOutcome<Rc<R>>`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use disposable_slot::{DisposableSlot, NoopDisposable, TrySetOutcome};
///
/// let slot = DisposableSlot::new();
///
/// let outcome = slot.try_set(Arc::new(NoopDisposable));
/// assert!(matches!(outcome, TrySetOutcome::Assigned));
///
/// // The slot is already taken, so the second resource comes back unreleased.
/// match slot.try_set(Arc::new(NoopDisposable)) {
///     TrySetOutcome::AlreadyAssigned(rejected) => drop(rejected),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug)]
#[must_use = "a refused resource stays the caller's responsibility to release"]
#[expect(
    clippy::exhaustive_enums,
    reason = "the three outcomes are fixed by the assignment contract"
)]
pub enum TrySetOutcome<H> {
    /// The slot was empty and now holds the offered resource.
    Assigned,

    /// Another resource was already assigned. Nothing changed; the offered
    /// resource is handed back unreleased and remains the caller's
    /// responsibility.
    AlreadyAssigned(H),

    /// The slot was already disposed. Nothing changed; the offered resource
    /// has been released synchronously because no future disposal will ever
    /// see it.
    Disposed,
}
