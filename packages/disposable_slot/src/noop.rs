use crate::Disposable;

/// A resource whose release does nothing.
///
/// A no-op resource is still a normal resource from the slot's point of view:
/// it occupies the slot, blocks further assignment and is "released" by
/// disposal like any other.
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
/// // Disposal has nothing meaningful to release but still settles the slot.
/// slot.dispose();
/// assert!(slot.is_disposed());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs, reason = "intentionally an empty struct")]
pub struct NoopDisposable;

impl Disposable for NoopDisposable {
    fn dispose(&self) {
        // Nothing to release.
    }
}
