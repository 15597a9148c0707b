use std::any::type_name;
use std::cell::UnsafeCell;
use std::fmt;
use std::sync::atomic::{self, AtomicBool};

use crate::Disposable;

/// A resource that runs a caller-supplied action on first release.
///
/// The action runs at most once, no matter how many times and from how many
/// threads [`dispose`][Disposable::dispose] is invoked. Dropping the value
/// without disposing it discards the action without running it.
///
/// # Examples
///
/// ```
/// use disposable_slot::{ActionDisposable, Disposable};
///
/// let disposable = ActionDisposable::new(|| println!("released"));
///
/// disposable.dispose();
///
/// // Calls after the first are no-ops.
/// disposable.dispose();
/// ```
pub struct ActionDisposable<F>
where
    F: FnOnce(),
{
    /// Set by whichever disposal claims the action; later disposals back off.
    claimed: AtomicBool,

    /// The release action. Present from construction until the first disposal
    /// takes it.
    ///
    /// We use `UnsafeCell` because we are a synchronization primitive and
    /// do our own synchronization of reads/writes.
    action: UnsafeCell<Option<F>>,
}

impl<F> ActionDisposable<F>
where
    F: FnOnce(),
{
    /// Creates a resource that runs `action` on first release.
    #[must_use]
    pub fn new(action: F) -> Self {
        Self {
            claimed: AtomicBool::new(false),
            action: UnsafeCell::new(Some(action)),
        }
    }
}

impl<F> Disposable for ActionDisposable<F>
where
    F: FnOnce(),
{
    fn dispose(&self) {
        // Whoever flips this first owns the action; everyone else backs off.
        // We use AcqRel because the winner acquires exclusive access to the
        // action while releasing the claim to any disposal that follows.
        if self.claimed.swap(true, atomic::Ordering::AcqRel) {
            return;
        }

        // SAFETY: The swap above admits exactly one caller into this branch
        // and construction happened-before any shared use of `self`, so we
        // have exclusive access to the cell contents here.
        let action = unsafe { &mut *self.action.get() }.take();

        if let Some(action) = action {
            action();
        }
    }
}

impl<F> fmt::Debug for ActionDisposable<F>
where
    F: FnOnce(),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("claimed", &self.claimed)
            .finish_non_exhaustive()
    }
}

// SAFETY: The claim latch admits a single taker of the action and the action
// is required to be Send, so taking and invoking it from whichever thread wins
// is sound. All other shared state is atomic.
unsafe impl<F> Sync for ActionDisposable<F> where F: FnOnce() + Send {}
