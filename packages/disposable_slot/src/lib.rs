//! Lock-free single-assignment holders for disposable resources.
//!
//! This crate provides [`DisposableSlot`], a holder for exactly one releasable
//! resource: assignable at most once, safely disposable from any thread, with
//! defined behavior under races between assignment and disposal. The slot
//! guarantees that a held resource is released exactly once, never twice and
//! never not at all, without taking a lock.
//!
//! # Key guarantees
//!
//! - **Single assignment**: of any number of concurrent assignment attempts,
//!   at most one succeeds; the rest are refused as values, not errors.
//! - **Exactly-once release**: whichever of assignment and disposal wins the
//!   atomic transition determines which caller runs the one release; a
//!   resource offered to an already disposed slot is released synchronously
//!   inside the offering call, so nothing is leaked by losing a race.
//! - **Absorbing disposal**: disposal is idempotent and terminal; nothing
//!   ever leaves the disposed state.
//! - **Bounded steps**: every operation is lock-free and completes in a
//!   bounded number of atomic steps.
//!
//! Resources implement the [`Disposable`] trait: one idempotent, no-argument
//! release action invoked through a shared reference. [`ActionDisposable`]
//! wraps a closure as such a resource and [`NoopDisposable`] is the resource
//! that releases nothing. Slots themselves implement [`Disposable`], so slots
//! can nest.
//!
//! For single-threaded code, [`LocalDisposableSlot`] offers the same contract
//! with `Rc` handles and no atomics.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use disposable_slot::{ActionDisposable, DisposableSlot, TrySetOutcome};
//!
//! let slot = DisposableSlot::new();
//!
//! let outcome = slot.try_set(Arc::new(ActionDisposable::new(|| {
//!     println!("connection closed");
//! })));
//! assert!(matches!(outcome, TrySetOutcome::Assigned));
//!
//! // Runs the release action exactly once; later disposals are no-ops.
//! slot.dispose();
//! slot.dispose();
//!
//! assert!(slot.is_disposed());
//! assert!(slot.get().is_none());
//! ```
//!
//! Racing assignment against disposal is safe from any thread:
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use disposable_slot::{DisposableSlot, NoopDisposable};
//!
//! let slot = Arc::new(DisposableSlot::new());
//!
//! let assigner = thread::spawn({
//!     let slot = Arc::clone(&slot);
//!     move || {
//!         // Either this lands the assignment or the resource is released
//!         // synchronously right here because disposal got there first.
//!         _ = slot.try_set(Arc::new(NoopDisposable));
//!     }
//! });
//!
//! slot.dispose();
//! assigner.join().unwrap();
//!
//! assert!(slot.is_disposed());
//! ```

mod action;
mod disposable;
mod local_slot;
mod noop;
mod outcome;
mod slot;

pub use action::*;
pub use disposable::*;
pub use local_slot::*;
pub use noop::*;
pub use outcome::*;
pub use slot::*;
