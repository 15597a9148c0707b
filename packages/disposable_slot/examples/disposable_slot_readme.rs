//! Front-page walkthrough of the `disposable_slot` crate.
//!
//! Shows the full life of a slot: one assignment, reads, disposal that
//! releases the resource exactly once, and the fate of a late assignment.

use std::sync::Arc;

use disposable_slot::{ActionDisposable, Disposable, DisposableSlot, TrySetOutcome};

fn main() {
    // Type-erased so release actions of different closure types can share it.
    let slot: DisposableSlot<dyn Disposable + Send + Sync> = DisposableSlot::new();

    // The first assignment wins the slot.
    let outcome = slot.try_set(Arc::new(ActionDisposable::new(|| {
        println!("resource released");
    })));
    assert!(matches!(outcome, TrySetOutcome::Assigned));

    // Readers get an owned handle from one atomic snapshot.
    assert!(slot.get().is_some());

    // A second assignment is refused; the offered resource comes back
    // unreleased and stays the caller's responsibility.
    match slot.try_set(Arc::new(ActionDisposable::new(|| {
        println!("this never prints from the slot");
    }))) {
        TrySetOutcome::AlreadyAssigned(rejected) => drop(rejected),
        _ => unreachable!(),
    }

    // Disposal releases the held resource exactly once, no matter how many
    // times it is called.
    slot.dispose();
    slot.dispose();

    assert!(slot.is_disposed());
    assert!(slot.get().is_none());

    // Assigning after disposal is not an error: the resource is released
    // synchronously inside the call because no future disposal will see it.
    let outcome = slot.try_set(Arc::new(ActionDisposable::new(|| {
        println!("late resource released immediately");
    })));
    assert!(matches!(outcome, TrySetOutcome::Disposed));

    println!("lifecycle complete");
}
