//! The single-threaded slot, including a reentrant release action.

use std::rc::Rc;

use disposable_slot::{ActionDisposable, Disposable, LocalDisposableSlot, TrySetOutcome};

fn main() {
    let slot: Rc<LocalDisposableSlot<dyn Disposable>> = Rc::new(LocalDisposableSlot::new());

    let outcome = slot.try_set(Rc::new(ActionDisposable::new({
        let slot = Rc::clone(&slot);
        move || {
            // The slot has already settled by the time the release runs, so
            // calling back into it is safe and observes the disposed state.
            println!("released; slot reports disposed = {}", slot.is_disposed());
        }
    })));
    assert!(matches!(outcome, TrySetOutcome::Assigned));

    slot.dispose();

    // Repeat disposals are no-ops.
    slot.dispose();

    assert!(slot.get().is_none());
    println!("done");
}
