//! Races an assignment against a disposal across two threads.
//!
//! Whichever side wins the atomic transition, the resource is released
//! exactly once: by the disposal if the assignment landed first, or
//! synchronously inside `try_set` if the disposal got there first.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use disposable_slot::{ActionDisposable, DisposableSlot, TrySetOutcome};

fn main() {
    let slot = Arc::new(DisposableSlot::new());
    let releases = Arc::new(AtomicUsize::new(0));
    let both_ready = Arc::new(Barrier::new(2));

    let assigner = thread::spawn({
        let slot = Arc::clone(&slot);
        let releases = Arc::clone(&releases);
        let both_ready = Arc::clone(&both_ready);

        move || {
            let resource = Arc::new(ActionDisposable::new({
                let releases = Arc::clone(&releases);
                move || {
                    releases.fetch_add(1, Ordering::SeqCst);
                }
            }));

            both_ready.wait();

            match slot.try_set(resource) {
                TrySetOutcome::Assigned => println!("assignment won the race"),
                TrySetOutcome::Disposed => {
                    println!("disposal won the race; resource released in try_set");
                }
                TrySetOutcome::AlreadyAssigned(_) => unreachable!("nothing else assigns"),
            }
        }
    });

    let disposer = thread::spawn({
        let slot = Arc::clone(&slot);
        let both_ready = Arc::clone(&both_ready);

        move || {
            both_ready.wait();

            slot.dispose();
        }
    });

    assigner.join().unwrap();
    disposer.join().unwrap();

    assert!(slot.is_disposed());
    assert_eq!(releases.load(Ordering::SeqCst), 1);

    println!("released exactly once");
}
