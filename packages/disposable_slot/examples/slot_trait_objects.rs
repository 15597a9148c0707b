//! Storing resources of different concrete types in one slot via `dyn Disposable`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use disposable_slot::{Disposable, DisposableSlot, NoopDisposable, TrySetOutcome};

/// A stand-in for some connection handle with a real teardown.
#[derive(Debug)]
struct Connection {
    closed: AtomicBool,
}

impl Connection {
    fn open() -> Self {
        Self {
            closed: AtomicBool::new(false),
        }
    }
}

impl Disposable for Connection {
    fn dispose(&self) {
        self.closed.store(true, Ordering::Release);
        println!("connection closed");
    }
}

fn main() {
    let slot: DisposableSlot<dyn Disposable + Send + Sync> = DisposableSlot::new();

    let connection = Arc::new(Connection::open());

    let outcome = slot.try_set(Arc::clone(&connection) as Arc<dyn Disposable + Send + Sync>);
    assert!(matches!(outcome, TrySetOutcome::Assigned));

    // A resource of a different concrete type is refused by the same slot.
    match slot.try_set(Arc::new(NoopDisposable)) {
        TrySetOutcome::AlreadyAssigned(rejected) => drop(rejected),
        _ => unreachable!(),
    }

    slot.dispose();

    assert!(connection.closed.load(Ordering::Acquire));
    println!("done");
}
