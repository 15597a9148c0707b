//! Integration tests for the thread-safe `DisposableSlot`.
//!
//! These exercise the full lifecycle and the cross-thread races between
//! assignment and disposal, where the interesting guarantees live: at most
//! one assignment ever succeeds and a held resource is released exactly once.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use disposable_slot::{ActionDisposable, Disposable, DisposableSlot, NoopDisposable, TrySetOutcome};

/// A resource that counts how many times its release action has run.
#[derive(Debug, Default)]
struct ReleaseProbe {
    releases: AtomicUsize,
}

impl ReleaseProbe {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl Disposable for ReleaseProbe {
    fn dispose(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn full_lifecycle() {
    let slot = DisposableSlot::new();
    let first = ReleaseProbe::new();

    let outcome = slot.try_set(Arc::clone(&first));
    assert!(matches!(outcome, TrySetOutcome::Assigned));

    let held = slot.get().expect("the slot was just assigned");
    assert!(Arc::ptr_eq(&held, &first));

    slot.dispose();
    assert!(slot.is_disposed());
    assert_eq!(first.releases(), 1);

    // A late assignment is refused and the offered resource is released
    // synchronously inside the refusing call.
    let late = ReleaseProbe::new();
    let outcome = slot.try_set(Arc::clone(&late));
    assert!(matches!(outcome, TrySetOutcome::Disposed));
    assert_eq!(late.releases(), 1);

    assert!(slot.get().is_none());
    assert_eq!(first.releases(), 1);
}

#[test]
fn racing_assignments_admit_at_most_one_mt() {
    const ASSIGNERS: usize = 8;

    let slot = Arc::new(DisposableSlot::new());
    let all_ready = Arc::new(Barrier::new(ASSIGNERS));

    let threads: Vec<_> = (0..ASSIGNERS)
        .map(|_| {
            let slot = Arc::clone(&slot);
            let all_ready = Arc::clone(&all_ready);
            let resource = ReleaseProbe::new();

            thread::spawn(move || {
                all_ready.wait();

                let assigned = matches!(
                    slot.try_set(Arc::clone(&resource)),
                    TrySetOutcome::Assigned
                );

                (assigned, resource)
            })
        })
        .collect();

    let results: Vec<_> = threads
        .into_iter()
        .map(|thread| thread.join().unwrap())
        .collect();

    let winners = results.iter().filter(|(assigned, _)| *assigned).count();
    assert_eq!(winners, 1);

    // The slot holds the winner's resource and nothing has been released yet.
    let held = slot.get().expect("one assignment won");

    for (assigned, resource) in &results {
        assert_eq!(resource.releases(), 0);

        if *assigned {
            assert!(Arc::ptr_eq(&held, resource));
        }
    }

    slot.dispose();

    let total_releases: usize = results
        .iter()
        .map(|(_, resource)| resource.releases())
        .sum();
    assert_eq!(total_releases, 1);
}

#[test]
fn racing_disposals_release_exactly_once_mt() {
    const DISPOSERS: usize = 8;

    let slot = Arc::new(DisposableSlot::new());
    let resource = ReleaseProbe::new();

    let outcome = slot.try_set(Arc::clone(&resource));
    assert!(matches!(outcome, TrySetOutcome::Assigned));

    let all_ready = Arc::new(Barrier::new(DISPOSERS));

    let threads: Vec<_> = (0..DISPOSERS)
        .map(|_| {
            let slot = Arc::clone(&slot);
            let all_ready = Arc::clone(&all_ready);

            thread::spawn(move || {
                all_ready.wait();

                slot.dispose();
            })
        })
        .collect();

    for thread in threads {
        thread.join().unwrap();
    }

    assert!(slot.is_disposed());
    assert_eq!(resource.releases(), 1);
}

#[test]
fn assignment_racing_disposal_never_leaks_mt() {
    // Whichever side wins the race, the resource must be released exactly
    // once in total: by the disposal if the assignment landed first, or
    // synchronously inside `try_set` if the disposal got there first.
    const ROUNDS: usize = 64;

    for _ in 0..ROUNDS {
        let slot = Arc::new(DisposableSlot::new());
        let resource = ReleaseProbe::new();
        let both_ready = Arc::new(Barrier::new(2));

        let assigner = thread::spawn({
            let slot = Arc::clone(&slot);
            let resource = Arc::clone(&resource);
            let both_ready = Arc::clone(&both_ready);

            move || {
                both_ready.wait();

                slot.try_set(resource)
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

        let outcome = assigner.join().unwrap();
        disposer.join().unwrap();

        match outcome {
            // Either the assignment landed first and the disposal captured
            // and released the resource, or the disposal got there first and
            // `try_set` released the resource before returning.
            TrySetOutcome::Assigned | TrySetOutcome::Disposed => {}
            TrySetOutcome::AlreadyAssigned(_) => {
                panic!("nothing else was assigning, so this outcome is impossible")
            }
        }

        assert!(slot.is_disposed());
        assert!(slot.get().is_none());
        assert_eq!(resource.releases(), 1);
    }
}

#[test]
fn second_set_panics_and_first_resource_survives() {
    let slot = DisposableSlot::new();
    let first = ReleaseProbe::new();
    let second = ReleaseProbe::new();

    slot.set(Arc::clone(&first));

    let result = catch_unwind(AssertUnwindSafe(|| {
        slot.set(Arc::clone(&second));
    }));
    _ = result.expect_err("the call should have panicked");

    // The refused setter released nothing and the first assignment stands.
    assert_eq!(first.releases(), 0);
    assert_eq!(second.releases(), 0);

    let held = slot.get().expect("the first resource is still held");
    assert!(Arc::ptr_eq(&held, &first));

    slot.dispose();
    assert_eq!(first.releases(), 1);
    assert_eq!(second.releases(), 0);
}

#[test]
fn release_panic_propagates_from_the_one_disposal_that_released() {
    let slot = DisposableSlot::new();

    slot.set(Arc::new(ActionDisposable::new(|| {
        panic!("release failed")
    })));

    let result = catch_unwind(AssertUnwindSafe(|| slot.dispose()));
    _ = result.expect_err("the call should have panicked");

    // The state settled before the release ran, so the slot is disposed and
    // repeat disposals return quietly instead of re-raising the failure.
    assert!(slot.is_disposed());
    slot.dispose();
}

#[test]
fn type_erased_resources_share_a_slot() {
    let slot: DisposableSlot<dyn Disposable + Send + Sync> = DisposableSlot::new();
    let released = Arc::new(AtomicUsize::new(0));

    let outcome = slot.try_set(Arc::new(ActionDisposable::new({
        let released = Arc::clone(&released);
        move || {
            released.fetch_add(1, Ordering::SeqCst);
        }
    })));
    assert!(matches!(outcome, TrySetOutcome::Assigned));

    match slot.try_set(Arc::new(NoopDisposable)) {
        TrySetOutcome::AlreadyAssigned(rejected) => drop(rejected),
        _ => panic!("expected the second assignment to be refused"),
    }

    slot.dispose();
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn outstanding_handle_survives_disposal() {
    let slot = DisposableSlot::new();
    let resource = ReleaseProbe::new();

    slot.set(Arc::clone(&resource));

    let held = slot.get().expect("the slot was just assigned");

    slot.dispose();

    // The handle taken before disposal stays valid; the slot itself reports
    // nothing held.
    assert_eq!(held.releases(), 1);
    assert!(slot.get().is_none());
}
