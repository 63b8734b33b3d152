use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use outcome_rail::{Error, NotificationChannel, OptionalOutcome, Outcome};

fn quiet_channel() -> NotificationChannel {
    let channel = NotificationChannel::new();
    channel.set_capture_traces(false);
    channel
}

fn counting_observer(channel: &NotificationChannel) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    channel.on_observe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[test]
fn observe_hook_fires_once_through_three_combinators() {
    let channel = quiet_channel();
    let count = counting_observer(&channel);

    let outcome: Outcome<i32> = Outcome::fail_in(&channel, Error::new("once"));
    let outcome = outcome.map(|v| v + 1).flat_map(Outcome::success).on_success(|_| {});

    assert!(outcome.is_fail());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn same_instance_is_handled_at_most_once() {
    let channel = quiet_channel();
    let count = counting_observer(&channel);
    let error = Error::new("shared");

    let _first: Outcome<()> = Outcome::fail_in(&channel, error.clone());
    let _second: OptionalOutcome<u8> = OptionalOutcome::fail_in(&channel, error.clone());

    assert!(channel.is_handled(&error));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn distinct_instances_are_notified_separately() {
    let channel = quiet_channel();
    let count = counting_observer(&channel);

    let _a: Outcome<()> = Outcome::fail_in(&channel, Error::new("same text"));
    let _b: Outcome<()> = Outcome::fail_in(&channel, Error::new("same text"));

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn replace_hooks_chain_in_registration_order() {
    let channel = quiet_channel();
    channel.on_replace(|e| e.with_message(format!("{} [a]", e.message())));
    channel.on_replace(|e| e.with_message(format!("{} [b]", e.message())));

    let outcome: Outcome<()> = Outcome::fail_in(&channel, "base");

    assert_eq!(outcome.error().message(), "base [a] [b]");
}

#[test]
fn handled_marker_migrates_to_the_replacement() {
    let channel = quiet_channel();
    channel.on_replace(|e| e.with_identifier("corr-1"));
    let count = counting_observer(&channel);
    let original = Error::new("to be replaced");

    let outcome: Outcome<()> = Outcome::fail_in(&channel, original.clone());
    let replaced = outcome.error().clone();

    assert_eq!(replaced.identifier(), Some("corr-1"));
    assert!(channel.is_handled(&replaced));
    assert!(!channel.is_handled(&original));

    let _again: Outcome<()> = Outcome::fail_in(&channel, replaced);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn hook_panics_are_swallowed() {
    let channel = quiet_channel();
    channel.on_replace(|_| panic!("replace hook broke"));
    channel.on_observe(|_| panic!("observe hook broke"));
    let count = counting_observer(&channel);
    let error = Error::new("still delivered");

    let outcome: Outcome<()> = Outcome::fail_in(&channel, error.clone());

    assert!(outcome.error().ptr_eq(&error));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn hooks_creating_failures_do_not_reenter() {
    let channel = Arc::new(quiet_channel());
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let weak = Arc::downgrade(&channel);
    channel.on_observe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(channel) = weak.upgrade() {
            let _nested: Outcome<()> = Outcome::fail_in(&channel, "raised inside a hook");
        }
    });

    let _outcome: Outcome<()> = Outcome::fail_in(&channel, "outer");

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn attached_trace_marks_the_original_instance_too() {
    let channel = NotificationChannel::new();
    let error = Error::new("maybe traced");

    let outcome: Outcome<()> = Outcome::fail_in(&channel, error.clone());

    assert!(channel.is_handled(outcome.error()));
    assert!(channel.is_handled(&error));
}

#[test]
fn explicit_traces_are_kept() {
    let channel = NotificationChannel::new();
    let error = Error::new("traced").with_stack_trace("   at app::main in src/main.rs:1:1");

    let outcome: Outcome<()> = Outcome::fail_in(&channel, error.clone());

    assert!(outcome.error().ptr_eq(&error));
}

#[test]
fn clear_hooks_removes_everything() {
    let channel = quiet_channel();
    let count = counting_observer(&channel);
    channel.clear_hooks();

    let _outcome: Outcome<()> = Outcome::fail_in(&channel, "unobserved");

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn combinator_faults_reach_the_global_channel() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    NotificationChannel::global().on_observe(move |e| {
        if e.message() == "global channel probe" {
            sink.lock().unwrap().push(e.title().to_owned());
        }
    });

    let outcome = Outcome::success(1).map(|_| -> i32 { panic!("global channel probe") });

    assert!(outcome.is_fail());
    assert_eq!(*seen.lock().unwrap(), ["Panic"]);
}

#[test]
fn mark_handled_suppresses_hooks() {
    let channel = quiet_channel();
    let count = counting_observer(&channel);
    let error = Error::new("pre-handled");
    channel.mark_handled(&error);

    let _outcome: Outcome<()> = Outcome::fail_in(&channel, error);

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn concurrent_routing_of_one_instance_notifies_once() {
    const THREADS: usize = 4;
    const ROUNDS: usize = 50;

    let channel = Arc::new(quiet_channel());
    channel.on_replace(|e| {
        thread::yield_now();
        e.clone()
    });
    let count = counting_observer(&channel);

    for round in 0..ROUNDS {
        let error = Error::new(format!("shared across threads {round}"));
        let barrier = Arc::new(Barrier::new(THREADS));
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                let channel = Arc::clone(&channel);
                let barrier = Arc::clone(&barrier);
                let error = error.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let outcome: Outcome<()> = Outcome::fail_in(&channel, error);
                    assert!(outcome.is_fail());
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(count.load(Ordering::SeqCst), round + 1, "round {round}");
    }
}
