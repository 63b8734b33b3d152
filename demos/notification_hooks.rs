//! Notification Hooks Example
//!
//! This example wires hooks into a notification channel:
//! 1. Replace hooks stamping a correlation id
//! 2. Observe hooks counting failures
//! 3. At-most-once delivery through a chain
//! 4. Sensitive errors in reports
//!
//! Run with: cargo run --example notification_hooks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use outcome_rail::{Error, NotificationChannel, Outcome, Redaction};

fn charge(channel: &NotificationChannel, cents: u64) -> Outcome<u64> {
    if cents == 0 {
        return Outcome::fail_in(channel, Error::new("nothing to charge").with_title("ChargeError"));
    }
    Outcome::success(cents)
}

fn main() {
    let channel = NotificationChannel::new();

    // =========================================================================
    // Section 1: Replace hooks
    // =========================================================================
    println!("=== Section 1: Replace hooks ===\n");

    channel.on_replace(|error| error.with_identifier("req-7f3a"));
    let failed = charge(&channel, 0);
    println!("identifier: {:?}", failed.error().identifier());

    // =========================================================================
    // Section 2: Observe hooks
    // =========================================================================
    println!("\n=== Section 2: Observe hooks ===\n");

    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    channel.on_observe(move |error| {
        counter.fetch_add(1, Ordering::Relaxed);
        println!("observed {}: {}", error.title(), error.message());
    });

    // =========================================================================
    // Section 3: At-most-once delivery
    // =========================================================================
    println!("\n=== Section 3: At-most-once delivery ===\n");

    let total = charge(&channel, 0).map(|cents| cents * 2).flat_map(|cents| charge(&channel, cents));
    let again: Outcome<u64> = Outcome::fail_in(&channel, total.error().clone());
    println!("failed twice in code, observed {} time(s)", seen.load(Ordering::Relaxed));
    assert!(again.is_fail());

    // =========================================================================
    // Section 4: Sensitive errors
    // =========================================================================
    println!("\n=== Section 4: Sensitive errors ===\n");

    let secret = Error::new("card 4111-1111-1111-1111 declined").with_code(402).with_sensitive(true);
    println!("redacted: {}", secret.report());
    println!("full:     {}", secret.report().redaction(Redaction::Never));
}
