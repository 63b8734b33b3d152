//! Combinator Chaining Example
//!
//! This example walks through the outcome types and their combinators:
//! 1. Chaining with map / flat_map
//! 2. Optional values and None
//! 3. Recovery with rescue
//! 4. Callback panics becoming failures
//! 5. Adapting std errors
//!
//! Run with: cargo run --example combinator_chaining

use outcome_rail::prelude::*;
use outcome_rail::{fault, CauseRole};

// =============================================================================
// Section 1: Chaining
// =============================================================================

fn parse_quantity(raw: &str) -> Outcome<u32> {
    raw.trim().parse::<u32>().into_outcome_with(|b| b.title("InvalidQuantity").code(400))
}

fn reserve(quantity: u32) -> Outcome<u32> {
    if quantity > 10 {
        return fail!("only 10 items left, {} requested", quantity);
    }
    Outcome::success(10 - quantity)
}

fn section1_chaining() {
    println!("=== Section 1: Chaining ===\n");

    for raw in ["3", "12", "three"] {
        let remaining = parse_quantity(raw).flat_map(reserve).map(|left| format!("{left} left in stock"));
        remaining.match_with(
            |text| println!("{raw:>6} -> ok: {text}"),
            |error| println!("{raw:>6} -> {}: {}", error.title(), error.message()),
        );
    }
}

// =============================================================================
// Section 2: Optional values
// =============================================================================

fn find_discount(code: &str) -> OptionalOutcome<u8> {
    match code {
        "" => fail!(Error::new("empty discount code").with_code(400)),
        "SPRING" => OptionalOutcome::success(15),
        _ => OptionalOutcome::none(),
    }
}

fn section2_optional() {
    println!("\n=== Section 2: Optional values ===\n");

    for code in ["SPRING", "WINTER", ""] {
        let percent = find_discount(code).filter(|p| *p <= 50);
        let text = percent.match_with(
            |p| format!("{p}% off"),
            || "no discount".to_owned(),
            |error| format!("rejected: {}", error.message()),
        );
        println!("{code:>8} -> {text}");
    }
}

// =============================================================================
// Section 3: Recovery
// =============================================================================

fn section3_rescue() {
    println!("\n=== Section 3: Recovery ===\n");

    let recovered = reserve(20).rescue(|error| {
        println!("recovering from: {}", error.message());
        Outcome::success(0)
    });
    println!("after rescue: {:?}", recovered.into_value());
}

// =============================================================================
// Section 4: Callback faults
// =============================================================================

fn section4_faults() {
    println!("\n=== Section 4: Callback faults ===\n");

    let raised: Outcome<u32> = Outcome::success(1).map(|_| fault::raise(Error::new("ledger locked")));
    println!("raised: {}", raised.error().message());

    let cancelled: Outcome<u32> = Outcome::success(1).map(|_| fault::cancel_with("shutdown"));
    println!("cancelled: {} (cancellation: {})", cancelled.error().title(), cancelled.error().is_cancellation());

    let broken = reserve(20).on_fail(|_| fault::raise(Error::new("alerting is down")));
    for (role, cause) in broken.error().causes() {
        println!("{role}: {}", cause.message());
    }
    assert_eq!(broken.error().causes()[1].0, CauseRole::Incidental);
}

// =============================================================================
// Section 5: Adapting std errors
// =============================================================================

fn section5_adapter() {
    println!("\n=== Section 5: Adapting std errors ===\n");

    let config = std::fs::read_to_string("/nonexistent/shop.toml").into_outcome();
    println!("{}", config.error().report());
}

fn main() {
    section1_chaining();
    section2_optional();
    section3_rescue();
    section4_faults();
    section5_adapter();
}
