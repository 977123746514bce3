// Host-side tests for the inspector refresh throttle.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod throttle {
    include!("../src/throttle.rs");
}

use instant::{Duration, Instant};
use throttle::Throttle;

#[test]
fn first_call_passes_then_waits_for_period() {
    let mut t = Throttle::from_millis(250);
    let t0 = Instant::now();
    assert!(t.ready(t0));
    assert!(!t.ready(t0 + Duration::from_millis(100)));
    assert!(!t.ready(t0 + Duration::from_millis(249)));
    assert!(t.ready(t0 + Duration::from_millis(250)));
    assert!(!t.ready(t0 + Duration::from_millis(300)));
    assert!(t.ready(t0 + Duration::from_millis(600)));
}

#[test]
fn reset_lets_next_call_through() {
    let mut t = Throttle::new(Duration::from_secs(10));
    let t0 = Instant::now();
    assert!(t.ready(t0));
    assert!(!t.ready(t0));
    t.reset();
    assert!(t.ready(t0));
}
