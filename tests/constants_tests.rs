// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_are_distinct() {
    let ids = [CANVAS_ID, INSPECTOR_ID, ENTER_VR_ID, XR_GL_CANVAS_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn inspector_refreshes_four_times_a_second() {
    assert_eq!(INSPECTOR_REFRESH_MS, 250);
}

#[test]
fn overlay_styles_are_fixed_position() {
    assert!(INSPECTOR_STYLE.contains("position:fixed"));
    assert!(ENTER_VR_STYLE.contains("position:fixed"));
    // text is written line by line
    assert!(INSPECTOR_STYLE.contains("white-space:pre"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wheel_scales_are_ordered() {
    assert!(WHEEL_LINE_HEIGHT_PX > 1.0);
    assert!(WHEEL_PAGE_HEIGHT_PX > WHEEL_LINE_HEIGHT_PX);
    assert_ne!(ENTER_VR_LABEL, EXIT_VR_LABEL);
}
