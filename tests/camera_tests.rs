// Host-side tests for the desktop orbit drag helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use camera::*;

#[test]
fn drag_reports_deltas_between_moves() {
    let mut drag = OrbitDrag::default();
    assert!(drag.begin(7, 0, 100.0, 50.0));
    assert!(drag.active());
    assert_eq!(drag.move_to(7, 110.0, 45.0), Some((10.0, -5.0)));
    assert_eq!(drag.move_to(7, 110.0, 45.0), Some((0.0, 0.0)));
    assert!(drag.end(7));
    assert!(!drag.active());
    assert_eq!(drag.move_to(7, 200.0, 0.0), None);
}

#[test]
fn other_pointers_and_buttons_are_ignored() {
    let mut drag = OrbitDrag::default();
    // right button does not orbit
    assert!(!drag.begin(1, 2, 0.0, 0.0));
    assert!(drag.begin(1, 0, 0.0, 0.0));
    // a second finger does not steal the drag
    assert!(!drag.begin(2, 0, 5.0, 5.0));
    assert_eq!(drag.move_to(2, 9.0, 9.0), None);
    assert!(!drag.end(2));
    assert!(drag.end(1));
}

#[test]
fn wheel_delta_modes() {
    assert_eq!(wheel_delta_px(3.0, 0), 3.0);
    assert_eq!(wheel_delta_px(3.0, 1), 48.0);
    assert_eq!(wheel_delta_px(-1.0, 2), -800.0);
}

#[test]
fn drag_deltas_drive_orbit_camera() {
    let mut cam = xr_core::OrbitCamera::default();
    let start = cam.alpha;
    let mut drag = OrbitDrag::default();
    drag.begin(1, 0, 0.0, 0.0);
    let (dx, dy) = drag.move_to(1, 200.0, 0.0).unwrap();
    cam.rotate_by_pixels(dx, dy);
    assert!((cam.alpha - start - 200.0 * xr_core::ORBIT_RADIANS_PER_PIXEL).abs() < 1e-6);
}
