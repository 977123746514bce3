use crate::constants::{ORBIT_BUTTONS, WHEEL_LINE_HEIGHT_PX, WHEEL_PAGE_HEIGHT_PX};

/// Pointer-drag tracking for the desktop orbit camera.
///
/// Yields pixel deltas between successive moves while a drag is active; the
/// caller feeds them to `OrbitCamera::rotate_by_pixels`.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct OrbitDrag {
    pub pointer_id: Option<i32>,
    pub last: [f32; 2],
}

impl OrbitDrag {
    /// Start a drag; returns `false` for buttons that do not orbit.
    pub fn begin(&mut self, pointer_id: i32, button: i16, x: f32, y: f32) -> bool {
        if !ORBIT_BUTTONS.contains(&button) || self.pointer_id.is_some() {
            return false;
        }
        self.pointer_id = Some(pointer_id);
        self.last = [x, y];
        true
    }

    pub fn move_to(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.pointer_id != Some(pointer_id) {
            return None;
        }
        let d = (x - self.last[0], y - self.last[1]);
        self.last = [x, y];
        Some(d)
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.pointer_id == Some(pointer_id) {
            self.pointer_id = None;
            return true;
        }
        false
    }

    pub fn active(&self) -> bool {
        self.pointer_id.is_some()
    }
}

/// Convert a wheel delta to pixels given the DOM `deltaMode` (0 px, 1 line, 2 page).
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let dy = delta_y as f32;
    match delta_mode {
        1 => dy * WHEEL_LINE_HEIGHT_PX,
        2 => dy * WHEEL_PAGE_HEIGHT_PX,
        _ => dy,
    }
}
