use winit::keyboard::KeyCode;
use xr_core::{ButtonState, HandSide};

/// xr-standard gamepad slots of the simulated Touch controllers.
pub const SLOT_TRIGGER: usize = 0;
pub const SLOT_SQUEEZE: usize = 1;
pub const SLOT_THUMBSTICK: usize = 3;
pub const SLOT_PRIMARY: usize = 4;
pub const SLOT_SECONDARY: usize = 5;
pub const SLOT_THUMBREST: usize = 6;
pub const SLOT_COUNT: usize = 7;

/// Keyboard key to (hand, gamepad slot).
pub fn button_for_key(code: KeyCode) -> Option<(HandSide, usize)> {
    use HandSide::{Left, Right};
    let hit = match code {
        KeyCode::KeyQ => (Left, SLOT_TRIGGER),
        KeyCode::KeyA => (Left, SLOT_SQUEEZE),
        KeyCode::KeyW => (Left, SLOT_SECONDARY),
        KeyCode::KeyS => (Left, SLOT_PRIMARY),
        KeyCode::KeyE => (Left, SLOT_THUMBSTICK),
        KeyCode::KeyD => (Left, SLOT_THUMBREST),
        KeyCode::KeyU => (Right, SLOT_TRIGGER),
        KeyCode::KeyJ => (Right, SLOT_SQUEEZE),
        KeyCode::KeyI => (Right, SLOT_SECONDARY),
        KeyCode::KeyK => (Right, SLOT_PRIMARY),
        KeyCode::KeyO => (Right, SLOT_THUMBSTICK),
        KeyCode::KeyL => (Right, SLOT_THUMBREST),
        _ => return None,
    };
    Some(hit)
}

/// Button state for a key event; `shift` reports a touch without a press.
pub fn button_state(down: bool, shift: bool) -> ButtonState {
    match (down, shift) {
        (false, _) => ButtonState::RELEASED,
        (true, true) => ButtonState::touch(),
        (true, false) => ButtonState::press(),
    }
}

/// Camera orbit step for arrow keys, in pixels of simulated drag.
pub fn orbit_for_key(code: KeyCode) -> Option<(f32, f32)> {
    const STEP: f32 = 24.0;
    match code {
        KeyCode::ArrowLeft => Some((-STEP, 0.0)),
        KeyCode::ArrowRight => Some((STEP, 0.0)),
        KeyCode::ArrowUp => Some((0.0, -STEP)),
        KeyCode::ArrowDown => Some((0.0, STEP)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xr_core::{ControllerId, Handedness, MotionController};

    #[test]
    fn keymap_covers_six_roles_per_hand() {
        use KeyCode::*;
        let left = [KeyQ, KeyA, KeyW, KeyS, KeyE, KeyD];
        let right = [KeyU, KeyJ, KeyI, KeyK, KeyO, KeyL];
        let mut slots: Vec<usize> = left
            .iter()
            .map(|k| {
                let (side, slot) = button_for_key(*k).unwrap();
                assert_eq!(side, HandSide::Left);
                slot
            })
            .collect();
        let right_slots: Vec<usize> = right
            .iter()
            .map(|k| {
                let (side, slot) = button_for_key(*k).unwrap();
                assert_eq!(side, HandSide::Right);
                slot
            })
            .collect();
        assert_eq!(slots, right_slots);
        slots.sort();
        slots.dedup();
        assert_eq!(slots.len(), 6);
        assert!(button_for_key(KeyCode::KeyZ).is_none());
    }

    #[test]
    fn shift_means_touched_only() {
        let s = button_state(true, true);
        assert!(s.touched && !s.pressed);
        let s = button_state(true, false);
        assert!(s.touched && s.pressed);
        assert_eq!(button_state(false, true), ButtonState::RELEASED);
    }

    #[test]
    fn slots_match_touch_layout_roles() {
        // every simulated slot resolves to a component of the Touch profile
        let mc = MotionController::new(ControllerId(0), Handedness::Left, ["oculus-touch-v3"]);
        let slots = [
            SLOT_TRIGGER,
            SLOT_SQUEEZE,
            SLOT_THUMBSTICK,
            SLOT_PRIMARY,
            SLOT_SECONDARY,
            SLOT_THUMBREST,
        ];
        for slot in slots {
            assert!(
                mc.components().iter().any(|c| c.gamepad_index == slot),
                "slot {} unmapped",
                slot
            );
        }
        assert!(SLOT_THUMBREST < SLOT_COUNT);
    }
}
