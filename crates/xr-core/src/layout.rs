use crate::hand::Handedness;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    Trigger,
    Squeeze,
    Touchpad,
    Thumbstick,
    /// X on the left Touch controller, A on the right.
    PrimaryButton,
    /// Y on the left Touch controller, B on the right.
    SecondaryButton,
    Thumbrest,
}

impl ComponentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentRole::Trigger => "trigger",
            ComponentRole::Squeeze => "squeeze",
            ComponentRole::Touchpad => "touchpad",
            ComponentRole::Thumbstick => "thumbstick",
            ComponentRole::PrimaryButton => "primary button",
            ComponentRole::SecondaryButton => "secondary button",
            ComponentRole::Thumbrest => "thumbrest",
        }
    }
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentSpec {
    pub id: &'static str,
    pub role: ComponentRole,
    pub gamepad_index: usize,
}

const fn spec(id: &'static str, role: ComponentRole, gamepad_index: usize) -> ComponentSpec {
    ComponentSpec {
        id,
        role,
        gamepad_index,
    }
}

const TRIGGER: ComponentSpec = spec("xr-standard-trigger", ComponentRole::Trigger, 0);
const SQUEEZE: ComponentSpec = spec("xr-standard-squeeze", ComponentRole::Squeeze, 1);
const TOUCHPAD: ComponentSpec = spec("xr-standard-touchpad", ComponentRole::Touchpad, 2);
const THUMBSTICK: ComponentSpec = spec("xr-standard-thumbstick", ComponentRole::Thumbstick, 3);
const THUMBREST: ComponentSpec = spec("thumbrest", ComponentRole::Thumbrest, 6);

const TOUCH_LEFT: &[ComponentSpec] = &[
    TRIGGER,
    SQUEEZE,
    THUMBSTICK,
    spec("x-button", ComponentRole::PrimaryButton, 4),
    spec("y-button", ComponentRole::SecondaryButton, 5),
    THUMBREST,
];
const TOUCH_RIGHT: &[ComponentSpec] = &[
    TRIGGER,
    SQUEEZE,
    THUMBSTICK,
    spec("a-button", ComponentRole::PrimaryButton, 4),
    spec("b-button", ComponentRole::SecondaryButton, 5),
    THUMBREST,
];
const TOUCH_NO_REST_LEFT: &[ComponentSpec] = &[
    TRIGGER,
    SQUEEZE,
    THUMBSTICK,
    spec("x-button", ComponentRole::PrimaryButton, 4),
    spec("y-button", ComponentRole::SecondaryButton, 5),
];
const TOUCH_NO_REST_RIGHT: &[ComponentSpec] = &[
    TRIGGER,
    SQUEEZE,
    THUMBSTICK,
    spec("a-button", ComponentRole::PrimaryButton, 4),
    spec("b-button", ComponentRole::SecondaryButton, 5),
];
const INDEX: &[ComponentSpec] = &[
    TRIGGER,
    SQUEEZE,
    TOUCHPAD,
    THUMBSTICK,
    spec("a-button", ComponentRole::PrimaryButton, 4),
    spec("b-button", ComponentRole::SecondaryButton, 5),
];
const VIVE: &[ComponentSpec] = &[TRIGGER, SQUEEZE, TOUCHPAD];
const TRIGGER_SQUEEZE_TOUCHPAD_THUMBSTICK: &[ComponentSpec] =
    &[TRIGGER, SQUEEZE, TOUCHPAD, THUMBSTICK];
const TRIGGER_SQUEEZE_THUMBSTICK: &[ComponentSpec] = &[TRIGGER, SQUEEZE, THUMBSTICK];
const TRIGGER_SQUEEZE: &[ComponentSpec] = &[TRIGGER, SQUEEZE];
const TRIGGER_ONLY: &[ComponentSpec] = &[TRIGGER];

#[derive(Debug, PartialEq, Eq)]
pub struct ProfileLayout {
    pub profile_id: &'static str,
    left: &'static [ComponentSpec],
    right: &'static [ComponentSpec],
}

const fn symmetric(profile_id: &'static str, components: &'static [ComponentSpec]) -> ProfileLayout {
    ProfileLayout {
        profile_id,
        left: components,
        right: components,
    }
}

const fn handed(
    profile_id: &'static str,
    left: &'static [ComponentSpec],
    right: &'static [ComponentSpec],
) -> ProfileLayout {
    ProfileLayout {
        profile_id,
        left,
        right,
    }
}

pub static PROFILE_LAYOUTS: &[ProfileLayout] = &[
    handed("meta-quest-touch-plus", TOUCH_LEFT, TOUCH_RIGHT),
    handed("meta-quest-touch-pro", TOUCH_LEFT, TOUCH_RIGHT),
    handed("oculus-touch-v3", TOUCH_LEFT, TOUCH_RIGHT),
    handed("oculus-touch-v2", TOUCH_NO_REST_LEFT, TOUCH_NO_REST_RIGHT),
    handed("oculus-touch", TOUCH_LEFT, TOUCH_RIGHT),
    symmetric("valve-index", INDEX),
    symmetric("htc-vive", VIVE),
    symmetric(
        "generic-trigger-squeeze-touchpad-thumbstick",
        TRIGGER_SQUEEZE_TOUCHPAD_THUMBSTICK,
    ),
    symmetric("generic-trigger-squeeze-thumbstick", TRIGGER_SQUEEZE_THUMBSTICK),
    symmetric("generic-trigger-squeeze", TRIGGER_SQUEEZE),
    symmetric("generic-trigger", TRIGGER_ONLY),
];

/// Used when none of an input source's profile ids is known.
pub static FALLBACK_LAYOUT: ProfileLayout =
    symmetric("generic-trigger-squeeze-thumbstick", TRIGGER_SQUEEZE_THUMBSTICK);

impl ProfileLayout {
    pub fn by_id(profile_id: &str) -> Option<&'static ProfileLayout> {
        PROFILE_LAYOUTS.iter().find(|l| l.profile_id == profile_id)
    }

    /// First known layout among `profiles` (ordered most specific first).
    pub fn resolve<'a>(profiles: impl IntoIterator<Item = &'a str>) -> &'static ProfileLayout {
        profiles
            .into_iter()
            .find_map(ProfileLayout::by_id)
            .unwrap_or(&FALLBACK_LAYOUT)
    }

    pub fn components(&self, handedness: Handedness) -> &'static [ComponentSpec] {
        match handedness {
            Handedness::Left => self.left,
            _ => self.right,
        }
    }

    pub fn find(&self, handedness: Handedness, role: ComponentRole) -> Option<&'static ComponentSpec> {
        self.components(handedness).iter().find(|c| c.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_known_profile_wins() {
        let layout = ProfileLayout::resolve([
            "some-future-controller",
            "oculus-touch-v3",
            "generic-trigger-squeeze-thumbstick",
        ]);
        assert_eq!(layout.profile_id, "oculus-touch-v3");
    }

    #[test]
    fn unknown_profiles_use_fallback() {
        let layout = ProfileLayout::resolve(["made-up"]);
        assert_eq!(layout.profile_id, FALLBACK_LAYOUT.profile_id);
        assert!(layout.find(Handedness::Left, ComponentRole::Thumbrest).is_none());
        assert!(layout.find(Handedness::Left, ComponentRole::Trigger).is_some());
        let empty: [&str; 0] = [];
        assert_eq!(ProfileLayout::resolve(empty).profile_id, FALLBACK_LAYOUT.profile_id);
    }

    #[test]
    fn touch_button_ids_depend_on_handedness() {
        let layout = ProfileLayout::by_id("oculus-touch").unwrap();
        let left = layout.find(Handedness::Left, ComponentRole::PrimaryButton).unwrap();
        let right = layout.find(Handedness::Right, ComponentRole::PrimaryButton).unwrap();
        assert_eq!(left.id, "x-button");
        assert_eq!(right.id, "a-button");
        assert_eq!(left.gamepad_index, right.gamepad_index);
        let none = layout.find(Handedness::None, ComponentRole::SecondaryButton).unwrap();
        assert_eq!(none.id, "b-button");
    }

    #[test]
    fn xr_standard_slots_are_shared() {
        for layout in PROFILE_LAYOUTS {
            for hand in [Handedness::Left, Handedness::Right] {
                if let Some(c) = layout.find(hand, ComponentRole::Trigger) {
                    assert_eq!(c.gamepad_index, 0);
                }
                if let Some(c) = layout.find(hand, ComponentRole::Squeeze) {
                    assert_eq!(c.gamepad_index, 1);
                }
                if let Some(c) = layout.find(hand, ComponentRole::Thumbstick) {
                    assert_eq!(c.gamepad_index, 3);
                }
            }
        }
    }
}
