use crate::button::ButtonState;
use crate::error::{XrError, XrResult};
use crate::hand::Handedness;
use crate::layout::{ComponentRole, ProfileLayout};
use crate::observable::Observable;
use glam::Vec3;
use smallvec::SmallVec;
use std::fmt;

/// Stable id of one tracked input source for as long as it stays connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub u32);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct Component {
    pub id: &'static str,
    pub role: ComponentRole,
    pub gamepad_index: usize,
    state: ButtonState,
    pub on_button_state_changed: Observable<ButtonState>,
}

impl Component {
    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn pressed(&self) -> bool {
        self.state.pressed
    }

    pub fn touched(&self) -> bool {
        self.state.touched
    }

    /// Store `next`; notify observers if anything changed.
    fn update(&mut self, next: ButtonState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        self.on_button_state_changed.notify(&self.state);
        true
    }
}

#[derive(Debug)]
pub struct MotionController {
    source_id: ControllerId,
    handedness: Handedness,
    profile_id: &'static str,
    components: SmallVec<[Component; 8]>,
}

impl MotionController {
    pub fn new<'a>(
        source_id: ControllerId,
        handedness: Handedness,
        profiles: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let layout = ProfileLayout::resolve(profiles);
        let components = layout
            .components(handedness)
            .iter()
            .map(|spec| Component {
                id: spec.id,
                role: spec.role,
                gamepad_index: spec.gamepad_index,
                state: ButtonState::RELEASED,
                on_button_state_changed: Observable::new(),
            })
            .collect();
        Self {
            source_id,
            handedness,
            profile_id: layout.profile_id,
            components,
        }
    }

    pub fn source_id(&self) -> ControllerId {
        self.source_id
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn profile_id(&self) -> &'static str {
        self.profile_id
    }

    pub fn component_ids(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.id).collect()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn component_of_role(&self, role: ComponentRole) -> Option<&Component> {
        self.components.iter().find(|c| c.role == role)
    }

    pub fn require_component(&self, role: ComponentRole) -> XrResult<&Component> {
        self.component_of_role(role)
            .ok_or(XrError::ComponentMissing(role))
    }

    /// Components whose slot is missing from `buttons` keep their state.
    /// Returns how many components changed.
    pub fn update_from_gamepad(&mut self, buttons: &[ButtonState]) -> usize {
        let mut changed = 0;
        for component in self.components.iter_mut() {
            if let Some(next) = buttons.get(component.gamepad_index) {
                if component.update(*next) {
                    changed += 1;
                }
            }
        }
        changed
    }
}

#[derive(Debug)]
pub struct InputSource {
    pub id: ControllerId,
    pub handedness: Handedness,
    pub profiles: Vec<String>,
    /// Target-ray ("pointer") position in the session's reference space.
    pub pointer: Option<Vec3>,
    pub grip: Option<Vec3>,
    motion_controller: Option<MotionController>,
    pub on_motion_controller_init: Observable<MotionController>,
}

impl InputSource {
    pub fn new(id: ControllerId, handedness: Handedness, profiles: Vec<String>) -> Self {
        Self {
            id,
            handedness,
            profiles,
            pointer: None,
            grip: None,
            motion_controller: None,
            on_motion_controller_init: Observable::new(),
        }
    }

    pub fn motion_controller(&self) -> Option<&MotionController> {
        self.motion_controller.as_ref()
    }

    pub fn motion_controller_mut(&mut self) -> Option<&mut MotionController> {
        self.motion_controller.as_mut()
    }

    /// `true` only for the call that performed the initialisation.
    pub fn init_motion_controller(&mut self) -> bool {
        if self.motion_controller.is_some() {
            return false;
        }
        let mc = MotionController::new(
            self.id,
            self.handedness,
            self.profiles.iter().map(String::as_str),
        );
        log::info!(
            "[input] controller {} ({}) initialised with profile {}",
            self.id,
            self.handedness.as_str(),
            mc.profile_id()
        );
        self.on_motion_controller_init.notify(&mc);
        self.motion_controller = Some(mc);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn touch_left() -> MotionController {
        MotionController::new(ControllerId(1), Handedness::Left, ["oculus-touch-v3"])
    }

    #[test]
    fn components_follow_profile_order() {
        let mc = touch_left();
        assert_eq!(mc.profile_id(), "oculus-touch-v3");
        assert_eq!(
            mc.component_ids(),
            vec![
                "xr-standard-trigger",
                "xr-standard-squeeze",
                "xr-standard-thumbstick",
                "x-button",
                "y-button",
                "thumbrest"
            ]
        );
        assert_eq!(mc.get_component("y-button").unwrap().role, ComponentRole::SecondaryButton);
    }

    #[test]
    fn gamepad_update_notifies_only_on_change() {
        let mut mc = touch_left();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        mc.component_of_role(ComponentRole::PrimaryButton)
            .unwrap()
            .on_button_state_changed
            .add(move |st| s.borrow_mut().push(*st));

        let mut buttons = vec![ButtonState::RELEASED; 7];
        assert_eq!(mc.update_from_gamepad(&buttons), 0);
        buttons[4] = ButtonState::touch();
        assert_eq!(mc.update_from_gamepad(&buttons), 1);
        assert_eq!(mc.update_from_gamepad(&buttons), 0);
        buttons[4] = ButtonState::press();
        mc.update_from_gamepad(&buttons);
        assert_eq!(*seen.borrow(), vec![ButtonState::touch(), ButtonState::press()]);
        assert!(mc.component_of_role(ComponentRole::PrimaryButton).unwrap().pressed());
    }

    #[test]
    fn short_gamepad_leaves_missing_slots_alone() {
        let mut mc = touch_left();
        let mut buttons = vec![ButtonState::RELEASED; 7];
        buttons[6] = ButtonState::touch();
        mc.update_from_gamepad(&buttons);
        // runtime drops the thumbrest slot
        let changed = mc.update_from_gamepad(&buttons[..4]);
        assert_eq!(changed, 0);
        assert!(mc.component_of_role(ComponentRole::Thumbrest).unwrap().touched());
    }

    #[test]
    fn missing_role_is_a_typed_error() {
        let mc = MotionController::new(
            ControllerId(2),
            Handedness::Right,
            ["generic-trigger-squeeze-thumbstick"],
        );
        assert_eq!(
            mc.require_component(ComponentRole::Thumbrest).unwrap_err(),
            XrError::ComponentMissing(ComponentRole::Thumbrest)
        );
    }

    #[test]
    fn motion_controller_initialises_once() {
        let mut source = InputSource::new(
            ControllerId(3),
            Handedness::Right,
            vec!["oculus-touch".to_string()],
        );
        let inits = Rc::new(RefCell::new(0));
        let i = inits.clone();
        source.on_motion_controller_init.add(move |_| *i.borrow_mut() += 1);
        assert!(source.init_motion_controller());
        assert!(!source.init_motion_controller());
        assert_eq!(*inits.borrow(), 1);
        assert_eq!(
            source.motion_controller().unwrap().get_component("a-button").map(|c| c.gamepad_index),
            Some(4)
        );
    }
}
