use crate::button::{alpha_for, scale_for, ButtonLevel, ButtonState};
use crate::controller::{ControllerId, InputSource, MotionController};
use crate::hand::{Channel, Hand, HandPair, HandSide};
use crate::input::XrInput;
use crate::layout::ComponentRole;
use crate::observable::{Observable, ObserverHandle};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Roles that drive a visual property, in binding order.
pub const BOUND_ROLES: [ComponentRole; 6] = [
    ComponentRole::Trigger,
    ComponentRole::Squeeze,
    ComponentRole::SecondaryButton,
    ComponentRole::PrimaryButton,
    ComponentRole::Thumbstick,
    ComponentRole::Thumbrest,
];

/// Returns `false` for roles that drive nothing.
pub fn apply_button_state(hand: &mut Hand, role: ComponentRole, state: &ButtonState) -> bool {
    match role {
        ComponentRole::Trigger => {
            hand.marker.scaling.y = scale_for(state);
        }
        ComponentRole::Squeeze => {
            let s = scale_for(state);
            hand.marker.scaling.x = s;
            hand.marker.scaling.z = s;
        }
        ComponentRole::SecondaryButton => {
            hand.color
                .set_channel(Channel::Red, ButtonLevel::from_state(state).channel_value());
        }
        ComponentRole::PrimaryButton => {
            hand.color
                .set_channel(Channel::Green, ButtonLevel::from_state(state).channel_value());
        }
        ComponentRole::Thumbstick => {
            hand.color
                .set_channel(Channel::Blue, ButtonLevel::from_state(state).channel_value());
        }
        ComponentRole::Thumbrest => {
            hand.material.alpha = alpha_for(state);
        }
        ComponentRole::Touchpad => return false,
    }
    true
}

/// Dropping the binding leaves the observers registered; call `unbind`.
#[derive(Debug)]
pub struct ControllerBinding {
    pub controller: ControllerId,
    pub side: HandSide,
    registrations: SmallVec<[(ComponentRole, Observable<ButtonState>, ObserverHandle); 6]>,
}

impl ControllerBinding {
    pub fn bound_roles(&self) -> Vec<ComponentRole> {
        self.registrations.iter().map(|(role, _, _)| *role).collect()
    }

    pub fn is_active(&self) -> bool {
        !self.registrations.is_empty()
    }

    /// Remove every observer this binding registered. Safe to call twice.
    pub fn unbind(&mut self) -> usize {
        let mut removed = 0;
        for (_, observable, handle) in self.registrations.drain(..) {
            if observable.remove(handle) {
                removed += 1;
            }
        }
        removed
    }
}

pub fn bind_motion_controller(
    hands: &Rc<RefCell<HandPair>>,
    mc: &MotionController,
) -> ControllerBinding {
    let side = mc.handedness().side();
    hands.borrow_mut().get_mut(side).controller = Some(mc.source_id());

    let mut registrations = SmallVec::new();
    for role in BOUND_ROLES {
        let component = match mc.require_component(role) {
            Ok(c) => c,
            Err(e) => {
                log::warn!(
                    "[bind] {} hand, profile {}: {}; skipping",
                    side.as_str(),
                    mc.profile_id(),
                    e
                );
                continue;
            }
        };
        let hands_cb = hands.clone();
        let handle = component.on_button_state_changed.add(move |state| {
            apply_button_state(hands_cb.borrow_mut().get_mut(side), role, state);
        });
        registrations.push((role, component.on_button_state_changed.clone(), handle));
    }
    log::info!(
        "[bind] controller {} -> {} hand ({} of {} roles)",
        mc.source_id(),
        side.as_str(),
        registrations.len(),
        BOUND_ROLES.len()
    );
    ControllerBinding {
        controller: mc.source_id(),
        side,
        registrations,
    }
}

#[derive(Clone, Debug, Default)]
pub struct DemoContext {
    pub hands: Rc<RefCell<HandPair>>,
    bindings: Rc<RefCell<FnvHashMap<ControllerId, ControllerBinding>>>,
}

#[derive(Debug)]
pub struct InputAttachment {
    added: (Observable<InputSource>, ObserverHandle),
    removed: (Observable<InputSource>, ObserverHandle),
}

impl InputAttachment {
    pub fn detach(&self) {
        self.added.0.remove(self.added.1);
        self.removed.0.remove(self.removed.1);
    }
}

impl DemoContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every controller `input` announces from now on.
    pub fn attach(&self, input: &XrInput) -> InputAttachment {
        let ctx = self.clone();
        let added = input.on_controller_added.add(move |source: &InputSource| {
            let ctx = ctx.clone();
            source.on_motion_controller_init.add_once(move |mc| {
                ctx.bind(mc);
            });
        });
        let ctx = self.clone();
        let removed = input.on_controller_removed.add(move |source: &InputSource| {
            ctx.unbind(source.id);
        });
        InputAttachment {
            added: (input.on_controller_added.clone(), added),
            removed: (input.on_controller_removed.clone(), removed),
        }
    }

    pub fn bind(&self, mc: &MotionController) {
        let binding = bind_motion_controller(&self.hands, mc);
        if let Some(mut old) = self.bindings.borrow_mut().insert(mc.source_id(), binding) {
            old.unbind();
        }
    }

    /// Release the bindings of `id`; returns `false` when it had none.
    pub fn unbind(&self, id: ControllerId) -> bool {
        let binding = self.bindings.borrow_mut().remove(&id);
        match binding {
            Some(mut b) => {
                let n = b.unbind();
                log::info!("[bind] controller {} released {} observers", id, n);
                true
            }
            None => false,
        }
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn bound_roles(&self, id: ControllerId) -> Option<Vec<ComponentRole>> {
        self.bindings.borrow().get(&id).map(|b| b.bound_roles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Color3;
    use crate::input::InputFrame;
    use glam::Vec3;

    const TOUCH_BUTTONS: usize = 7;

    fn frame(buttons: Vec<ButtonState>) -> InputFrame {
        InputFrame {
            buttons: Some(buttons),
            ..Default::default()
        }
    }

    fn connect(input: &mut XrInput, handedness: &str, profile: &str) -> ControllerId {
        let id = input.add_controller(handedness, vec![profile.to_string()]);
        input
            .update(id, &frame(vec![ButtonState::RELEASED; TOUCH_BUTTONS]))
            .unwrap();
        id
    }

    fn press(input: &mut XrInput, id: ControllerId, slot: usize, state: ButtonState) {
        let mut buttons = vec![ButtonState::RELEASED; TOUCH_BUTTONS];
        buttons[slot] = state;
        input.update(id, &frame(buttons)).unwrap();
    }

    #[test]
    fn left_primary_press_sets_only_left_green() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let _attachment = ctx.attach(&input);
        let left = connect(&mut input, "left", "oculus-touch-v3");

        press(&mut input, left, 4, ButtonState::press());

        let hands = ctx.hands.borrow();
        assert_eq!(hands.left.color, Color3::new(0.0, 1.0, 0.0));
        assert_eq!(hands.left.marker.scaling, Vec3::ONE);
        assert_eq!(hands.left.material.alpha, 0.5);
        assert_eq!(hands.right, HandPair::default().right);
        assert_eq!(hands.left.controller, Some(left));
    }

    #[test]
    fn trigger_and_squeeze_scale_axes() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let _attachment = ctx.attach(&input);
        let right = connect(&mut input, "right", "oculus-touch");

        press(&mut input, right, 0, ButtonState::press());
        assert_eq!(ctx.hands.borrow().right.marker.scaling, Vec3::new(1.0, 2.0, 1.0));
        press(&mut input, right, 1, ButtonState::press());
        assert_eq!(ctx.hands.borrow().right.marker.scaling, Vec3::new(2.0, 1.0, 2.0));
        press(&mut input, right, 1, ButtonState::touch());
        assert_eq!(ctx.hands.borrow().right.marker.scaling, Vec3::ONE);
    }

    #[test]
    fn buttons_and_stick_use_three_levels() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let _attachment = ctx.attach(&input);
        let id = connect(&mut input, "right", "oculus-touch");

        press(&mut input, id, 5, ButtonState::touch());
        assert_eq!(ctx.hands.borrow().right.color, Color3::new(0.5, 0.0, 0.0));
        press(&mut input, id, 5, ButtonState::press());
        assert_eq!(ctx.hands.borrow().right.color, Color3::new(1.0, 0.0, 0.0));
        press(&mut input, id, 3, ButtonState::touch());
        assert_eq!(ctx.hands.borrow().right.color, Color3::new(0.0, 0.0, 0.5));
        press(&mut input, id, 3, ButtonState::RELEASED);
        assert_eq!(ctx.hands.borrow().right.color, Color3::BLACK);
    }

    #[test]
    fn thumbrest_touch_makes_marker_opaque() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let _attachment = ctx.attach(&input);
        let id = connect(&mut input, "left", "meta-quest-touch-plus");

        press(&mut input, id, 6, ButtonState::touch());
        assert_eq!(ctx.hands.borrow().left.material.alpha, 1.0);
        press(&mut input, id, 6, ButtonState::RELEASED);
        assert_eq!(ctx.hands.borrow().left.material.alpha, 0.5);
    }

    #[test]
    fn unknown_handedness_routes_right() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let _attachment = ctx.attach(&input);
        let id = connect(&mut input, "none", "oculus-touch");

        press(&mut input, id, 4, ButtonState::press());
        let hands = ctx.hands.borrow();
        assert_eq!(hands.right.color.g, 1.0);
        assert_eq!(hands.right.controller, Some(id));
        assert!(hands.left.controller.is_none());
    }

    #[test]
    fn missing_components_are_skipped() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let _attachment = ctx.attach(&input);
        let id = connect(&mut input, "left", "oculus-touch-v2");
        assert_eq!(
            ctx.bound_roles(id).unwrap(),
            vec![
                ComponentRole::Trigger,
                ComponentRole::Squeeze,
                ComponentRole::SecondaryButton,
                ComponentRole::PrimaryButton,
                ComponentRole::Thumbstick,
            ]
        );

        let generic = connect(&mut input, "right", "generic-trigger");
        assert_eq!(ctx.bound_roles(generic).unwrap(), vec![ComponentRole::Trigger]);
        // thumbrest slot data is ignored without a thumbrest component
        press(&mut input, id, 6, ButtonState::touch());
        assert_eq!(ctx.hands.borrow().left.material.alpha, 0.5);
    }

    #[test]
    fn removal_releases_bindings_but_keeps_hand_state() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let _attachment = ctx.attach(&input);
        let id = connect(&mut input, "left", "oculus-touch");
        press(&mut input, id, 4, ButtonState::press());
        assert_eq!(ctx.binding_count(), 1);

        input.remove_controller(id).unwrap();
        assert_eq!(ctx.binding_count(), 0);
        assert!(!ctx.unbind(id));
        let hands = ctx.hands.borrow();
        assert_eq!(hands.left.color.g, 1.0);
        assert_eq!(hands.left.controller, Some(id));
    }

    #[test]
    fn unbind_is_idempotent_and_stops_updates() {
        let hands = Rc::new(RefCell::new(HandPair::default()));
        let mut mc = MotionController::new(
            ControllerId(0),
            crate::hand::Handedness::Right,
            ["oculus-touch"],
        );
        let mut binding = bind_motion_controller(&hands, &mc);
        assert!(binding.is_active());
        assert_eq!(binding.unbind(), 6);
        assert_eq!(binding.unbind(), 0);

        let mut buttons = vec![ButtonState::RELEASED; TOUCH_BUTTONS];
        buttons[4] = ButtonState::press();
        mc.update_from_gamepad(&buttons);
        assert_eq!(hands.borrow().right.color, Color3::BLACK);
    }

    #[test]
    fn detached_context_ignores_new_controllers() {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let attachment = ctx.attach(&input);
        attachment.detach();
        attachment.detach();
        connect(&mut input, "left", "oculus-touch");
        assert_eq!(ctx.binding_count(), 0);
        assert!(ctx.hands.borrow().left.controller.is_none());
    }

    #[test]
    fn touchpad_drives_nothing() {
        let mut hand = Hand::new(HandSide::Left);
        let before = hand.clone();
        assert!(!apply_button_state(&mut hand, ComponentRole::Touchpad, &ButtonState::press()));
        assert_eq!(hand, before);
    }
}
