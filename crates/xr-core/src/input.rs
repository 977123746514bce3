use crate::button::ButtonState;
use crate::controller::{ControllerId, InputSource};
use crate::error::{XrError, XrResult};
use crate::hand::Handedness;
use crate::observable::Observable;
use fnv::FnvHashMap;
use glam::Vec3;

/// Per-frame reading of one input source, produced by the platform layer.
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    /// `None` until the runtime exposes a gamepad for the source.
    pub buttons: Option<Vec<ButtonState>>,
    pub pointer: Option<Vec3>,
    pub grip: Option<Vec3>,
}

/// Motion controllers initialise on the first frame that carries a gamepad.
#[derive(Debug, Default)]
pub struct XrInput {
    sources: FnvHashMap<ControllerId, InputSource>,
    next_id: u32,
    pub on_controller_added: Observable<InputSource>,
    pub on_controller_removed: Observable<InputSource>,
}

impl XrInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_controller(&mut self, handedness: &str, profiles: Vec<String>) -> ControllerId {
        let id = ControllerId(self.next_id);
        self.next_id += 1;
        let source = InputSource::new(id, Handedness::from_tag(handedness), profiles);
        log::info!(
            "[input] controller {} added: handedness={} profiles={:?}",
            id,
            handedness,
            source.profiles
        );
        self.on_controller_added.notify(&source);
        self.sources.insert(id, source);
        id
    }

    pub fn remove_controller(&mut self, id: ControllerId) -> XrResult<()> {
        let source = self
            .sources
            .remove(&id)
            .ok_or(XrError::UnknownController(id))?;
        log::info!("[input] controller {} removed", id);
        self.on_controller_removed.notify(&source);
        Ok(())
    }

    pub fn update(&mut self, id: ControllerId, frame: &InputFrame) -> XrResult<()> {
        let source = self
            .sources
            .get_mut(&id)
            .ok_or(XrError::UnknownController(id))?;
        if frame.pointer.is_some() {
            source.pointer = frame.pointer;
        }
        if frame.grip.is_some() {
            source.grip = frame.grip;
        }
        if let Some(buttons) = &frame.buttons {
            source.init_motion_controller();
            if let Some(mc) = source.motion_controller_mut() {
                mc.update_from_gamepad(buttons);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: ControllerId) -> Option<&InputSource> {
        self.sources.get(&id)
    }

    pub fn pointer_position(&self, id: ControllerId) -> Option<Vec3> {
        self.sources.get(&id).and_then(|s| s.pointer)
    }

    pub fn ids(&self) -> Vec<ControllerId> {
        let mut ids: Vec<_> = self.sources.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Remove every controller, notifying `on_controller_removed` for each.
    pub fn clear(&mut self) {
        for id in self.ids() {
            _ = self.remove_controller(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn added_and_removed_are_announced() {
        let mut input = XrInput::new();
        let added = Rc::new(RefCell::new(Vec::new()));
        let removed = Rc::new(RefCell::new(Vec::new()));
        let a = added.clone();
        let r = removed.clone();
        input
            .on_controller_added
            .add(move |s| a.borrow_mut().push((s.id, s.handedness)));
        input.on_controller_removed.add(move |s| r.borrow_mut().push(s.id));

        let left = input.add_controller("left", vec![]);
        let right = input.add_controller("right", vec![]);
        assert_eq!(
            *added.borrow(),
            vec![(left, Handedness::Left), (right, Handedness::Right)]
        );
        input.remove_controller(left).unwrap();
        assert_eq!(*removed.borrow(), vec![left]);
        assert_eq!(
            input.remove_controller(left),
            Err(XrError::UnknownController(left))
        );
        assert_eq!(input.ids(), vec![right]);
    }

    #[test]
    fn motion_controller_waits_for_gamepad() {
        let mut input = XrInput::new();
        let id = input.add_controller("left", vec!["oculus-touch".into()]);
        input
            .update(
                id,
                &InputFrame {
                    pointer: Some(Vec3::new(0.1, 1.2, -0.3)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(input.get(id).unwrap().motion_controller().is_none());
        assert_eq!(input.pointer_position(id), Some(Vec3::new(0.1, 1.2, -0.3)));

        input
            .update(
                id,
                &InputFrame {
                    buttons: Some(vec![ButtonState::RELEASED; 7]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(input.get(id).unwrap().motion_controller().is_some());
        // a frame without a pose keeps the last known pointer
        assert_eq!(input.pointer_position(id), Some(Vec3::new(0.1, 1.2, -0.3)));
    }

    #[test]
    fn updating_unknown_controller_fails() {
        let mut input = XrInput::new();
        assert!(input
            .update(ControllerId(9), &InputFrame::default())
            .is_err());
    }
}
