use glam::Vec3;
use js_sys::{Array, Object};
use wasm_bindgen::JsCast;
use web_sys as web;
use xr_core::input::InputFrame;
use xr_core::{ButtonState, ControllerId, XrInput};

pub fn handedness_tag(h: web::XrHandedness) -> &'static str {
    match h {
        web::XrHandedness::Left => "left",
        web::XrHandedness::Right => "right",
        _ => "none",
    }
}

fn profiles_of(source: &web::XrInputSource) -> Vec<String> {
    source
        .profiles()
        .iter()
        .filter_map(|v| v.as_string())
        .collect()
}

fn gamepad_buttons(source: &web::XrInputSource) -> Option<Vec<ButtonState>> {
    let gamepad = source.gamepad()?;
    let buttons = gamepad
        .buttons()
        .iter()
        .map(|b| match b.dyn_into::<web::GamepadButton>() {
            Ok(b) => ButtonState::new(b.pressed(), b.touched(), b.value() as f32),
            Err(_) => ButtonState::RELEASED,
        })
        .collect();
    Some(buttons)
}

fn pose_position(
    frame: &web::XrFrame,
    space: &web::XrSpace,
    base: &web::XrReferenceSpace,
) -> Option<Vec3> {
    let pose = frame.get_pose(space, base)?;
    let p = pose.transform().position();
    Some(Vec3::new(p.x() as f32, p.y() as f32, p.z() as f32))
}

/// Runtime input sources of one session, keyed by JS identity.
#[derive(Default)]
pub struct TrackedSources {
    entries: Vec<(web::XrInputSource, ControllerId)>,
}

impl TrackedSources {
    fn position(&self, source: &web::XrInputSource) -> Option<usize> {
        self.entries
            .iter()
            .position(|(s, _)| Object::is(s.as_ref(), source.as_ref()))
    }

    pub fn add(&mut self, input: &mut XrInput, source: web::XrInputSource) {
        if self.position(&source).is_some() {
            return;
        }
        let id = input.add_controller(handedness_tag(source.handedness()), profiles_of(&source));
        self.entries.push((source, id));
    }

    pub fn remove(&mut self, input: &mut XrInput, source: &web::XrInputSource) {
        if let Some(i) = self.position(source) {
            let (_, id) = self.entries.swap_remove(i);
            if let Err(e) = input.remove_controller(id) {
                log::warn!("[input] {}", e);
            }
        }
    }

    pub fn apply_change(&mut self, input: &mut XrInput, added: &Array, removed: &Array) {
        for s in removed.iter() {
            if let Ok(s) = s.dyn_into::<web::XrInputSource>() {
                self.remove(input, &s);
            }
        }
        for s in added.iter() {
            if let Ok(s) = s.dyn_into::<web::XrInputSource>() {
                self.add(input, s);
            }
        }
    }

    /// Pick up sources that were connected before the change listener ran.
    pub fn sync_existing(&mut self, input: &mut XrInput, session: &web::XrSession) {
        let sources = session.input_sources();
        for i in 0..sources.length() {
            if let Some(s) = sources.get(i) {
                self.add(input, s);
            }
        }
    }

    /// Read gamepad and poses of every tracked source for this frame.
    pub fn poll(
        &self,
        input: &mut XrInput,
        frame: &web::XrFrame,
        base: &web::XrReferenceSpace,
    ) {
        for (source, id) in &self.entries {
            let reading = InputFrame {
                buttons: gamepad_buttons(source),
                pointer: pose_position(frame, &source.target_ray_space(), base),
                grip: source
                    .grip_space()
                    .and_then(|g| pose_position(frame, &g, base)),
            };
            if let Err(e) = input.update(*id, &reading) {
                log::warn!("[input] {}", e);
            }
        }
    }

    /// Drop every source (session ended).
    pub fn clear(&mut self, input: &mut XrInput) {
        for (_, id) in self.entries.drain(..) {
            _ = input.remove_controller(id);
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
