use super::keys::{key_action, KeyAction};
use crate::overlay;
use crate::state::AppState;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use xr_core::OrbitCamera;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, state: &AppState) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::ToggleInspector => {
            if let Some(document) = crate::dom::window_document() {
                overlay::toggle_inspector(&document);
            }
        }
        KeyAction::ResetCamera => {
            *state.camera.borrow_mut() = OrbitCamera::default();
            log::info!("[keys] camera reset");
        }
    }
}

pub fn wire_global_keydown(state: AppState) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &state);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
