use crate::camera::{wheel_delta_px, OrbitDrag};
use crate::state::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub state: AppState,
    pub drag: Rc<RefCell<OrbitDrag>>,
}

/// Orbit the desktop camera with pointer drags and the wheel.
pub fn wire_orbit_controls(w: PointerWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn listen<E: FromWasmAbi + 'static>(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    listen(&canvas, "pointerdown", move |ev: web::PointerEvent| {
        if w.state.immersive() {
            return;
        }
        let started = w.drag.borrow_mut().begin(
            ev.pointer_id(),
            ev.button(),
            ev.client_x() as f32,
            ev.client_y() as f32,
        );
        if started {
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }
    });
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    listen(&canvas, "pointermove", move |ev: web::PointerEvent| {
        let delta =
            w.drag
                .borrow_mut()
                .move_to(ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32);
        if let Some((dx, dy)) = delta {
            w.state.camera.borrow_mut().rotate_by_pixels(dx, dy);
        }
    });
}

fn wire_pointerup(w: &PointerWiring) {
    for event in ["pointerup", "pointercancel"] {
        let w = w.clone();
        let canvas = w.canvas.clone();
        listen(&canvas, event, move |ev: web::PointerEvent| {
            if w.drag.borrow_mut().end(ev.pointer_id()) {
                _ = w.canvas.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(w: &PointerWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    listen(&canvas, "wheel", move |ev: web::WheelEvent| {
        if w.state.immersive() {
            return;
        }
        ev.prevent_default();
        let dy = wheel_delta_px(ev.delta_y(), ev.delta_mode());
        w.state.camera.borrow_mut().zoom_by(dy);
    });
}
