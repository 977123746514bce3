use crate::constants::INSPECTOR_REFRESH_MS;
use crate::dom;
use crate::overlay;
use crate::state::AppState;
use crate::throttle::Throttle;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use xr_core::inspector;
use xr_core::tick::sync_markers;
use xr_render::GpuSurface;

/// Copy controller pointer positions onto the markers (both hands tracked only).
pub fn tick_markers(state: &AppState) -> bool {
    let input = state.input.borrow();
    let mut hands = state.demo.hands.borrow_mut();
    sync_markers(&mut hands, |id| input.pointer_position(id))
}

/// Rebuild the inspector text when visible and the throttle allows it.
pub fn refresh_inspector(state: &AppState, throttle: &mut Throttle) {
    if !throttle.ready(Instant::now()) {
        return;
    }
    let Some(document) = dom::window_document() else {
        return;
    };
    if !overlay::inspector_visible(&document) {
        return;
    }
    let text = inspector::report(&state.demo.hands.borrow(), state.status.get());
    overlay::update_inspector(&document, &text);
}

/// Desktop loop driven by `window.requestAnimationFrame`.
pub struct FrameContext {
    pub state: AppState,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuSurface<'static>>,
    pub inspector: Throttle,
}

impl FrameContext {
    pub fn new(
        state: AppState,
        canvas: web::HtmlCanvasElement,
        gpu: Option<GpuSurface<'static>>,
    ) -> Self {
        Self {
            state,
            canvas,
            gpu,
            inspector: Throttle::from_millis(INSPECTOR_REFRESH_MS),
        }
    }

    pub fn frame(&mut self) {
        refresh_inspector(&self.state, &mut self.inspector);
        // the XR session renders its own frames while immersive
        if self.state.immersive() {
            return;
        }
        tick_markers(&self.state);
        let Some(g) = &mut self.gpu else {
            return;
        };
        g.scene_mut().camera = self.state.camera.borrow().clone();
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        let hands = self.state.demo.hands.borrow();
        match g.render(&hands) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("[render] frame error: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
