//! WebXR session lifecycle: support check, Enter VR button, session frames.

mod gl;
mod input;

use crate::constants::{ENTER_VR_ID, INSPECTOR_REFRESH_MS, XR_GL_CANVAS_ID};
use crate::frame::{refresh_inspector, tick_markers};
use crate::guard::CleanupGuard;
use crate::state::AppState;
use crate::throttle::Throttle;
use crate::{dom, overlay};
use gl::GlSceneRenderer;
use glam::Mat4;
use input::TrackedSources;
use js_sys::Array;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;
use xr_core::config::{ReferenceSpaceKind, SessionMode};
use xr_core::inspector::SessionStatus;
use xr_core::{InputAttachment, XrError};

type FrameClosure = Closure<dyn FnMut(f64, web::XrFrame)>;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn session_mode(mode: SessionMode) -> web::XrSessionMode {
    match mode {
        SessionMode::ImmersiveVr => web::XrSessionMode::ImmersiveVr,
        SessionMode::ImmersiveAr => web::XrSessionMode::ImmersiveAr,
        SessionMode::Inline => web::XrSessionMode::Inline,
    }
}

fn space_type(kind: ReferenceSpaceKind) -> web::XrReferenceSpaceType {
    match kind {
        ReferenceSpaceKind::Viewer => web::XrReferenceSpaceType::Viewer,
        ReferenceSpaceKind::Local => web::XrReferenceSpaceType::Local,
        ReferenceSpaceKind::LocalFloor => web::XrReferenceSpaceType::LocalFloor,
        ReferenceSpaceKind::BoundedFloor => web::XrReferenceSpaceType::BoundedFloor,
    }
}

/// Per-session state read by the frame callback.
struct ActiveSession {
    session: web::XrSession,
    layer: web::XrWebGlLayer,
    ref_space: web::XrReferenceSpace,
    renderer: GlSceneRenderer,
    sources: TrackedSources,
    inspector: Throttle,
}

/// An active session plus the JS callbacks registered on it.
struct SessionHandle {
    active: Rc<RefCell<ActiveSession>>,
    on_frame: Rc<RefCell<Option<FrameClosure>>>,
    _on_change: Closure<dyn FnMut(web::XrInputSourcesChangeEvent)>,
    _on_end: Closure<dyn FnMut(web::XrSessionEvent)>,
}

/// The page's XR experience. Exists only when the configured session mode
/// is supported; controller bindings are attached for its whole lifetime.
pub struct XrExperience {
    xr: web::XrSystem,
    state: AppState,
    current: Rc<RefCell<Option<SessionHandle>>>,
    pending: Cell<bool>,
    _attachment: InputAttachment,
}

impl XrExperience {
    /// Check WebXR support. `Ok(None)` when unavailable: the page keeps the
    /// desktop view and no input handling is attached.
    pub async fn create(state: AppState) -> anyhow::Result<Option<Rc<Self>>> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let navigator = window.navigator();
        let has_xr = js_sys::Reflect::has(&navigator, &JsValue::from_str("xr")).unwrap_or(false);
        if !has_xr {
            log::warn!("[xr] {}", XrError::Unavailable);
            state.status.set(SessionStatus::XrUnsupported);
            return Ok(None);
        }
        let xr = navigator.xr();
        let options = &state.config.xr;
        let supported = JsFuture::from(xr.is_session_supported(session_mode(options.session_mode)))
            .await
            .map_err(js_err)?
            .as_bool()
            .unwrap_or(false);
        if !supported {
            log::warn!(
                "[xr] {}",
                XrError::Unsupported(options.session_mode.as_str())
            );
            state.status.set(SessionStatus::XrUnsupported);
            return Ok(None);
        }
        log::info!(
            "[xr] {} supported; teleportation={} pointer_selection={} controller_meshes={}",
            options.session_mode.as_str(),
            options.teleportation,
            options.pointer_selection,
            options.show_controller_meshes
        );
        if options.teleportation || options.pointer_selection {
            log::info!("[xr] locomotion and pointer selection are not implemented; flags ignored");
        }

        let attachment = state.demo.attach(&state.input.borrow());
        state.status.set(SessionStatus::XrAvailable);
        let exp = Rc::new(Self {
            xr,
            state,
            current: Rc::new(RefCell::new(None)),
            pending: Cell::new(false),
            _attachment: attachment,
        });
        exp.wire_button()?;
        Ok(Some(exp))
    }

    fn wire_button(self: &Rc<Self>) -> anyhow::Result<()> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        overlay::ensure_enter_vr(&document)?;
        let exp = self.clone();
        dom::add_click_listener(&document, ENTER_VR_ID, move || exp.toggle());
        overlay::show_enter_vr(&document, false);
        Ok(())
    }

    fn toggle(self: &Rc<Self>) {
        let running = self
            .current
            .borrow()
            .as_ref()
            .map(|h| h.active.borrow().session.clone());
        match running {
            Some(session) => {
                _ = session.end();
            }
            None => self.request_session(),
        }
    }

    /// Must run inside the click handler: the runtime only grants immersive
    /// sessions during user activation, so the promise is created here and
    /// awaited afterwards.
    fn request_session(self: &Rc<Self>) {
        if self.pending.replace(true) {
            return;
        }
        let options = &self.state.config.xr;
        let init = web::XrSessionInit::new();
        let features = Array::of1(&JsValue::from_str(options.reference_space.as_str()));
        init.set_optional_features(&features);
        let promise = self
            .xr
            .request_session_with_options(session_mode(options.session_mode), &init);
        let exp = self.clone();
        spawn_local(async move {
            if let Err(e) = exp.start_session(promise).await {
                log::error!("[xr] session start failed: {:?}", e);
            }
            exp.pending.set(false);
        });
    }

    async fn start_session(self: &Rc<Self>, promise: js_sys::Promise) -> anyhow::Result<()> {
        let session: web::XrSession = JsFuture::from(promise)
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        log::info!("[xr] session started");

        let end_on_failure = CleanupGuard::new(|| {
            log::warn!("[xr] setup failed; ending session");
            _ = session.end();
        });
        self.setup_session(&session).await?;
        end_on_failure.disarm();
        Ok(())
    }

    async fn setup_session(self: &Rc<Self>, session: &web::XrSession) -> anyhow::Result<()> {
        let gl = create_xr_gl_context()?;
        let layer = web::XrWebGlLayer::new_with_web_gl2_rendering_context(session, &gl)
            .map_err(js_err)?;
        let render_state = web::XrRenderStateInit::new();
        render_state.set_base_layer(Some(&layer));
        session.update_render_state_with_state(&render_state);

        let ref_space = request_reference_space(session, self.state.config.xr.reference_space).await?;
        let renderer = GlSceneRenderer::new(gl, &self.state.scene)?;

        let mut sources = TrackedSources::default();
        sources.sync_existing(&mut self.state.input.borrow_mut(), session);
        log::info!("[input] {} input source(s) at session start", sources.len());

        let active = Rc::new(RefCell::new(ActiveSession {
            session: session.clone(),
            layer,
            ref_space,
            renderer,
            sources,
            inspector: Throttle::from_millis(INSPECTOR_REFRESH_MS),
        }));

        let on_change = {
            let active = active.clone();
            let input = self.state.input.clone();
            Closure::wrap(Box::new(move |ev: web::XrInputSourcesChangeEvent| {
                active.borrow_mut().sources.apply_change(
                    &mut input.borrow_mut(),
                    &ev.added(),
                    &ev.removed(),
                );
            }) as Box<dyn FnMut(_)>)
        };
        session.set_oninputsourceschange(Some(on_change.as_ref().unchecked_ref()));

        let on_end = {
            let exp = self.clone();
            Closure::wrap(Box::new(move |_ev: web::XrSessionEvent| {
                exp.finish_session();
            }) as Box<dyn FnMut(_)>)
        };
        session.set_onend(Some(on_end.as_ref().unchecked_ref()));

        let on_frame = self.frame_closure(active.clone());
        if let Some(cb) = on_frame.borrow().as_ref() {
            session.request_animation_frame(cb.as_ref().unchecked_ref());
        }

        *self.current.borrow_mut() = Some(SessionHandle {
            active,
            on_frame,
            _on_change: on_change,
            _on_end: on_end,
        });
        self.state.status.set(SessionStatus::Immersive);
        if let Some(document) = dom::window_document() {
            overlay::show_enter_vr(&document, true);
        }
        Ok(())
    }

    fn frame_closure(&self, active: Rc<RefCell<ActiveSession>>) -> Rc<RefCell<Option<FrameClosure>>> {
        let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let next = slot.clone();
        let state = self.state.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |_t: f64, frame: web::XrFrame| {
            let mut a = active.borrow_mut();
            if let Some(cb) = next.borrow().as_ref() {
                a.session.request_animation_frame(cb.as_ref().unchecked_ref());
            }
            render_xr_frame(&state, &mut a, &frame);
        }) as Box<dyn FnMut(f64, web::XrFrame)>));
        slot
    }

    fn finish_session(&self) {
        let Some(handle) = self.current.borrow_mut().take() else {
            return;
        };
        {
            let mut a = handle.active.borrow_mut();
            a.session.set_oninputsourceschange(None);
            a.session.set_onend(None);
            a.sources.clear(&mut self.state.input.borrow_mut());
        }
        log::info!("[xr] session ended; back to desktop view");
        self.state.status.set(SessionStatus::XrAvailable);
        if let Some(document) = dom::window_document() {
            overlay::show_enter_vr(&document, false);
        }
        // called from inside `_on_end`: release the closures after it returns
        spawn_local(async move {
            handle.on_frame.borrow_mut().take();
            drop(handle);
        });
    }
}

fn render_xr_frame(state: &AppState, a: &mut ActiveSession, frame: &web::XrFrame) {
    a.sources
        .poll(&mut state.input.borrow_mut(), frame, &a.ref_space);
    tick_markers(state);

    if let Some(pose) = frame.get_viewer_pose(&a.ref_space) {
        let scene = &state.scene;
        let hands = state.demo.hands.borrow();
        a.renderer.begin_frame(a.layer.framebuffer().as_ref(), scene);
        for view in pose.views().iter() {
            let Ok(view) = view.dyn_into::<web::XrView>() else {
                continue;
            };
            let Some(vp) = a.layer.get_viewport(&view) else {
                continue;
            };
            let proj = Mat4::from_cols_slice(&view.projection_matrix());
            let view_m = Mat4::from_cols_slice(&view.transform().inverse().matrix());
            a.renderer.draw_view(
                (vp.x(), vp.y(), vp.width(), vp.height()),
                proj * view_m,
                scene,
                &hands,
            );
        }
    }
    refresh_inspector(state, &mut a.inspector);
}

/// Hidden WebGL2 context created XR-compatible up front.
fn create_xr_gl_context() -> anyhow::Result<web::WebGl2RenderingContext> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement =
        dom::ensure_element(&document, XR_GL_CANVAS_ID, "canvas", "display:none")?
            .dyn_into()
            .map_err(js_err_el)?;
    let attrs = web::WebGlContextAttributes::new();
    attrs.set_xr_compatible(true);
    attrs.set_antialias(true);
    attrs.set_alpha(false);
    canvas
        .get_context_with_context_options("webgl2", &attrs)
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("WebGL2 unavailable"))?
        .dyn_into::<web::WebGl2RenderingContext>()
        .map_err(|e| anyhow::anyhow!("not a WebGL2 context: {:?}", e))
}

fn js_err_el(e: web::Element) -> anyhow::Error {
    anyhow::anyhow!("#{} is not a canvas: {:?}", XR_GL_CANVAS_ID, e)
}

/// Request `kind`, falling back to `local` when the runtime refuses it.
async fn request_reference_space(
    session: &web::XrSession,
    kind: ReferenceSpaceKind,
) -> anyhow::Result<web::XrReferenceSpace> {
    let mut candidates = vec![kind];
    if kind != ReferenceSpaceKind::Local {
        candidates.push(ReferenceSpaceKind::Local);
    }
    let mut last_err = None;
    for k in candidates {
        match JsFuture::from(session.request_reference_space(space_type(k))).await {
            Ok(space) => {
                log::info!("[xr] reference space {}", k.as_str());
                return space.dyn_into().map_err(js_err);
            }
            Err(e) => {
                log::warn!("[xr] reference space {} refused: {:?}", k.as_str(), e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.map(js_err).unwrap_or_else(|| anyhow::anyhow!("no reference space")))
}
