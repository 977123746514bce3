#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use xr_core::config::DemoConfig;

mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod guard;
mod overlay;
mod render;
mod state;
mod throttle;
mod xr;

use constants::CANVAS_ID;
use state::AppState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("xr-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = DemoConfig::from_query(&dom::location_search());
    let state = AppState::new(config);

    let canvas = dom::ensure_canvas(&document, CANVAS_ID)?;
    dom::wire_canvas_resize(&canvas);

    overlay::ensure_inspector(&document)?;
    if state.config.show_inspector {
        overlay::show_inspector(&document);
    } else {
        overlay::hide_inspector(&document);
    }

    events::wire_global_keydown(state.clone());
    events::wire_orbit_controls(events::PointerWiring {
        canvas: canvas.clone(),
        state: state.clone(),
        drag: Rc::default(),
    });

    let gpu = render::init_gpu(&canvas, (*state.scene).clone()).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        state.clone(),
        canvas,
        gpu,
    )));
    frame::start_loop(frame_ctx);

    // The desktop view keeps running whatever the outcome.
    match xr::XrExperience::create(state.clone()).await {
        Ok(Some(_)) => log::info!("[xr] ready; press Enter VR"),
        Ok(None) => log::info!("[xr] immersive mode unavailable; desktop view only"),
        Err(e) => {
            state
                .status
                .set(xr_core::inspector::SessionStatus::XrUnsupported);
            log::error!("[xr] setup failed: {:?}", e);
        }
    }
    Ok(())
}
