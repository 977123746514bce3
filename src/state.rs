use std::cell::{Cell, RefCell};
use std::rc::Rc;
use xr_core::config::DemoConfig;
use xr_core::inspector::SessionStatus;
use xr_core::{DemoContext, OrbitCamera, SceneDescription, XrInput};

/// Handles shared by the DOM listeners, the desktop loop and the XR session.
#[derive(Clone)]
pub struct AppState {
    pub demo: DemoContext,
    pub input: Rc<RefCell<XrInput>>,
    /// Light and environment; the camera part is unused, see `camera`.
    pub scene: Rc<SceneDescription>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub status: Rc<Cell<SessionStatus>>,
    pub config: Rc<DemoConfig>,
}

impl AppState {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            demo: DemoContext::new(),
            input: Rc::new(RefCell::new(XrInput::new())),
            scene: Rc::new(SceneDescription::default()),
            camera: Rc::new(RefCell::new(OrbitCamera::default())),
            status: Rc::new(Cell::new(SessionStatus::Desktop)),
            config: Rc::new(config),
        }
    }

    pub fn immersive(&self) -> bool {
        self.status.get() == SessionStatus::Immersive
    }
}
