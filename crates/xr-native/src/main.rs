use glam::Vec3;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use xr_core::config::DemoConfig;
use xr_core::input::InputFrame;
use xr_core::inspector::{self, SessionStatus};
use xr_core::tick::sync_markers;
use xr_core::{
    ButtonState, ControllerId, DemoContext, HandSide, InputAttachment, SceneDescription, XrInput,
};
use xr_render::GpuSurface;

mod keys;
mod report;

use report::ReportTimer;

const SIM_PROFILE: &str = "oculus-touch-v3";
const SIM_ORBIT_RADIUS: f32 = 0.15;

/// A keyboard-driven stand-in for one tracked controller.
struct SimController {
    id: ControllerId,
    side: HandSide,
    rest: Vec3,
    buttons: [ButtonState; keys::SLOT_COUNT],
}

impl SimController {
    fn connect(input: &mut XrInput, side: HandSide, rest: Vec3) -> Self {
        let id = input.add_controller(side.as_str(), vec![SIM_PROFILE.to_string()]);
        Self {
            id,
            side,
            rest,
            buttons: [ButtonState::RELEASED; keys::SLOT_COUNT],
        }
    }

    fn pointer_at(&self, t: f32) -> Vec3 {
        let phase = match self.side {
            HandSide::Left => 0.0,
            HandSide::Right => std::f32::consts::PI,
        };
        let a = t + phase;
        self.rest + SIM_ORBIT_RADIUS * Vec3::new(a.cos(), 0.5 * (1.3 * a).sin(), a.sin())
    }

    fn frame(&self, t: f32) -> InputFrame {
        let pointer = self.pointer_at(t);
        InputFrame {
            buttons: Some(self.buttons.to_vec()),
            pointer: Some(pointer),
            grip: Some(pointer),
        }
    }
}

struct Preview {
    ctx: DemoContext,
    input: XrInput,
    _attachment: InputAttachment,
    sims: [SimController; 2],
    shift: bool,
    started: Instant,
    report: ReportTimer,
}

impl Preview {
    fn new(config: &DemoConfig) -> Self {
        let ctx = DemoContext::new();
        let mut input = XrInput::new();
        let attachment = ctx.attach(&input);
        let sims = [
            SimController::connect(&mut input, HandSide::Left, xr_core::left_marker_offset()),
            SimController::connect(&mut input, HandSide::Right, xr_core::right_marker_offset()),
        ];
        Self {
            ctx,
            input,
            _attachment: attachment,
            sims,
            shift: false,
            started: Instant::now(),
            report: ReportTimer::from_config(config, Instant::now()),
        }
    }

    fn key(&mut self, code: KeyCode, down: bool) {
        let Some((side, slot)) = keys::button_for_key(code) else {
            return;
        };
        let state = keys::button_state(down, self.shift);
        if let Some(sim) = self.sims.iter_mut().find(|s| s.side == side) {
            sim.buttons[slot] = state;
        }
    }

    /// Feed the simulated gamepads to the input registry and move the markers.
    fn update(&mut self) {
        let t = self.started.elapsed().as_secs_f32();
        for sim in &self.sims {
            if let Err(e) = self.input.update(sim.id, &sim.frame(t)) {
                log::warn!("[input] {}", e);
            }
        }
        let input = &self.input;
        sync_markers(&mut self.ctx.hands.borrow_mut(), |id| input.pointer_position(id));

        if self.report.due(Instant::now()) {
            log::info!(
                "[inspector]\n{}",
                inspector::report(&self.ctx.hands.borrow(), SessionStatus::Desktop)
            );
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // `key=value` arguments use the same keys as the web page's query string
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = DemoConfig::from_query(&args.join("&"));
    log::info!(
        "[config] session={} space={} inspector={}",
        config.xr.session_mode.as_str(),
        config.xr.reference_space.as_str(),
        config.show_inspector
    );

    let mut preview = Preview::new(&config);
    log::info!(
        "[input] left: Q trigger, A squeeze, W Y, S X, E stick, D thumbrest; \
         right: U, J, I (B), K (A), O, L; hold Shift to touch only"
    );

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("XR Hands (native preview)")
        .build(&event_loop)
        .expect("window");
    let size = window.inner_size();
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(&window).expect("surface");
    let mut gpu = pollster::block_on(GpuSurface::new(
        &instance,
        surface,
        size.width,
        size.height,
        SceneDescription::default(),
    ))
    .expect("gpu");
    let window = &window;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize_if_needed(size.width, size.height),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::ModifiersChanged(mods),
                ..
            } => preview.shift = mods.state().shift_key(),
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state,
                                repeat: false,
                                ..
                            },
                        ..
                    },
                ..
            } => {
                let down = state == ElementState::Pressed;
                if code == KeyCode::Escape && down {
                    elwt.exit();
                } else if let Some((dx, dy)) = keys::orbit_for_key(code).filter(|_| down) {
                    gpu.scene_mut().camera.rotate_by_pixels(dx, dy);
                } else {
                    preview.key(code, down);
                }
            }
            Event::AboutToWait => {
                preview.update();
                match gpu.render(&preview.ctx.hands.borrow()) {
                    Ok(_) => window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = window.inner_size();
                        gpu.resize_if_needed(size.width, size.height);
                        gpu.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(e) => log::error!("[render] frame error: {:?}", e),
                }
            }
            _ => {}
        })
        .unwrap();
}
