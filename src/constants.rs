/// DOM ids and pacing constants of the web front-end.
///
/// Scene geometry and the button mapping live in `xr_core::constants`; this
/// file only holds what is specific to the browser page.
pub const CANVAS_ID: &str = "app-canvas";
pub const INSPECTOR_ID: &str = "inspector";
pub const ENTER_VR_ID: &str = "enter-vr";

// The immersive views render through their own WebGL2 context, which must not
// share a canvas with the WebGPU desktop surface.
pub const XR_GL_CANVAS_ID: &str = "xr-gl-canvas";

// Inspector text is rebuilt at most this often (milliseconds)
pub const INSPECTOR_REFRESH_MS: u64 = 250;

pub const ENTER_VR_LABEL: &str = "Enter VR";
pub const EXIT_VR_LABEL: &str = "Exit VR";

// Pointer buttons that orbit the desktop camera (primary and middle)
pub const ORBIT_BUTTONS: [i16; 2] = [0, 1];

// Wheel events in line mode are scaled to roughly match pixel mode
pub const WHEEL_LINE_HEIGHT_PX: f32 = 16.0;
pub const WHEEL_PAGE_HEIGHT_PX: f32 = 800.0;

pub const INSPECTOR_STYLE: &str = "position:fixed;top:8px;left:8px;z-index:10;margin:0;\
padding:8px 12px;border-radius:6px;background:rgba(10,14,24,0.8);color:#cfe7ff;\
font:12px ui-monospace,monospace;white-space:pre;pointer-events:none";

pub const ENTER_VR_STYLE: &str = "position:fixed;bottom:24px;left:50%;transform:translateX(-50%);\
z-index:10;padding:10px 20px;border-radius:6px;border:1px solid rgba(80,110,150,0.6);\
background:rgba(10,14,24,0.85);color:#cfe7ff;font:15px system-ui;cursor:pointer";
