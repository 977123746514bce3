use glam::Vec3;

// Shared scene and input-mapping constants used by both web and native frontends.

// Markers
pub const MARKER_DIAMETER: f32 = 0.1;
pub const MARKER_SEGMENTS: u32 = 16;
pub const LEFT_MARKER_OFFSET: [f32; 3] = [-0.5, 0.0, 0.0];
pub const RIGHT_MARKER_OFFSET: [f32; 3] = [0.5, 0.0, 0.0];

// Button-state levels written into color channels
pub const LEVEL_RELEASED: f32 = 0.0;
pub const LEVEL_TOUCHED: f32 = 0.5;
pub const LEVEL_PRESSED: f32 = 1.0;

// Marker scaling per axis (trigger drives y, squeeze drives x/z)
pub const SCALE_RELEASED: f32 = 1.0;
pub const SCALE_PRESSED: f32 = 2.0;

// Marker material opacity (thumbrest touch makes it opaque)
pub const ALPHA_DEFAULT: f32 = 0.5;
pub const ALPHA_THUMBREST: f32 = 1.0;

// Hemispheric light
pub const LIGHT_DIRECTION: [f32; 3] = [0.0, 2.0, 2.0];
pub const LIGHT_INTENSITY: f32 = 1.0;
pub const LIGHT_SKY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const LIGHT_GROUND_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

// Environment
pub const SKYBOX_SIZE: f32 = 30.0;
pub const GROUND_TO_SKYBOX: f32 = 0.5; // ground disc diameter per skybox size
pub const GROUND_TESSELLATION: u32 = 64;
pub const GROUND_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SKY_TOP_COLOR: [f32; 3] = [0.20, 0.32, 0.55];
pub const SKY_HORIZON_COLOR: [f32; 3] = [0.78, 0.84, 0.92];

// Orbit camera (non-XR view)
pub const CAMERA_ALPHA: f32 = -(std::f32::consts::FRAC_PI_4) * 3.0;
pub const CAMERA_BETA: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_RADIUS: f32 = 10.0;
pub const CAMERA_FOV_Y: f32 = 0.8;
pub const CAMERA_Z_NEAR: f32 = 0.1;
pub const CAMERA_Z_FAR: f32 = 100.0;
pub const CAMERA_BETA_MIN: f32 = 0.01;
pub const CAMERA_BETA_MAX: f32 = std::f32::consts::PI - 0.01;
pub const CAMERA_RADIUS_MIN: f32 = 1.0;
pub const CAMERA_RADIUS_MAX: f32 = 50.0;
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.005;
pub const ZOOM_PER_WHEEL_UNIT: f32 = 0.01;

#[inline]
pub fn left_marker_offset() -> Vec3 {
    Vec3::from(LEFT_MARKER_OFFSET)
}

#[inline]
pub fn right_marker_offset() -> Vec3 {
    Vec3::from(RIGHT_MARKER_OFFSET)
}
