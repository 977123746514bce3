//! Scene description shared by the renderers.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Orbit camera around a target, parametrised like a turntable.
///
/// `alpha` is the longitudinal angle and `beta` the polar angle measured
/// from +Y. The eye sits at
/// `target + radius * (cos α sin β, cos β, sin α sin β)`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            alpha: CAMERA_ALPHA,
            beta: CAMERA_BETA,
            radius: CAMERA_RADIUS,
            target: Vec3::ZERO,
            fovy_radians: CAMERA_FOV_Y,
            znear: CAMERA_Z_NEAR,
            zfar: CAMERA_Z_FAR,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(ca * sb, cb, sa * sb)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Apply a pointer drag measured in pixels.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32) {
        self.alpha += dx * ORBIT_RADIANS_PER_PIXEL;
        self.beta = (self.beta - dy * ORBIT_RADIANS_PER_PIXEL).clamp(CAMERA_BETA_MIN, CAMERA_BETA_MAX);
    }

    /// Apply a wheel delta; positive values move away from the target.
    pub fn zoom_by(&mut self, wheel_delta: f32) {
        let factor = 1.0 + wheel_delta * ZOOM_PER_WHEEL_UNIT;
        self.radius = (self.radius * factor.max(0.1)).clamp(CAMERA_RADIUS_MIN, CAMERA_RADIUS_MAX);
    }
}

/// Sky/ground two-color light coming from `direction`.
#[derive(Clone, Debug, PartialEq)]
pub struct HemisphericLight {
    pub direction: Vec3,
    pub intensity: f32,
    pub sky_color: Vec3,
    pub ground_color: Vec3,
}

impl Default for HemisphericLight {
    fn default() -> Self {
        Self {
            direction: Vec3::from(LIGHT_DIRECTION).normalize(),
            intensity: LIGHT_INTENSITY,
            sky_color: Vec3::from(LIGHT_SKY_COLOR),
            ground_color: Vec3::from(LIGHT_GROUND_COLOR),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    pub skybox_size: f32,
    pub ground_color: Vec3,
    pub sky_top: Vec3,
    pub sky_horizon: Vec3,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            skybox_size: SKYBOX_SIZE,
            ground_color: Vec3::from(GROUND_COLOR),
            sky_top: Vec3::from(SKY_TOP_COLOR),
            sky_horizon: Vec3::from(SKY_HORIZON_COLOR),
        }
    }
}

impl Environment {
    /// Diameter of the ground disc, which follows the skybox.
    pub fn ground_size(&self) -> f32 {
        self.skybox_size * GROUND_TO_SKYBOX
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDescription {
    pub light: HemisphericLight,
    pub environment: Environment,
    pub camera: OrbitCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_matches_turntable_angles() {
        let cam = OrbitCamera::default();
        let eye = cam.eye();
        assert!((eye.length() - 10.0).abs() < 1e-4);
        // beta = pi/4 puts the eye at 45 degrees above the ground plane
        assert!((eye.y - 10.0 * std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
        // alpha = -3pi/4 puts it in the -x, -z quadrant
        assert!(eye.x < 0.0 && eye.z < 0.0);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let cam = OrbitCamera::default();
        let clip = cam.view_proj(16.0 / 9.0) * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn rotation_and_zoom_are_clamped() {
        let mut cam = OrbitCamera::default();
        cam.rotate_by_pixels(0.0, -1.0e6);
        assert_eq!(cam.beta, CAMERA_BETA_MAX);
        cam.rotate_by_pixels(0.0, 1.0e6);
        assert_eq!(cam.beta, CAMERA_BETA_MIN);
        cam.zoom_by(1.0e6);
        assert_eq!(cam.radius, CAMERA_RADIUS_MAX);
        for _ in 0..4 {
            cam.zoom_by(-1.0e6);
        }
        assert_eq!(cam.radius, CAMERA_RADIUS_MIN);
    }

    #[test]
    fn ground_follows_skybox_size() {
        let mut env = Environment::default();
        assert_eq!(env.skybox_size, 30.0);
        assert_eq!(env.ground_size(), 15.0);
        env.skybox_size = 50.0;
        assert_eq!(env.ground_size(), 25.0);
    }
}
