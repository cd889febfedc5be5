//! Damped orbit camera
//!
//! Spherical orbit around a fixed target. Mouse drags accumulate into
//! angle deltas that bleed into the orientation a fraction per update and
//! decay by the same fraction, giving the glide-to-rest feel. When idle,
//! auto-rotate feeds a constant azimuth delta instead.

use glam::{Mat4, Vec3};

use crate::params;

/// Keeps the polar angle off the poles so the view basis stays valid
const POLAR_EPSILON: f32 = 1e-4;

/// Orbit radius limits for wheel dollying
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 50.0;

/// Per-notch dolly factor; one notch in multiplies the radius by this
const DOLLY_SCALE: f32 = 0.95;

pub struct OrbitCamera {
    /// Point the camera orbits and looks at
    pub target: Vec3,
    /// Distance from the target
    radius: f32,
    /// Rotation about the world Y axis
    azimuth: f32,
    /// Angle from the world +Y axis (pi/2 = horizon)
    polar: f32,
    /// Pending azimuth rotation, consumed gradually by damping
    delta_azimuth: f32,
    /// Pending polar rotation, consumed gradually by damping
    delta_polar: f32,
    dragging: bool,
    pub auto_rotate: bool,
    aspect: f32,
}

impl OrbitCamera {
    /// Create a camera at `position` orbiting `target`
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> Self {
        let offset = position - target;
        let radius = offset.length().max(MIN_RADIUS);
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            delta_azimuth: 0.0,
            delta_polar: 0.0,
            dragging: false,
            auto_rotate: true,
            aspect,
        }
    }

    /// World-space camera position for the current orbit state
    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed a mouse drag in pixels; a full window height of vertical drag
    /// sweeps one revolution
    pub fn drag(&mut self, dx: f32, dy: f32, window_height: f32) {
        let scale = std::f32::consts::TAU / window_height.max(1.0);
        self.delta_azimuth -= dx * scale;
        self.delta_polar -= dy * scale;
    }

    /// Dolly by wheel notches; positive moves closer
    pub fn dolly(&mut self, notches: f32) {
        self.radius = (self.radius * DOLLY_SCALE.powf(notches)).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Advance damping by one frame
    ///
    /// Applies the damped fraction of the pending deltas, decays the
    /// remainder, and feeds the auto-rotate increment while not dragging.
    pub fn update(&mut self) {
        if self.auto_rotate && !self.dragging {
            self.delta_azimuth -= auto_rotate_angle();
        }

        self.azimuth += self.delta_azimuth * params::ORBIT_DAMPING;
        self.polar += self.delta_polar * params::ORBIT_DAMPING;
        self.polar = self
            .polar
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);

        self.delta_azimuth *= 1.0 - params::ORBIT_DAMPING;
        self.delta_polar *= 1.0 - params::ORBIT_DAMPING;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            params::CAMERA_FOV_DEGREES.to_radians(),
            self.aspect,
            params::CAMERA_NEAR,
            params::CAMERA_FAR,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Azimuth increment per update when auto-rotating; speed 2.0 completes
/// an orbit in 30 seconds of 60 fps updates
fn auto_rotate_angle() -> f32 {
    std::f32::consts::TAU / 60.0 / 60.0 * params::AUTO_ROTATE_SPEED
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_camera() -> OrbitCamera {
        OrbitCamera::new(params::CAMERA_POSITION, params::ORBIT_TARGET, 2.0)
    }

    #[test]
    fn initial_state_reproduces_configured_position() {
        let camera = demo_camera();
        assert!(camera.position().distance(params::CAMERA_POSITION) < 1e-4);
    }

    #[test]
    fn damping_consumes_a_fraction_and_decays_the_rest() {
        let mut camera = demo_camera();
        camera.auto_rotate = false;
        camera.delta_azimuth = 1.0;
        let before = camera.azimuth;

        camera.update();

        assert!((camera.azimuth - before - params::ORBIT_DAMPING).abs() < 1e-6);
        assert!((camera.delta_azimuth - (1.0 - params::ORBIT_DAMPING)).abs() < 1e-6);
    }

    #[test]
    fn auto_rotate_feeds_constant_angle_per_update() {
        let mut camera = demo_camera();
        camera.auto_rotate = true;
        let expected = std::f32::consts::TAU / 60.0 / 60.0 * params::AUTO_ROTATE_SPEED;

        let before = camera.azimuth;
        camera.update();
        let applied = before - camera.azimuth;
        assert!((applied - expected * params::ORBIT_DAMPING).abs() < 1e-7);
    }

    #[test]
    fn dragging_suspends_auto_rotate() {
        let mut camera = demo_camera();
        camera.begin_drag();
        let before = camera.azimuth;
        camera.update();
        assert_eq!(camera.azimuth, before);
    }

    #[test]
    fn polar_angle_never_reaches_the_poles() {
        let mut camera = demo_camera();
        camera.auto_rotate = false;
        camera.delta_polar = -100.0;
        for _ in 0..200 {
            camera.update();
        }
        assert!(camera.polar >= POLAR_EPSILON);

        camera.delta_polar = 100.0;
        for _ in 0..200 {
            camera.update();
        }
        assert!(camera.polar <= std::f32::consts::PI - POLAR_EPSILON);
    }

    #[test]
    fn dolly_scales_radius_within_limits() {
        let mut camera = demo_camera();
        let before = camera.radius;
        camera.dolly(1.0);
        assert!((camera.radius - before * 0.95).abs() < 1e-6);

        camera.dolly(-1000.0);
        assert_eq!(camera.radius, MAX_RADIUS);
        camera.dolly(1000.0);
        assert_eq!(camera.radius, MIN_RADIUS);
    }

    #[test]
    fn aspect_feeds_the_projection() {
        let mut camera = demo_camera();
        camera.set_aspect(800.0 / 600.0);
        let projection = camera.projection_matrix();
        let focal = 1.0 / (params::CAMERA_FOV_DEGREES.to_radians() / 2.0).tan();
        assert!((projection.col(0).x - focal / (800.0 / 600.0)).abs() < 1e-4);
        assert!((projection.col(1).y - focal).abs() < 1e-4);
    }
}
