//! God-ray parameters and light projection
//!
//! The ray march itself runs in a fullscreen shader pass; this module
//! owns the knobs and the little bit of CPU math that feeds it, namely
//! projecting the beacon center into the UV space of the occlusion
//! texture each frame.

use glam::{Mat4, Vec2, Vec3};

use crate::params;

/// Tuning for the radial ray march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GodRaySettings {
    /// How far toward the light each fragment marches (1.0 = all the way)
    pub density: f32,
    /// Contribution of each tap
    pub weight: f32,
    /// Per-step falloff of successive taps
    pub decay: f32,
    /// Final scale on the accumulated light
    pub exposure: f32,
    /// Taps per fragment
    pub samples: u32,
    /// Upper bound on the accumulated result
    pub clamp_max: f32,
}

impl Default for GodRaySettings {
    fn default() -> Self {
        Self {
            density: params::GODRAY_DENSITY,
            weight: params::GODRAY_WEIGHT,
            decay: params::GODRAY_DECAY,
            exposure: params::GODRAY_EXPOSURE,
            samples: params::GODRAY_SAMPLES,
            clamp_max: params::GODRAY_CLAMP_MAX,
        }
    }
}

/// Project a world position into occlusion-texture UV space.
///
/// UV (0, 0) is the top-left of the rendered image, matching how the
/// ray-march pass samples the occlusion target.
pub fn light_screen_uv(view_proj: Mat4, world: Vec3) -> Vec2 {
    let clip = view_proj * world.extend(1.0);
    let w = if clip.w.abs() < f32::EPSILON {
        f32::EPSILON
    } else {
        clip.w
    };
    let ndc = clip.truncate() / w;
    Vec2::new(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_view_proj(eye: Vec3, target: Vec3) -> Mat4 {
        let proj = Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);
        proj * Mat4::look_at_rh(eye, target, Vec3::Y)
    }

    #[test]
    fn centered_light_lands_mid_screen() {
        let vp = test_view_proj(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let uv = light_screen_uv(vp, Vec3::ZERO);
        assert!(uv.distance(Vec2::new(0.5, 0.5)) < 1e-5);
    }

    #[test]
    fn light_above_center_maps_to_upper_uvs() {
        let vp = test_view_proj(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let uv = light_screen_uv(vp, Vec3::new(0.0, 1.0, 0.0));
        assert!(uv.y < 0.5);
        assert!((uv.x - 0.5).abs() < 1e-5);

        let uv = light_screen_uv(vp, Vec3::new(1.0, 0.0, 0.0));
        assert!(uv.x > 0.5);
    }

    #[test]
    fn defaults_match_scene_tuning() {
        let s = GodRaySettings::default();
        assert_eq!(s.density, 1.0);
        assert_eq!(s.weight, 0.2);
        assert_eq!(s.decay, 0.92);
        assert_eq!(s.samples, 60);
    }
}
