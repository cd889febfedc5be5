//! Material parameters for the tube meshes
//!
//! Holds the shading knobs and the animated UV transform each tube feeds
//! into its draw. The transform composes repeat, rotation and offset into
//! a 3x3 matrix applied to texture coordinates in the vertex stage, so
//! scrolling a texture is just nudging the offset once per frame.

use glam::{Mat3, Vec2, Vec3};

use crate::params;

/// Repeat, rotation and offset applied to a mesh's texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTransform {
    pub repeat: Vec2,
    pub offset: Vec2,
    /// Rotation in radians about the UV origin
    pub rotation: f32,
}

impl Default for UvTransform {
    fn default() -> Self {
        Self {
            repeat: Vec2::ONE,
            offset: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

impl UvTransform {
    /// Compose into a matrix for `uv' = M * (u, v, 1)`.
    ///
    /// Scale applies first, then rotation, then offset, with the UV origin
    /// as the pivot.
    pub fn matrix(&self) -> Mat3 {
        let (s, c) = self.rotation.sin_cos();
        Mat3::from_cols(
            Vec3::new(self.repeat.x * c, -self.repeat.y * s, 0.0),
            Vec3::new(self.repeat.x * s, self.repeat.y * c, 0.0),
            Vec3::new(self.offset.x, self.offset.y, 1.0),
        )
    }
}

/// Shading parameters for one tube mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub uv: UvTransform,
    /// Added to the UV offset once per animation tick
    pub offset_step: Vec2,
    pub roughness: f32,
    /// Glossy second specular lobe on top of the base layer
    pub clearcoat: f32,
    /// Strength of the reflected environment term
    pub env_intensity: f32,
    /// Fragments with sampled alpha below this are discarded; zero
    /// disables the test
    pub alpha_cutoff: f32,
}

impl Material {
    /// Outer tube: scrolling skin with a strong environment reflection.
    pub fn eel() -> Self {
        Self {
            uv: UvTransform {
                repeat: Vec2::new(params::EEL_UV_REPEAT.0, params::EEL_UV_REPEAT.1),
                offset: Vec2::ZERO,
                rotation: 0.0,
            },
            offset_step: Vec2::new(params::EEL_OFFSET_STEP.0, params::EEL_OFFSET_STEP.1),
            roughness: params::EEL_ROUGHNESS,
            clearcoat: params::EEL_CLEARCOAT,
            env_intensity: params::EEL_ENV_INTENSITY,
            alpha_cutoff: 0.0,
        }
    }

    /// Coiled tube: rotated fin texture whose green channel doubles as
    /// the alpha mask, no environment contribution.
    pub fn koi() -> Self {
        Self {
            uv: UvTransform {
                repeat: Vec2::new(params::KOI_UV_REPEAT.0, params::KOI_UV_REPEAT.1),
                offset: Vec2::ZERO,
                rotation: params::KOI_UV_ROTATION,
            },
            offset_step: Vec2::new(params::KOI_OFFSET_STEP.0, params::KOI_OFFSET_STEP.1),
            roughness: 1.0,
            clearcoat: 0.0,
            env_intensity: 0.0,
            alpha_cutoff: params::KOI_ALPHA_CUTOFF,
        }
    }

    /// Advance the scrolling animation by one tick.
    pub fn advance(&mut self) {
        self.uv.offset += self.offset_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_leaves_uvs_alone() {
        let m = UvTransform::default().matrix();
        let uv = m.transform_point2(Vec2::new(0.25, 0.75));
        assert!(uv.distance(Vec2::new(0.25, 0.75)) < 1e-6);
    }

    #[test]
    fn repeat_and_offset_compose_without_rotation() {
        let transform = UvTransform {
            repeat: Vec2::new(10.0, 2.0),
            offset: Vec2::new(0.5, -0.25),
            rotation: 0.0,
        };
        let uv = transform.matrix().transform_point2(Vec2::new(1.0, 1.0));
        assert!(uv.distance(Vec2::new(10.5, 1.75)) < 1e-5);
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        // With repeat (1, 40) and a quarter turn, u maps onto -v scaled by
        // the v repeat.
        let transform = UvTransform {
            repeat: Vec2::new(1.0, 40.0),
            offset: Vec2::ZERO,
            rotation: std::f32::consts::FRAC_PI_2,
        };
        let uv = transform.matrix().transform_point2(Vec2::new(1.0, 0.0));
        assert!(uv.x.abs() < 1e-4);
        assert!((uv.y + 40.0).abs() < 1e-3);

        let uv = transform.matrix().transform_point2(Vec2::new(0.0, 1.0));
        assert!((uv.x - 1.0).abs() < 1e-4);
        assert!(uv.y.abs() < 1e-3);
    }

    #[test]
    fn advance_accumulates_offset_steps() {
        let mut material = Material::eel();
        for _ in 0..10 {
            material.advance();
        }
        assert!((material.uv.offset.x - 0.1).abs() < 1e-6);
        assert!((material.uv.offset.y - 0.01).abs() < 1e-6);

        let mut material = Material::koi();
        material.advance();
        assert_eq!(material.uv.offset.x, 0.0);
        assert!((material.uv.offset.y + 0.01).abs() < 1e-6);
    }

    #[test]
    fn koi_material_masks_but_never_reflects() {
        let koi = Material::koi();
        assert!(koi.alpha_cutoff > 0.0);
        assert_eq!(koi.env_intensity, 0.0);

        let eel = Material::eel();
        assert_eq!(eel.alpha_cutoff, 0.0);
        assert!(eel.env_intensity > 1.0);
    }
}
