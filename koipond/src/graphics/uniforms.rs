//! GPU uniform layouts
//!
//! Plain-old-data mirrors of the WGSL uniform structs. Every struct is
//! 16-byte aligned field by field so the Rust and WGSL layouts agree
//! without manual padding arithmetic beyond the trailing vec4 lanes.

use glam::{Mat4, Vec2, Vec3};

use crate::params;
use crate::scene::material::Material;

use super::godrays::GodRaySettings;

/// Per-frame camera and lighting state, shared by both tube pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position (w unused)
    pub camera_pos: [f32; 4],
    /// Direction toward the light in xyz, intensity in w
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    /// Ambient color in rgb, intensity in w
    pub ambient: [f32; 4],
}

impl GlobalsUniform {
    pub fn new(view_proj: Mat4, camera_pos: Vec3) -> Self {
        let sun_dir = params::SUN_POSITION.normalize();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: [camera_pos.x, camera_pos.y, camera_pos.z, 1.0],
            sun_direction: [sun_dir.x, sun_dir.y, sun_dir.z, params::SUN_INTENSITY],
            sun_color: [
                params::SUN_COLOR.x,
                params::SUN_COLOR.y,
                params::SUN_COLOR.z,
                0.0,
            ],
            ambient: [
                params::AMBIENT_COLOR.x,
                params::AMBIENT_COLOR.y,
                params::AMBIENT_COLOR.z,
                params::AMBIENT_INTENSITY,
            ],
        }
    }
}

/// Per-mesh shading state. Rewritten every frame because the UV offset
/// animates.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Column-major mat3x3 with vec4-aligned columns, as WGSL lays it out
    pub uv_transform: [[f32; 4]; 3],
    /// roughness, clearcoat, env intensity, alpha cutoff
    pub params: [f32; 4],
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        let m = material.uv.matrix();
        let column = |i: usize| {
            let c = m.col(i);
            [c.x, c.y, c.z, 0.0]
        };
        Self {
            uv_transform: [column(0), column(1), column(2)],
            params: [
                material.roughness,
                material.clearcoat,
                material.env_intensity,
                material.alpha_cutoff,
            ],
        }
    }
}

/// Ray-march parameters plus the light's screen position for this frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GodRaysUniform {
    /// Light position in texture UV space in xy (zw unused)
    pub light_uv: [f32; 4],
    /// density, weight, decay, exposure
    pub march: [f32; 4],
    /// max luminance clamp, sample count (as f32), rest unused
    pub limits: [f32; 4],
}

impl GodRaysUniform {
    pub fn new(light_uv: Vec2, settings: &GodRaySettings) -> Self {
        Self {
            light_uv: [light_uv.x, light_uv.y, 0.0, 0.0],
            march: [
                settings.density,
                settings.weight,
                settings.decay,
                settings.exposure,
            ],
            limits: [settings.clamp_max, settings.samples as f32, 0.0, 0.0],
        }
    }
}

/// Flat color for the beacon in the occlusion pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OcclusionUniform {
    pub color: [f32; 4],
}

impl OcclusionUniform {
    pub fn beacon() -> Self {
        Self {
            color: [
                params::RAY_COLOR.x,
                params::RAY_COLOR.y,
                params::RAY_COLOR.z,
                1.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(size_of::<GlobalsUniform>(), 128);
        assert_eq!(size_of::<MaterialUniform>(), 64);
        assert_eq!(size_of::<GodRaysUniform>(), 48);
        assert_eq!(size_of::<OcclusionUniform>(), 16);
    }

    #[test]
    fn material_uniform_packs_matrix_columns() {
        let material = Material::koi();
        let uniform = MaterialUniform::from(&material);
        let m = material.uv.matrix();
        for i in 0..3 {
            let c = m.col(i);
            assert_eq!(uniform.uv_transform[i], [c.x, c.y, c.z, 0.0]);
        }
        assert_eq!(uniform.params[3], material.alpha_cutoff);
    }

    #[test]
    fn globals_point_the_sun_straight_up() {
        let g = GlobalsUniform::new(Mat4::IDENTITY, Vec3::ZERO);
        assert_eq!(&g.sun_direction[..3], &[0.0, 1.0, 0.0]);
        assert_eq!(g.sun_direction[3], params::SUN_INTENSITY);
    }
}
