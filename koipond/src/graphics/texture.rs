//! Texture upload and samplers
//!
//! All scene textures are RGBA8 sRGB. Until downloads land, 1x1 solid
//! fallbacks stand in: mid grey for the albedos so the tubes render lit
//! but plain, black for the environment so the reflection term stays
//! silent.

use anyhow::Result;
use wgpu::util::DeviceExt;

pub struct SceneTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl SceneTexture {
    /// Upload tightly packed RGBA8 pixels.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            anyhow::bail!(
                "pixel data size mismatch for {label}: expected {expected} bytes, got {}",
                pixels.len()
            );
        }

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { texture, view })
    }

    /// 1x1 placeholder in a fixed color.
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, rgba: [u8; 4]) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: 1,
                    height: 1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// The address modes the scene needs, all linear filtered.
pub struct SamplerSet {
    /// Mirrored repeat on both axes, for the eel skin
    pub mirror: wgpu::Sampler,
    /// Plain repeat on both axes, for the koi skin
    pub repeat: wgpu::Sampler,
    /// Repeat in longitude, clamp in latitude, for the equirect environment
    pub environment: wgpu::Sampler,
    /// Clamp on both axes, for sampling offscreen targets in post passes
    pub clamp: wgpu::Sampler,
}

impl SamplerSet {
    pub fn new(device: &wgpu::Device) -> Self {
        let linear = |label, u, v| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some(label),
                address_mode_u: u,
                address_mode_v: v,
                address_mode_w: wgpu::AddressMode::Repeat,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::FilterMode::Linear,
                ..Default::default()
            })
        };
        Self {
            mirror: linear(
                "Sampler Mirror",
                wgpu::AddressMode::MirrorRepeat,
                wgpu::AddressMode::MirrorRepeat,
            ),
            repeat: linear(
                "Sampler Repeat",
                wgpu::AddressMode::Repeat,
                wgpu::AddressMode::Repeat,
            ),
            environment: linear(
                "Sampler Environment",
                wgpu::AddressMode::Repeat,
                wgpu::AddressMode::ClampToEdge,
            ),
            clamp: linear(
                "Sampler Clamp",
                wgpu::AddressMode::ClampToEdge,
                wgpu::AddressMode::ClampToEdge,
            ),
        }
    }
}
