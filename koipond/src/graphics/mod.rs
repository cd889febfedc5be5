//! wgpu rendering backend
//!
//! Owns the device, surface, offscreen targets, pipelines, and every
//! GPU-side resource the scene needs. Geometry is uploaded once at
//! startup; per-frame work is limited to uniform writes and the four
//! render passes in [`frame`]:
//!
//! 1. scene: both tubes into an HDR target with depth,
//! 2. occlusion: the beacon interior against the scene depth,
//! 3. god rays: a half resolution radial march over the occlusion target,
//! 4. composite: screen blend, tone map, and present.

mod frame;
mod godrays;
mod init;
mod pipeline;
mod texture;
mod uniforms;
mod vertex;

pub use godrays::{GodRaySettings, light_screen_uv};
pub use init::{
    DEPTH_FORMAT, MeshBuffers, OCCLUSION_FORMAT, RAYS_FORMAT, RenderTargets, SCENE_FORMAT,
};
pub use pipeline::{BindLayouts, Pipelines};
pub use texture::{SamplerSet, SceneTexture};
pub use uniforms::{GlobalsUniform, GodRaysUniform, MaterialUniform, OcclusionUniform};

use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::fetch::{FetchedImage, TextureKind};
use crate::params;
use crate::scene::Scene;

pub struct PondGraphics {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    layouts: BindLayouts,
    pipelines: Pipelines,
    samplers: SamplerSet,

    eel: MeshBuffers,
    koi: MeshBuffers,
    beacon: MeshBuffers,

    globals_buffer: wgpu::Buffer,
    eel_material_buffer: wgpu::Buffer,
    koi_material_buffer: wgpu::Buffer,
    godrays_buffer: wgpu::Buffer,

    eel_albedo: SceneTexture,
    koi_albedo: SceneTexture,
    environment: SceneTexture,

    globals_bind: wgpu::BindGroup,
    eel_material_bind: wgpu::BindGroup,
    koi_material_bind: wgpu::BindGroup,
    environment_bind: wgpu::BindGroup,
    occlusion_bind: wgpu::BindGroup,
    godrays_bind: wgpu::BindGroup,
    composite_bind: wgpu::BindGroup,

    godray_settings: GodRaySettings,
}

impl PondGraphics {
    pub async fn new(window: Arc<Window>, scene: &Scene, vsync: bool) -> Result<Self> {
        let init::GpuContext {
            surface,
            device,
            queue,
            config,
        } = init::acquire_gpu(window, vsync).await?;

        let layouts = BindLayouts::new(&device);
        let pipelines = Pipelines::new(&device, &layouts, config.format);
        let samplers = SamplerSet::new(&device);
        let targets = RenderTargets::new(&device, config.width, config.height);

        let eel = MeshBuffers::from_mesh(&device, "Eel", &scene.eel_mesh);
        let koi = MeshBuffers::from_mesh(&device, "Koi", &scene.koi_mesh);
        let beacon = MeshBuffers::from_mesh(&device, "Beacon", &scene.beacon_mesh);

        let globals =
            GlobalsUniform::new(scene.camera.view_projection(), scene.camera.position());
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let eel_material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Eel Material Buffer"),
            contents: bytemuck::bytes_of(&MaterialUniform::from(&scene.eel_material)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let koi_material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Koi Material Buffer"),
            contents: bytemuck::bytes_of(&MaterialUniform::from(&scene.koi_material)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        // The beacon color never changes, so its uniform is written once
        let occlusion_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Occlusion Buffer"),
            contents: bytemuck::bytes_of(&OcclusionUniform::beacon()),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let godray_settings = GodRaySettings::default();
        let light_uv = light_screen_uv(scene.camera.view_projection(), params::BEACON_POSITION);
        let godrays_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("God Rays Buffer"),
            contents: bytemuck::bytes_of(&GodRaysUniform::new(light_uv, &godray_settings)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let eel_albedo = SceneTexture::solid(&device, &queue, "Eel Fallback", [128, 128, 128, 255]);
        let koi_albedo = SceneTexture::solid(&device, &queue, "Koi Fallback", [128, 128, 128, 255]);
        let environment =
            SceneTexture::solid(&device, &queue, "Environment Fallback", [0, 0, 0, 255]);

        let globals_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &layouts.globals,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let eel_material_bind = material_bind_group(
            &device,
            &layouts,
            "Eel Material Bind Group",
            &eel_material_buffer,
            &eel_albedo,
            &samplers.mirror,
        );
        let koi_material_bind = material_bind_group(
            &device,
            &layouts,
            "Koi Material Bind Group",
            &koi_material_buffer,
            &koi_albedo,
            &samplers.repeat,
        );
        let environment_bind = environment_bind_group(&device, &layouts, &environment, &samplers);
        let occlusion_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Occlusion Bind Group"),
            layout: &layouts.occlusion,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: occlusion_buffer.as_entire_binding(),
            }],
        });
        let godrays_bind =
            godrays_bind_group(&device, &layouts, &godrays_buffer, &targets, &samplers);
        let composite_bind = composite_bind_group(&device, &layouts, &targets, &samplers);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            layouts,
            pipelines,
            samplers,
            eel,
            koi,
            beacon,
            globals_buffer,
            eel_material_buffer,
            koi_material_buffer,
            godrays_buffer,
            eel_albedo,
            koi_albedo,
            environment,
            globals_bind,
            eel_material_bind,
            koi_material_bind,
            environment_bind,
            occlusion_bind,
            godrays_bind,
            composite_bind,
            godray_settings,
        })
    }

    pub fn new_blocking(window: Arc<Window>, scene: &Scene, vsync: bool) -> Result<Self> {
        pollster::block_on(Self::new(window, scene, vsync))
    }

    /// Reconfigure the surface and rebuild every size-dependent target.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets = RenderTargets::new(&self.device, width, height);

        // The post passes sample the old views, so they need new groups
        self.godrays_bind = godrays_bind_group(
            &self.device,
            &self.layouts,
            &self.godrays_buffer,
            &self.targets,
            &self.samplers,
        );
        self.composite_bind =
            composite_bind_group(&self.device, &self.layouts, &self.targets, &self.samplers);
    }

    /// Swap a placeholder for a downloaded texture and re-point the bind
    /// group that samples it.
    pub fn install_texture(&mut self, image: &FetchedImage) -> Result<()> {
        match image.kind {
            TextureKind::EelAlbedo => {
                self.eel_albedo = SceneTexture::from_rgba8(
                    &self.device,
                    &self.queue,
                    "Eel Albedo",
                    image.width,
                    image.height,
                    &image.pixels,
                )?;
                self.eel_material_bind = material_bind_group(
                    &self.device,
                    &self.layouts,
                    "Eel Material Bind Group",
                    &self.eel_material_buffer,
                    &self.eel_albedo,
                    &self.samplers.mirror,
                );
            }
            TextureKind::KoiAlbedo => {
                self.koi_albedo = SceneTexture::from_rgba8(
                    &self.device,
                    &self.queue,
                    "Koi Albedo",
                    image.width,
                    image.height,
                    &image.pixels,
                )?;
                self.koi_material_bind = material_bind_group(
                    &self.device,
                    &self.layouts,
                    "Koi Material Bind Group",
                    &self.koi_material_buffer,
                    &self.koi_albedo,
                    &self.samplers.repeat,
                );
            }
            TextureKind::Environment => {
                self.environment = SceneTexture::from_rgba8(
                    &self.device,
                    &self.queue,
                    "Environment",
                    image.width,
                    image.height,
                    &image.pixels,
                )?;
                self.environment_bind = environment_bind_group(
                    &self.device,
                    &self.layouts,
                    &self.environment,
                    &self.samplers,
                );
            }
        }
        tracing::info!(
            "Installed {:?} texture ({}x{})",
            image.kind,
            image.width,
            image.height
        );
        Ok(())
    }
}

fn material_bind_group(
    device: &wgpu::Device,
    layouts: &BindLayouts,
    label: &str,
    buffer: &wgpu::Buffer,
    albedo: &SceneTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &layouts.material,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&albedo.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn environment_bind_group(
    device: &wgpu::Device,
    layouts: &BindLayouts,
    environment: &SceneTexture,
    samplers: &SamplerSet,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Environment Bind Group"),
        layout: &layouts.environment,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&environment.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&samplers.environment),
            },
        ],
    })
}

fn godrays_bind_group(
    device: &wgpu::Device,
    layouts: &BindLayouts,
    buffer: &wgpu::Buffer,
    targets: &RenderTargets,
    samplers: &SamplerSet,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("God Rays Bind Group"),
        layout: &layouts.godrays,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&targets.occlusion),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&samplers.clamp),
            },
        ],
    })
}

fn composite_bind_group(
    device: &wgpu::Device,
    layouts: &BindLayouts,
    targets: &RenderTargets,
    samplers: &SamplerSet,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Composite Bind Group"),
        layout: &layouts.composite,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.scene),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&targets.rays),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&samplers.clamp),
            },
        ],
    })
}
