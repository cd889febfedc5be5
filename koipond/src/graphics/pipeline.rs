//! Bind group layouts and render pipelines
//!
//! Five pipelines cover the whole frame:
//! - two tube pipelines (same shader, different cull mode since the koi
//!   is double sided and alpha tested),
//! - the beacon occlusion pipeline, which draws the light box against
//!   the scene depth without writing it,
//! - the god-ray march and the final composite, both fullscreen
//!   triangles with no vertex buffers.

use super::init::{DEPTH_FORMAT, OCCLUSION_FORMAT, RAYS_FORMAT, SCENE_FORMAT};
use super::vertex;

pub struct BindLayouts {
    /// Group 0 of the scene and occlusion pipelines: camera + lights
    pub globals: wgpu::BindGroupLayout,
    /// Group 1 of the scene pipelines: material uniform + albedo + sampler
    pub material: wgpu::BindGroupLayout,
    /// Group 2 of the scene pipelines: equirect environment + sampler
    pub environment: wgpu::BindGroupLayout,
    /// Group 1 of the occlusion pipeline: flat beacon color
    pub occlusion: wgpu::BindGroupLayout,
    /// Group 0 of the ray march: settings + occlusion texture + sampler
    pub godrays: wgpu::BindGroupLayout,
    /// Group 0 of the composite: scene HDR + ray texture + sampler
    pub composite: wgpu::BindGroupLayout,
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

impl BindLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let globals = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });

        let material = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Bind Group Layout"),
            entries: &[
                // UV transform feeds the vertex stage, shading the fragment
                uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                texture_entry(1),
                sampler_entry(2),
            ],
        });

        let environment = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Environment Bind Group Layout"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });

        let occlusion = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Occlusion Bind Group Layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });

        let godrays = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("God Rays Bind Group Layout"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
                texture_entry(1),
                sampler_entry(2),
            ],
        });

        let composite = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Composite Bind Group Layout"),
            entries: &[texture_entry(0), texture_entry(1), sampler_entry(2)],
        });

        Self {
            globals,
            material,
            environment,
            occlusion,
            godrays,
            composite,
        }
    }
}

pub struct Pipelines {
    pub eel: wgpu::RenderPipeline,
    pub koi: wgpu::RenderPipeline,
    pub beacon_occlusion: wgpu::RenderPipeline,
    pub godrays: wgpu::RenderPipeline,
    pub composite: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/mesh.wgsl")).into(),
            ),
        });
        let occlusion_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Occlusion Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/occlusion.wgsl")).into(),
            ),
        });
        let godrays_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("God Rays Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/godrays.wgsl")).into(),
            ),
        });
        let composite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Composite Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/composite.wgsl")).into(),
            ),
        });

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&layouts.globals, &layouts.material, &layouts.environment],
            push_constant_ranges: &[],
        });
        let occlusion_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Occlusion Pipeline Layout"),
            bind_group_layouts: &[&layouts.globals, &layouts.occlusion],
            push_constant_ranges: &[],
        });
        let godrays_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("God Rays Pipeline Layout"),
            bind_group_layouts: &[&layouts.godrays],
            push_constant_ranges: &[],
        });
        let composite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Composite Pipeline Layout"),
            bind_group_layouts: &[&layouts.composite],
            push_constant_ranges: &[],
        });

        let eel = tube_pipeline(
            device,
            &scene_layout,
            &mesh_shader,
            "Eel Pipeline",
            Some(wgpu::Face::Back),
        );
        let koi = tube_pipeline(device, &scene_layout, &mesh_shader, "Koi Pipeline", None);

        // The beacon tests against the scene depth but leaves it alone,
        // and shows its interior, so front faces are the ones culled.
        let beacon_occlusion = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Beacon Occlusion Pipeline"),
            layout: Some(&occlusion_layout),
            vertex: wgpu::VertexState {
                module: &occlusion_shader,
                entry_point: Some("vs"),
                buffers: &[vertex::vertex_buffer_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &occlusion_shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: OCCLUSION_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Front),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let godrays = fullscreen_pipeline(
            device,
            &godrays_layout,
            &godrays_shader,
            "God Rays Pipeline",
            RAYS_FORMAT,
        );
        let composite = fullscreen_pipeline(
            device,
            &composite_layout,
            &composite_shader,
            "Composite Pipeline",
            surface_format,
        );

        Self {
            eel,
            koi,
            beacon_occlusion,
            godrays,
            composite,
        }
    }
}

fn tube_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs"),
            buffers: &[vertex::vertex_buffer_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs"),
            targets: &[Some(wgpu::ColorTargetState {
                format: SCENE_FORMAT,
                // Cutout transparency only, via discard in the shader
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

/// Fullscreen-triangle pass: no vertex buffers, no depth.
fn fullscreen_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
