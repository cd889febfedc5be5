//! Per-frame uniform writes and the four render passes

use anyhow::Result;

use crate::params;
use crate::scene::Scene;

use super::{GlobalsUniform, GodRaysUniform, MaterialUniform, PondGraphics, light_screen_uv};

impl PondGraphics {
    /// Record and submit one frame.
    ///
    /// Surface loss and outdated swapchains reconfigure and skip the
    /// frame; only an out of memory surface is fatal.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        let view_proj = scene.camera.view_projection();
        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&GlobalsUniform::new(view_proj, scene.camera.position())),
        );
        self.queue.write_buffer(
            &self.eel_material_buffer,
            0,
            bytemuck::bytes_of(&MaterialUniform::from(&scene.eel_material)),
        );
        self.queue.write_buffer(
            &self.koi_material_buffer,
            0,
            bytemuck::bytes_of(&MaterialUniform::from(&scene.koi_material)),
        );
        let light_uv = light_screen_uv(view_proj, params::BEACON_POSITION);
        self.queue.write_buffer(
            &self.godrays_buffer,
            0,
            bytemuck::bytes_of(&GodRaysUniform::new(light_uv, &self.godray_settings)),
        );

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                anyhow::bail!("surface out of memory")
            }
            Err(err) => {
                tracing::warn!("Dropping frame: {err}");
                return Ok(());
            }
        };
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        // Pass 1: both tubes into the HDR scene target
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.scene,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(background_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.globals_bind, &[]);
            pass.set_bind_group(2, &self.environment_bind, &[]);

            pass.set_pipeline(&self.pipelines.eel);
            pass.set_bind_group(1, &self.eel_material_bind, &[]);
            pass.set_vertex_buffer(0, self.eel.vertex.slice(..));
            pass.set_index_buffer(self.eel.index.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.eel.index_count, 0, 0..1);

            pass.set_pipeline(&self.pipelines.koi);
            pass.set_bind_group(1, &self.koi_material_bind, &[]);
            pass.set_vertex_buffer(0, self.koi.vertex.slice(..));
            pass.set_index_buffer(self.koi.index.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.koi.index_count, 0, 0..1);
        }

        // Pass 2: beacon interior against the scene depth. Tube fragments
        // that wrote nearer depth block the light source, which is what
        // carves the shafts.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Occlusion Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.occlusion,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipelines.beacon_occlusion);
            pass.set_bind_group(0, &self.globals_bind, &[]);
            pass.set_bind_group(1, &self.occlusion_bind, &[]);
            pass.set_vertex_buffer(0, self.beacon.vertex.slice(..));
            pass.set_index_buffer(self.beacon.index.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.beacon.index_count, 0, 0..1);
        }

        // Pass 3: radial march at half resolution
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("God Rays Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.rays,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipelines.godrays);
            pass.set_bind_group(0, &self.godrays_bind, &[]);
            pass.draw(0..3, 0..1);
        }

        // Pass 4: screen blend the rays over the scene, tone map, present
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Composite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipelines.composite);
            pass.set_bind_group(0, &self.composite_bind, &[]);
            pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn background_color() -> wgpu::Color {
    wgpu::Color {
        r: params::BACKGROUND_COLOR.x as f64,
        g: params::BACKGROUND_COLOR.y as f64,
        b: params::BACKGROUND_COLOR.z as f64,
        a: 1.0,
    }
}
