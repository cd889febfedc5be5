//! Scene assembly
//!
//! Builds the pond from one torus-knot curve: the outer tube (the eel)
//! sweeps the knot directly, and the inner tube (the koi) sweeps a helix
//! coiled around the same knot. A large inside-out box above the scene
//! serves as the god-ray light source, and a white directional and
//! ambient pair lights the tubes.
//!
//! The scene owns the camera, the per-material animation state and the
//! channel textures arrive on; the GPU side reads from it but never
//! writes back.

pub mod material;

use std::sync::mpsc;

use glam::Vec3;
use tracing::info;

use koipond_geom::{
    ArcLengthTable, Mesh, MeshBuilder, MeshBuilderUV, PolyPath, TorusKnot, coil_points,
    generate_tube_uv,
};

use crate::camera::OrbitCamera;
use crate::fetch::{self, FetchedImage};
use crate::params;
use material::Material;

pub struct Scene {
    pub eel_mesh: Mesh,
    pub koi_mesh: Mesh,
    pub beacon_mesh: Mesh,
    pub eel_material: Material,
    pub koi_material: Material,
    pub camera: OrbitCamera,
    /// Live while downloads may still arrive; dropped once the worker
    /// hangs up
    textures: Option<mpsc::Receiver<FetchedImage>>,
}

impl Scene {
    /// Build all geometry up front. Tube vertices are baked in world
    /// space, so no per-mesh transforms exist anywhere downstream.
    pub fn new(aspect: f32, auto_rotate: bool) -> Self {
        let knot = TorusKnot {
            scale: params::KNOT_RADIUS,
        };
        let table = ArcLengthTable::new(&knot);

        // Both tubes sweep polylines, not the smooth knot itself. The eel
        // path is the knot sampled at even spacing; its first and last
        // points coincide because the knot closes, and the closed sweep
        // welds the seam ring.
        let eel_path = PolyPath::from_points(table.spaced_points(params::KNOT_SAMPLES));
        let eel_table = ArcLengthTable::new(&eel_path);
        let eel_mesh: Mesh = generate_tube_uv(
            &eel_table,
            params::KNOT_SAMPLES,
            params::EEL_TUBE_RADIUS,
            params::EEL_RADIAL_SEGMENTS,
            true,
        );

        // The koi path coils around the eel: one helix revolution per
        // knot sample, offset so the two tube surfaces just touch.
        let coil = coil_points(
            &table,
            params::EEL_TUBE_RADIUS,
            params::KOI_TUBE_RADIUS,
            params::KNOT_SAMPLES,
            params::COIL_TURNS,
        );
        let koi_tubular = coil.len();
        let path = PolyPath::from_points(coil);
        let path_table = ArcLengthTable::new(&path);
        let koi_mesh: Mesh = generate_tube_uv(
            &path_table,
            koi_tubular,
            params::KOI_TUBE_RADIUS,
            params::KOI_RADIAL_SEGMENTS,
            false,
        );

        info!(
            "scene ready: eel {} verts / {} tris, koi {} verts / {} tris",
            eel_mesh.vertex_count(),
            eel_mesh.triangle_count(),
            koi_mesh.vertex_count(),
            koi_mesh.triangle_count(),
        );

        let mut camera = OrbitCamera::new(params::CAMERA_POSITION, params::ORBIT_TARGET, aspect);
        camera.auto_rotate = auto_rotate;

        Self {
            eel_mesh,
            koi_mesh,
            beacon_mesh: beacon_mesh(),
            eel_material: Material::eel(),
            koi_material: Material::koi(),
            camera,
            textures: None,
        }
    }

    /// Kick off the background texture downloads.
    pub fn begin_texture_fetch(&mut self) {
        self.textures = Some(fetch::spawn_fetches());
    }

    /// Advance one animation tick: orbit damping plus texture scrolling.
    pub fn animate(&mut self) {
        self.camera.update();
        self.eel_material.advance();
        self.koi_material.advance();
    }

    /// Take one downloaded texture if any is waiting. Never blocks.
    pub fn poll_texture(&mut self) -> Option<FetchedImage> {
        let rx = self.textures.as_ref()?;
        match rx.try_recv() {
            Ok(img) => Some(img),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                // Worker finished; nothing more will ever arrive.
                self.textures = None;
                None
            }
        }
    }
}

/// Inside-out box acting as the god-ray source, hovering above the knot.
///
/// Rendered only into the occlusion buffer, with front faces culled so
/// its interior shows, never lit or textured.
pub fn beacon_mesh() -> Mesh {
    // (normal, u axis, v axis) per face, chosen so u cross v = normal.
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let half = params::BEACON_SIZE / 2.0;
    let center = params::BEACON_POSITION;

    let mut mesh = Mesh::default();
    for (normal, u_axis, v_axis) in FACES {
        let quad = CORNERS.map(|(su, sv)| {
            let p = center + (normal + u_axis * su + v_axis * sv) * half;
            mesh.add_vertex_uv(p, ((su + 1.0) / 2.0, (sv + 1.0) / 2.0), normal)
        });
        mesh.add_triangle(quad[0], quad[1], quad[2]);
        mesh.add_triangle(quad[0], quad[2], quad[3]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beacon_is_a_box_around_its_anchor() {
        let mesh = beacon_mesh();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);

        let half = params::BEACON_SIZE / 2.0;
        for p in &mesh.positions {
            let offset = Vec3::from_array(*p) - params::BEACON_POSITION;
            // Every corner sits on the box surface.
            assert!((offset.abs().max_element() - half).abs() < 1e-4);
        }
    }

    #[test]
    fn beacon_normals_are_axis_aligned_and_unit() {
        let mesh = beacon_mesh();
        for n in &mesh.normals {
            let n = Vec3::from_array(*n);
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert_eq!(n.abs().max_element(), 1.0);
        }
    }

    #[test]
    fn beacon_winding_faces_outward() {
        let mesh = beacon_mesh();
        let center = params::BEACON_POSITION;
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [
                Vec3::from_array(mesh.positions[tri[0] as usize]),
                Vec3::from_array(mesh.positions[tri[1] as usize]),
                Vec3::from_array(mesh.positions[tri[2] as usize]),
            ];
            let face_normal = (b - a).cross(c - a);
            let outward = (a + b + c) / 3.0 - center;
            assert!(face_normal.dot(outward) > 0.0);
        }
    }

    #[test]
    fn animate_scrolls_textures_and_orbits() {
        let mut scene = Scene::new(16.0 / 9.0, true);
        let yaw_before = scene.camera.view_matrix();

        scene.animate();

        assert!(scene.eel_material.uv.offset.x > 0.0);
        assert!(scene.koi_material.uv.offset.y < 0.0);
        assert_ne!(scene.camera.view_matrix(), yaw_before);
    }

    #[test]
    fn poll_without_fetch_is_quietly_empty() {
        let mut scene = Scene::new(1.0, false);
        assert!(scene.poll_texture().is_none());
    }
}
