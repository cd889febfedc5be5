//! Integration test for scene assembly
//!
//! Builds the full scene the way the app does at startup and checks the
//! mesh sizes, camera placement, and animation stepping all line up.

use glam::Vec2;
use koipond::params;
use koipond::scene::Scene;

#[test]
fn test_scene_mesh_sizes() {
    let scene = Scene::new(16.0 / 9.0, true);

    // Closed sweep: 200 rings plus the welded seam ring, 21 vertices each
    let eel_rings = params::KNOT_SAMPLES + 1;
    let eel_ring_size = params::EEL_RADIAL_SEGMENTS + 1;
    assert_eq!(scene.eel_mesh.vertex_count(), eel_rings * eel_ring_size);
    assert_eq!(
        scene.eel_mesh.triangle_count(),
        params::KNOT_SAMPLES * params::EEL_RADIAL_SEGMENTS * 2
    );

    // The koi places one ring per coil point
    let coil_points = (params::KNOT_SAMPLES as f32 * params::COIL_TURNS).round() as usize;
    let koi_rings = coil_points + 1;
    let koi_ring_size = params::KOI_RADIAL_SEGMENTS + 1;
    assert_eq!(scene.koi_mesh.vertex_count(), koi_rings * koi_ring_size);
    assert_eq!(
        scene.koi_mesh.triangle_count(),
        coil_points * params::KOI_RADIAL_SEGMENTS * 2
    );

    // Box: four corners per face
    assert_eq!(scene.beacon_mesh.vertex_count(), 24);
    assert_eq!(scene.beacon_mesh.triangle_count(), 12);
}

#[test]
fn test_scene_meshes_fit_u32_indices() {
    let scene = Scene::new(1.0, false);
    for mesh in [&scene.eel_mesh, &scene.koi_mesh, &scene.beacon_mesh] {
        let max = mesh.indices.iter().copied().max().unwrap();
        assert!((max as usize) < mesh.vertex_count());
        assert_eq!(mesh.indices.len() % 3, 0);
    }
}

#[test]
fn test_camera_starts_at_configured_position() {
    let scene = Scene::new(16.0 / 9.0, true);
    let position = scene.camera.position();
    assert!((position - params::CAMERA_POSITION).length() < 1e-4);
    assert_eq!(scene.camera.target, params::ORBIT_TARGET);
}

#[test]
fn test_animate_scrolls_both_skins() {
    let mut scene = Scene::new(1.0, false);
    let eel_before = scene.eel_material.uv.offset;
    let koi_before = scene.koi_material.uv.offset;

    for _ in 0..10 {
        scene.animate();
    }

    let eel_step = Vec2::new(params::EEL_OFFSET_STEP.0, params::EEL_OFFSET_STEP.1);
    let koi_step = Vec2::new(params::KOI_OFFSET_STEP.0, params::KOI_OFFSET_STEP.1);
    assert!((scene.eel_material.uv.offset - (eel_before + eel_step * 10.0)).length() < 1e-5);
    assert!((scene.koi_material.uv.offset - (koi_before + koi_step * 10.0)).length() < 1e-5);
}
