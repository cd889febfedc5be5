//! Scene parameters
//!
//! Every tunable of the demo, as compile-time constants. The scene is a
//! fixed composition; none of these are meant to be configured at
//! runtime.

use glam::Vec3;
use std::time::Duration;

// ---
// geometry
// ---

/// Torus-knot scale
pub const KNOT_RADIUS: f32 = 1.0;
/// Radius of the eel tube (the tube following the knot itself)
pub const EEL_TUBE_RADIUS: f32 = 0.3;
/// Radius of the koi tube (the coil wound around the eel)
pub const KOI_TUBE_RADIUS: f32 = 0.2;
/// Samples along the knot for the eel polyline
pub const KNOT_SAMPLES: usize = 200;
/// Full revolutions of the koi coil around the eel
pub const COIL_TURNS: f32 = 20.0;
/// Cross-section segments of the eel tube
pub const EEL_RADIAL_SEGMENTS: usize = 20;
/// Cross-section segments of the koi tube
pub const KOI_RADIAL_SEGMENTS: usize = 10;

// ---
// camera
// ---

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, 4.0);
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 2.0, 0.0);
/// Orbit damping factor per update
pub const ORBIT_DAMPING: f32 = 0.05;
/// Auto-rotate speed; 2.0 is one orbit every 30 seconds at 60 fps
pub const AUTO_ROTATE_SPEED: f32 = 2.0;

// ---
// lighting
// ---

/// The directional light shines from here toward the origin
pub const SUN_POSITION: Vec3 = Vec3::new(0.0, 3.0, 0.0);
pub const SUN_COLOR: Vec3 = Vec3::ONE;
pub const SUN_INTENSITY: f32 = 1.0;
pub const AMBIENT_COLOR: Vec3 = Vec3::ONE;
pub const AMBIENT_INTENSITY: f32 = 1.0;
/// Clear color behind the scene
pub const BACKGROUND_COLOR: Vec3 = Vec3::ONE;

// ---
// materials
// ---

pub const EEL_UV_REPEAT: (f32, f32) = (10.0, 2.0);
pub const EEL_ROUGHNESS: f32 = 1.0;
pub const EEL_CLEARCOAT: f32 = 1.0;
pub const EEL_ENV_INTENSITY: f32 = 5.0;
/// Per-frame UV offset drift of the eel albedo
pub const EEL_OFFSET_STEP: (f32, f32) = (0.01, 0.001);

pub const KOI_UV_REPEAT: (f32, f32) = (1.0, 40.0);
pub const KOI_UV_ROTATION: f32 = std::f32::consts::FRAC_PI_2;
/// Fragments below this alpha are cut out entirely
pub const KOI_ALPHA_CUTOFF: f32 = 0.05;
/// Per-frame UV offset drift of the koi albedo
pub const KOI_OFFSET_STEP: (f32, f32) = (0.0, -0.01);

// ---
// god rays
// ---

/// Edge length of the emissive beacon box
pub const BEACON_SIZE: f32 = 15.0;
pub const BEACON_POSITION: Vec3 = Vec3::new(0.0, 5.0, 0.0);
/// Scattering color (for the tyndall effect)
pub const RAY_COLOR: Vec3 = Vec3::new(0.0, 1.0, 1.0);
pub const GODRAY_DENSITY: f32 = 1.0;
pub const GODRAY_WEIGHT: f32 = 0.2;
pub const GODRAY_DECAY: f32 = 0.92;
pub const GODRAY_EXPOSURE: f32 = 0.6;
pub const GODRAY_SAMPLES: u32 = 60;
pub const GODRAY_CLAMP_MAX: f32 = 1.0;

// ---
// remote textures
// ---

// credit: Klara Kulikova at unsplash - https://unsplash.com/photos/4YNmgh2PERc
pub const EEL_ALBEDO_URL: &str = "https://images.unsplash.com/photo-1667840555698-b859ff73bd13?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxlZGl0b3JpYWwtZmVlZHwxMnx8fGVufDB8fHx8&auto=format&fit=crop&w=600&q=60";

// credit: Max Ducourneau at unsplash - https://unsplash.com/photos/h_4fe8fmb1E
pub const KOI_ALBEDO_URL: &str = "https://images.unsplash.com/photo-1585936529565-1871537209e3?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxzZWFyY2h8MjB8fGZpc2h8ZW58MHx8MHx8&auto=format&fit=crop&w=600&q=60";

// credit: mrdoob - three.js/examples/textures/
pub const ENV_MAP_URL: &str = "https://raw.githubusercontent.com/mrdoob/three.js/r146/examples/textures/2294472375_24a3b8ef46_o.jpg";

/// Per-request timeout for texture downloads
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
