//! Koipond - a swimming-pool scene built from one torus knot
//!
//! Two textured tubes share a single curve: the "eel" sweeps a closed
//! tube along an evenly spaced sampling of the knot, and the "koi" coils
//! a thinner helix around it. A cyan beacon above the scene feeds a
//! screen-space god-ray march, composited over the HDR scene with ACES
//! tone mapping. Geometry lives in the [`koipond_geom`] crate; this one
//! owns the window, the camera, the downloads, and the renderer.

pub mod app;
pub mod camera;
pub mod config;
pub mod fetch;
pub mod graphics;
pub mod params;
pub mod scene;
pub mod viewport;
