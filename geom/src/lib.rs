//! Procedural curve and tube geometry
//!
//! Pure-math building blocks for the koipond demo: parametric curves with
//! arc-length sampling, parallel-transport frames, polyline paths, coil
//! placement, and tube-mesh extrusion. No GPU types live here; meshes are
//! plain f32 buffers a renderer can upload as-is.

pub mod coil;
pub mod curve;
pub mod frames;
pub mod mesh;
pub mod path;
pub mod tube;

pub use coil::{coil_points, turn_angle};
pub use curve::{ARC_LENGTH_DIVISIONS, ArcLengthTable, Curve, TorusKnot};
pub use frames::FrameSet;
pub use mesh::{Mesh, MeshBuilder, MeshBuilderUV};
pub use path::PolyPath;
pub use tube::generate_tube_uv;
