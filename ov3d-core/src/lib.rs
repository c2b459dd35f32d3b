//! OV3D core — state engine for the wireframe model viewer.
//!
//! This crate owns the viewing state (transform, style), the loaded mesh,
//! text-format geometry ingestion, and normalization into display space.
//! It performs no rendering and owns no window or input device; UI and
//! renderer collaborators drive it through [`Viewer`]'s mutators and pull
//! state copies through its accessors.

pub mod error;
pub mod geometry;
pub mod obj;
pub mod persist;
pub mod style;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use error::{LoadError, LoadResult};
pub use geometry::Mesh;
pub use persist::{StyleFile, DEFAULT_STYLE_PATH};
pub use style::{Color, StyleState, VertexGlyph};
pub use transform::{Axis, Projection, Step, TransformState};
pub use viewer::{float_from_text, Viewer};
