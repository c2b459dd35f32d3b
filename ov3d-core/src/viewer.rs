//! Composition root tying mesh, transform, and style together.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nalgebra::{Point3, Vector2};
use tracing::{info, warn};

use crate::error::{LoadError, LoadResult};
use crate::geometry::Mesh;
use crate::obj;
use crate::persist::StyleFile;
use crate::style::{Color, StyleState, VertexGlyph};
use crate::transform::{Axis, Projection, Step, TransformState};

/// Owns all viewer state. UI and rendering collaborators call the mutators
/// on events and pull fresh copies through the accessors on every redraw;
/// nothing is pushed.
///
/// Style is loaded from the persisted record at construction and written
/// back when the viewer is dropped.
pub struct Viewer {
    mesh: Mesh,
    transform: TransformState,
    style: StyleState,
    style_file: StyleFile,
}

impl Viewer {
    pub fn new(style_file: StyleFile) -> Self {
        let style = style_file.load();
        Self {
            mesh: Mesh::new(),
            transform: TransformState::default(),
            style,
            style_file,
        }
    }

    // --- transform mutators ---

    pub fn translate(&mut self, axis: Axis, step: Step, value: f32) {
        self.transform.translate(axis, step, value);
    }

    pub fn rotate(&mut self, axis: Axis, step: Step, value: f32) {
        self.transform.rotate(axis, step, value);
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.transform.set_projection(projection);
    }

    pub fn scale(&mut self, step: Step, value: f32) {
        self.transform.scale(step, value);
    }

    /// Restore the transform defaults; with `reset_style` set, also restore
    /// the style widths and glyph (colors are kept).
    pub fn set_default(&mut self, reset_style: bool) {
        self.transform.reset();
        if reset_style {
            self.style.reset_widths();
        }
    }

    pub fn pointer_drag(&mut self, delta: Vector2<f32>) {
        self.transform.pointer_drag(delta);
    }

    pub fn wheel_drag(&mut self, delta: Vector2<f32>) {
        self.transform.wheel_drag(delta);
    }

    // --- style mutators ---

    pub fn set_facet_color(&mut self, color: Color) {
        self.style.facet_color = color;
    }

    pub fn set_vertex_color(&mut self, color: Color) {
        self.style.vertex_color = color;
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.style.background_color = color;
    }

    pub fn step_facet_width(&mut self, step: Step) {
        self.style.step_facet_width(step);
    }

    pub fn step_vertex_width(&mut self, step: Step) {
        self.style.step_vertex_width(step);
    }

    pub fn set_vertex_glyph(&mut self, glyph: VertexGlyph) {
        self.style.vertex_glyph = glyph;
    }

    // --- geometry ---

    /// Replace the loaded model with the file at `path`.
    ///
    /// An unopenable file is warned about and leaves the previous mesh and
    /// transform untouched. Once the file is open the transform takes its
    /// load-time reset, the old mesh is dropped, and the stream is scanned;
    /// a malformed token aborts with the mesh partially populated. A scan
    /// that runs to completion is normalized into display space.
    pub fn load_geometry(&mut self, path: impl AsRef<Path>) -> LoadResult<()> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                warn!("model load skipped, could not open {:?}: {}", path, source);
                return Err(LoadError::Open {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        self.transform.reset_for_load();
        self.mesh.clear();
        obj::scan_into(BufReader::new(file), &mut self.mesh)?;
        self.mesh.normalize();

        info!(
            "loaded {:?}: {} vertices, {} face indices",
            path,
            self.mesh.vertex_count(),
            self.mesh.index_count()
        );
        Ok(())
    }

    // --- accessors (independent copies) ---

    pub fn vertices(&self) -> Vec<Point3<f32>> {
        self.mesh.vertices.clone()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.mesh.indices.clone()
    }

    pub fn transform_state(&self) -> TransformState {
        self.transform
    }

    pub fn style_state(&self) -> StyleState {
        self.style
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.style_file.save(&self.style);
    }
}

/// Parse a float out of UI text, tolerating stray labels and units: every
/// character that is not a digit or a dot is stripped before parsing, and
/// an empty or unparsable remainder reads as 0.0.
pub fn float_from_text(input: &str) -> f32 {
    let filtered: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    filtered.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> (tempfile::TempDir, Viewer) {
        let dir = tempfile::tempdir().unwrap();
        let viewer = Viewer::new(StyleFile::new(dir.path().join("style.txt")));
        (dir, viewer)
    }

    #[test]
    fn accessors_return_independent_copies() {
        let (_dir, mut viewer) = viewer();
        let before = viewer.transform_state();
        viewer.rotate(Axis::X, Step::Plus, 0.0);
        assert_eq!(before.rotate_x, 0.0);
        assert_eq!(viewer.transform_state().rotate_x, 15.0);
    }

    #[test]
    fn set_default_optionally_resets_style_widths() {
        let (_dir, mut viewer) = viewer();
        viewer.step_facet_width(Step::Plus);
        viewer.set_vertex_glyph(VertexGlyph::None);
        viewer.rotate(Axis::Y, Step::Plus, 30.0);

        viewer.set_default(false);
        assert_eq!(viewer.transform_state().rotate_y, 0.0);
        assert_eq!(viewer.style_state().facet_width, 0.005);
        assert_eq!(viewer.style_state().vertex_glyph, VertexGlyph::None);

        viewer.step_facet_width(Step::Plus);
        viewer.set_default(true);
        assert_eq!(viewer.style_state().facet_width, 0.0);
        assert_eq!(viewer.style_state().vertex_glyph, VertexGlyph::Square);
        assert_eq!(viewer.style_state().vertex_width, 5.0);
    }

    #[test]
    fn color_mutators_store_opaque_values() {
        let (_dir, mut viewer) = viewer();
        viewer.set_facet_color(Color::rgb(1, 2, 3));
        viewer.set_vertex_color(Color::rgb(4, 5, 6));
        viewer.set_background_color(Color::rgb(7, 8, 9));

        let style = viewer.style_state();
        assert_eq!(style.facet_color, Color::rgb(1, 2, 3));
        assert_eq!(style.vertex_color, Color::rgb(4, 5, 6));
        assert_eq!(style.background_color, Color::rgb(7, 8, 9));
    }

    #[test]
    fn failed_open_preserves_mesh_and_transform() {
        let (dir, mut viewer) = viewer();
        let model = dir.path().join("model.obj");
        std::fs::write(&model, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        viewer.load_geometry(&model).unwrap();
        viewer.translate(Axis::X, Step::Plus, 2.0);

        let err = viewer.load_geometry(dir.path().join("absent.obj")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(viewer.vertices().len(), 3);
        assert_eq!(viewer.transform_state().translate_x, 2.0);
    }

    #[test]
    fn float_from_text_strips_label_noise() {
        assert_eq!(float_from_text("123.45"), 123.45);
        assert_eq!(float_from_text("  12.5 px"), 12.5);
        assert_eq!(float_from_text("scale: 3"), 3.0);
        assert_eq!(float_from_text(""), 0.0);
        assert_eq!(float_from_text("no digits"), 0.0);
        // Two dots survive the filter and fail the parse.
        assert_eq!(float_from_text("1.2.3"), 0.0);
    }
}
