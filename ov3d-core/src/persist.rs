//! Startup/shutdown persistence for the display style.
//!
//! The record is a single line of six space-separated fields:
//!
//! ```text
//! facetHex vertexHex backgroundHex facetWidth glyphCode vertexWidth
//! ```
//!
//! Every failure here is non-fatal: a missing or mangled record is reported
//! on the warn channel and the compiled-in defaults fill the gaps.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::style::{Color, StyleState, VertexGlyph};

/// Well-known style record location, relative to the running process.
pub const DEFAULT_STYLE_PATH: &str = "ov3d-style.txt";

/// Reads and writes the one-line style record at a caller-chosen path.
#[derive(Debug, Clone)]
pub struct StyleFile {
    path: PathBuf,
}

impl StyleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted style, falling back to defaults field by field.
    ///
    /// A record with the wrong field count is warned about and then still
    /// consumed best-effort: whatever fields are present and parse replace
    /// the corresponding defaults.
    pub fn load(&self) -> StyleState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(source) => {
                warn!("style file {:?} not readable ({}); using defaults", self.path, source);
                return StyleState::default();
            }
        };

        let line = text.lines().next().unwrap_or("").trim();
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 6 {
            warn!(
                "style file {:?} holds {} fields instead of 6: {:?}",
                self.path,
                fields.len(),
                line
            );
        }

        let mut style = StyleState::default();
        read_color(&fields, 0, &mut style.facet_color);
        read_color(&fields, 1, &mut style.vertex_color);
        read_color(&fields, 2, &mut style.background_color);
        read_float(&fields, 3, &mut style.facet_width);
        read_glyph(&fields, 4, &mut style.vertex_glyph);
        read_float(&fields, 5, &mut style.vertex_width);
        style
    }

    /// Write the style record, warning and skipping on failure.
    pub fn save(&self, style: &StyleState) {
        let record = format!(
            "{} {} {} {} {} {}",
            style.facet_color,
            style.vertex_color,
            style.background_color,
            style.facet_width,
            style.vertex_glyph.code(),
            style.vertex_width
        );
        if let Err(source) = fs::write(&self.path, record) {
            warn!("could not write style file {:?}: {}", self.path, source);
        }
    }
}

impl Default for StyleFile {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE_PATH)
    }
}

fn read_color(fields: &[&str], index: usize, into: &mut Color) {
    if let Some(token) = fields.get(index) {
        match token.parse() {
            Ok(color) => *into = color,
            Err(err) => warn!("style field {}: {}", index, err),
        }
    }
}

fn read_float(fields: &[&str], index: usize, into: &mut f32) {
    if let Some(token) = fields.get(index) {
        match token.parse() {
            Ok(value) => *into = value,
            Err(err) => warn!("style field {}: invalid width {:?}: {}", index, token, err),
        }
    }
}

fn read_glyph(fields: &[&str], index: usize, into: &mut VertexGlyph) {
    if let Some(token) = fields.get(index) {
        match token.parse().ok().and_then(VertexGlyph::from_code) {
            Some(glyph) => *into = glyph,
            None => warn!("style field {}: unknown glyph code {:?}", index, token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use crate::transform::Step;

    fn temp_style_file(name: &str) -> (tempfile::TempDir, StyleFile) {
        let dir = tempfile::tempdir().unwrap();
        let file = StyleFile::new(dir.path().join(name));
        (dir, file)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (_dir, file) = temp_style_file("absent.txt");
        assert_eq!(file.load(), StyleState::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, file) = temp_style_file("style.txt");
        let mut style = StyleState {
            facet_color: Color::rgb(0x12, 0x34, 0x56),
            vertex_color: Color::rgb(0xab, 0xcd, 0xef),
            background_color: Color::rgb(0x10, 0x10, 0x10),
            vertex_glyph: VertexGlyph::Circle,
            ..Default::default()
        };
        style.step_facet_width(Step::Plus);
        style.step_vertex_width(Step::Minus);

        file.save(&style);
        assert_eq!(file.load(), style);
    }

    #[test]
    fn record_has_no_trailing_newline() {
        let (_dir, file) = temp_style_file("style.txt");
        file.save(&StyleState::default());

        let raw = fs::read_to_string(file.path()).unwrap();
        assert_eq!(raw, "#ffffff #ff8800 #000000 0 0 5");
    }

    #[test]
    fn short_record_fills_missing_fields_with_defaults() {
        let (_dir, file) = temp_style_file("style.txt");
        fs::write(file.path(), "#00ff00 #0000ff").unwrap();

        let style = file.load();
        assert_eq!(style.facet_color, Color::rgb(0x00, 0xff, 0x00));
        assert_eq!(style.vertex_color, Color::rgb(0x00, 0x00, 0xff));
        assert_eq!(style.background_color, StyleState::default().background_color);
        assert_eq!(style.vertex_width, 5.0);
    }

    #[test]
    fn mangled_fields_keep_their_defaults() {
        let (_dir, file) = temp_style_file("style.txt");
        fs::write(file.path(), "#00ff00 nonsense #0000ff oops 9 lots").unwrap();

        let style = file.load();
        assert_eq!(style.facet_color, Color::rgb(0x00, 0xff, 0x00));
        assert_eq!(style.vertex_color, StyleState::default().vertex_color);
        assert_eq!(style.background_color, Color::rgb(0x00, 0x00, 0xff));
        assert_eq!(style.facet_width, 0.0);
        assert_eq!(style.vertex_glyph, VertexGlyph::Square);
        assert_eq!(style.vertex_width, 5.0);
    }

    #[test]
    fn unwritable_path_is_silently_skipped() {
        let file = StyleFile::new("no-such-directory/style.txt");
        // Only the warning channel hears about this.
        file.save(&StyleState::default());
    }
}
