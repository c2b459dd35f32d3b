//! Character-cell wireframe renderer.
//!
//! Projects the mesh with the matrices derived from the core's transform
//! state and draws face outlines as character lines, with a glyph per
//! vertex. Indices are bounds-checked here, at draw time; the core stores
//! whatever the file said.

use std::io::Write;

use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use ov3d_core::{Color, StyleState, VertexGlyph};

pub struct WireframeRenderer {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl WireframeRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![' '; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Rasterize the index list as closed triangle outlines.
    pub fn render(
        &mut self,
        vertices: &[Point3<f32>],
        indices: &[u32],
        mvp: &Matrix4<f32>,
        style: &StyleState,
    ) {
        let projected: Vec<Option<(i32, i32)>> =
            vertices.iter().map(|v| self.project(v, mvp)).collect();

        let edge = edge_char(style.facet_width);
        for outline in indices.chunks_exact(3) {
            for k in 0..3 {
                let a = outline[k] as usize;
                let b = outline[(k + 1) % 3] as usize;
                // Skip edges whose indices point past the vertex list.
                let (Some(pa), Some(pb)) = (
                    projected.get(a).copied().flatten(),
                    projected.get(b).copied().flatten(),
                ) else {
                    continue;
                };
                self.line(pa, pb, edge);
            }
        }

        if style.vertex_glyph != VertexGlyph::None {
            let glyph = match style.vertex_glyph {
                VertexGlyph::Square => '#',
                VertexGlyph::Circle => 'o',
                VertexGlyph::None => unreachable!(),
            };
            for point in projected.into_iter().flatten() {
                self.plot(point.0, point.1, glyph);
            }
        }
    }

    /// Map a model-space point through `mvp` to a screen cell, or `None`
    /// when it lands outside the clip volume.
    fn project(&self, point: &Point3<f32>, mvp: &Matrix4<f32>) -> Option<(i32, i32)> {
        let ndc = mvp.transform_point(point);
        if !ndc.x.is_finite() || !ndc.y.is_finite() {
            return None;
        }
        if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
            return None;
        }

        let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        Some((x as i32, y as i32))
    }

    fn plot(&mut self, x: i32, y: i32, c: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = c;
    }

    /// Bresenham line between two cells.
    fn line(&mut self, from: (i32, i32), to: (i32, i32), c: char) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, c);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Flush the cell buffer to `writer` with the style's colors.
    pub fn draw<W: Write>(&self, writer: &mut W, style: &StyleState) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(term_color(style.background_color)))?;
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.cells[y * self.width + x];
                let fg = match c {
                    '#' | 'o' => style.vertex_color,
                    _ => style.facet_color,
                };
                writer.queue(SetForegroundColor(term_color(fg)))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print('\n'))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// A facet width of 0.0 is the default thin line; wider settings thicken
/// the glyph used for edges.
fn edge_char(width: f32) -> char {
    if width == 0.0 {
        '.'
    } else if width < 0.006 {
        '*'
    } else {
        '@'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_indices_are_skipped() {
        let mut renderer = WireframeRenderer::new(20, 10);
        let vertices = [Point3::new(0.0, 0.0, 0.0)];
        // Two indices point past the vertex list; nothing should panic.
        renderer.render(
            &vertices,
            &[0, 5, 9],
            &Matrix4::identity(),
            &StyleState::default(),
        );
    }

    #[test]
    fn line_plots_endpoints() {
        let mut renderer = WireframeRenderer::new(8, 8);
        renderer.line((1, 1), (6, 4), '*');
        assert_eq!(renderer.cells[1 * 8 + 1], '*');
        assert_eq!(renderer.cells[4 * 8 + 6], '*');
    }

    #[test]
    fn edge_char_tracks_facet_width() {
        assert_eq!(edge_char(0.0), '.');
        assert_eq!(edge_char(0.005), '*');
        assert_eq!(edge_char(0.0075), '@');
    }
}
