//! Display style state: colors, line/glyph widths, vertex glyph kind.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::transform::Step;

/// An opaque RGB color, serialized as lowercase `#rrggbb`.
///
/// The viewer stores and round-trips colors; it never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color literal that is not of the form `#rrggbb`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color literal {0:?}")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError(s.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

/// How vertices are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexGlyph {
    Square,
    Circle,
    None,
}

impl VertexGlyph {
    /// Persistence code for this glyph kind.
    pub fn code(self) -> u8 {
        match self {
            VertexGlyph::Square => 0,
            VertexGlyph::Circle => 1,
            VertexGlyph::None => 2,
        }
    }

    /// Inverse of [`VertexGlyph::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(VertexGlyph::Square),
            1 => Some(VertexGlyph::Circle),
            2 => Some(VertexGlyph::None),
            _ => None,
        }
    }
}

/// Display-only parameters, independent of geometry and camera transform.
///
/// A facet width of 0.0 means "default thin line". Width stepping follows
/// the inherited increments exactly; see the unit tests for the sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleState {
    pub facet_color: Color,
    pub facet_width: f32,
    pub vertex_color: Color,
    pub vertex_glyph: VertexGlyph,
    pub vertex_width: f32,
    pub background_color: Color,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            facet_color: Color::rgb(0xff, 0xff, 0xff),
            facet_width: 0.0,
            vertex_color: Color::rgb(0xff, 0x88, 0x00),
            vertex_glyph: VertexGlyph::Square,
            vertex_width: 5.0,
            background_color: Color::rgb(0x00, 0x00, 0x00),
        }
    }
}

impl StyleState {
    /// Step the facet line width. The first step away from the 0.0 default
    /// jumps to 0.005 in either direction; afterwards `Plus` adds 0.0005 and
    /// `Minus` subtracts 0.0005 while the width stays at or above 0.001.
    pub fn step_facet_width(&mut self, step: Step) {
        match step {
            Step::Plus => {
                if self.facet_width == 0.0 {
                    self.facet_width = 0.005;
                } else {
                    self.facet_width += 0.0005;
                }
            }
            Step::Minus => {
                if self.facet_width == 0.0 {
                    self.facet_width = 0.005;
                } else if self.facet_width >= 0.001 {
                    self.facet_width -= 0.0005;
                }
            }
        }
    }

    /// Step the vertex glyph width by 1.0, guarded to stay near [2, 12].
    pub fn step_vertex_width(&mut self, step: Step) {
        match step {
            Step::Plus => {
                if self.vertex_width <= 12.0 {
                    self.vertex_width += 1.0;
                }
            }
            Step::Minus => {
                if self.vertex_width >= 2.0 {
                    self.vertex_width -= 1.0;
                }
            }
        }
    }

    /// The width/glyph portion of a full "set default" request. Colors are
    /// deliberately left alone.
    pub fn reset_widths(&mut self) {
        self.facet_width = 0.0;
        self.vertex_glyph = VertexGlyph::Square;
        self.vertex_width = 5.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trips_through_hex() {
        let color = Color::rgb(0x1a, 0xff, 0x00);
        assert_eq!(color.to_string(), "#1aff00");
        assert_eq!("#1aff00".parse::<Color>().unwrap(), color);
    }

    #[test]
    fn color_rejects_malformed_literals() {
        assert!("1aff00".parse::<Color>().is_err());
        assert!("#1aff0".parse::<Color>().is_err());
        assert!("#1aff001".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn glyph_codes_round_trip() {
        for glyph in [VertexGlyph::Square, VertexGlyph::Circle, VertexGlyph::None] {
            assert_eq!(VertexGlyph::from_code(glyph.code()), Some(glyph));
        }
        assert_eq!(VertexGlyph::from_code(3), None);
    }

    #[test]
    fn facet_width_first_step_jumps_then_creeps() {
        let mut style = StyleState::default();
        style.step_facet_width(Step::Plus);
        assert_eq!(style.facet_width, 0.005);
        style.step_facet_width(Step::Plus);
        assert_eq!(style.facet_width, 0.0055);
    }

    #[test]
    fn facet_width_minus_from_default_also_jumps() {
        let mut style = StyleState::default();
        style.step_facet_width(Step::Minus);
        assert_eq!(style.facet_width, 0.005);
        style.step_facet_width(Step::Minus);
        assert_eq!(style.facet_width, 0.0045);
    }

    #[test]
    fn facet_width_minus_stops_below_threshold() {
        let mut style = StyleState {
            facet_width: 0.0005,
            ..Default::default()
        };
        style.step_facet_width(Step::Minus);
        assert_eq!(style.facet_width, 0.0005);
    }

    #[test]
    fn vertex_width_steps_are_guarded() {
        let mut style = StyleState::default();
        style.step_vertex_width(Step::Plus);
        assert_eq!(style.vertex_width, 6.0);
        style.step_vertex_width(Step::Minus);
        assert_eq!(style.vertex_width, 5.0);

        style.vertex_width = 1.5;
        style.step_vertex_width(Step::Minus);
        assert_eq!(style.vertex_width, 1.5);
        style.vertex_width = 12.5;
        style.step_vertex_width(Step::Plus);
        assert_eq!(style.vertex_width, 12.5);
    }

    #[test]
    fn reset_widths_spares_colors() {
        let mut style = StyleState::default();
        style.facet_color = Color::rgb(0x10, 0x20, 0x30);
        style.step_facet_width(Step::Plus);
        style.vertex_glyph = VertexGlyph::None;
        style.vertex_width = 9.0;

        style.reset_widths();
        assert_eq!(style.facet_width, 0.0);
        assert_eq!(style.vertex_glyph, VertexGlyph::Square);
        assert_eq!(style.vertex_width, 5.0);
        assert_eq!(style.facet_color, Color::rgb(0x10, 0x20, 0x30));
    }
}
