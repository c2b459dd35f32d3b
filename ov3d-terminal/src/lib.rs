//! Terminal front end for the OV3D viewer core.
//!
//! Thin glue only: every keyboard and mouse event maps onto one of the
//! core's mutators, and each frame pulls fresh state copies for drawing.

use std::io::{self, stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use ov3d_core::{Axis, Mesh, Projection, Step, VertexGlyph, Viewer};

pub mod renderer;

pub use renderer::WireframeRenderer;

const FRAME_TIME: Duration = Duration::from_millis(33);

/// Main application struct for the terminal viewer.
pub struct TerminalApp {
    viewer: Viewer,
    fallback: Mesh,
    renderer: WireframeRenderer,
    running: bool,
    last_mouse: Option<(u16, u16)>,
}

impl TerminalApp {
    pub fn new(viewer: Viewer) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            viewer,
            fallback: Mesh::cube(2.0),
            renderer: WireframeRenderer::new(width as usize, height as usize),
            running: true,
            last_mouse: None,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        self.renderer.resize(width as usize, height as usize);
                    }
                    _ => {}
                }
            }

            self.render()?;
            std::thread::sleep(FRAME_TIME);
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            // Rotation (default 15 degree steps come from the core)
            KeyCode::Up => self.viewer.rotate(Axis::X, Step::Minus, 5.0),
            KeyCode::Down => self.viewer.rotate(Axis::X, Step::Plus, 5.0),
            KeyCode::Left => self.viewer.rotate(Axis::Y, Step::Minus, 5.0),
            KeyCode::Right => self.viewer.rotate(Axis::Y, Step::Plus, 5.0),
            KeyCode::Char('e') => self.viewer.rotate(Axis::Z, Step::Plus, 5.0),
            KeyCode::Char('r') => self.viewer.rotate(Axis::Z, Step::Minus, 5.0),
            // Translation
            KeyCode::Char('a') => self.viewer.translate(Axis::X, Step::Minus, 0.1),
            KeyCode::Char('d') => self.viewer.translate(Axis::X, Step::Plus, 0.1),
            KeyCode::Char('w') => self.viewer.translate(Axis::Y, Step::Plus, 0.1),
            KeyCode::Char('s') => self.viewer.translate(Axis::Y, Step::Minus, 0.1),
            KeyCode::Char('z') => self.viewer.translate(Axis::Z, Step::Plus, 0.1),
            KeyCode::Char('x') => self.viewer.translate(Axis::Z, Step::Minus, 0.1),
            // Zoom, in whichever projection is active
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewer.scale(Step::Plus, 0.0),
            KeyCode::Char('-') => self.viewer.scale(Step::Minus, 0.0),
            KeyCode::Char('p') => {
                let next = match self.viewer.transform_state().projection {
                    Projection::Parallel => Projection::Perspective,
                    Projection::Perspective => Projection::Parallel,
                };
                self.viewer.set_projection(next);
            }
            KeyCode::Char('t') => self.viewer.set_default(true),
            KeyCode::Char('g') => {
                let next = match self.viewer.style_state().vertex_glyph {
                    VertexGlyph::Square => VertexGlyph::Circle,
                    VertexGlyph::Circle => VertexGlyph::None,
                    VertexGlyph::None => VertexGlyph::Square,
                };
                self.viewer.set_vertex_glyph(next);
            }
            KeyCode::Char('[') => self.viewer.step_facet_width(Step::Minus),
            KeyCode::Char(']') => self.viewer.step_facet_width(Step::Plus),
            KeyCode::Char(',') => self.viewer.step_vertex_width(Step::Minus),
            KeyCode::Char('.') => self.viewer.step_vertex_width(Step::Plus),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.last_mouse = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((col, row)) = self.last_mouse {
                    let delta = Vector2::new(
                        mouse.column as f32 - col as f32,
                        mouse.row as f32 - row as f32,
                    );
                    self.viewer.pointer_drag(delta);
                }
                self.last_mouse = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => self.last_mouse = None,
            MouseEventKind::ScrollUp => self.viewer.scale(Step::Plus, 0.0),
            MouseEventKind::ScrollDown => self.viewer.scale(Step::Minus, 0.0),
            MouseEventKind::ScrollLeft => self.viewer.wheel_drag(Vector2::new(-15.0, 0.0)),
            MouseEventKind::ScrollRight => self.viewer.wheel_drag(Vector2::new(15.0, 0.0)),
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let transform = self.viewer.transform_state();
        let style = self.viewer.style_state();

        // Terminal cells are roughly twice as tall as wide.
        let aspect = width as f32 * 0.5 / height.max(1) as f32;
        let view = Matrix4::look_at_rh(
            &Point3::new(0.0, 0.0, 4.0),
            &Point3::new(0.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        let mvp = transform.projection_matrix(aspect) * view * transform.model_matrix();

        let vertices = self.viewer.vertices();
        let indices = self.viewer.indices();
        let (vertices, indices): (&[Point3<f32>], &[u32]) = if vertices.is_empty() {
            (&self.fallback.vertices, &self.fallback.indices)
        } else {
            (&vertices, &indices)
        };

        self.renderer.clear();
        self.renderer.render(vertices, indices, &mvp, &style);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout, &style)?;

        let zoom = match transform.projection {
            Projection::Parallel => format!("scale {:.1}", transform.scale_factor),
            Projection::Perspective => format!("fov {:.0}", transform.fov),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "ov3d | {:?} | {} | arrows/e/r rotate  wasd/z/x move  +/- zoom  p proj  g glyph  t reset  q quit",
                transform.projection, zoom
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
