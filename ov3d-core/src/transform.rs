//! Mutable view transform and its bounded increment operations.
//!
//! Everything here is UI-facing state, not a validating API: inputs are
//! accepted as-is and out-of-range results are saturated silently.

use nalgebra::{Matrix4, Vector2, Vector3};

/// Projection mode for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Parallel,
    Perspective,
}

/// Axis selector for translate/rotate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction selector for incremental operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Plus,
    Minus,
}

/// Built-in step used when a translate magnitude of 0.0 is passed.
pub const DEFAULT_TRANSLATE_STEP: f32 = 0.5;
/// Built-in step (degrees) used when a rotate magnitude of 0.0 is passed.
pub const DEFAULT_ROTATE_STEP: f32 = 15.0;
/// Built-in step used when a parallel-mode scale magnitude of 0.0 is passed.
pub const DEFAULT_SCALE_STEP: f32 = 0.1;
/// Built-in step (degrees) used when a perspective-mode magnitude of 0.0 is passed.
pub const DEFAULT_FOV_STEP: f32 = 3.0;

const SCALE_MIN: f32 = 0.1;
const SCALE_MAX: f32 = 10.0;
const FOV_MIN: f32 = 10.0;
const FOV_MAX: f32 = 120.0;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// The viewer's affine transform state.
///
/// Angles are degrees and unbounded (no wrap to [0, 360)). `scale_factor`
/// only governs the parallel projection and `fov` only the perspective one;
/// the inactive field stays stored and readable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub projection: Projection,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub rotate_z: f32,
    pub scale_factor: f32,
    pub fov: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub translate_z: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            projection: Projection::Parallel,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale_factor: 1.0,
            fov: 45.0,
            translate_x: 0.0,
            translate_y: 0.0,
            translate_z: 0.0,
        }
    }
}

impl TransformState {
    /// Shift the named axis offset. A `value` of exactly 0.0 selects the
    /// built-in step of 0.5. Offsets are unbounded.
    pub fn translate(&mut self, axis: Axis, step: Step, value: f32) {
        let delta = signed(step, or_default(value, DEFAULT_TRANSLATE_STEP));
        match axis {
            Axis::X => self.translate_x += delta,
            Axis::Y => self.translate_y += delta,
            Axis::Z => self.translate_z += delta,
        }
    }

    /// Turn around the named axis. A `value` of exactly 0.0 selects the
    /// built-in step of 15 degrees. Angles are unbounded.
    pub fn rotate(&mut self, axis: Axis, step: Step, value: f32) {
        let delta = signed(step, or_default(value, DEFAULT_ROTATE_STEP));
        match axis {
            Axis::X => self.rotate_x += delta,
            Axis::Y => self.rotate_y += delta,
            Axis::Z => self.rotate_z += delta,
        }
    }

    /// Switch projection mode without resetting any transform field.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Zoom in (`Plus`) or out (`Minus`) in the current projection mode.
    ///
    /// Parallel mode steps `scale_factor` (default 0.1, clamped to
    /// [0.1, 10.0]). Perspective mode steps `fov` (default 3 degrees,
    /// clamped to [10, 120]) with the opposite sign: a narrower field of
    /// view reads as zooming in.
    pub fn scale(&mut self, step: Step, value: f32) {
        match self.projection {
            Projection::Perspective => {
                let delta = or_default(value, DEFAULT_FOV_STEP);
                match step {
                    Step::Plus => self.fov -= delta,
                    Step::Minus => self.fov += delta,
                }
                self.fov = self.fov.clamp(FOV_MIN, FOV_MAX);
            }
            Projection::Parallel => {
                let delta = or_default(value, DEFAULT_SCALE_STEP);
                match step {
                    Step::Plus => self.scale_factor += delta,
                    Step::Minus => self.scale_factor -= delta,
                }
                self.scale_factor = self.scale_factor.clamp(SCALE_MIN, SCALE_MAX);
            }
        }
    }

    /// Restore every field to its documented default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The reset applied when a model is loaded: rotation, scale factor,
    /// translate-X and projection go back to defaults while translate-Y and
    /// translate-Z keep their values.
    // TODO: translate_y/translate_z surviving a reload is inherited behavior;
    // confirm with product owners whether a load should clear them too.
    pub fn reset_for_load(&mut self) {
        self.rotate_x = 0.0;
        self.rotate_y = 0.0;
        self.rotate_z = 0.0;
        self.scale_factor = 1.0;
        self.translate_x = 0.0;
        self.projection = Projection::Parallel;
    }

    /// Pointer drag rotates: vertical motion turns around X, horizontal
    /// motion around Y.
    pub fn pointer_drag(&mut self, delta: Vector2<f32>) {
        self.rotate_x += delta.y;
        self.rotate_y += delta.x;
    }

    /// Wheel drag turns around Z with the horizontal component.
    pub fn wheel_drag(&mut self, delta: Vector2<f32>) {
        self.rotate_z += delta.x;
    }

    /// Model matrix composing the translation with Z * Y * X rotation.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(self.rotate_x.to_radians(), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, self.rotate_y.to_radians(), 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, self.rotate_z.to_radians()));
        let translation =
            Matrix4::new_translation(&Vector3::new(self.translate_x, self.translate_y, self.translate_z));

        translation * rz * ry * rx
    }

    /// Projection matrix for the current mode. The parallel branch divides
    /// the view box by the scale factor, the perspective branch derives it
    /// from the field of view.
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        match self.projection {
            Projection::Perspective => {
                Matrix4::new_perspective(aspect, self.fov.to_radians(), NEAR_PLANE, FAR_PLANE)
            }
            Projection::Parallel => {
                // Display space is a [-1, 1] cube; keep a margin around it.
                let half = 1.5 / self.scale_factor;
                Matrix4::new_orthographic(
                    -half * aspect,
                    half * aspect,
                    -half,
                    half,
                    NEAR_PLANE,
                    FAR_PLANE,
                )
            }
        }
    }
}

#[inline]
fn or_default(value: f32, default: f32) -> f32 {
    if value == 0.0 {
        default
    } else {
        value
    }
}

#[inline]
fn signed(step: Step, value: f32) -> f32 {
    match step {
        Step::Plus => value,
        Step::Minus => -value,
    }
}
