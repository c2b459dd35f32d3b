//! Mesh storage and canonical-space normalization.

use nalgebra::Point3;

/// An indexed wireframe mesh.
///
/// `indices` is the flattened list of face-loop vertex references in file
/// order; consumers chunk it into outlines at draw time. The whole mesh is
/// replaced on every load, never mutated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drop all vertices and indices, keeping allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Compute the axis-aligned bounding box.
    /// Returns `(min_corner, max_corner)` or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;

        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Some((min, max))
    }

    /// Recenter and rescale into display space: the bounding box midpoint
    /// moves to the origin and the longest axis ends up spanning [-1, 1].
    /// The other axes keep their aspect ratio. Empty meshes are left alone
    /// (their bounding box is undefined).
    pub fn normalize(&mut self) {
        let Some((min, max)) = self.bounds() else {
            return;
        };

        let center = nalgebra::center(&min, &max);
        let extent = max - min;
        let max_size = extent.x.max(extent.y).max(extent.z);

        for v in &mut self.vertices {
            v.x = (v.x - center.x) / max_size * 2.0;
            v.y = (v.y - center.y) / max_size * 2.0;
            v.z = (v.z - center.z) / max_size * 2.0;
        }
    }

    /// A unit-selectable cube, used as the fallback model and in tests.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        #[rustfmt::skip]
        let indices = vec![
            4, 5, 6,  4, 6, 7, // front
            0, 3, 2,  0, 2, 1, // back
            3, 7, 6,  3, 6, 2, // top
            0, 1, 5,  0, 5, 4, // bottom
            1, 2, 6,  1, 6, 5, // right
            0, 4, 7,  0, 7, 3, // left
        ];

        Self { vertices, indices }
    }
}
