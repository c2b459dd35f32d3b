//! Loader for the `v`/`f` subset of line-oriented OBJ text.
//!
//! Only vertex and face records are interpreted; groups, objects, materials
//! and every other directive are skipped. Face tokens keep their numeric
//! prefix (`12/3/4` reads as `12`) and are converted from 1-based to
//! 0-based. Indices are not checked against the vertex count here; drawing
//! collaborators bounds-check at consumption time.

use std::io::BufRead;

use nalgebra::Point3;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::geometry::Mesh;

/// Scan `reader` line by line, appending parsed records to `mesh`.
///
/// A malformed numeric token aborts the scan and leaves `mesh` partially
/// populated; callers reset before retrying. Normalization is left to the
/// caller so a partial mesh is never rescaled.
pub fn scan_into<R: BufRead>(reader: R, mesh: &mut Mesh) -> LoadResult<()> {
    for (index, result) in reader.lines().enumerate() {
        let line = index + 1;
        let text = result.map_err(|source| LoadError::Read { line, source })?;
        if let Some(rest) = text.strip_prefix("v ") {
            mesh.vertices.push(parse_vertex(line, rest)?);
        } else if let Some(rest) = text.strip_prefix("f ") {
            parse_face(line, rest, &mut mesh.indices)?;
        }
    }

    debug!(
        "scanned {} vertices, {} face indices",
        mesh.vertex_count(),
        mesh.index_count()
    );
    Ok(())
}

/// Three whitespace-separated floats; anything after the third token is
/// ignored, a missing or non-numeric token is fatal.
fn parse_vertex(line: usize, rest: &str) -> LoadResult<Point3<f32>> {
    let mut tokens = rest.split_whitespace();
    let mut coords = [0.0f32; 3];
    for slot in &mut coords {
        let token = tokens.next().ok_or(LoadError::ShortVertex { line })?;
        *slot = token.parse().map_err(|source| LoadError::Coordinate {
            line,
            token: token.to_string(),
            source,
        })?;
    }

    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Whitespace-separated face tokens, each `index[/attr[/attr]]`, appended to
/// the flattened loop list as 0-based indices.
fn parse_face(line: usize, rest: &str, indices: &mut Vec<u32>) -> LoadResult<()> {
    for token in rest.split_whitespace() {
        let prefix = token.split('/').next().unwrap_or(token);
        let one_based: u32 = prefix.parse().map_err(|source| LoadError::FaceIndex {
            line,
            token: token.to_string(),
            source,
        })?;
        let index = one_based
            .checked_sub(1)
            .ok_or(LoadError::ZeroFaceIndex { line })?;
        indices.push(index);
    }

    Ok(())
}
