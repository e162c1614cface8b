// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::error::Result;
use crate::polygon::Geometry;
use crate::triangulation::triangulate_geometry;
use nalgebra::Point3;

/// Indexed triangle mesh handed to volume and shape-index computations.
///
/// Meshes built by [`create_mesh`] do not share vertices: each triangle owns
/// three consecutive entries in `vertices`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions
    pub vertices: Vec<Point3<f64>>,
    /// Triangle indices (i0, i1, i2) into `vertices`
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// The sentinel used in place of a geometry that could not be meshed
    pub fn empty() -> Self {
        Self::new()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.faces.push([i0, i1, i2]);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check that every index points at an existing vertex
    pub fn is_valid(&self) -> bool {
        let count = self.vertices.len();
        self.faces
            .iter()
            .all(|face| face.iter().all(|&i| (i as usize) < count))
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        (min, max)
    }

    #[inline]
    fn triangle(&self, face: &[u32; 3]) -> [Point3<f64>; 3] {
        face.map(|i| self.vertices[i as usize])
    }

    /// Total area of all triangles
    pub fn surface_area(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| {
                let [v0, v1, v2] = self.triangle(face);
                (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
            })
            .sum()
    }

    /// Signed enclosed volume via the divergence theorem.
    ///
    /// Only meaningful for closed meshes with consistent winding; negative
    /// when the faces point inwards.
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;

        for face in &self.faces {
            let [v0, v1, v2] = self.triangle(face);
            // Signed volume of tetrahedron with origin = (v0 · (v1 × v2)) / 6
            volume += v0.coords.dot(&v1.coords.cross(&v2.coords));
        }

        volume / 6.0
    }

    /// Returns the absolute value of `signed_volume()`.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Faces as a flat `[3, i0, i1, i2, 3, ...]` stream, the layout used by
    /// VTK-style mesh engines
    pub fn face_stream(&self) -> Vec<u32> {
        let mut stream = Vec::with_capacity(self.faces.len() * 4);
        for face in &self.faces {
            stream.push(3);
            stream.extend_from_slice(face);
        }
        stream
    }
}

/// Triangulate a (multi)polygon and lay the triangles out as a mesh.
///
/// Every triangle contributes three fresh vertices, so face `k` is always
/// `(3k, 3k + 1, 3k + 2)`.
pub fn create_mesh(geometry: &Geometry) -> Result<IndexedMesh> {
    let surface = geometry.as_surface()?;
    let triangulated = triangulate_geometry(surface)?;

    let mut mesh = IndexedMesh::with_capacity(triangulated.len() * 3, triangulated.len());
    for triangle in triangulated {
        let [v0, v1, v2] = triangle.vertices;
        let i0 = mesh.add_vertex(v0);
        let i1 = mesh.add_vertex(v1);
        let i2 = mesh.add_vertex(v2);
        mesh.add_triangle(i0, i1, i2);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::polygon::{Polygon3D, Ring};
    use approx::assert_relative_eq;

    fn unit_square() -> Geometry {
        Geometry::Polygon(Polygon3D::from_exterior(
            Ring::from_coords(&[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ])
            .unwrap(),
        ))
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.volume(), 0.0);
    }

    #[test]
    fn test_create_mesh_unit_square() {
        let mesh = create_mesh(&unit_square()).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
        assert!(mesh.is_valid());
        assert_relative_eq!(mesh.surface_area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_create_mesh_rejects_linestring() {
        let geometry = Geometry::LineString(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);

        let result = create_mesh(&geometry);
        assert!(matches!(result, Err(Error::UnsupportedGeometry(_))));
    }

    #[test]
    fn test_face_stream_layout() {
        let mesh = create_mesh(&unit_square()).unwrap();
        assert_eq!(mesh.face_stream(), vec![3, 0, 1, 2, 3, 3, 4, 5]);
    }

    #[test]
    fn test_is_valid_detects_dangling_index() {
        let mut mesh = IndexedMesh::new();
        mesh.add_vertex(Point3::origin());
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_bounds() {
        let mut mesh = IndexedMesh::new();
        mesh.add_vertex(Point3::new(-1.0, 2.0, 0.5));
        mesh.add_vertex(Point3::new(3.0, -4.0, 1.5));

        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(-1.0, -4.0, 0.5));
        assert_eq!(max, Point3::new(3.0, 2.0, 1.5));
    }
}
