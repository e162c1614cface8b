// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Flattens 3D polygons onto their own plane, runs earcutr over the 2D
//! points and maps the resulting indices back to the original 3D points.

use crate::error::{Error, Result};
use crate::plane::{estimate_normal, project_2d};
use crate::polygon::{Polygon3D, Ring, Surface};
use nalgebra::Point3;

/// A single triangle in 3D, produced by triangulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3D {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle3D {
    #[inline]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Area of the triangle
    #[inline]
    pub fn area(&self) -> f64 {
        let [v0, v1, v2] = &self.vertices;
        (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
    }
}

/// Flat collection of triangles from one polygon or multipolygon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangulatedGeometry {
    pub triangles: Vec<Triangle3D>,
}

impl TriangulatedGeometry {
    pub fn new(triangles: Vec<Triangle3D>) -> Self {
        Self { triangles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Summed area of all triangles
    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle3D::area).sum()
    }
}

impl IntoIterator for TriangulatedGeometry {
    type Item = Triangle3D;
    type IntoIter = std::vec::IntoIter<Triangle3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.into_iter()
    }
}

/// Cumulative end offset of every ring in the concatenated point list.
///
/// The first entry is the exterior length, each following entry adds one
/// hole. The sequence is strictly increasing for non-empty holes.
pub fn ring_offsets(polygon: &Polygon3D) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(polygon.holes.len() + 1);
    offsets.push(polygon.exterior.len());
    for hole in &polygon.holes {
        let last = offsets[offsets.len() - 1];
        offsets.push(last + hole.len());
    }
    offsets
}

/// Triangulate a polygon (with holes) lying on an arbitrary plane in 3D.
///
/// The normal is estimated from the exterior and hole points together.
/// Triangle winding follows earcutr's output.
pub fn triangulate_polygon(polygon: &Polygon3D) -> Result<Vec<Triangle3D>> {
    if polygon.exterior.len() < 3 {
        return Err(Error::UnsupportedGeometry(format!(
            "Need at least 3 exterior points to triangulate, got {}",
            polygon.exterior.len()
        )));
    }

    let points: Vec<Point3<f64>> = std::iter::once(&polygon.exterior)
        .chain(polygon.holes.iter())
        .flat_map(|ring: &Ring| ring.points().iter().copied())
        .collect();

    let normal = estimate_normal(&points)?;
    let offsets = ring_offsets(polygon);
    let points_2d = project_2d(&points, &normal, None);

    // Flatten vertices for earcutr
    let mut vertices = Vec::with_capacity(points_2d.len() * 2);
    for p in &points_2d {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    // earcutr wants hole start indices, i.e. every ring end but the last
    let hole_starts = &offsets[..offsets.len() - 1];

    let indices = earcutr::earcut(&vertices, hole_starts, 2)
        .map_err(|e| Error::TriangulationFailure(format!("{:?}", e)))?;

    if indices.is_empty() {
        return Err(Error::TriangulationFailure(
            "earcut produced no triangles".to_string(),
        ));
    }
    if indices.len() % 3 != 0 {
        return Err(Error::TriangulationFailure(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i >= points.len()) {
        return Err(Error::TriangulationFailure(format!(
            "index {} out of range for {} points",
            bad,
            points.len()
        )));
    }

    let triangles: Vec<Triangle3D> = indices
        .chunks_exact(3)
        .map(|tri| Triangle3D::new(points[tri[0]], points[tri[1]], points[tri[2]]))
        .collect();

    tracing::trace!(
        points = points.len(),
        holes = polygon.holes.len(),
        triangles = triangles.len(),
        "Triangulated polygon"
    );

    Ok(triangles)
}

/// Triangulate a polygon or every member of a multipolygon.
///
/// Multipolygon members are handled independently and their triangles are
/// concatenated in input order.
pub fn triangulate_geometry(surface: Surface<'_>) -> Result<TriangulatedGeometry> {
    match surface {
        Surface::Polygon(polygon) => Ok(TriangulatedGeometry::new(triangulate_polygon(polygon)?)),
        Surface::MultiPolygon(multi) => {
            let mut triangles = Vec::new();
            for polygon in multi.polygons() {
                triangles.extend(triangulate_polygon(polygon)?);
            }
            Ok(TriangulatedGeometry::new(triangles))
        }
    }
}
