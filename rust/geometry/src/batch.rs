// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-effort meshing of geometry collections
//!
//! One malformed geometry must not abort the whole collection: recoverable
//! geometry errors turn into an empty mesh at that position, so N inputs
//! always produce N meshes in input order.

use crate::error::{Error, Result};
use crate::mesh::{create_mesh, IndexedMesh};
use crate::polygon::Geometry;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Mesh every geometry, keeping each per-item result.
pub fn try_build_meshes(geometries: &[Geometry]) -> Vec<Result<IndexedMesh>> {
    // On native: parallel, order preserved by collect
    #[cfg(not(target_arch = "wasm32"))]
    let results = geometries.par_iter().map(create_mesh).collect();

    #[cfg(target_arch = "wasm32")]
    let results = geometries.iter().map(create_mesh).collect();

    results
}

/// Mesh every geometry, substituting [`IndexedMesh::empty`] for failures.
pub fn build_meshes(geometries: &[Geometry]) -> Vec<IndexedMesh> {
    try_build_meshes(geometries)
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result {
            Ok(mesh) => mesh,
            Err(
                err @ (Error::DegenerateGeometry(_)
                | Error::UnsupportedGeometry(_)
                | Error::TriangulationFailure(_)),
            ) => {
                tracing::warn!(index, error = %err, "Geometry could not be meshed, using empty mesh");
                IndexedMesh::empty()
            }
        })
        .collect()
}

/// Counts of meshed and empty outputs in a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub meshed: usize,
    pub empty: usize,
}

impl BatchSummary {
    pub fn from_meshes(meshes: &[IndexedMesh]) -> Self {
        let empty = meshes.iter().filter(|m| m.is_empty()).count();
        Self {
            total: meshes.len(),
            meshed: meshes.len() - empty,
            empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::{Polygon3D, Ring};
    use nalgebra::Point3;

    fn polygon(coords: &[[f64; 3]]) -> Geometry {
        Geometry::Polygon(Polygon3D::from_exterior(Ring::from_coords(coords).unwrap()))
    }

    fn unit_square() -> Geometry {
        polygon(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
    }

    fn bowtie() -> Geometry {
        polygon(&[
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
    }

    #[test]
    fn test_build_meshes_substitutes_empty_mesh() {
        let meshes = build_meshes(&[unit_square(), bowtie()]);

        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].vertex_count(), 6);
        assert_eq!(meshes[0].triangle_count(), 2);
        assert_eq!(meshes[1].vertex_count(), 0);
        assert_eq!(meshes[1].triangle_count(), 0);
    }

    #[test]
    fn test_build_meshes_preserves_order() {
        let triangle = polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let point = Geometry::Point(Point3::origin());
        let input = vec![point, unit_square(), triangle, bowtie(), unit_square()];

        let counts: Vec<usize> = build_meshes(&input)
            .iter()
            .map(IndexedMesh::triangle_count)
            .collect();
        assert_eq!(counts, vec![0, 2, 1, 0, 2]);
    }

    #[test]
    fn test_try_build_meshes_keeps_errors() {
        let results = try_build_meshes(&[bowtie(), Geometry::LineString(Vec::new())]);

        assert!(matches!(results[0], Err(Error::DegenerateGeometry(_))));
        assert!(matches!(results[1], Err(Error::UnsupportedGeometry(_))));
    }

    #[test]
    fn test_build_meshes_absorbs_triangulation_failure() {
        let square = Polygon3D::from_exterior(
            Ring::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]])
                .unwrap(),
        );
        let empty_hole = Geometry::Polygon(Polygon3D::new(
            square.exterior.clone(),
            vec![Ring::new(Vec::new())],
        ));

        let meshes = build_meshes(&[Geometry::Polygon(square), empty_hole]);
        assert_eq!(meshes[0].triangle_count(), 2);
        assert!(meshes[1].is_empty());
        assert_eq!(meshes[1].triangle_count(), 0);
    }

    #[test]
    fn test_empty_batch() {
        assert!(build_meshes(&[]).is_empty());
    }

    #[test]
    fn test_summary() {
        let meshes = build_meshes(&[unit_square(), bowtie(), unit_square()]);
        let summary = BatchSummary::from_meshes(&meshes);
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                meshed: 2,
                empty: 1
            }
        );
    }
}
