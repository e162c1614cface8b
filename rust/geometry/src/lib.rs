// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape3D Geometry Processing
//!
//! Triangulates planar polygons (with holes) embedded in 3D using earcutr
//! and nalgebra, and lays the triangles out as indexed meshes for volume and
//! shape-index computations.

pub mod batch;
pub mod error;
pub mod mesh;
pub mod plane;
pub mod polygon;
pub mod shape;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use batch::{build_meshes, try_build_meshes, BatchSummary};
pub use error::{Error, Result};
pub use mesh::{create_mesh, IndexedMesh};
pub use plane::{axes_of_normal, estimate_normal, project_2d};
pub use polygon::{Geometry, MultiPolygon3D, Polygon3D, Ring, Surface};
pub use shape::{
    circularity, circularity_from_measures, footprint_circularity, multipolygon_footprint_circularity,
};
pub use triangulation::{triangulate_geometry, triangulate_polygon, Triangle3D, TriangulatedGeometry};
