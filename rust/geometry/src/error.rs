// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while triangulating and meshing geometries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Ring points are collinear or coincident, so no normal exists
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Geometry kind is not a (multi)polygon, or it lacks enough points
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// The ear-clipping step could not produce a valid index set
    #[error("Triangulation failed: {0}")]
    TriangulationFailure(String),
}
