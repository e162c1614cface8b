// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input geometry definitions
//!
//! Rings, polygons and multipolygons embedded in 3D, plus the [`Geometry`]
//! sum type an external reader hands over.

use crate::error::{Error, Result};
use nalgebra::Point3;

/// Closed boundary of a polygon. The last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point3<f64>>,
}

impl Ring {
    /// Create a ring, dropping an explicit closing point if present
    pub fn new(mut points: Vec<Point3<f64>>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// Build a ring from raw coordinate arrays.
    ///
    /// Each coordinate needs at least 3 components; anything past z is ignored.
    pub fn from_coords<C: AsRef<[f64]>>(coords: &[C]) -> Result<Self> {
        let points = coords
            .iter()
            .map(|c| match c.as_ref() {
                [x, y, z, ..] => Ok(Point3::new(*x, *y, *z)),
                other => Err(Error::UnsupportedGeometry(format!(
                    "coordinate has {} dimensions, need at least 3",
                    other.len()
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(points))
    }

    /// Ring vertices, without the closing duplicate
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Polygon with an exterior ring and optional holes, all on one plane
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon3D {
    /// Outer boundary
    pub exterior: Ring,
    /// Holes, in input order
    pub holes: Vec<Ring>,
}

impl Polygon3D {
    /// Create a polygon
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Polygon without holes
    pub fn from_exterior(exterior: Ring) -> Self {
        Self::new(exterior, Vec::new())
    }

    /// Total number of points across all rings
    pub fn point_count(&self) -> usize {
        self.exterior.len() + self.holes.iter().map(Ring::len).sum::<usize>()
    }
}

/// Non-empty collection of polygons. Members need not share a plane.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon3D {
    polygons: Vec<Polygon3D>,
}

impl MultiPolygon3D {
    /// Create a multipolygon, rejecting an empty member list
    pub fn new(polygons: Vec<Polygon3D>) -> Result<Self> {
        if polygons.is_empty() {
            return Err(Error::UnsupportedGeometry(
                "MultiPolygon must contain at least one polygon".to_string(),
            ));
        }
        Ok(Self { polygons })
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon3D] {
        &self.polygons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Always false: construction rejects empty input
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Any geometry a feature source may supply
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point3<f64>),
    LineString(Vec<Point3<f64>>),
    Polygon(Polygon3D),
    MultiPolygon(MultiPolygon3D),
}

impl Geometry {
    /// Geometry type name as used by GeoJSON / simple features
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Narrow to a triangulable surface
    pub fn as_surface(&self) -> Result<Surface<'_>> {
        match self {
            Geometry::Polygon(polygon) => Ok(Surface::Polygon(polygon)),
            Geometry::MultiPolygon(multi) => Ok(Surface::MultiPolygon(multi)),
            other => Err(Error::UnsupportedGeometry(format!(
                "Only (Multi)Polygon geometries allowed, got {}",
                other.kind()
            ))),
        }
    }
}

impl From<Polygon3D> for Geometry {
    fn from(polygon: Polygon3D) -> Self {
        Geometry::Polygon(polygon)
    }
}

impl From<MultiPolygon3D> for Geometry {
    fn from(multi: MultiPolygon3D) -> Self {
        Geometry::MultiPolygon(multi)
    }
}

/// Borrowed view of the geometry kinds that can be triangulated
#[derive(Debug, Clone, Copy)]
pub enum Surface<'a> {
    Polygon(&'a Polygon3D),
    MultiPolygon(&'a MultiPolygon3D),
}
