// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane fitting and projection
//!
//! Newell normals for (nearly) planar rings and a stable in-plane basis used
//! to flatten 3D polygons before ear clipping.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// Below this magnitude a normal component is treated as zero when picking
/// the in-plane x-axis.
pub const AXIS_EPSILON: f64 = 0.001;

/// Unit normal of a ring using Newell's method.
///
/// Works for non-convex and slightly non-planar rings. Fails when the
/// accumulated vector is exactly zero (collinear or coincident points).
pub fn estimate_normal(points: &[Point3<f64>]) -> Result<Vector3<f64>> {
    let n = points.len();
    let mut normal = Vector3::<f64>::zeros();

    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];

        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    if normal == Vector3::zeros() {
        return Err(Error::DegenerateGeometry(
            "No normal. Possible collinear points".to_string(),
        ));
    }
    if !normal.iter().all(|c| c.is_finite()) {
        return Err(Error::DegenerateGeometry(
            "Normal has non-finite components".to_string(),
        ));
    }

    Ok(normal.normalize())
}

/// In-plane x and y axes for a plane with the given unit normal.
///
/// The x-axis is chosen so the division is always by a component larger
/// than [`AXIS_EPSILON`]. The y-axis is `normal × x`, giving a right-handed
/// basis (x, y, normal).
pub fn axes_of_normal(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let x_axis = if normal.z.abs() > AXIS_EPSILON {
        Vector3::new(1.0, 0.0, -normal.x / normal.z)
    } else if normal.y.abs() > AXIS_EPSILON {
        Vector3::new(1.0, -normal.x / normal.y, 0.0)
    } else {
        Vector3::new(-normal.y / normal.x, 1.0, 0.0)
    }
    .normalize();

    let y_axis = normal.cross(&x_axis);

    (x_axis, y_axis)
}

/// Project 3D points into 2D plane coordinates.
///
/// Coordinates are measured from `origin`, defaulting to the first point.
#[inline]
pub fn project_2d(
    points: &[Point3<f64>],
    normal: &Vector3<f64>,
    origin: Option<Point3<f64>>,
) -> Vec<Point2<f64>> {
    let Some(origin) = origin.or_else(|| points.first().copied()) else {
        return Vec::new();
    };

    let (x_axis, y_axis) = axes_of_normal(normal);

    points
        .iter()
        .map(|p| {
            let v = p - origin;
            Point2::new(v.dot(&x_axis), v.dot(&y_axis))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::polygon_area_2d;
    use approx::assert_relative_eq;

    fn assert_basis(normal: Vector3<f64>) {
        let (x_axis, y_axis) = axes_of_normal(&normal);
        assert_relative_eq!(x_axis.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(y_axis.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x_axis.dot(&y_axis), 0.0, epsilon = 1e-12);
        assert_relative_eq!(x_axis.dot(&normal), 0.0, epsilon = 1e-12);
        assert_relative_eq!(y_axis.dot(&normal), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_of_xy_square() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let normal = estimate_normal(&points).unwrap();
        assert_relative_eq!(normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_normal_is_unit_and_perpendicular_to_edges() {
        // Convex pentagon on the tilted plane x + y + z = 3
        let points = vec![
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.5, 0.5),
            Point3::new(0.5, 1.0, 1.5),
            Point3::new(1.0, 0.0, 2.0),
        ];

        let normal = estimate_normal(&points).unwrap();
        assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-12);
        for i in 0..points.len() {
            let edge = points[(i + 1) % points.len()] - points[i];
            assert_relative_eq!(normal.dot(&edge), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_clockwise_ring_flips_normal() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];

        let normal = estimate_normal(&points).unwrap();
        assert_relative_eq!(normal.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(3.0, 3.0, 3.0),
        ];

        let result = estimate_normal(&points);
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let points = vec![Point3::new(4.0, 5.0, 6.0); 3];
        assert!(estimate_normal(&points).is_err());
    }

    #[test]
    fn test_axes_for_axis_aligned_normals() {
        assert_basis(Vector3::new(1.0, 0.0, 0.0));
        assert_basis(Vector3::new(0.0, 1.0, 0.0));
        assert_basis(Vector3::new(0.0, 0.0, 1.0));
        assert_basis(Vector3::new(-1.0, 0.0, 0.0));
        assert_basis(Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_axes_for_oblique_normals() {
        assert_basis(Vector3::new(1.0, 1.0, 1.0).normalize());
        assert_basis(Vector3::new(0.3, -0.8, 0.0005).normalize());
        assert_basis(Vector3::new(0.9995, 0.0002, 0.0).normalize());
    }

    #[test]
    fn test_project_2d_preserves_area() {
        // 2 x sqrt(2) rectangle tilted 45 degrees about the x axis
        let points = vec![
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(12.0, 0.0, 0.0),
            Point3::new(12.0, 1.0, 1.0),
            Point3::new(10.0, 1.0, 1.0),
        ];

        let normal = estimate_normal(&points).unwrap();
        let projected = project_2d(&points, &normal, None);

        assert_eq!(projected.len(), 4);
        assert_relative_eq!(projected[0], Point2::origin());
        assert_relative_eq!(
            polygon_area_2d(&projected).abs(),
            2.0 * 2.0_f64.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_project_2d_with_explicit_origin() {
        let points = vec![Point3::new(1.0, 2.0, 5.0), Point3::new(2.0, 2.0, 5.0)];
        let normal = Vector3::new(0.0, 0.0, 1.0);

        let projected = project_2d(&points, &normal, Some(Point3::new(0.0, 0.0, 5.0)));
        assert_relative_eq!(projected[0], Point2::new(1.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(projected[1], Point2::new(2.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_project_2d_empty() {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        assert!(project_2d(&[], &normal, None).is_empty());
    }
}
