// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D shape indices

use crate::polygon::{MultiPolygon3D, Polygon3D};
use nalgebra::{Point2, Point3};
use std::f64::consts::PI;

/// Signed shoelace area of a closed 2D ring (positive when counter-clockwise)
pub fn polygon_area_2d(ring: &[Point2<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..n {
        let p = &ring[i];
        let q = &ring[(i + 1) % n];
        twice_area += p.x * q.y - q.x * p.y;
    }
    twice_area * 0.5
}

/// Perimeter of a closed 2D ring, including the closing edge
pub fn polygon_perimeter_2d(ring: &[Point2<f64>]) -> f64 {
    let n = ring.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| (ring[(i + 1) % n] - ring[i]).norm()).sum()
}

/// `4π · area / perimeter²`. Zero perimeter yields 0.
#[inline]
pub fn circularity_from_measures(area: f64, perimeter: f64) -> f64 {
    if perimeter <= 0.0 {
        return 0.0;
    }
    4.0 * PI * area.abs() / (perimeter * perimeter)
}

/// Circularity of a 2D ring: 1 for a circle, π/4 for a square
pub fn circularity(ring: &[Point2<f64>]) -> f64 {
    circularity_from_measures(polygon_area_2d(ring), polygon_perimeter_2d(ring))
}

/// Area and total ring length of a polygon dropped onto the XY plane.
///
/// Holes reduce the area and add to the length.
fn footprint_measures(polygon: &Polygon3D) -> (f64, f64) {
    let flatten = |points: &[Point3<f64>]| -> Vec<Point2<f64>> {
        points.iter().map(|p| Point2::new(p.x, p.y)).collect()
    };

    let exterior = flatten(polygon.exterior.points());
    let mut area = polygon_area_2d(&exterior).abs();
    let mut length = polygon_perimeter_2d(&exterior);
    for hole in &polygon.holes {
        let hole = flatten(hole.points());
        area -= polygon_area_2d(&hole).abs();
        length += polygon_perimeter_2d(&hole);
    }
    (area, length)
}

/// Circularity of a polygon's footprint on the XY plane.
///
/// The perimeter is the length of every ring, holes included.
pub fn footprint_circularity(polygon: &Polygon3D) -> f64 {
    let (area, length) = footprint_measures(polygon);
    circularity_from_measures(area, length)
}

/// Footprint circularity of a multipolygon: total area over total ring length
pub fn multipolygon_footprint_circularity(multi: &MultiPolygon3D) -> f64 {
    let (area, length) = multi
        .polygons()
        .iter()
        .map(footprint_measures)
        .fold((0.0, 0.0), |(a, l), (pa, pl)| (a + pa, l + pl));
    circularity_from_measures(area, length)
}
