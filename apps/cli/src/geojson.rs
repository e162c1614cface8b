// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal GeoJSON reading for 3D (multi)polygon features.

use serde::Deserialize;
use serde_json::Value;
use shape3d_geometry::{Error, Geometry, MultiPolygon3D, Point3, Polygon3D, Result, Ring};

type Coord = Vec<f64>;

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Option<RawGeometry>,
}

/// Geometry with its coordinates left undecoded until the type is known
#[derive(Debug, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

fn decode<T: serde::de::DeserializeOwned>(kind: &str, coordinates: &Value) -> Result<T> {
    T::deserialize(coordinates)
        .map_err(|e| Error::UnsupportedGeometry(format!("invalid {} coordinates: {}", kind, e)))
}

fn point(coord: &[f64]) -> Result<Point3<f64>> {
    match coord {
        [x, y, z, ..] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(Error::UnsupportedGeometry(format!(
            "coordinate has {} dimensions, need at least 3",
            coord.len()
        ))),
    }
}

fn polygon(rings: &[Vec<Coord>]) -> Result<Polygon3D> {
    let (exterior, holes) = rings
        .split_first()
        .ok_or_else(|| Error::UnsupportedGeometry("Polygon has no rings".to_string()))?;

    Ok(Polygon3D::new(
        Ring::from_coords(exterior)?,
        holes
            .iter()
            .map(|hole| Ring::from_coords(hole))
            .collect::<Result<Vec<_>>>()?,
    ))
}

impl RawGeometry {
    /// Convert to a core geometry. Types other than Point, LineString,
    /// Polygon and MultiPolygon are rejected.
    pub fn to_geometry(&self) -> Result<Geometry> {
        let kind = self.kind.as_str();
        match kind {
            "Point" => Ok(Geometry::Point(point(&decode::<Coord>(kind, &self.coordinates)?)?)),
            "LineString" => Ok(Geometry::LineString(
                decode::<Vec<Coord>>(kind, &self.coordinates)?
                    .iter()
                    .map(|c| point(c))
                    .collect::<Result<_>>()?,
            )),
            "Polygon" => Ok(Geometry::Polygon(polygon(&decode::<Vec<Vec<Coord>>>(
                kind,
                &self.coordinates,
            )?)?)),
            "MultiPolygon" => {
                let polygons = decode::<Vec<Vec<Vec<Coord>>>>(kind, &self.coordinates)?
                    .iter()
                    .map(|rings| polygon(rings))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Geometry::MultiPolygon(MultiPolygon3D::new(polygons)?))
            }
            other => Err(Error::UnsupportedGeometry(format!(
                "GeoJSON type {} is not supported",
                other
            ))),
        }
    }
}

impl Feature {
    pub fn to_geometry(&self) -> Result<Geometry> {
        self.geometry
            .as_ref()
            .ok_or_else(|| Error::UnsupportedGeometry("feature has no geometry".to_string()))?
            .to_geometry()
    }
}
