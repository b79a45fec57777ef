//! Conversion of geometry objects into plain GeoJSON mappings.
//!
//! kepler.gl only understands plain JSON, so anything that can describe itself
//! as GeoJSON implements [`GeoInterface`] and is converted before it reaches
//! the renderer. The trait is implemented for the `geojson` object model and
//! for the `geo-types` geometries; other crates can implement it for their own
//! types.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};

/// A value that can describe itself as a plain GeoJSON object
pub trait GeoInterface {
    fn geo_interface(&self) -> JsonObject;
}

impl GeoInterface for Geometry {
    fn geo_interface(&self) -> JsonObject {
        JsonObject::from(self)
    }
}

impl GeoInterface for geojson::Value {
    fn geo_interface(&self) -> JsonObject {
        JsonObject::from(&Geometry::new(self.clone()))
    }
}

impl GeoInterface for Feature {
    fn geo_interface(&self) -> JsonObject {
        JsonObject::from(self)
    }
}

impl GeoInterface for FeatureCollection {
    fn geo_interface(&self) -> JsonObject {
        JsonObject::from(self)
    }
}

impl GeoInterface for GeoJson {
    fn geo_interface(&self) -> JsonObject {
        JsonObject::from(self)
    }
}

macro_rules! impl_geo_interface_for_geo_types {
    ($($geometry:ident),* $(,)?) => {
        $(
            impl GeoInterface for geo_types::$geometry<f64> {
                fn geo_interface(&self) -> JsonObject {
                    JsonObject::from(&Geometry::new(geojson::Value::from(self)))
                }
            }
        )*
    };
}

impl_geo_interface_for_geo_types!(
    Point,
    Line,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    Rect,
    Triangle,
    GeometryCollection,
    Geometry,
);

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, point, polygon};
    use serde_json::{json, Value};

    fn as_value(object: JsonObject) -> Value {
        Value::Object(object)
    }

    #[test]
    fn test_point_mapping() {
        let p = point!(x: 13.4, y: 52.5);
        assert_eq!(
            as_value(p.geo_interface()),
            json!({"type": "Point", "coordinates": [13.4, 52.5]})
        );
    }

    #[test]
    fn test_line_string_mapping() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert_eq!(
            as_value(line.geo_interface()),
            json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]})
        );
    }

    #[test]
    fn test_polygon_mapping_closes_ring() {
        let poly = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let mapping = as_value(poly.geo_interface());
        assert_eq!(mapping["type"], "Polygon");
        let ring = mapping["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_geo_types_geometry_enum_mapping() {
        let geometry: geo_types::Geometry<f64> = point!(x: 1.0, y: 2.0).into();
        assert_eq!(as_value(geometry.geo_interface())["type"], "Point");
    }

    #[test]
    fn test_geojson_feature_mapping() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
            "properties": {"name": "a"}
        }))
        .unwrap();
        let mapping = as_value(feature.geo_interface());
        assert_eq!(mapping["type"], "Feature");
        assert_eq!(mapping["properties"]["name"], "a");
        assert_eq!(mapping["geometry"]["coordinates"], json!([1.0, 2.0]));
    }

    #[test]
    fn test_geojson_value_matches_geometry() {
        let value = geojson::Value::Point(vec![1.0, 2.0]);
        let geometry = Geometry::new(value.clone());
        assert_eq!(value.geo_interface(), geometry.geo_interface());
    }
}
