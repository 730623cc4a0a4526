use serde_json::Value;

use crate::{
    error::{ConvertError, ConvertResult},
    records::{
        coordinate::{coerce_coordinate, is_coordinate_field, LATITUDE_FIELD, LONGITUDE_FIELD},
        record::Record,
    },
};

/// Build a point feature from a record that already passed the coordinate filter.
///
/// The geometry is `[longitude, latitude]`. Every other field of the record is copied into the
/// properties unchanged and in its original order.
pub fn to_feature(record: &Record) -> ConvertResult<geojson::Feature> {
    let longitude = coerce_field(record, LONGITUDE_FIELD)?;
    let latitude = coerce_field(record, LATITUDE_FIELD)?;
    let point = geo::Point::new(longitude, latitude);

    let properties: geojson::JsonObject = record
        .iter()
        .filter(|(key, _)| !is_coordinate_field(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

fn coerce_field(record: &Record, field: &'static str) -> ConvertResult<f64> {
    match record.get(field) {
        Some(value) => coerce_coordinate(value).ok_or_else(|| ConvertError::CoercionError {
            field,
            value: value.clone(),
        }),
        None => Err(ConvertError::CoercionError {
            field,
            value: Value::Null,
        }),
    }
}
