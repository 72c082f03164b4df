//! Feed document decoding
//!
//! Turns the raw GeoJSON summary text returned by the query service into a
//! flat list of [`Record`]s. Individual event fields decode leniently — a
//! missing or mistyped field falls back to its default and never aborts the
//! element or the batch. Only structural malformation of the document itself
//! (not an object, `features` missing or not an array, an element without a
//! `properties` object) fails the decode.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::error::DecodeError;
use crate::types::{FALLBACK_DETAIL_URL, Record};

/// Decode a feed document body into records
///
/// Pure and deterministic: identical input text yields element-wise
/// identical output. An empty body and an empty `features` array both yield
/// an empty list — "nothing to show" is not a failure.
///
/// # Errors
///
/// Returns [`DecodeError::Structural`] when the document shape itself is
/// malformed.
pub fn decode(body: &str) -> Result<Vec<Record>, DecodeError> {
    // An empty response body means "nothing to show", not "could not parse"
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: FeedDocument =
        serde_json::from_str(body).map_err(|e| DecodeError::Structural {
            detail: e.to_string(),
        })?;

    let records: Vec<Record> = document.features.into_iter().map(Record::from).collect();
    debug!(count = records.len(), "decoded feed document");
    Ok(records)
}

/// Top-level feed document: `features` is required and must be an array
#[derive(Deserialize)]
struct FeedDocument {
    features: Vec<Feature>,
}

/// One feed element: `properties` is required, `geometry` is not
#[derive(Deserialize)]
struct Feature {
    properties: Properties,
    #[serde(default)]
    geometry: Value,
}

#[derive(Deserialize)]
struct Properties {
    #[serde(default, deserialize_with = "lenient_f64")]
    mag: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    place: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    time: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    felt: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
}

impl From<Feature> for Record {
    fn from(feature: Feature) -> Self {
        let Feature {
            properties,
            geometry,
        } = feature;

        // USGS puts depth in kilometers as the third coordinate
        let depth_km = geometry
            .pointer("/coordinates/2")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        let detail_url = if properties.url.is_empty() {
            FALLBACK_DETAIL_URL.to_string()
        } else {
            properties.url
        };

        Record {
            title: properties.title,
            place: properties.place,
            magnitude: properties.mag,
            depth_km,
            time_ms: properties.time,
            felt_reports: properties.felt,
            detail_url,
        }
    }
}

// The lenient_* deserializers implement the per-field default rules: a field
// that is present but null or mistyped decodes to the same default as a
// missing field, so one bad value never fails the element.

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().unwrap_or(0))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u32::try_from(n).ok()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn feature(properties: &str) -> String {
        format!(r#"{{"features":[{{"properties":{properties}}}]}}"#)
    }

    #[test]
    fn empty_body_yields_empty_list() {
        assert_eq!(decode("").unwrap(), vec![]);
        assert_eq!(decode("   \n").unwrap(), vec![]);
    }

    #[test]
    fn empty_features_array_yields_empty_list() {
        let records = decode(r#"{"features":[]}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn fully_populated_element_decodes_all_fields() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {
                    "mag": 5.5,
                    "place": "10km SW of Reno, NV",
                    "time": 1000000,
                    "felt": 12,
                    "url": "https://x",
                    "title": "M 5.5 - 10km SW of Reno, NV"
                },
                "geometry": {"type": "Point", "coordinates": [-119.9, 39.4, 7.6]}
            }]
        }"#;

        let records = decode(body).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.magnitude, 5.5);
        assert_eq!(record.place, "10km SW of Reno, NV");
        assert_eq!(record.time_ms, 1_000_000);
        assert_eq!(record.felt_reports, Some(12));
        assert_eq!(record.detail_url, "https://x");
        assert_eq!(record.title, "M 5.5 - 10km SW of Reno, NV");
        assert_eq!(record.depth_km, 7.6);
    }

    #[test]
    fn missing_mag_defaults_to_zero_without_affecting_siblings() {
        let body = r#"{"features":[
            {"properties":{"place":"A","time":1}},
            {"properties":{"mag":4.2,"place":"B","time":2}}
        ]}"#;

        let records = decode(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].magnitude, 0.0);
        assert_eq!(records[1].magnitude, 4.2);
        assert_eq!(records[1].place, "B");
    }

    #[test]
    fn non_numeric_mag_defaults_to_zero() {
        let records = decode(&feature(r#"{"mag":"strong","time":1}"#)).unwrap();
        assert_eq!(records[0].magnitude, 0.0);

        let records = decode(&feature(r#"{"mag":null,"time":1}"#)).unwrap();
        assert_eq!(records[0].magnitude, 0.0);
    }

    #[test]
    fn missing_or_non_numeric_time_defaults_to_zero() {
        let records = decode(&feature(r#"{"mag":1.0}"#)).unwrap();
        assert_eq!(records[0].time_ms, 0);

        let records = decode(&feature(r#"{"mag":1.0,"time":"yesterday"}"#)).unwrap();
        assert_eq!(records[0].time_ms, 0);
    }

    #[test]
    fn missing_place_defaults_to_empty_string() {
        let records = decode(&feature(r#"{"mag":1.0}"#)).unwrap();
        assert_eq!(records[0].place, "");

        let records = decode(&feature(r#"{"mag":1.0,"place":null}"#)).unwrap();
        assert_eq!(records[0].place, "");
    }

    #[test]
    fn missing_or_empty_url_falls_back_to_constant() {
        let records = decode(&feature(r#"{"mag":1.0}"#)).unwrap();
        assert_eq!(records[0].detail_url, FALLBACK_DETAIL_URL);

        let records = decode(&feature(r#"{"mag":1.0,"url":""}"#)).unwrap();
        assert_eq!(records[0].detail_url, FALLBACK_DETAIL_URL);

        let records = decode(&feature(r#"{"mag":1.0,"url":null}"#)).unwrap();
        assert_eq!(records[0].detail_url, FALLBACK_DETAIL_URL);
    }

    #[test]
    fn absent_felt_is_none_and_present_zero_is_some() {
        let records = decode(&feature(r#"{"mag":1.0}"#)).unwrap();
        assert_eq!(records[0].felt_reports, None);

        let records = decode(&feature(r#"{"mag":1.0,"felt":0}"#)).unwrap();
        assert_eq!(records[0].felt_reports, Some(0));
    }

    #[test]
    fn missing_geometry_defaults_depth_to_zero() {
        let records = decode(&feature(r#"{"mag":1.0}"#)).unwrap();
        assert_eq!(records[0].depth_km, 0.0);
    }

    #[test]
    fn two_coordinate_geometry_defaults_depth_to_zero() {
        let body = r#"{"features":[{
            "properties":{"mag":1.0},
            "geometry":{"coordinates":[-119.9,39.4]}
        }]}"#;
        let records = decode(body).unwrap();
        assert_eq!(records[0].depth_km, 0.0);
    }

    #[test]
    fn truncated_document_is_a_structural_error() {
        assert!(matches!(
            decode("{"),
            Err(DecodeError::Structural { .. })
        ));
    }

    #[test]
    fn non_object_document_is_a_structural_error() {
        assert!(matches!(
            decode("[1,2,3]"),
            Err(DecodeError::Structural { .. })
        ));
        assert!(matches!(
            decode("42"),
            Err(DecodeError::Structural { .. })
        ));
    }

    #[test]
    fn document_without_features_is_a_structural_error() {
        let err = decode(r#"{"metadata":{}}"#).unwrap_err();
        let DecodeError::Structural { detail } = err;
        assert!(detail.contains("features"), "detail was: {detail}");
    }

    #[test]
    fn non_array_features_is_a_structural_error() {
        assert!(matches!(
            decode(r#"{"features":null}"#),
            Err(DecodeError::Structural { .. })
        ));
        assert!(matches!(
            decode(r#"{"features":{"a":1}}"#),
            Err(DecodeError::Structural { .. })
        ));
    }

    #[test]
    fn element_without_properties_fails_the_whole_decode() {
        let body = r#"{"features":[
            {"properties":{"mag":1.0}},
            {"geometry":{"coordinates":[0,0,0]}}
        ]}"#;
        assert!(matches!(
            decode(body),
            Err(DecodeError::Structural { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_ignored_at_every_level() {
        let body = r#"{
            "bbox": [1, 2, 3],
            "features": [{
                "id": "nc123",
                "properties": {"mag": 2.5, "time": 5, "tsunami": 0, "sig": 96},
                "geometry": {"type": "Point", "coordinates": [0, 0, 1.5]}
            }]
        }"#;
        let records = decode(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].magnitude, 2.5);
    }

    #[test]
    fn decode_is_idempotent() {
        let body = r#"{"features":[
            {"properties":{"mag":5.5,"place":"A","time":1}},
            {"properties":{"place":"B"}}
        ]}"#;
        let first = decode(body).unwrap();
        let second = decode(body).unwrap();
        assert_eq!(first, second);
    }
}
