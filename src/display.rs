//! Display-field derivation for seismic event records
//!
//! Pure presentation support: turns a [`Record`] into the strings and the
//! color bucket a list row renders. Nothing in the load pipeline depends on
//! this module, and nothing here performs I/O.

use chrono::{TimeZone, Utc};

use crate::types::Record;

/// Color bucket for the magnitude badge, keyed by the magnitude's integer
/// part
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagnitudeBucket {
    /// Magnitude below 2
    M1,
    /// Magnitude 2 to 3
    M2,
    /// Magnitude 3 to 4
    M3,
    /// Magnitude 4 to 5
    M4,
    /// Magnitude 5 to 6
    M5,
    /// Magnitude 6 to 7
    M6,
    /// Magnitude 7 to 8
    M7,
    /// Magnitude 8 to 9
    M8,
    /// Magnitude 9 to 10
    M9,
    /// Magnitude 10 and above
    M10Plus,
}

/// Fields a list row renders for one event
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayFields {
    /// Magnitude formatted to one decimal place
    pub magnitude: String,
    /// Proximity prefix including the separator ("10km SW of "); `None`
    /// when the place has no separator
    pub proximity: Option<String>,
    /// Locality remainder ("Reno, NV"), or the whole place when there is no
    /// separator
    pub locality: String,
    /// Color bucket for the magnitude badge
    pub bucket: MagnitudeBucket,
    /// Event date, e.g. "Jan 5, 24" (UTC)
    pub date: String,
    /// Event clock time, e.g. "3:04 PM" (UTC)
    pub time: String,
}

/// Derive the display fields for one record
pub fn display_fields(record: &Record) -> DisplayFields {
    let (proximity, locality) = split_place(&record.place);
    let (date, time) = format_event_time(record.time_ms);

    DisplayFields {
        magnitude: format_magnitude(record.magnitude),
        proximity: proximity.map(str::to_string),
        locality: locality.to_string(),
        bucket: magnitude_bucket(record.magnitude),
        date,
        time,
    }
}

/// Format a magnitude to one decimal place
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.1}")
}

/// Split a place description into a proximity prefix and a locality
///
/// The feed phrases locations as "10km SW of Reno, NV"; the prefix through
/// the `" of "` separator becomes the proximity line and the remainder the
/// locality line. A place without the separator has no proximity.
pub fn split_place(place: &str) -> (Option<&str>, &str) {
    match place.find(" of ") {
        Some(idx) => {
            let split = idx + " of ".len();
            (Some(&place[..split]), &place[split..])
        }
        None => (None, place),
    }
}

/// Map a magnitude to its color bucket
///
/// Buckets follow the integer part of the magnitude; everything below 2
/// (including negative magnitudes, which the network does report for
/// micro-events) shares the weakest bucket, and 10 and above share the
/// strongest.
pub fn magnitude_bucket(magnitude: f64) -> MagnitudeBucket {
    match magnitude.floor() as i64 {
        i64::MIN..=1 => MagnitudeBucket::M1,
        2 => MagnitudeBucket::M2,
        3 => MagnitudeBucket::M3,
        4 => MagnitudeBucket::M4,
        5 => MagnitudeBucket::M5,
        6 => MagnitudeBucket::M6,
        7 => MagnitudeBucket::M7,
        8 => MagnitudeBucket::M8,
        9 => MagnitudeBucket::M9,
        _ => MagnitudeBucket::M10Plus,
    }
}

/// Format an epoch-milliseconds event time as a date line and a clock line
///
/// Returns empty strings for a timestamp outside chrono's representable
/// range.
pub fn format_event_time(time_ms: i64) -> (String, String) {
    match Utc.timestamp_millis_opt(time_ms).single() {
        Some(dt) => (
            dt.format("%b %-d, %y").to_string(),
            dt.format("%-I:%M %p").to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
