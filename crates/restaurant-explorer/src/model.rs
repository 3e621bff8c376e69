use std::fmt;

use serde::Deserialize;

/// Ordered restaurants as returned by the remote source, or a view derived from them.
pub type RecordCollection = Vec<Record>;

/// A single validated restaurant entry.
///
/// Records have no identifier; they are identified by position in the fetched collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Restaurant name, never empty once a record has passed validation.
    pub name: String,
    /// Food category, e.g. "Fast Food". `None` when the source omits it.
    pub category: Option<String>,
    /// Geographic point, required for map markers.
    pub location: Option<Location>,
}

#[cfg(test)]
impl Record {
    pub fn new(name: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            category: category.map(str::to_string),
            location: None,
        }
    }

    pub fn with_location(mut self, longitude: f64, latitude: f64) -> Self {
        self.location = Some(Location {
            longitude,
            latitude,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// Label of the group holding uncategorized records.
pub const UNDEFINED_CATEGORY: &str = "undefined";

/// Key of a category group. Records without a category and records whose category is
/// literally "undefined" share the `Undefined` group, so every label is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Named(String),
    Undefined,
}

impl CategoryKey {
    pub fn of(record: &Record) -> Self {
        match &record.category {
            Some(name) if name != UNDEFINED_CATEGORY => CategoryKey::Named(name.clone()),
            _ => CategoryKey::Undefined,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Named(name) => f.write_str(name),
            CategoryKey::Undefined => f.write_str(UNDEFINED_CATEGORY),
        }
    }
}

/// Wire shape of one element of the remote dataset. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub name: Option<String>,
    pub category: Option<String>,
    pub geocoded_column_1: Option<GeocodedColumn>,
}

/// GeoJSON-style point; `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodedColumn {
    pub coordinates: Option<Vec<f64>>,
}

/// Why a raw element was rejected at the fetch boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedRecord {
    #[error("record has no name")]
    MissingName,

    #[error("record has no location")]
    MissingLocation,

    #[error("expected [longitude, latitude], got {0} finite coordinates")]
    InvalidCoordinates(usize),
}

impl TryFrom<RawRecord> for Record {
    type Error = MalformedRecord;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .ok_or(MalformedRecord::MissingName)?;

        let coordinates = raw
            .geocoded_column_1
            .and_then(|g| g.coordinates)
            .ok_or(MalformedRecord::MissingLocation)?;
        let location = match coordinates.as_slice() {
            [longitude, latitude] if longitude.is_finite() && latitude.is_finite() => Location {
                longitude: *longitude,
                latitude: *latitude,
            },
            other => {
                let finite = other.iter().filter(|c| c.is_finite()).count();
                return Err(MalformedRecord::InvalidCoordinates(finite));
            }
        };

        Ok(Record {
            name,
            category: raw.category,
            location: Some(location),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn valid_record_keeps_category_and_location() {
        let record = Record::try_from(raw(
            r#"{"name":"Ledo Pizza","category":"Pizza","zip":"20740",
                "geocoded_column_1":{"type":"Point","coordinates":[-76.93,38.98]}}"#,
        ))
        .unwrap();
        assert_eq!(record.name, "Ledo Pizza");
        assert_eq!(record.category.as_deref(), Some("Pizza"));
        assert_eq!(
            record.location,
            Some(Location {
                longitude: -76.93,
                latitude: 38.98
            })
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Record::try_from(raw(
            r#"{"name":"","geocoded_column_1":{"coordinates":[-76.9,38.9]}}"#,
        ))
        .unwrap_err();
        assert_eq!(err, MalformedRecord::MissingName);
    }

    #[test]
    fn missing_location_is_rejected() {
        assert_eq!(
            Record::try_from(raw(r#"{"name":"Taqueria"}"#)).unwrap_err(),
            MalformedRecord::MissingLocation
        );
        assert_eq!(
            Record::try_from(raw(r#"{"name":"Taqueria","geocoded_column_1":{}}"#)).unwrap_err(),
            MalformedRecord::MissingLocation
        );
    }

    #[test]
    fn wrong_coordinate_arity_is_rejected() {
        let err = Record::try_from(raw(
            r#"{"name":"Taqueria","geocoded_column_1":{"coordinates":[-76.9]}}"#,
        ))
        .unwrap_err();
        assert_eq!(err, MalformedRecord::InvalidCoordinates(1));
    }

    #[test]
    fn literal_undefined_shares_the_sentinel_group() {
        let missing = Record::new("A", None);
        let literal = Record::new("B", Some("undefined"));
        assert_eq!(CategoryKey::of(&missing), CategoryKey::Undefined);
        assert_eq!(CategoryKey::of(&literal), CategoryKey::Undefined);
        assert_eq!(CategoryKey::of(&missing).to_string(), "undefined");
        assert_eq!(
            CategoryKey::of(&Record::new("C", Some("Undefined"))),
            CategoryKey::Named("Undefined".to_string())
        );
    }
}
