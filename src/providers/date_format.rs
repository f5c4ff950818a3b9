use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::ParseError;
use chrono::TimeZone;
use chrono::Utc;

/// Timestamp wire format, `yyyy-MM-dd'T'HH:mm:ss.SSSZ` in the generated client's notation:
/// millisecond precision and a numeric offset without a colon (`+0100`).
/// Anything below a millisecond is truncated when formatting.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

pub fn format_timestamp(value: &DateTime<FixedOffset>) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Parses the wire format, then falls back to RFC 3339 (`Z` or `+00:00` offsets)
/// and to a bare `yyyy-MM-dd` date, read as midnight UTC.
/// The error reported is the one from the wire format.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    match DateTime::parse_from_str(value, DATE_FORMAT) {
        Ok(timestamp) => Ok(timestamp),
        Err(err) => {
            if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
                return Ok(timestamp);
            }

            match NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
            {
                Some(midnight) => Ok(Utc.from_utc_datetime(&midnight).into()),
                None => Err(err),
            }
        }
    }
}

/// Serde adapter for optional timestamp fields, use with `#[serde(default, with = "...")]`.
pub mod optional_timestamp {
    use super::format_timestamp;
    use super::parse_timestamp;
    use chrono::DateTime;
    use chrono::FixedOffset;
    use serde::de::Error;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timestamp) => serializer.serialize_str(&format_timestamp(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_timestamp(&raw).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
