//! Lenient date/time decoding for provider payloads
//!
//! The provider is not consistent about how it encodes dates, so every
//! accepted shape is tried and anything unrecognised decodes to `None`
//! instead of rejecting the whole record.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a timestamp from a JSON value (RFC 3339, naive ISO, or unix seconds).
#[must_use]
pub fn parse_datetime(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt);
            }
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc().fixed_offset())
        }
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|dt| dt.fixed_offset()),
        _ => None,
    }
}

/// Parse a calendar date from a JSON value.
#[must_use]
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    if let Value::String(s) = value {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            return Some(date);
        }
    }
    parse_datetime(value).map(|dt| dt.date_naive())
}

pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_date))
}

pub(crate) fn lenient_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_datetime))
}

/// Numbers sometimes arrive as strings; those that don't parse are dropped.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("2024-05-06"))]
    #[case(json!("2024-05-06T09:30:00+08:00"))]
    #[case(json!("2024-05-06T09:30"))]
    #[case(json!(1_714_989_600))]
    fn test_parse_date_shapes(#[case] value: Value) {
        let date = parse_date(&value).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 5, 6));
    }

    #[rstest]
    #[case(json!("yesterday"))]
    #[case(json!(null))]
    #[case(json!(true))]
    fn test_parse_date_rejects_garbage(#[case] value: Value) {
        assert!(parse_date(&value).is_none());
    }

    #[test]
    fn test_parse_datetime_keeps_offset() {
        let dt = parse_datetime(&json!("2024-05-06T05:42:00+08:00")).unwrap();
        assert_eq!(dt.hour(), 5);
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
    }
}
