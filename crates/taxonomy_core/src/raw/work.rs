//! Raw work records and their loose value coercion.
//!
//! # Invariants
//! - `null` and absent fields are equivalent.
//! - `minutes` is coerced the way JavaScript `Number()` coerces JSON values:
//!   booleans become 1/0, blank strings 0, arrays go through their
//!   comma-joined string form (`[]` is 0, `[5]` is 5) and objects are not
//!   numbers. Only decimal notation is accepted in strings.
//! - Rounding goes to the nearest integer, halves towards positive infinity;
//!   the result must fit an `i64`.
//! - Unknown fields (such as the legacy `portal`) are ignored.

use crate::model::date::CalendarDate;
use crate::model::work::{parse_url, Work, WorkExtras};
use crate::raw::{IngestError, IngestResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Work record as found in raw input; every field is loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWork {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<Value>,
}

impl RawWork {
    /// Converts this record into a validated work.
    ///
    /// # Errors
    /// - `IngestError::MissingTitle` / `IngestError::MissingMinutes` when the
    ///   field is absent.
    /// - `IngestError::NotANumber` when `minutes` is not numeric.
    /// - `IngestError::MinutesOutOfRange` when rounded `minutes` overflows `i64`.
    /// - `IngestError::Model` for invalid title, duration, date or URL.
    pub fn reify(&self) -> IngestResult<Work> {
        let title = present(&self.title).map(loose_string).ok_or_else(|| {
            IngestError::MissingTitle(serde_json::to_string(self).unwrap_or_default())
        })?;

        let minutes_value =
            present(&self.minutes).ok_or_else(|| IngestError::MissingMinutes(title.clone()))?;
        let rounded = loose_number(minutes_value)
            .map(round_half_up)
            .filter(|value| value.is_finite())
            .ok_or_else(|| IngestError::NotANumber(title.clone()))?;
        let minutes = to_i64(rounded).ok_or_else(|| IngestError::MinutesOutOfRange {
            title: title.clone(),
            minutes: loose_string(minutes_value),
        })?;

        let completion_date = present(&self.completion_date)
            .map(|value| CalendarDate::parse(&loose_string(value)))
            .transpose()?;
        let url = present(&self.url)
            .map(|value| parse_url(&loose_string(value)))
            .transpose()?;
        let certificate_url = present(&self.certificate_url)
            .map(|value| parse_url(&loose_string(value)))
            .transpose()?;

        let work = Work::create(
            title,
            minutes,
            WorkExtras {
                kind: present(&self.kind).map(loose_string),
                completion_date,
                url,
                certificate_url,
            },
        )?;
        Ok(work)
    }
}

fn present(field: &Option<Value>) -> Option<&Value> {
    field.as_ref().filter(|value| !value.is_null())
}

/// String conversion applied to every loosely-typed text field.
///
/// Arrays join their elements with `,`, rendering `null` elements as empty.
pub(crate) fn loose_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(loose_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}

/// Numeric conversion applied to `minutes`.
pub(crate) fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric(text),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) => parse_numeric(&loose_string(value)),
        Value::Object(_) => None,
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Some(0.0)
    } else {
        trimmed.parse::<f64>().ok()
    }
}

/// Exact conversion of an integral float; `None` outside the `i64` range.
fn to_i64(value: f64) -> Option<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    (-BOUND..BOUND).contains(&value).then_some(value as i64)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::{loose_number, round_half_up, to_i64, RawWork};
    use crate::model::ModelError;
    use crate::raw::IngestError;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawWork {
        serde_json::from_value(value).expect("raw work shape")
    }

    #[test]
    fn reifies_numeric_string_minutes() {
        let work = raw(json!({ "title": "Basic work", "minutes": "90" }))
            .reify()
            .expect("valid work");
        assert_eq!(work.title(), "Basic work");
        assert_eq!(work.minutes(), 90);
        assert!(work.is_in_progress());
    }

    #[test]
    fn rounds_half_towards_positive_infinity() {
        assert_eq!(round_half_up(90.5), 91.0);
        assert_eq!(round_half_up(90.4), 90.0);
        assert_eq!(round_half_up(-2.5), -2.0);

        let work = raw(json!({ "title": "Half", "minutes": 90.5 }))
            .reify()
            .expect("valid work");
        assert_eq!(work.minutes(), 91);
    }

    #[test]
    fn missing_title_embeds_raw_record() {
        let err = raw(json!({ "minutes": 4 })).reify().unwrap_err();
        assert_eq!(err, IngestError::MissingTitle(r#"{"minutes":4}"#.to_string()));

        let err = raw(json!({ "title": null, "minutes": 4 })).reify().unwrap_err();
        assert!(matches!(err, IngestError::MissingTitle(_)));
    }

    #[test]
    fn missing_minutes_is_reported() {
        let err = raw(json!({ "title": "Alpha" })).reify().unwrap_err();
        assert_eq!(err, IngestError::MissingMinutes("Alpha".to_string()));
        assert_eq!(err.to_string(), "missing 'minutes' field in work 'Alpha'");
    }

    #[test]
    fn non_numeric_minutes_are_rejected() {
        let err = raw(json!({ "title": "Alpha", "minutes": "lots" }))
            .reify()
            .unwrap_err();
        assert_eq!(err, IngestError::NotANumber("Alpha".to_string()));
        assert_eq!(loose_number(&json!(" 12 ")), Some(12.0));
    }

    #[test]
    fn arrays_coerce_through_their_string_form() {
        assert_eq!(loose_number(&json!([])), Some(0.0));
        assert_eq!(loose_number(&json!([5])), Some(5.0));
        assert_eq!(loose_number(&json!(["7"])), Some(7.0));
        assert_eq!(loose_number(&json!([[8]])), Some(8.0));
        assert_eq!(loose_number(&json!([1, 2])), None);
        assert_eq!(loose_number(&json!({ "minutes": 1 })), None);

        let work = raw(json!({ "title": "Wrapped", "minutes": [45] }))
            .reify()
            .expect("valid work");
        assert_eq!(work.minutes(), 45);
    }

    #[test]
    fn minutes_beyond_i64_are_out_of_range() {
        assert_eq!(to_i64(9.0e18), Some(9_000_000_000_000_000_000));
        assert_eq!(to_i64(9_223_372_036_854_775_808.0), None);
        assert_eq!(to_i64(-1.0e19), None);

        let err = raw(json!({ "title": "Endless", "minutes": 1e19 }))
            .reify()
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::MinutesOutOfRange { ref title, .. } if title == "Endless"
        ));

        let err = raw(json!({ "title": "Debt", "minutes": "-1e30" }))
            .reify()
            .unwrap_err();
        assert!(matches!(err, IngestError::MinutesOutOfRange { .. }));
    }

    #[test]
    fn non_positive_minutes_fail_in_model() {
        let err = raw(json!({ "title": "Alpha", "minutes": 0.2 }))
            .reify()
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::Model(ModelError::InvalidDuration {
                title: "Alpha".to_string(),
                minutes: 0,
            })
        );
    }

    #[test]
    fn numeric_title_is_stringified() {
        let work = raw(json!({ "title": 1984, "minutes": 300 }))
            .reify()
            .expect("valid work");
        assert_eq!(work.title(), "1984");
    }

    #[test]
    fn optional_fields_are_parsed() {
        let work = raw(json!({
            "title": "Course",
            "minutes": 120,
            "kind": "MOOC",
            "completionDate": "2021-04-26",
            "url": "https://example.com/course",
            "certificateUrl": "https://example.com/cert",
            "portal": "legacy value"
        }))
        .reify()
        .expect("valid work");

        assert_eq!(work.kind(), Some("MOOC"));
        assert_eq!(
            work.completion_date().map(|date| date.to_string()),
            Some("2021-4-26".to_string())
        );
        assert_eq!(
            work.certificate_url().map(|url| url.as_str()),
            Some("https://example.com/cert")
        );
    }

    #[test]
    fn invalid_date_and_url_propagate() {
        let err = raw(json!({ "title": "A", "minutes": 1, "completionDate": "1995-02-31" }))
            .reify()
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::Model(ModelError::InvalidDate("1995-02-31".to_string()))
        );

        let err = raw(json!({ "title": "A", "minutes": 1, "url": "nowhere" }))
            .reify()
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Model(ModelError::InvalidUrl { ref url, .. }) if url == "nowhere"
        ));
    }
}
