use crate::model::date::CalendarDate;
use crate::model::work::{parse_url, Work, WorkExtras};
use crate::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkJson {
    pub title: String,
    pub minutes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

impl From<&Work> for WorkJson {
    fn from(work: &Work) -> Self {
        Self {
            title: work.title().to_string(),
            minutes: work.minutes(),
            kind: work.kind().map(str::to_string),
            completion_date: work.completion_date().map(|date| date.to_string()),
            url: work.url().map(|url| url.to_string()),
            certificate_url: work.certificate_url().map(|url| url.to_string()),
        }
    }
}

impl TryFrom<&WorkJson> for Work {
    type Error = ModelError;

    fn try_from(json: &WorkJson) -> ModelResult<Self> {
        let minutes = i64::try_from(json.minutes).map_err(|_| ModelError::InvalidDuration {
            title: json.title.clone(),
            minutes: i64::MAX,
        })?;

        Work::create(
            json.title.as_str(),
            minutes,
            WorkExtras {
                kind: json.kind.clone(),
                completion_date: json
                    .completion_date
                    .as_deref()
                    .map(CalendarDate::parse)
                    .transpose()?,
                url: json.url.as_deref().map(parse_url).transpose()?,
                certificate_url: json.certificate_url.as_deref().map(parse_url).transpose()?,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::WorkJson;
    use crate::model::date::CalendarDate;
    use crate::model::work::{parse_url, Work, WorkExtras};
    use crate::model::ModelError;
    use serde_json::json;

    #[test]
    fn optional_fields_are_omitted() {
        let work = Work::simple("Alpha", 90).expect("valid work");
        let value = serde_json::to_value(WorkJson::from(&work)).expect("serializable");
        assert_eq!(value, json!({ "title": "Alpha", "minutes": 90 }));
    }

    #[test]
    fn full_work_round_trips() {
        let work = Work::create(
            "Course",
            45,
            WorkExtras {
                kind: Some("Course".to_string()),
                completion_date: Some(CalendarDate::parse("2019-03-07").expect("valid date")),
                url: Some(parse_url("https://example.com/course").expect("valid url")),
                certificate_url: Some(parse_url("https://example.com/cert").expect("valid url")),
            },
        )
        .expect("valid work");

        let json = WorkJson::from(&work);
        assert_eq!(json.completion_date.as_deref(), Some("2019-3-7"));
        assert_eq!(Work::try_from(&json).expect("restorable"), work);
    }

    #[test]
    fn restore_validates_dates() {
        let json = WorkJson {
            title: "Alpha".to_string(),
            minutes: 1,
            kind: None,
            completion_date: Some("2021-2-30".to_string()),
            url: None,
            certificate_url: None,
        };
        assert_eq!(
            Work::try_from(&json).unwrap_err(),
            ModelError::InvalidDate("2021-2-30".to_string())
        );
    }
}
