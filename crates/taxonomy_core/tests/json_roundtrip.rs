mod common;

use common::sample_taxonomy;
use taxonomy_core::{
    CalendarDate, ModelError, Subject, SubjectItems, Taxonomy, TaxonomyJson, Work, WorkExtras,
    WorkJson,
};

#[test]
fn taxonomy_survives_text_round_trip() {
    let taxonomy = sample_taxonomy();
    let text = serde_json::to_string(&TaxonomyJson::from(taxonomy.as_ref())).unwrap();

    let parsed: TaxonomyJson = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.try_into_model().unwrap(), *taxonomy);
}

#[test]
fn completed_works_keep_dates_and_urls() {
    let work = Work::create(
        "Certified course",
        240,
        WorkExtras {
            kind: Some("Course".to_string()),
            completion_date: Some(CalendarDate::from_ymd(2022, 11, 3).unwrap()),
            url: Some(taxonomy_core::model::work::parse_url("https://example.com/c").unwrap()),
            certificate_url: None,
        },
    )
    .unwrap();
    let taxonomy = Taxonomy::create(
        "T",
        [Subject::create("S", SubjectItems::works([work])).unwrap()],
    )
    .unwrap();

    let value = serde_json::to_value(TaxonomyJson::from(&taxonomy)).unwrap();
    assert_eq!(value["items"][0]["hasSubjects"], false);
    assert_eq!(value["items"][0]["items"][0]["completionDate"], "2022-11-3");
    assert_eq!(value["items"][0]["items"][0]["url"], "https://example.com/c");
    assert!(value["items"][0]["items"][0].get("certificateUrl").is_none());

    let restored: TaxonomyJson = serde_json::from_value(value).unwrap();
    assert_eq!(Taxonomy::try_from(&restored).unwrap(), taxonomy);
}

#[test]
fn restore_rejects_invalid_urls() {
    let json = WorkJson {
        title: "Alpha".to_string(),
        minutes: 3,
        kind: None,
        completion_date: None,
        url: Some("not a url".to_string()),
        certificate_url: None,
    };
    assert!(matches!(
        Work::try_from(&json).unwrap_err(),
        ModelError::InvalidUrl { .. }
    ));
}
