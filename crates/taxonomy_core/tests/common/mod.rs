#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use taxonomy_core::{Subject, SubjectItems, Taxonomy, Work};

pub fn work(title: &str, minutes: i64) -> Work {
    Work::simple(title, minutes).unwrap()
}

pub fn works_subject(name: &str, works: &[(&str, i64)]) -> Subject {
    Subject::create(
        name,
        SubjectItems::works(works.iter().map(|(title, minutes)| work(title, *minutes))),
    )
    .unwrap()
}

pub fn parent_subject(name: &str, children: Vec<Subject>) -> Subject {
    Subject::create(name, SubjectItems::subjects(children)).unwrap()
}

/// Raw document mirroring `sample_taxonomy()`.
pub fn sample_raw() -> Value {
    json!({
        "name": "Test taxonomy",
        "rootSubjects": {
            "Programming": {
                "Rust": [
                    { "title": "Book", "minutes": "300" },
                    { "title": "Course", "minutes": 120 }
                ],
                "Scala": [{ "title": "Course", "minutes": 200 }]
            },
            "Mathematics": {
                "Algebra": {
                    "Linear algebra": [
                        { "title": "Lectures", "minutes": 89.5 },
                        { "title": "Exercises", "minutes": 30 }
                    ]
                }
            }
        }
    })
}

/// Programming (620 minutes, two subjects) followed by a chain of
/// single-subject wrappers down to "Linear algebra" (120 minutes).
pub fn sample_taxonomy() -> Arc<Taxonomy> {
    let programming = parent_subject(
        "Programming",
        vec![
            works_subject("Rust", &[("Book", 300), ("Course", 120)]),
            works_subject("Scala", &[("Course", 200)]),
        ],
    );
    let mathematics = parent_subject(
        "Mathematics",
        vec![parent_subject(
            "Algebra",
            vec![works_subject(
                "Linear algebra",
                &[("Lectures", 90), ("Exercises", 30)],
            )],
        )],
    );

    Arc::new(Taxonomy::create("Test taxonomy", [programming, mathematics]).unwrap())
}

pub fn child(subjects: &[Arc<Subject>], name: &str) -> Arc<Subject> {
    subjects
        .iter()
        .find(|subject| taxonomy_core::TaxonomyLevel::name(subject.as_ref()) == name)
        .cloned()
        .unwrap()
}
