//! Property-based tests using proptest
//!
//! These tests generate many random inputs to check properties of the
//! classifier and the counting rules that must hold for every document.

use proptest::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

use landmark_census::application::pipeline::{LandmarkTally, PipelineConfig};
use landmark_census::application::ports::Classifier;
use landmark_census::application::use_cases::{CensusRunner, CensusSettings};
use landmark_census::domain::value_objects::{LandmarkCategory, LandmarkSet};
use landmark_census::infrastructure::classification::RoleAttributeClassifier;

use test_fixtures::{assertions, records, InMemoryArchiveStore};

/// Strategy for role attribute values, biased towards real landmark names
fn role_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(LandmarkCategory::ALL.to_vec())
            .prop_map(|c| c.as_str().to_string()),
        1 => "[a-zA-Z-]{0,12}",
    ]
}

/// Strategy for HTML-ish documents made of filler and role attributes
fn document_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        prop::collection::vec(role_value_strategy(), 0..6),
        "[a-z <>/=]{0,40}",
    )
        .prop_map(|(roles, filler)| {
            let filler = filler.replace('"', "");
            let mut html = String::from("<html>");
            for role in &roles {
                html.push_str(&filler);
                html.push_str(&format!(r#"<div role="{}">"#, role));
            }
            html.push_str("</html>");
            (html, roles)
        })
}

proptest! {
    #[test]
    fn test_classification_is_idempotent(content in prop::collection::vec(any::<u8>(), 0..512)) {
        let classifier = RoleAttributeClassifier::new();
        prop_assert_eq!(classifier.classify(&content), classifier.classify(&content));
    }

    #[test]
    fn test_main_role_is_always_found(prefix in "[^\"]{0,64}", suffix in "\\PC{0,64}") {
        let html = format!(r#"{}<div role="main">{}"#, prefix, suffix);
        let set = RoleAttributeClassifier::new().classify(html.as_bytes());
        prop_assert!(set.contains(LandmarkCategory::Main));
        prop_assert!(set.has_landmark());
    }

    #[test]
    fn test_documents_without_role_attributes_are_empty(content in "[^=]{0,256}") {
        let set = RoleAttributeClassifier::new().classify(content.as_bytes());
        prop_assert!(set.is_empty());
    }

    #[test]
    fn test_classification_matches_declared_roles((html, roles) in document_strategy()) {
        let set = RoleAttributeClassifier::new().classify(html.as_bytes());
        let expected: LandmarkSet = roles
            .iter()
            .map(|role| LandmarkCategory::from_role(role.as_bytes()))
            .collect();
        prop_assert_eq!(set, expected);
    }

    #[test]
    fn test_documents_with_landmarks_moves_by_at_most_one((html, _roles) in document_strategy()) {
        let tally = LandmarkTally::new();
        let set = RoleAttributeClassifier::new().classify(html.as_bytes());
        let selected = tally.record(&set);

        let snapshot = tally.snapshot();
        prop_assert_eq!(snapshot.documents_with_landmarks(), u64::from(selected));
        prop_assert_eq!(selected, set.has_landmark());
        let total: u64 = snapshot.iter().map(|(_, count)| count).sum();
        prop_assert_eq!(total, set.len() as u64);
    }
}

/// Single-threaded census: classify every eligible record in order
fn sequential_census(
    input: &[landmark_census::domain::entities::WarcRecord],
) -> (u64, LandmarkTally, Vec<landmark_census::domain::entities::WarcRecord>) {
    let classifier = RoleAttributeClassifier::new();
    let tally = LandmarkTally::new();
    let mut documents = 0;
    let mut selected = Vec::new();
    for record in input.iter().filter(|r| r.is_html_response()) {
        documents += 1;
        if tally.record(&classifier.classify(record.content())) {
            selected.push(record.clone());
        }
    }
    (documents, tally, selected)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_run_matches_sequential_census() {
    let roles = [
        "banner",
        "navigation",
        "main",
        "complementary",
        "contentinfo",
        "search",
        "form",
        "application",
        "presentation",
    ];
    let input: Vec<_> = (0..10_000usize)
        .map(|i| {
            let id = i.to_string();
            match i % 7 {
                0 => records::plain_text(&id, r#"<div role="main">"#),
                1 => records::html(&id, "<p>no landmarks</p>"),
                _ => {
                    let first = roles[i % roles.len()];
                    let second = roles[(i / 3) % roles.len()];
                    let body = format!(r#"<div role="{}"><span role="{}">{}</span></div>"#, first, second, i);
                    records::html(&id, &body)
                }
            }
        })
        .collect();

    let store = InMemoryArchiveStore::new();
    store.add_input("data/big.warc.gz", input.clone());
    let settings = CensusSettings {
        input_dir: PathBuf::from("data"),
        output_dir: PathBuf::from("output"),
        pipeline: PipelineConfig::new(150, 64),
    };
    let runner = CensusRunner::new(
        settings,
        Arc::new(store.clone()),
        Arc::new(RoleAttributeClassifier::new()),
    );

    let report = runner.run().await.expect("Census failed");
    let (documents, sequential, selected) = sequential_census(&input);

    assert_eq!(report.documents, documents);
    assert_eq!(report.landmarks, sequential.snapshot());
    assert_eq!(report.documents_with_landmarks, selected.len() as u64);
    assertions::assert_same_records(&store.output(&PathBuf::from("output/big.warc")), &selected);
}
