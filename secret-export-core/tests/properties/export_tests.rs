//! Property tests for the export pipeline and both output formats

use chrono::Utc;
use proptest::prelude::*;
use secret_export_core::testing::{FakeCollection, FakeItem, FakeSecretService};
use secret_export_core::{ExportFormat, ExportOutcome, export_collection};

fn item_strategy() -> impl Strategy<Value = (String, String)> {
    ("[ -~\n]{0,12}", prop_oneof![Just(String::new()), "[ -~\n]{1,16}"])
}

fn export(items: &[(String, String)]) -> ExportOutcome {
    let mut collection = FakeCollection::new("Generated");
    for (label, secret) in items {
        collection = collection.with_item(FakeItem::new(label, secret));
    }
    let service = FakeSecretService::new().with_collection(collection);

    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(export_collection(&service, "Generated", Utc::now()))
        .expect("export")
}

fn render(outcome: &ExportOutcome, format: ExportFormat) -> Vec<u8> {
    let mut out = Vec::new();
    format
        .exporter()
        .render(&outcome.document, &mut out)
        .expect("render");
    out
}

fn non_empty(items: &[(String, String)]) -> Vec<(String, String)> {
    items
        .iter()
        .filter(|(_, secret)| !secret.is_empty())
        .cloned()
        .collect()
}

fn csv_pairs(bytes: &[u8]) -> Vec<(String, String)> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["name", "password", "created", "modified"]
    );
    reader
        .records()
        .map(|r| {
            let r = r.expect("record");
            (r[0].to_string(), r[1].to_string())
        })
        .collect()
}

fn paw_pairs(bytes: &[u8]) -> Vec<(String, String)> {
    let json: serde_json::Value = serde_json::from_slice(bytes).expect("json");
    json["login"]
        .as_array()
        .expect("login array")
        .iter()
        .map(|login| {
            (
                login["metadata"]["name"].as_str().unwrap_or("").to_string(),
                login["password"]["value"].as_str().unwrap_or("").to_string(),
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: only items with a non-empty secret become records
    #[test]
    fn record_count_excludes_empty_secrets(items in prop::collection::vec(item_strategy(), 0..8)) {
        let outcome = export(&items);
        let expected = non_empty(&items);

        prop_assert_eq!(outcome.document.len(), expected.len());
        prop_assert_eq!(outcome.summary.exported_count, expected.len());
        prop_assert_eq!(outcome.summary.total(), items.len());
        for record in &outcome.document.records {
            prop_assert!(!record.expose_secret().is_empty());
        }
    }

    /// Property: CSV output has one header row plus one row per record
    #[test]
    fn csv_has_header_plus_one_row_per_record(items in prop::collection::vec(item_strategy(), 0..8)) {
        let outcome = export(&items);
        let pairs = csv_pairs(&render(&outcome, ExportFormat::Csv));
        prop_assert_eq!(pairs, non_empty(&items));
    }

    /// Property: Paw and CSV carry the same names and secrets in the same order
    #[test]
    fn paw_and_csv_agree(items in prop::collection::vec(item_strategy(), 0..8)) {
        let outcome = export(&items);
        let paw = paw_pairs(&render(&outcome, ExportFormat::Paw));
        let csv = csv_pairs(&render(&outcome, ExportFormat::Csv));
        prop_assert_eq!(paw, csv);
    }

    /// Property: every login is tagged as a Paw login item
    #[test]
    fn paw_logins_have_login_type(items in prop::collection::vec(item_strategy(), 0..8)) {
        let outcome = export(&items);
        let json: serde_json::Value =
            serde_json::from_slice(&render(&outcome, ExportFormat::Paw)).expect("json");
        for login in json["login"].as_array().expect("login array") {
            prop_assert_eq!(login["metadata"]["type"].as_u64(), Some(8));
        }
    }

    /// Property: rendering is deterministic for a given document
    #[test]
    fn rendering_is_deterministic(items in prop::collection::vec(item_strategy(), 0..6)) {
        let outcome = export(&items);
        for format in ExportFormat::all() {
            prop_assert_eq!(render(&outcome, *format), render(&outcome, *format));
        }
    }
}
