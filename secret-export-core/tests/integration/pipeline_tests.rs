//! End-to-end export pipeline tests

use chrono::{DateTime, TimeZone, Utc};
use secret_export_core::testing::{FakeCollection, FakeItem, FakeSecretService};
use secret_export_core::{
    ExportError, ExportFormat, ExportOutcome, ExportResult, export_collection, list_collections,
};
use serde_json::Value;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

fn run_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
}

fn personal() -> FakeSecretService {
    FakeSecretService::new()
        .with_collection(FakeCollection::new("Login"))
        .with_collection(
            FakeCollection::new("Personal")
                .with_item(FakeItem::new("github", "abc123").with_times(1_600_000_000, 1_600_000_600))
                .with_item(FakeItem::new("stale", "")),
        )
}

fn export(service: &FakeSecretService, name: &str) -> ExportResult<ExportOutcome> {
    block_on(export_collection(service, name, run_time()))
}

fn render(outcome: &ExportOutcome, format: ExportFormat) -> String {
    let mut out = Vec::new();
    format
        .exporter()
        .render(&outcome.document, &mut out)
        .expect("render");
    String::from_utf8(out).expect("utf8 output")
}

#[test]
fn test_personal_collection_as_paw() {
    let outcome = export(&personal(), "Personal").expect("export");
    assert_eq!(outcome.summary.exported_count, 1);
    assert_eq!(outcome.summary.skipped, vec!["stale".to_string()]);

    let json: Value = serde_json::from_str(&render(&outcome, ExportFormat::Paw)).expect("json");
    let logins = json["login"].as_array().expect("login array");
    assert_eq!(logins.len(), 1);

    let login = &logins[0];
    assert_eq!(login["metadata"]["name"], "github");
    assert_eq!(login["metadata"]["type"], 8);
    assert_eq!(login["metadata"]["created"], "2020-09-13T12:26:40Z");
    assert_eq!(login["metadata"]["modified"], "2020-09-13T12:36:40Z");
    assert_eq!(login["password"]["value"], "abc123");
    assert_eq!(
        login["note"]["value"],
        "exported from the Secret Service collection \"Personal\"\n(Tue, 05 Mar 2024 14:07:09 GMT)"
    );
}

#[test]
fn test_personal_collection_as_csv() {
    let outcome = export(&personal(), "Personal").expect("export");
    assert_eq!(
        render(&outcome, ExportFormat::Csv),
        "name,password,created,modified\ngithub,abc123,2020-09-13T12:26:40Z,2020-09-13T12:36:40Z\n"
    );
}

#[test]
fn test_empty_collection_renders_empty_documents() {
    let outcome = export(&personal(), "Login").expect("export");
    assert!(outcome.document.is_empty());
    assert_eq!(render(&outcome, ExportFormat::Paw), "{\"login\":[]}\n");
    assert_eq!(
        render(&outcome, ExportFormat::Csv),
        "name,password,created,modified\n"
    );
}

#[test]
fn test_records_keep_item_order() {
    let mut collection = FakeCollection::new("Work");
    for name in ["zeta", "alpha", "mike"] {
        collection = collection.with_item(FakeItem::new(name, "pw"));
    }
    let service = FakeSecretService::new().with_collection(collection);

    let outcome = export(&service, "Work").expect("export");
    let names: Vec<_> = outcome.document.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha", "mike"]);
}

#[test]
fn test_unknown_timestamps_are_omitted() {
    let service = FakeSecretService::new().with_collection(
        FakeCollection::new("Personal").with_item(FakeItem::new("github", "abc123").with_times(0, 0)),
    );
    let outcome = export(&service, "Personal").expect("export");

    let json: Value = serde_json::from_str(&render(&outcome, ExportFormat::Paw)).expect("json");
    let metadata = json["login"][0]["metadata"].as_object().expect("metadata");
    assert!(!metadata.contains_key("created"));
    assert!(!metadata.contains_key("modified"));

    assert_eq!(
        render(&outcome, ExportFormat::Csv),
        "name,password,created,modified\ngithub,abc123,,\n"
    );
}

#[test]
fn test_non_utf8_secret_is_exported_lossily() {
    let service = FakeSecretService::new().with_collection(
        FakeCollection::new("Personal").with_item(FakeItem::with_secret_bytes("blob", &[0x70, 0xff])),
    );
    let outcome = export(&service, "Personal").expect("export");
    assert_eq!(outcome.document.records[0].expose_secret(), "p\u{fffd}");
}

#[test]
fn test_missing_collection_is_not_found() {
    let err = export(&personal(), "Work").unwrap_err();
    assert!(matches!(err, ExportError::CollectionNotFound(ref name) if name == "Work"));
    assert!(err.is_service_failure());
}

#[test]
fn test_session_failure_aborts_export() {
    let service = FakeSecretService::new()
        .with_collection(FakeCollection::new("Personal").with_item(FakeItem::new("a", "b")))
        .failing_session();
    let err = export(&service, "Personal").unwrap_err();
    assert!(matches!(err, ExportError::Session(_)));
}

#[test]
fn test_secret_failure_names_the_item() {
    let service = FakeSecretService::new().with_collection(
        FakeCollection::new("Personal")
            .with_item(FakeItem::new("good", "one"))
            .with_item(FakeItem::new("bad", "two").failing_secret()),
    );
    let err = export(&service, "Personal").unwrap_err();
    match err {
        ExportError::SecretRetrieval { item, .. } => assert!(item.ends_with("/personal/2")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_list_mode_with_no_collections() {
    let labels = block_on(list_collections(&FakeSecretService::new())).expect("listing");
    assert!(labels.is_empty());
}

#[test]
fn test_list_mode_reports_labels() {
    let labels = block_on(list_collections(&personal())).expect("listing");
    assert_eq!(labels, ["Login", "Personal"]);
}
