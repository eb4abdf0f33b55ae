//! Export to files through the output sink

use chrono::Utc;
use secret_export_core::testing::{FakeCollection, FakeItem, FakeSecretService};
use secret_export_core::{ExportFormat, ExportResult, export_collection, open_output};
use tempfile::TempDir;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

/// Mirrors the CLI: export first, open the sink only on success
fn export_to(
    service: &FakeSecretService,
    name: &str,
    format: ExportFormat,
    path: &std::path::Path,
) -> ExportResult<()> {
    let outcome = block_on(export_collection(service, name, Utc::now()))?;
    let mut sink = open_output(Some(path))?;
    format.exporter().render(&outcome.document, sink.as_mut())
}

#[test]
fn test_export_overwrites_existing_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("login.csv");
    std::fs::write(&path, "old,contents\nthat,should,vanish\nentirely\n").expect("seed");

    let service = FakeSecretService::new().with_collection(
        FakeCollection::new("Login").with_item(FakeItem::new("mail", "s3cret").with_times(0, 0)),
    );
    export_to(&service, "Login", ExportFormat::Csv, &path).expect("export");

    assert_eq!(
        std::fs::read_to_string(&path).expect("read"),
        "name,password,created,modified\nmail,s3cret,,\n"
    );
}

#[test]
fn test_failed_export_leaves_no_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("login.json");

    let service = FakeSecretService::new().with_collection(
        FakeCollection::new("Login")
            .with_item(FakeItem::new("mail", "s3cret"))
            .with_item(FakeItem::new("bank", "1234").failing_unlock()),
    );
    assert!(export_to(&service, "Login", ExportFormat::Paw, &path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_paw_file_is_valid_json() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("login.json");

    let service = FakeSecretService::new().with_collection(
        FakeCollection::new("Login")
            .with_item(FakeItem::new("mail", "s3cret"))
            .with_item(FakeItem::new("quote \"me\"", "a,b\nc")),
    );
    export_to(&service, "Login", ExportFormat::Paw, &path).expect("export");

    let text = std::fs::read_to_string(&path).expect("read");
    let json: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(json["login"][1]["metadata"]["name"], "quote \"me\"");
    assert_eq!(json["login"][1]["password"]["value"], "a,b\nc");
}
