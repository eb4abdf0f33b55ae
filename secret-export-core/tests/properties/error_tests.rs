//! Tests for error types

use std::path::PathBuf;

use secret_export_core::error::{ConfigError, ExportError, ServiceError};

#[test]
fn connection_error_has_reason() {
    let err = ExportError::Connection("org.freedesktop.DBus.Error.ServiceUnknown".to_string());
    let msg = err.to_string();
    assert!(msg.contains("Secret Service"));
    assert!(msg.contains("ServiceUnknown"));
}

#[test]
fn collection_not_found_names_collection() {
    let msg = ExportError::CollectionNotFound("Work".to_string()).to_string();
    assert!(msg.contains("Work"));
}

#[test]
fn item_errors_name_the_item() {
    let item = "/org/freedesktop/secrets/collection/login/7".to_string();
    let errors = [
        ExportError::Unlock {
            item: item.clone(),
            reason: ServiceError::PromptDismissed.to_string(),
        },
        ExportError::Metadata {
            item: item.clone(),
            field: "label",
            reason: "timeout".to_string(),
        },
        ExportError::SecretRetrieval {
            item: item.clone(),
            reason: "no such session".to_string(),
        },
    ];
    for err in errors {
        assert!(err.to_string().contains(&item), "{err}");
        assert!(!err.is_service_failure());
    }
}

#[test]
fn all_errors_are_single_line() {
    let errors = [
        ExportError::Connection("no bus".to_string()),
        ExportError::CollectionNotFound("Login".to_string()),
        ExportError::Session("plain refused".to_string()),
        ExportError::Serialization("broken pipe".to_string()),
        ExportError::OutputIo {
            path: PathBuf::from("/tmp/out.csv"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        },
    ];
    for err in errors {
        assert!(!err.to_string().contains('\n'), "{err}");
    }
}

#[test]
fn config_parse_error_has_path_and_reason() {
    let err = ConfigError::Parse {
        path: PathBuf::from("/home/u/.config/secret-service-export/config.toml"),
        reason: "unknown field `colour`".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("config.toml"));
    assert!(msg.contains("colour"));
}
