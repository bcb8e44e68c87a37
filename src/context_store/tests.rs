use super::{load, save, staging_path, ConfigDocument, ContextStoreError};
use serde_json::json;
use std::fs;
use std::path::Path;

fn sample_json() -> serde_json::Value {
    json!({
        "theme": {
            "active_context": "ctxB",
            "contexts": {
                "ctxA": {
                    "name": "ctxA",
                    "application_id": "app-1",
                    "domain": "prod-us",
                    "company_id": 11,
                    "theme_id": "t-1",
                    "env": "us-prod"
                },
                "ctxB": {
                    "name": "ctxB",
                    "application_id": "app-2",
                    "domain": "prod-eu",
                    "company_id": 12,
                    "theme_id": "t-2",
                    "env": "eu-prod",
                    "region_hint": "eu-west-1"
                }
            },
            "last_synced": "2024-06-01"
        },
        "partners": {
            "acme": { "token_ref": "vault:acme", "scopes": ["read", "write"] },
            "initech": null
        },
        "schema_version": 3
    })
}

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("context.json");
    fs::write(&path, serde_json::to_vec_pretty(&sample_json()).unwrap()).unwrap();
    path
}

#[test]
fn load_reads_contexts_and_active_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    let doc = load(&path).expect("load");
    assert_eq!(doc.theme.contexts.len(), 2);
    let (key, entry) = doc.active_context().expect("active context");
    assert_eq!(key, "ctxB");
    assert_eq!(entry.env, "eu-prod");
    assert_eq!(entry.company_id, 12);
}

#[test]
fn load_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ContextStoreError::Read { .. }));
}

#[test]
fn load_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.json");
    fs::write(&path, b"{\"theme\": {\"contexts\": [").unwrap();
    let err = load(&path).unwrap_err();
    assert!(matches!(err, ContextStoreError::Parse { .. }));
}

#[test]
fn load_rejects_non_integer_company_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.json");
    let doc = json!({"theme": {"contexts": {"a": {"domain": "d", "company_id": "twelve"}}}});
    fs::write(&path, doc.to_string()).unwrap();
    assert!(matches!(
        load(&path).unwrap_err(),
        ContextStoreError::Parse { .. }
    ));
}

#[test]
fn stale_active_context_reads_as_none() {
    let mut value = sample_json();
    value["theme"]["active_context"] = json!("gone");
    let doc: ConfigDocument = serde_json::from_value(value).unwrap();
    assert!(doc.active_context().is_none());
}

#[test]
fn set_active_context_refuses_unknown_key() {
    let mut doc: ConfigDocument = serde_json::from_value(sample_json()).unwrap();
    assert!(!doc.set_active_context("nope"));
    assert_eq!(doc.theme.active_context, "ctxB");
    assert!(doc.set_active_context("ctxA"));
    assert_eq!(doc.theme.active_context, "ctxA");
}

#[test]
fn save_preserves_passthrough_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    let mut doc = load(&path).unwrap();
    assert!(doc.set_active_context("ctxA"));
    save(&path, &doc).expect("save");

    let reloaded: serde_json::Value =
        serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    let mut expected = sample_json();
    expected["theme"]["active_context"] = json!("ctxA");
    assert_eq!(reloaded, expected);
}

#[test]
fn save_without_partners_does_not_invent_them() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.json");
    fs::write(&path, r#"{"theme":{"active_context":"","contexts":{}}}"#).unwrap();

    let doc = load(&path).unwrap();
    save(&path, &doc).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("partners"));
    assert!(text.ends_with('\n'));
}

#[test]
fn save_leaves_no_staging_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let doc = load(&path).unwrap();
    save(&path, &doc).unwrap();
    assert!(!staging_path(&path).exists());
}

#[test]
fn failed_save_keeps_original_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let before = fs::read(&path).unwrap();

    // A directory squatting on the staging path makes the write fail.
    fs::create_dir(staging_path(&path)).unwrap();
    let mut doc = load(&path).unwrap();
    doc.set_active_context("ctxA");
    let err = save(&path, &doc).unwrap_err();

    assert!(matches!(err, ContextStoreError::Write { .. }));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn staging_path_is_hidden_sibling() {
    let tmp = staging_path(Path::new(".fdk/context.json"));
    assert_eq!(tmp.parent(), Some(Path::new(".fdk")));
    let name = tmp.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with(".context.json.tmp-"));
}

#[test]
fn explicit_null_partners_survives_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.json");
    fs::write(
        &path,
        r#"{"theme":{"active_context":"","contexts":{}},"partners":null}"#,
    )
    .unwrap();

    let doc = load(&path).unwrap();
    assert_eq!(doc.partners, Some(serde_json::Value::Null));
    save(&path, &doc).unwrap();

    let reloaded: serde_json::Value =
        serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(reloaded.get("partners"), Some(&serde_json::Value::Null));
}

#[test]
fn oversized_numbers_in_passthrough_keep_their_digits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.json");
    fs::write(
        &path,
        r#"{"theme":{"active_context":"","contexts":{},"seed":98765432109876543210},
            "partners":{"id":123456789012345678901234,"ratio":0.10000000000000000555},
            "build":18446744073709551616}"#,
    )
    .unwrap();

    let doc = load(&path).unwrap();
    save(&path, &doc).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("123456789012345678901234"));
    assert!(text.contains("0.10000000000000000555"));
    assert!(text.contains("98765432109876543210"));
    assert!(text.contains("18446744073709551616"));
    assert!(!text.contains("e+"));
}

#[test]
fn null_entry_fields_read_as_zero_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.json");
    fs::write(
        &path,
        r#"{"theme":{"active_context":null,"contexts":{"a":{"name":null,"domain":"x",
            "application_id":null,"company_id":null,"theme_id":null,"env":null}}}}"#,
    )
    .unwrap();

    let doc = load(&path).expect("nulls are tolerated");
    let entry = &doc.theme.contexts["a"];
    assert_eq!(entry.domain, "x");
    assert_eq!(entry.company_id, 0);
    assert_eq!(entry.theme_id, "");
    assert_eq!(entry.env, "");
    assert!(doc.active_context().is_none());
}

#[cfg(unix)]
#[test]
fn save_keeps_restrictive_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

    let mut doc = load(&path).unwrap();
    assert!(doc.set_active_context("ctxA"));
    save(&path, &doc).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert_eq!(load(&path).unwrap().theme.active_context, "ctxA");
}
