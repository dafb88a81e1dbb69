//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Default materialization and in-memory fallback
//! - Deep-merge semantics over the built-in defaults
//! - Dotted-path get/set accessors
//! - Save-back round trips
//! - Degraded-mode handling of malformed files

use appbase::config::{ConfigManager, LoadOutcome, deep_merge};
use camino::Utf8PathBuf;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn create_test_config_path() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path =
        Utf8PathBuf::try_from(temp_dir.path().join("appbase_config.json")).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_missing_file_materializes_defaults() {
    let (_temp_dir, config_path) = create_test_config_path();

    let manager = ConfigManager::load(&config_path, true);

    assert!(config_path.exists());
    assert_eq!(manager.get_str("app.name", ""), "appbase");
    assert_eq!(manager.get_str("logging.level", ""), "INFO");
    assert!(manager.get_bool("logging.enable_console", false));
}

#[test]
fn test_missing_file_without_creation_uses_in_memory_defaults() {
    let (_temp_dir, config_path) = create_test_config_path();

    let manager = ConfigManager::load(&config_path, false);

    assert!(!config_path.exists());
    assert_eq!(manager.get_i64("gui.window_width", 0), 800);
}

#[test]
fn test_file_values_win_on_conflicting_leaves() {
    let (_temp_dir, config_path) = create_test_config_path();
    fs::write(&config_path, r#"{"logging": {"level": "ERROR"}}"#).unwrap();

    let manager = ConfigManager::load(&config_path, false);

    // Overridden leaf takes the file's value...
    assert_eq!(manager.get_str("logging.level", ""), "ERROR");
    // ...while siblings keep their defaults.
    assert!(manager.get_bool("logging.enable_console", false));
    assert!(manager.get_bool("logging.enable_file", false));
}

#[test]
fn test_unknown_keys_pass_through() {
    let (_temp_dir, config_path) = create_test_config_path();
    fs::write(
        &config_path,
        r#"{"plugins": {"enabled": ["alpha", "beta"]}}"#,
    )
    .unwrap();

    let manager = ConfigManager::load(&config_path, false);

    let enabled = manager.get("plugins.enabled").unwrap();
    assert_eq!(*enabled, json!(["alpha", "beta"]));
}

#[test]
fn test_lists_replaced_not_concatenated() {
    let (_temp_dir, config_path) = create_test_config_path();
    fs::write(
        &config_path,
        r#"{"processing": {"supported_formats": ["svg"]}}"#,
    )
    .unwrap();

    let manager = ConfigManager::load(&config_path, false);

    assert_eq!(
        *manager.get("processing.supported_formats").unwrap(),
        json!(["svg"])
    );
}

#[test]
fn test_malformed_file_degrades_to_defaults() {
    let (_temp_dir, config_path) = create_test_config_path();
    fs::write(&config_path, "{not json at all").unwrap();

    let manager = ConfigManager::load(&config_path, false);

    assert_eq!(manager.get_str("logging.level", ""), "INFO");
    assert_eq!(manager.get_str("processing.output_format", ""), "json");
}

// A run against a broken config file must surface the fallback to the user,
// not just silently continue on defaults. The loader keeps the failure as a
// replayable outcome so the startup sequence can emit it after logging is up.
#[test]
fn test_malformed_file_yields_visible_fallback_notice() {
    let (_temp_dir, config_path) = create_test_config_path();
    fs::write(&config_path, "{not json at all").unwrap();

    let manager = ConfigManager::load(&config_path, true);

    let LoadOutcome::DegradedDefaults(reason) = manager.outcome() else {
        panic!("expected a degraded outcome, got {:?}", manager.outcome());
    };
    assert!(reason.contains("failed to parse"), "reason: {reason}");
    assert!(reason.contains(config_path.as_str()), "reason: {reason}");

    // an intact file on the same path loads cleanly
    fs::write(&config_path, r#"{"logging": {"level": "ERROR"}}"#).unwrap();
    let manager = ConfigManager::load(&config_path, true);
    assert_eq!(*manager.outcome(), LoadOutcome::Loaded);
}

#[test]
fn test_set_and_save_round_trip() {
    let (_temp_dir, config_path) = create_test_config_path();

    let mut manager = ConfigManager::load(&config_path, false);
    manager.set("app.debug_mode", true);
    manager.set("gui.theme", "dark");
    manager.save().unwrap();

    let reloaded = ConfigManager::load(&config_path, false);
    assert!(reloaded.get_bool("app.debug_mode", false));
    assert_eq!(reloaded.get_str("gui.theme", ""), "dark");
}

#[test]
fn test_save_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config_path =
        Utf8PathBuf::try_from(temp_dir.path().join("nested/dir/app.json")).unwrap();

    let manager = ConfigManager::load(&config_path, false);
    manager.save().unwrap();

    assert!(config_path.exists());
}

#[test]
fn test_get_missing_path_yields_caller_default() {
    let (_temp_dir, config_path) = create_test_config_path();
    let manager = ConfigManager::load(&config_path, false);

    assert_eq!(manager.get_str("no.such.key", "fallback"), "fallback");
    assert_eq!(manager.get_u64("gui.window_depth", 32), 32);
}

#[test]
fn test_update_merges_override_tree() {
    let (_temp_dir, config_path) = create_test_config_path();
    let mut manager = ConfigManager::load(&config_path, false);

    manager.update(&json!({"logging": {"level": "WARNING"}, "extra": 1}));

    assert_eq!(manager.get_str("logging.level", ""), "WARNING");
    assert_eq!(manager.get_i64("extra", 0), 1);
    assert!(manager.get_bool("logging.enable_file", false));
}

// --- deep_merge property tests -------------------------------------------

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,3}", arb_json(), 0..4)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn prop_merge_over_empty_is_identity(tree in arb_object()) {
        prop_assert_eq!(deep_merge(&json!({}), &tree), tree.clone());
        prop_assert_eq!(deep_merge(&tree, &json!({})), tree);
    }

    #[test]
    fn prop_merge_key_semantics(base in arb_object(), overlay in arb_object()) {
        let merged = deep_merge(&base, &overlay);
        let merged_map = merged.as_object().unwrap();
        let base_map = base.as_object().unwrap();
        let overlay_map = overlay.as_object().unwrap();

        // the merged key set is the union of both sides
        for key in base_map.keys().chain(overlay_map.keys()) {
            prop_assert!(merged_map.contains_key(key));
        }

        for (key, merged_value) in merged_map {
            match (base_map.get(key), overlay_map.get(key)) {
                // keys present only in the base survive untouched
                (Some(b), None) => prop_assert_eq!(merged_value, b),
                // keys present only in the overlay are taken as-is
                (None, Some(o)) => prop_assert_eq!(merged_value, o),
                // keys present in both recurse (non-maps take the overlay)
                (Some(b), Some(o)) => prop_assert_eq!(merged_value, &deep_merge(b, o)),
                (None, None) => prop_assert!(false, "key {} appeared from nowhere", key),
            }
        }
    }

    #[test]
    fn prop_merge_ignores_insertion_order(base in arb_object(), overlay in arb_object()) {
        let reversed = |tree: &Value| -> Value {
            let map = tree.as_object().unwrap();
            Value::Object(map.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect())
        };

        prop_assert_eq!(
            deep_merge(&base, &overlay),
            deep_merge(&reversed(&base), &reversed(&overlay))
        );
    }
}
