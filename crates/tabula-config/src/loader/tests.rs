//! Tests for registry configuration loading.

use super::*;
use crate::{LoadMode, MAX_PARALLEL_LIMIT, SourceConfig};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Verify that a minimal config parses with defaults.
#[test]
fn parse_minimal_config() {
    let config = RegistryConfig::load_from_str("{}").expect("config");
    assert_eq!(config, RegistryConfig::default());
    assert_eq!(config.marker, "config");
    assert_eq!(config.load_mode, LoadMode::Parallel);
}

#[test]
fn parse_full_config() {
    let json5 = r#"{
        // blobs exported by the table pipeline
        marker: "tables",
        load_mode: "sequential",
        max_parallel: 4,
        source: { dir: "/srv/tables", extension: "bin", recursive: true },
    }"#;
    let config = RegistryConfig::load_from_str(json5).expect("config");
    assert_eq!(config.marker, "tables");
    assert_eq!(config.load_mode, LoadMode::Sequential);
    assert_eq!(config.effective_max_parallel(), 4);
    assert_eq!(
        config.source,
        Some(SourceConfig {
            dir: "/srv/tables".into(),
            extension: "bin".to_string(),
            recursive: true,
        })
    );
}

/// Reject unexpected top-level config keys.
#[test]
fn rejects_unknown_top_level_key() {
    let err = RegistryConfig::load_from_str("{ unexpected: true }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
    assert!(msg.contains("unexpected"));
}

#[test]
fn rejects_invalid_load_mode() {
    let err = RegistryConfig::load_from_str(r#"{ load_mode: "eager" }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("load_mode"));
}

#[test]
fn rejects_zero_parallelism() {
    let err = RegistryConfig::load_from_str("{ max_parallel: 0 }").unwrap_err();
    assert!(format!("{err}").contains("max_parallel"));
}

#[test]
fn rejects_parallelism_above_limit() {
    let err =
        RegistryConfig::load_from_str("{ max_parallel: 9223372036854775807 }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("max_parallel"));
    assert!(msg.contains("at most 4096"));

    let at_limit = RegistryConfig::load_from_str("{ max_parallel: 4096 }").expect("config");
    assert_eq!(at_limit.effective_max_parallel(), MAX_PARALLEL_LIMIT);
}

#[test]
fn validate_rejects_programmatic_parallelism_above_limit() {
    let config = RegistryConfig::builder()
        .max_parallel(MAX_PARALLEL_LIMIT + 1)
        .build();
    let err = config.validate().unwrap_err();
    assert!(format!("{err}").contains("max_parallel must be at most"));
}

#[test]
fn effective_parallelism_is_clamped_for_unvalidated_configs() {
    let zero = RegistryConfig::builder().max_parallel(0).build();
    assert_eq!(zero.effective_max_parallel(), 1);
    let huge = RegistryConfig::builder().max_parallel(usize::MAX).build();
    assert_eq!(huge.effective_max_parallel(), MAX_PARALLEL_LIMIT);
}

#[test]
fn rejects_source_without_dir() {
    let err = RegistryConfig::load_from_str(r#"{ source: { extension: "bin" } }"#).unwrap_err();
    assert!(format!("{err}").contains("source.dir"));
}

#[test]
fn rejects_empty_marker() {
    let err = RegistryConfig::load_from_str(r#"{ marker: "  " }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_dotted_extension() {
    let err = RegistryConfig::load_from_str(r#"{ source: { dir: "x", extension: ".bin" } }"#)
        .unwrap_err();
    assert!(format!("{err}").contains("dot"));
}

/// Relative source directories are anchored at the config file.
#[test]
fn load_from_path_resolves_relative_source_dir() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("registry.json5");
    fs::write(&path, r#"{ source: { dir: "blobs" } }"#).expect("write");

    let config = RegistryConfig::load_from_path(&path).expect("config");
    let source = config.source.expect("source");
    assert_eq!(source.dir, temp.path().join("blobs"));
    assert_eq!(source.extension, "bytes");
    assert!(!source.recursive);
}

#[test]
fn load_from_missing_path_fails_with_read_error() {
    let temp = TempDir::new().expect("tmp");
    let err = RegistryConfig::load_from_path(temp.path().join("missing.json5")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

#[test]
fn builder_overrides_defaults() {
    let config = RegistryConfig::builder()
        .marker("tables")
        .load_mode(LoadMode::Sequential)
        .max_parallel(2)
        .source(SourceConfig::new("/data"))
        .build();
    assert_eq!(config.marker, "tables");
    assert_eq!(config.load_mode, LoadMode::Sequential);
    assert_eq!(config.max_parallel, Some(2));
    assert!(config.validate().is_ok());
}
