//! Schema validation helpers for registry JSON5 configuration.

use crate::{ConfigError, MAX_PARALLEL_LIMIT};
use serde_json::{Map, Value};

/// Validate a config document against the schema.
pub(super) fn validate_schema(value: &Value, label: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, "")?;
    let allowed = ["$schema", "marker", "load_mode", "max_parallel", "source"];
    ensure_allowed_keys(map, &allowed, label, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, label, "$schema")?;
    }
    if let Some(value) = map.get("marker") {
        expect_string(value, label, "marker")?;
    }
    if let Some(value) = map.get("load_mode") {
        validate_load_mode(value, label, "load_mode")?;
    }
    if let Some(value) = map.get("max_parallel") {
        validate_max_parallel(value, label, "max_parallel")?;
    }
    if let Some(value) = map.get("source") {
        validate_source(value, label, "source")?;
    }

    Ok(())
}

/// Validate the "load_mode" value.
fn validate_load_mode(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let Some(mode) = value.as_str() else {
        return Err(invalid_field(label, path, "expected string"));
    };
    match mode {
        "sequential" | "parallel" => Ok(()),
        _ => Err(invalid_field(
            label,
            path,
            "expected one of: sequential, parallel",
        )),
    }
}

fn validate_max_parallel(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_null() {
        return Ok(());
    }
    match value.as_u64() {
        Some(0) => Err(invalid_field(label, path, "must be at least 1")),
        Some(value) if value > MAX_PARALLEL_LIMIT as u64 => Err(invalid_field(
            label,
            path,
            &format!("must be at most {MAX_PARALLEL_LIMIT}"),
        )),
        Some(_) => Ok(()),
        None => Err(invalid_field(label, path, "expected positive integer")),
    }
}

/// Validate the "source" block.
fn validate_source(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_null() {
        return Ok(());
    }
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(map, &["dir", "extension", "recursive"], label, path)?;
    match map.get("dir") {
        Some(value) => expect_string(value, label, &join_path(path, "dir"))?,
        None => return Err(invalid_field(label, &join_path(path, "dir"), "missing")),
    }
    if let Some(value) = map.get("extension") {
        expect_string(value, label, &join_path(path, "extension"))?;
    }
    if let Some(value) = map.get("recursive") {
        expect_bool(value, label, &join_path(path, "recursive"))?;
    }
    Ok(())
}

fn expect_object<'a>(
    value: &'a Value,
    label: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| invalid_field(label, path, "expected object"))
}

fn expect_string(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(invalid_field(label, path, "expected string"))
    }
}

fn expect_bool(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(invalid_field(label, path, "expected boolean"))
    }
}

fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    label: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(label, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(label: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{label}:{normalized_path}"),
        message: message.to_string(),
    }
}
