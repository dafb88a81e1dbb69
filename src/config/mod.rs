//! Configuration management.
//!
//! [`ConfigManager`] loads a JSON configuration file, deep-merges it over the
//! built-in defaults, and exposes dotted-path accessors plus save-back to
//! disk. Loading never fails: a missing file falls back to (or materializes)
//! the defaults and a malformed file degrades to in-memory defaults. The
//! manager records how the tree was obtained as a [`LoadOutcome`] so the
//! caller can emit it after the tracing subscriber is installed; loading
//! itself predates logging setup in the binary.

use crate::error::{AppError, AppResult, ErrorCode};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value, json};
use std::fs;

/// Deep-merge `overlay` over `base`.
///
/// Keys present only in `base` survive; keys where both sides hold objects
/// merge recursively; on any other conflict the overlay value wins outright
/// (lists are replaced, not concatenated). Recursion depth is unbounded.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                match merged.get(key) {
                    Some(base_value) => {
                        let combined = deep_merge(base_value, overlay_value);
                        merged.insert(key.clone(), combined);
                    }
                    None => {
                        merged.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}

/// How the in-memory configuration tree was obtained at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File read and merged over the defaults.
    Loaded,
    /// File was absent; the defaults were written to disk.
    CreatedDefault,
    /// File was absent and creation was not requested; defaults stay in
    /// memory.
    MissingDefaults,
    /// Read, parse, or create failed; the reason is kept for replay.
    DegradedDefaults(String),
}

/// Configuration manager holding the merged in-memory tree.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Utf8PathBuf,
    config: Value,
    outcome: LoadOutcome,
}

impl ConfigManager {
    /// The built-in default configuration tree.
    pub fn default_config() -> Value {
        json!({
            "app": {
                "name": crate::APP_NAME,
                "version": crate::VERSION,
                "debug_mode": false
            },
            "logging": {
                "level": "INFO",
                "log_dir": crate::consts::DEFAULT_LOG_DIR,
                "enable_console": true,
                "enable_file": true
            },
            "gui": {
                "window_width": 800,
                "window_height": 600,
                "theme": "default"
            },
            "processing": {
                "max_file_size": "100MB",
                "supported_formats": ["jpg", "png", "gif", "bmp", "tiff"],
                "output_format": "json"
            }
        })
    }

    /// Load the configuration from `config_path`.
    ///
    /// If the file exists it is parsed and merged over the defaults (file
    /// values win on conflicting leaves). If it is absent and
    /// `create_if_missing` is set, the defaults are written to disk. Read,
    /// parse, and write failures all degrade to the in-memory defaults; this
    /// operation is never fatal. Nothing is logged here: the binary loads
    /// the config before the tracing subscriber exists, so the outcome is
    /// replayed later through [`log_outcome`](Self::log_outcome).
    pub fn load(config_path: impl AsRef<Utf8Path>, create_if_missing: bool) -> Self {
        let config_path = config_path.as_ref().to_path_buf();

        let (config, outcome) = if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_json::from_str::<Value>(&contents) {
                    Ok(file_config) => (
                        deep_merge(&Self::default_config(), &file_config),
                        LoadOutcome::Loaded,
                    ),
                    Err(e) => (
                        Self::default_config(),
                        LoadOutcome::DegradedDefaults(format!(
                            "failed to parse config {config_path}: {e}"
                        )),
                    ),
                },
                Err(e) => (
                    Self::default_config(),
                    LoadOutcome::DegradedDefaults(format!(
                        "failed to read config {config_path}: {e}"
                    )),
                ),
            }
        } else if create_if_missing {
            let defaults = Self::default_config();
            let outcome = match write_config(&config_path, &defaults) {
                Ok(()) => LoadOutcome::CreatedDefault,
                Err(e) => LoadOutcome::DegradedDefaults(format!(
                    "config {config_path} not found and could not be created: {e}"
                )),
            };
            (defaults, outcome)
        } else {
            (Self::default_config(), LoadOutcome::MissingDefaults)
        };

        Self {
            config_path,
            config,
            outcome,
        }
    }

    /// How [`load`](Self::load) obtained the tree.
    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Emit the load outcome through tracing. Call once the subscriber is
    /// installed; a degraded load logs at error level so the fallback to
    /// built-in defaults is visible in a real run.
    pub fn log_outcome(&self) {
        match &self.outcome {
            LoadOutcome::Loaded => {
                tracing::info!("Loaded config from {}", self.config_path);
            }
            LoadOutcome::CreatedDefault => {
                tracing::info!(
                    "Config file {} not found, created it with defaults",
                    self.config_path
                );
            }
            LoadOutcome::MissingDefaults => {
                tracing::warn!(
                    "Config file {} not found, using defaults",
                    self.config_path
                );
            }
            LoadOutcome::DegradedDefaults(reason) => {
                tracing::error!("{}; continuing with built-in defaults", reason);
            }
        }
    }

    /// Look up a value by dotted key path (e.g. `"app.name"`).
    ///
    /// Returns `None` when any segment is missing or a non-object blocks the
    /// walk; callers supply their own default through the typed getters.
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        let mut current = &self.config;
        for key in key_path.split('.') {
            current = current.as_object()?.get(key)?;
        }
        Some(current)
    }

    /// `get` as a string, with a caller-supplied default.
    pub fn get_str(&self, key_path: &str, default: &str) -> String {
        self.get(key_path)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// `get` as a boolean, with a caller-supplied default.
    pub fn get_bool(&self, key_path: &str, default: bool) -> bool {
        self.get(key_path).and_then(Value::as_bool).unwrap_or(default)
    }

    /// `get` as a signed integer, with a caller-supplied default.
    pub fn get_i64(&self, key_path: &str, default: i64) -> i64 {
        self.get(key_path).and_then(Value::as_i64).unwrap_or(default)
    }

    /// `get` as an unsigned integer, with a caller-supplied default.
    pub fn get_u64(&self, key_path: &str, default: u64) -> u64 {
        self.get(key_path).and_then(Value::as_u64).unwrap_or(default)
    }

    /// Set a value by dotted key path, creating intermediate objects as
    /// needed. A non-object intermediate is replaced by an object.
    pub fn set(&mut self, key_path: &str, value: impl Into<Value>) {
        let keys: Vec<&str> = key_path.split('.').collect();
        let (last, parents) = keys
            .split_last()
            .expect("split always yields at least one segment");

        let mut current = &mut self.config;
        for key in parents {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            current = current
                .as_object_mut()
                .expect("intermediate was just made an object")
                .entry((*key).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        if let Some(map) = current.as_object_mut() {
            map.insert((*last).to_string(), value.into());
        }
    }

    /// Deep-merge an override tree over the live configuration.
    pub fn update(&mut self, overrides: &Value) {
        self.config = deep_merge(&self.config, overrides);
    }

    /// Serialize the full in-memory tree back to disk, creating the parent
    /// directory first.
    pub fn save(&self) -> AppResult<()> {
        write_config(&self.config_path, &self.config)?;
        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// The merged configuration tree.
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// The configuration file path this manager reads and writes.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}

fn write_config(path: &Utf8Path, config: &Value) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::config(format!("failed to create config directory: {parent}"))
                    .with_code(ErrorCode::ConfigIo)
                    .with_detail("dir_path", parent.as_str())
                    .with_source(e)
            })?;
        }
    }

    let serialized = serde_json::to_string_pretty(config).map_err(|e| {
        AppError::config("failed to serialize config to JSON")
            .with_code(ErrorCode::ConfigParse)
            .with_source(e)
    })?;

    fs::write(path, serialized).map_err(|e| {
        AppError::config(format!("failed to write config: {path}"))
            .with_code(ErrorCode::ConfigIo)
            .with_detail("file_path", path.as_str())
            .with_source(e)
    })?;

    Ok(())
}
