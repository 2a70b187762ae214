//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Exercise countdown length and tick interval
//! - Default patient shown when a session opens
//! - Target glyphs per exercise
//! - Export directory
//!
//! Configuration is stored at `~/.config/visionquest/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::model::{ExerciseKind, PatientProfile};
use crate::session::{SessionSettings, MIN_COUNTDOWN_UNITS};

/// Exercise countdown configuration.
///
/// Earlier builds ran 300-unit exercises; the current default is 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_countdown_units")]
    pub countdown_units: u32,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Patient pre-filled on a fresh session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDefaults {
    #[serde(default = "default_patient_name")]
    pub default_name: String,
    #[serde(default = "default_patient_age")]
    pub default_age: u32,
}

/// Target glyphs per exercise. An empty list renders the default glyph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetsConfig {
    #[serde(default)]
    pub vergence: Vec<String>,
    #[serde(default)]
    pub fusion: Vec<String>,
    #[serde(default)]
    pub jump_vergence: Vec<String>,
    #[serde(default)]
    pub smooth_pursuit: Vec<String>,
    #[serde(default)]
    pub accommodative_rock: Vec<String>,
}

/// Report export configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for exported reports. Current directory when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/visionquest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub patient: PatientDefaults,
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

// Default functions
fn default_countdown_units() -> u32 {
    10
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_patient_name() -> String {
    "John Doe".into()
}
fn default_patient_age() -> u32 {
    8
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_units: default_countdown_units(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for PatientDefaults {
    fn default() -> Self {
        Self {
            default_name: default_patient_name(),
            default_age: default_patient_age(),
        }
    }
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            vergence: vec!["★".into(), "●".into()],
            fusion: vec!["◎".into()],
            jump_vergence: vec!["▲".into(), "▼".into()],
            smooth_pursuit: vec!["●".into()],
            accommodative_rock: vec!["E".into()],
        }
    }
}

impl TargetsConfig {
    pub fn for_kind(&self, kind: ExerciseKind) -> &[String] {
        match kind {
            ExerciseKind::Vergence => &self.vergence,
            ExerciseKind::Fusion => &self.fusion,
            ExerciseKind::JumpVergence => &self.jump_vergence,
            ExerciseKind::SmoothPursuit => &self.smooth_pursuit,
            ExerciseKind::AccommodativeRock => &self.accommodative_rock,
        }
    }
}

/// Node at a dot-separated path (`"session.countdown_units"`).
fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    key.split('.').try_fold(root, |node, part| node.get(part))
}

/// Replace the leaf at `key` with `raw`, parsed to the leaf's current type.
fn assign(root: &mut Value, key: &str, raw: &str) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let (section, field) = key.rsplit_once('.').ok_or_else(unknown)?;
    let slot = section
        .split('.')
        .try_fold(root, |node, part| node.get_mut(part))
        .and_then(|parent| parent.get_mut(field))
        .ok_or_else(unknown)?;

    *slot = coerce(slot, raw).map_err(|message| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    })?;
    Ok(())
}

/// Parse `raw` into the JSON shape of `current`.
///
/// Lists and tables take JSON text. Unset optional fields are `null` and
/// accept any string.
fn coerce(current: &Value, raw: &str) -> Result<Value, String> {
    match current {
        Value::Bool(_) => raw.parse::<bool>().map(Value::Bool).map_err(|e| e.to_string()),
        Value::Number(_) => parse_number(raw).ok_or_else(|| format!("cannot parse '{raw}' as number")),
        Value::Array(_) | Value::Object(_) => serde_json::from_str(raw).map_err(|e| e.to_string()),
        Value::Null | Value::String(_) => Ok(Value::String(raw.to_string())),
    }
}

/// Integers stay integers so `u32` fields deserialize.
fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Value::from(n));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            tracing::info!(path = %path.display(), "wrote default configuration");
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match lookup(&json, key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        assign(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the session cannot run with.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.countdown_units < MIN_COUNTDOWN_UNITS {
            return Err(ConfigError::InvalidValue {
                key: "session.countdown_units".into(),
                message: format!("must be at least {MIN_COUNTDOWN_UNITS}"),
            });
        }
        if self.session.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.tick_interval_ms".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Update a value by key and persist to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            countdown_units: self.session.countdown_units,
            tick_interval: Duration::from_millis(self.session.tick_interval_ms.max(1)),
            targets: self.targets.clone(),
        }
    }

    pub fn default_patient(&self) -> PatientProfile {
        PatientProfile::with_age(self.patient.default_name.clone(), self.patient.default_age)
    }

    /// Directory exports land in.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
