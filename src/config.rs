use crate::error::{KudosError, Result};
use crate::types::config::KudosConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "kudos.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".kudos/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/kudos/config.toml";

pub const DEFAULT_DATA_FILE: &str = ".kudos/rewards.json";
const DEFAULT_HISTORY_CAP: usize = 1000;

/// Resolved ledger runtime settings. Everything has a default; configuration
/// files only override.
#[derive(Debug, Clone)]
pub struct LedgerSettings {
    pub data_file: PathBuf,
    pub history_cap: usize,
}

pub fn load_config(root: &Path) -> Result<Option<KudosConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<KudosConfig>> {
    let mut merged = Value::Table(Map::new());
    let mut found = false;
    if let Some(path) = global_path {
        found |= merge_file_if_exists(&mut merged, path)?;
    }
    found |= merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    found |= merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    if !found {
        return Ok(None);
    }

    let cfg: KudosConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| KudosError::ConfigParse(e.to_string()))?;
    Ok(Some(cfg))
}

pub fn resolve_settings(root: &Path, cfg: Option<&KudosConfig>) -> LedgerSettings {
    let ledger = cfg.and_then(|value| value.ledger.as_ref());
    let data_rel = ledger
        .and_then(|value| value.data_file.as_ref())
        .map_or(DEFAULT_DATA_FILE, String::as_str);
    let data_file = resolve_path(root, data_rel);
    let history_cap = ledger
        .and_then(|value| value.history_cap)
        .unwrap_or(DEFAULT_HISTORY_CAP)
        .max(1);

    LedgerSettings {
        data_file,
        history_cap,
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| KudosError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

fn resolve_path(root: &Path, path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        candidate
    } else {
        root.join(candidate)
    }
}
