use std::{env, fs, path::Path, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::definition::MenuDefinition;

const BACK_LABEL: &str = "..";

const CONFIG_ENV: &str = "MENUNAV_CONFIG";
const LOCAL_CONFIG: &str = "menunav.json";
const APP_DIR: &str = "menunav";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Leave answered lists on screen instead of erasing them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stay_open: Option<bool>,

    /// Text of the synthetic "go back" row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuDefinition>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub stay_open: bool,
    pub back_label: String,
    pub menu: Option<MenuDefinition>,
}

pub fn load_optional() -> Result<Option<Config>> {
    let Some(path) = resolve_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_from(&path).map(Some)
}

pub fn load_from(path: &Path) -> Result<Config> {
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    if let Some(menu) = &cfg.menu {
        menu.validate()
            .with_context(|| format!("invalid menu in {}", path.display()))?;
    }
    Ok(cfg)
}

/// Lookup order: `$MENUNAV_CONFIG`, `./menunav.json`, then the per-user
/// config dir (`%APPDATA%` on Windows, `~/.config` elsewhere).
pub fn resolve_config_path() -> Option<PathBuf> {
    let explicit = env::var(CONFIG_ENV).ok().filter(|p| !p.trim().is_empty());
    if let Some(p) = explicit {
        return Some(PathBuf::from(p));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }

    let user_dir = env::var_os("APPDATA")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(user_dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn ensure_config_file_exists() -> Result<PathBuf> {
    let Some(path) = resolve_config_path() else {
        return Err(anyhow!(
            "No config path available (set {CONFIG_ENV} or ensure APPDATA/HOME is present)"
        ));
    };
    write_template_if_missing(&path)?;
    Ok(path)
}

fn write_template_if_missing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
    }

    if !path.exists() {
        let mut s = serde_json::to_string_pretty(&template()).context("serialize config template")?;
        s.push('\n');
        fs::write(path, s.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn template() -> serde_json::Value {
    serde_json::json!({
        "stay_open": false,
        "menu": {
            "items": [
                { "type": "echo", "label": "Hello", "message": "hello from menunav" },
                { "type": "menu", "label": "Options ...", "temporary": true, "items": [
                    { "type": "run", "label": "List files", "command": ["ls"], "append_options": true },
                    { "type": "checkbox", "label": "Long format", "id": "-l" },
                    { "type": "checkbox", "label": "Show hidden", "id": "-a" }
                ] }
            ]
        }
    })
}

/// Command-line values win over the config file.
pub fn resolve(
    config: Option<&Config>,
    stay_open_arg: bool,
    menu_arg: Option<MenuDefinition>,
) -> ResolvedConfig {
    let stay_open = stay_open_arg || config.and_then(|c| c.stay_open).unwrap_or(false);
    let back_label = config
        .and_then(|c| c.back_label.clone())
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| BACK_LABEL.to_string());
    let menu = menu_arg.or_else(|| config.and_then(|c| c.menu.clone()));

    ResolvedConfig {
        stay_open,
        back_label,
        menu,
    }
}
