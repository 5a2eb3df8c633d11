use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use hikido_ipc::Command;
use serde::Deserialize;

use super::candidates::DEFAULT_WIDE_SCREEN_THRESHOLD;
use super::mouse_action::DEFAULT_STICKY_THRESHOLD;
use crate::hotkey::{Bindings, Modifiers};

pub const DEFAULT_FULLSCREEN_SETTLE_MS: u64 = 900;

/// User settings, read from `config.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Modifier names making up the hyper chord
    pub hyper: Vec<String>,
    pub sticky_threshold: u32,
    /// Screens wider than this also get quarter-width placements
    pub wide_screen_threshold: u32,
    /// Time the host needs to finish a fullscreen transition
    pub fullscreen_settle_ms: u64,
    /// Extra bindings applied on top of the defaults
    pub bindings: BTreeMap<String, Command>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hyper: vec!["cmd".into(), "alt".into(), "ctrl".into()],
            sticky_threshold: DEFAULT_STICKY_THRESHOLD,
            wide_screen_threshold: DEFAULT_WIDE_SCREEN_THRESHOLD,
            fullscreen_settle_ms: DEFAULT_FULLSCREEN_SETTLE_MS,
            bindings: BTreeMap::new(),
        }
    }
}

impl Config {
    /// `~/.config/hikido/config.json` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hikido").join("config.json"))
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads from `path` when given, else from [`Config::default_path`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.hyper_modifiers()?;
        Ok(config)
    }

    pub fn hyper_modifiers(&self) -> Result<Modifiers> {
        Modifiers::from_names(self.hyper.as_slice()).map_err(|e| anyhow!("Invalid hyper modifiers: {}", e))
    }

    /// Default bindings for the configured hyper chord, then the overrides.
    pub fn build_bindings(&self) -> Result<Bindings> {
        let mut bindings = Bindings::defaults(self.hyper_modifiers()?);
        for (key, command) in &self.bindings {
            bindings
                .bind(key, command.clone())
                .map_err(|e| anyhow!("Invalid binding {}: {}", key, e))?;
        }
        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sticky_threshold, 15);
        assert_eq!(config.wide_screen_threshold, 1600);
        assert_eq!(config.fullscreen_settle_ms, 900);
        assert_eq!(
            config.hyper_modifiers().unwrap(),
            Modifiers::from_names(&["cmd", "alt", "ctrl"]).unwrap()
        );
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(r#"{"hyper": ["ctrl", "alt"], "sticky_threshold": 30}"#).unwrap();
        assert_eq!(config.sticky_threshold, 30);
        assert_eq!(config.fullscreen_settle_ms, 900);

        let hyper = config.hyper_modifiers().unwrap();
        assert!(hyper.ctrl && hyper.alt);
        assert!(!hyper.cmd);
    }

    #[test]
    fn test_invalid_hyper_is_rejected() {
        assert!(Config::parse(r#"{"hyper": ["meta"]}"#).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Config::parse(r#"{"stickyness": 3}"#).is_err());
    }

    #[test]
    fn test_binding_overrides() {
        let config = Config::parse(
            r#"{
                "bindings": {
                    "cmd-alt-ctrl-a": {"type": "toggle_mouse_action"},
                    "alt-m": {"type": "maximize"}
                }
            }"#,
        )
        .unwrap();
        let bindings = config.build_bindings().unwrap();

        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-a").unwrap(),
            Some(&Command::ToggleMouseAction)
        );
        assert_eq!(bindings.lookup("alt-m").unwrap(), Some(&Command::Maximize));
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-return").unwrap(),
            Some(&Command::ToggleMaximize)
        );
    }

    #[test]
    fn test_invalid_binding_key() {
        let config = Config::parse(r#"{"bindings": {"cmd-nope": {"type": "maximize"}}}"#).unwrap();
        assert!(config.build_bindings().is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("hikido-test-missing-config.json");
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hikido-test-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"fullscreen_settle_ms": 10}"#).unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.fullscreen_settle_ms, 10);
    }
}
