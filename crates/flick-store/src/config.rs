use std::path::{Path, PathBuf};
use std::{env, fs};

use flick_core::GestureConfig;

use crate::error::{Result, StoreError};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FLICK_CONFIG";

/// Default base directory for flick's files.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".flick")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Where a config file comes from, and whether it has to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Pure helpers (no I/O, fully unit-testable)
// ---------------------------------------------------------------------------

/// Resolve the config location: explicit path, then `$FLICK_CONFIG`, then
/// `<base>/config.toml`. Only the default location may be absent.
pub fn resolve_config_source(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    base_dir: &Path,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource {
            path: path.to_path_buf(),
            required: true,
        };
    }
    if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return ConfigSource {
            path: PathBuf::from(value),
            required: true,
        };
    }
    ConfigSource {
        path: base_dir.join("config.toml"),
        required: false,
    }
}

/// Parse and validate TOML config text. Missing keys take their defaults.
pub fn parse_config(content: &str) -> Result<GestureConfig> {
    let config: GestureConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Render a config as TOML.
pub fn render_config(config: &GestureConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn load_config_from(source: &ConfigSource) -> Result<GestureConfig> {
    if !source.path.exists() {
        if source.required {
            return Err(StoreError::InvalidData(format!(
                "config file not found: {}",
                source.path.display()
            )));
        }
        tracing::debug!("no config at {}; using defaults", source.path.display());
        return Ok(GestureConfig::default());
    }

    let content = fs::read_to_string(&source.path)?;
    let config = parse_config(&content)?;
    tracing::info!("loaded config from {}", source.path.display());
    Ok(config)
}

/// Load the effective config for this process.
pub fn load_config(explicit: Option<&Path>) -> Result<GestureConfig> {
    let env_value = env::var(CONFIG_ENV).ok();
    let source = resolve_config_source(explicit, env_value.as_deref(), &default_base_dir());
    load_config_from(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flick_core::ResumePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_explicit() {
        let src = resolve_config_source(
            Some(Path::new("/tmp/a.toml")),
            Some("/tmp/b.toml"),
            Path::new("/home/u/.flick"),
        );
        assert_eq!(src.path, PathBuf::from("/tmp/a.toml"));
        assert!(src.required);
    }

    #[test]
    fn test_resolve_env_then_default() {
        let base = Path::new("/home/u/.flick");
        let src = resolve_config_source(None, Some("/tmp/b.toml"), base);
        assert_eq!(src.path, PathBuf::from("/tmp/b.toml"));
        assert!(src.required);

        let src = resolve_config_source(None, Some("  "), base);
        assert_eq!(src.path, base.join("config.toml"));
        assert!(!src.required);

        let src = resolve_config_source(None, None, base);
        assert!(!src.required);
    }

    #[test]
    fn test_parse_partial_config() {
        let cfg = parse_config(
            "ignore_wind_ups = false\npost_gesture_cooldown = 0.25\nresume_policy = \"preserve\"\n",
        )
        .unwrap();
        assert!(!cfg.ignore_wind_ups);
        assert_eq!(cfg.post_gesture_cooldown, 0.25);
        assert_eq!(cfg.resume_policy, ResumePolicy::Preserve);
        assert_eq!(cfg.max_gesture_angle, GestureConfig::default().max_gesture_angle);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_config("min_gesture_magnitude = -1.0\n").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)), "got {err}");

        let err = parse_config("no_such_key = 1\n").unwrap_err();
        assert!(matches!(err, StoreError::TomlParse(_)), "got {err}");
    }

    #[test]
    fn test_render_roundtrip() {
        let cfg = GestureConfig {
            max_spike_angle: 25.0,
            ..Default::default()
        };
        let text = render_config(&cfg).unwrap();
        assert!(text.contains("max_spike_angle = 25.0"));
        assert_eq!(parse_config(&text).unwrap(), cfg);
    }

    #[test]
    fn test_load_missing_default_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let src = resolve_config_source(None, None, dir.path());
        assert_eq!(load_config_from(&src).unwrap(), GestureConfig::default());
    }

    #[test]
    fn test_load_missing_explicit_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let src = resolve_config_source(Some(&missing), None, dir.path());
        assert!(load_config_from(&src).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "max_gesture_age = 0.3\n").unwrap();
        let src = resolve_config_source(None, None, dir.path());
        let cfg = load_config_from(&src).unwrap();
        assert_eq!(cfg.max_gesture_age, 0.3);
    }
}
