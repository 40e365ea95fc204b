use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `ONAIR__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ONAIR")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let volume = self.audio.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(format!("audio.initial_volume must be within [0, 1], got {volume}"));
        }
        if self.audio.volume_step.is_nan() || self.audio.volume_step <= 0.0 {
            return Err("audio.volume_step must be > 0".to_string());
        }
        if self.audio.tick_ms < 10 {
            return Err("audio.tick_ms must be >= 10".to_string());
        }
        let chance = self.content.chatter_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(format!("content.chatter_chance must be within [0, 1], got {chance}"));
        }
        Ok(())
    }
}

/// Resolve the config path from `ONAIR_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ONAIR_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/onair/config.toml`
/// or `~/.config/onair/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("onair").join("config.toml"))
}

/// Default content store under `$XDG_DATA_HOME/onair/content.json`.
pub fn default_store_path() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share").map(|d| d.join("onair").join("content.json"))
}

/// Default log file under `$XDG_STATE_HOME/onair/onair.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("onair").join("onair.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
