//! Configuration module for `techtree`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::importer::ImportOptions;
use crate::core::store::ViewportConfig;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Locale configuration applied to every import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Language assumed when a document names none
    #[serde(default)]
    pub default_language: String,
    /// Language single-string titles are duplicated into
    #[serde(default)]
    pub fallback_language: String,
}

/// Viewport configuration for the interaction store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewportSection {
    /// Smallest allowed zoom factor
    #[serde(default)]
    pub min_zoom: f64,
    /// Largest allowed zoom factor
    #[serde(default)]
    pub max_zoom: f64,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `{course_id}.json` tree files
    #[serde(default)]
    pub trees_dir: String,
    /// Directory for exported files
    #[serde(default)]
    pub out_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Locale settings
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportSection,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override default language
    pub default_language: Option<String>,
    /// Override trees directory
    pub trees_dir: Option<String>,
    /// Override output directory
    pub out_dir: Option<String>,
}

impl Config {
    /// Get the `$TECHTREE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/techtree`
    /// - macOS: `~/Library/Application Support/techtree`
    /// - Windows: `%APPDATA%\techtree`
    #[must_use]
    pub fn get_techtree_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("techtree")
    }

    /// Merge missing fields from defaults into this config.
    /// Returns `true` if any fields were added.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        let string_slots = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (
                &mut self.locale.default_language,
                &defaults.locale.default_language,
            ),
            (
                &mut self.locale.fallback_language,
                &defaults.locale.fallback_language,
            ),
            (&mut self.paths.trees_dir, &defaults.paths.trees_dir),
            (&mut self.paths.out_dir, &defaults.paths.out_dir),
        ];
        for (slot, default) in string_slots {
            if slot.is_empty() && !default.is_empty() {
                slot.clone_from(default);
                changed = true;
            }
        }

        if self.viewport.min_zoom <= 0.0 && defaults.viewport.min_zoom > 0.0 {
            self.viewport.min_zoom = defaults.viewport.min_zoom;
            changed = true;
        }
        if self.viewport.max_zoom <= 0.0 && defaults.viewport.max_zoom > 0.0 {
            self.viewport.max_zoom = defaults.viewport.max_zoom;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration.
    /// Only non-`None` values replace config values; nothing is persisted.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(language) = &overrides.default_language {
            self.locale.default_language.clone_from(language);
        }
        if let Some(trees_dir) = &overrides.trees_dir {
            self.paths.trees_dir.clone_from(trees_dir);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Get the user config file path (`config.toml`, or `dconfig.toml`
    /// in debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_techtree_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$TECHTREE` in a string to the actual config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$TECHTREE") {
            let dir = Self::get_techtree_dir();
            value.replace("$TECHTREE", dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or does not match
    /// the expected schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.trees_dir = Self::expand_variables(&config.paths.trees_dir);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML.
    /// This should never happen since the defaults ship with the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found.
    ///
    /// Missing fields are merged in from defaults and the updated file
    /// is saved back, so upgrades pick up new settings while keeping
    /// user customizations.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform-specific config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "default_language" | "default-language" => Some(self.locale.default_language.clone()),
            "fallback_language" | "fallback-language" => {
                Some(self.locale.fallback_language.clone())
            }
            "min_zoom" | "min-zoom" => Some(self.viewport.min_zoom.to_string()),
            "max_zoom" | "max-zoom" => Some(self.viewport.max_zoom.to_string()),
            "trees_dir" | "trees-dir" => Some(self.paths.trees_dir.clone()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key (in memory; call
    /// [`save()`](Config::save) to persist)
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be
    /// parsed for typed fields.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "default_language" | "default-language" => {
                self.locale.default_language = value.to_string();
            }
            "fallback_language" | "fallback-language" => {
                self.locale.fallback_language = value.to_string();
            }
            "min_zoom" | "min-zoom" => {
                self.viewport.min_zoom = parse_zoom(key, value)?;
            }
            "max_zoom" | "max-zoom" => {
                self.viewport.max_zoom = parse_zoom(key, value)?;
            }
            "trees_dir" | "trees-dir" => self.paths.trees_dir = value.to_string(),
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// # Errors
    /// Returns an error if the key is unknown.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "default_language" | "default-language" => self
                .locale
                .default_language
                .clone_from(&defaults.locale.default_language),
            "fallback_language" | "fallback-language" => self
                .locale
                .fallback_language
                .clone_from(&defaults.locale.fallback_language),
            "min_zoom" | "min-zoom" => self.viewport.min_zoom = defaults.viewport.min_zoom,
            "max_zoom" | "max-zoom" => self.viewport.max_zoom = defaults.viewport.max_zoom,
            "trees_dir" | "trees-dir" => {
                self.paths.trees_dir.clone_from(&defaults.paths.trees_dir);
            }
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the config file so the next load recreates it from
    /// defaults. Destructive; the CLI asks for confirmation first.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Build import options from the locale section
    #[must_use]
    pub fn import_options(&self, now: String) -> ImportOptions {
        let defaults = ImportOptions::default();
        ImportOptions {
            default_language: if self.locale.default_language.is_empty() {
                defaults.default_language
            } else {
                self.locale.default_language.clone()
            },
            fallback_language: if self.locale.fallback_language.is_empty() {
                defaults.fallback_language
            } else {
                self.locale.fallback_language.clone()
            },
            now,
        }
    }

    /// Build the store's zoom range from the viewport section
    #[must_use]
    pub fn viewport_config(&self) -> ViewportConfig {
        let defaults = ViewportConfig::default();
        ViewportConfig {
            min_zoom: if self.viewport.min_zoom > 0.0 {
                self.viewport.min_zoom
            } else {
                defaults.min_zoom
            },
            max_zoom: if self.viewport.max_zoom > 0.0 {
                self.viewport.max_zoom
            } else {
                defaults.max_zoom
            },
        }
    }
}

fn parse_zoom(key: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| *v > 0.0)
        .ok_or_else(|| format!("Invalid zoom value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[locale]")?;
        writeln!(
            f,
            "  default_language = \"{}\"",
            self.locale.default_language
        )?;
        writeln!(
            f,
            "  fallback_language = \"{}\"",
            self.locale.fallback_language
        )?;

        writeln!(f, "\n[viewport]")?;
        writeln!(f, "  min_zoom = {}", self.viewport.min_zoom)?;
        writeln!(f, "  max_zoom = {}", self.viewport.max_zoom)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  trees_dir = \"{}\"", self.paths.trees_dir)?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_defaults_has_required_fields() {
        let config = Config::from_defaults();
        assert!(!config.logging.level.is_empty());
        assert!(!config.locale.default_language.is_empty());
        assert!(config.viewport.min_zoom > 0.0);
        assert!(config.viewport.max_zoom > config.viewport.min_zoom);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::from_defaults();
        config.set("default_language", "en").unwrap();
        assert_eq!(config.get("default_language"), Some("en".to_string()));

        config.set("max_zoom", "8.0").unwrap();
        assert_eq!(config.get("max_zoom"), Some("8".to_string()));

        assert!(config.set("max_zoom", "huge").is_err());
        assert!(config.set("nope", "x").is_err());
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_unset_restores_default() {
        let defaults = Config::from_defaults();
        let mut config = Config::from_defaults();
        config.set("level", "debug").unwrap();
        config.unset("level", &defaults).unwrap();
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_merge_defaults_fills_missing() {
        let defaults = Config::from_defaults();
        let mut config = Config::from_toml("[logging]\nlevel = \"warn\"\n").unwrap();

        assert!(config.merge_defaults(&defaults));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(
            config.locale.default_language,
            defaults.locale.default_language
        );
        assert!(config.viewport.min_zoom > 0.0);
    }

    #[test]
    fn test_import_options_from_locale() {
        let mut config = Config::from_defaults();
        config.locale.default_language = "de".to_string();
        let options = config.import_options("t0".to_string());
        assert_eq!(options.default_language, "de");
        assert_eq!(options.now, "t0");
    }
}
