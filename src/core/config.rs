//! Configuration module for `MODdy`
//!
//! Settings live in a TOML file in the platform config directory. Every key is listed in
//! [`ConfigKey`]; the CLI reads, writes and resets keys through it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the `MODdy` config directory in path values
const DIR_VARIABLE: &str = "$MODDY";

/// `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// error, warn, info or debug
    #[serde(default)]
    pub level: String,
    /// Log file; empty logs to the console
    #[serde(default)]
    pub file: String,
    /// Untagged progress output
    #[serde(default)]
    pub verbose: bool,
}

/// `[paths]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON file holding the saved profile
    #[serde(default)]
    pub data_file: String,
    /// Module catalog JSON; empty means the bundled catalog
    #[serde(default)]
    pub module_catalog: String,
    /// Course catalog JSON; empty means the bundled catalog
    #[serde(default)]
    pub course_catalog: String,
}

/// User settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Data and catalog locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// One-run values from CLI flags; never saved
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `logging.level`
    pub level: Option<String>,
    /// `logging.file`
    pub file: Option<String>,
    /// `logging.verbose`
    pub verbose: Option<bool>,
    /// `paths.data_file`
    pub data_file: Option<String>,
    /// `paths.module_catalog`
    pub module_catalog: Option<String>,
    /// `paths.course_catalog`
    pub course_catalog: Option<String>,
}

/// A settable configuration key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `logging.level`
    Level,
    /// `logging.file`
    File,
    /// `logging.verbose`
    Verbose,
    /// `paths.data_file`
    DataFile,
    /// `paths.module_catalog`
    ModuleCatalog,
    /// `paths.course_catalog`
    CourseCatalog,
}

impl ConfigKey {
    /// Every key, in display order
    pub const ALL: [Self; 6] = [
        Self::Level,
        Self::File,
        Self::Verbose,
        Self::DataFile,
        Self::ModuleCatalog,
        Self::CourseCatalog,
    ];

    /// Name used on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::File => "file",
            Self::Verbose => "verbose",
            Self::DataFile => "data_file",
            Self::ModuleCatalog => "module_catalog",
            Self::CourseCatalog => "course_catalog",
        }
    }

    /// Holds a path, so `$MODDY` is expanded in it
    const fn is_path(self) -> bool {
        !matches!(self, Self::Level | Self::Verbose)
    }

    /// Comma-separated list of every key name
    #[must_use]
    pub fn known() -> String {
        Self::ALL.map(Self::name).join(", ")
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    /// Accepts dashes in place of underscores
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let normalized = key.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| format!("Unknown config key: '{key}'"))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    if value.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

impl Config {
    /// The `$MODDY` directory: `moddy` inside the platform config directory
    #[must_use]
    pub fn get_moddy_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moddy")
    }

    /// Text value of a key (`None` for `verbose`)
    fn text(&self, key: ConfigKey) -> Option<&String> {
        match key {
            ConfigKey::Level => Some(&self.logging.level),
            ConfigKey::File => Some(&self.logging.file),
            ConfigKey::Verbose => None,
            ConfigKey::DataFile => Some(&self.paths.data_file),
            ConfigKey::ModuleCatalog => Some(&self.paths.module_catalog),
            ConfigKey::CourseCatalog => Some(&self.paths.course_catalog),
        }
    }

    fn text_mut(&mut self, key: ConfigKey) -> Option<&mut String> {
        match key {
            ConfigKey::Level => Some(&mut self.logging.level),
            ConfigKey::File => Some(&mut self.logging.file),
            ConfigKey::Verbose => None,
            ConfigKey::DataFile => Some(&mut self.paths.data_file),
            ConfigKey::ModuleCatalog => Some(&mut self.paths.module_catalog),
            ConfigKey::CourseCatalog => Some(&mut self.paths.course_catalog),
        }
    }

    /// Fill empty text keys from `defaults`
    ///
    /// # Returns
    /// `true` if any key was filled in, so the caller can save the upgraded file
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        for key in ConfigKey::ALL {
            let Some(default) = defaults.text(key).filter(|v| !v.is_empty()) else {
                continue;
            };
            if let Some(value) = self.text_mut(key).filter(|v| v.is_empty()) {
                value.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI flags on top of the loaded values
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let texts = [
            (ConfigKey::Level, &overrides.level),
            (ConfigKey::File, &overrides.file),
            (ConfigKey::DataFile, &overrides.data_file),
            (ConfigKey::ModuleCatalog, &overrides.module_catalog),
            (ConfigKey::CourseCatalog, &overrides.course_catalog),
        ];
        for (key, value) in texts {
            if let (Some(value), Some(slot)) = (value, self.text_mut(key)) {
                slot.clone_from(value);
            }
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
    }

    /// `config.toml` (release) or `dconfig.toml` (debug) inside the `$MODDY` directory
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_moddy_dir().join(CONFIG_FILE_NAME)
    }

    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let moddy_dir = Self::get_moddy_dir();
            value.replace(DIR_VARIABLE, moddy_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Parse settings, expanding `$MODDY` in path keys
    ///
    /// # Errors
    /// Returns the TOML error if the text does not parse or has the wrong shape.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        for key in ConfigKey::ALL.into_iter().filter(|k| k.is_path()) {
            if let Some(value) = config.text_mut(key) {
                *value = Self::expand_variables(value);
            }
        }
        Ok(config)
    }

    /// Settings compiled into the binary
    ///
    /// # Panics
    /// Panics if the bundled defaults are not valid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Read the user's settings, creating the file from defaults on first run
    ///
    /// An unreadable file falls back to defaults; a readable one is upgraded with any keys
    /// it lacks.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }
        match fs::read_to_string(&config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
        {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            None => defaults,
        }
    }

    /// Write the settings file
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_file, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Value of a key as text; `None` for unknown keys
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.parse::<ConfigKey>().ok()? {
            ConfigKey::Verbose => Some(self.logging.verbose.to_string()),
            key => self.text(key).cloned(),
        }
    }

    /// Change a key in memory; [`save`](Config::save) persists it
    ///
    /// # Errors
    /// Returns an error for an unknown key or a `verbose` value that is not a boolean.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.parse::<ConfigKey>()? {
            ConfigKey::Verbose => {
                self.logging.verbose = value
                    .parse()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            key => {
                if let Some(slot) = self.text_mut(key) {
                    *slot = value.to_string();
                }
            }
        }
        Ok(())
    }

    /// Put a key back to its value in `defaults`
    ///
    /// # Errors
    /// Returns an error for an unknown key.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.parse::<ConfigKey>()? {
            ConfigKey::Verbose => self.logging.verbose = defaults.logging.verbose,
            key => {
                if let (Some(slot), Some(default)) = (self.text_mut(key), defaults.text(key)) {
                    slot.clone_from(default);
                }
            }
        }
        Ok(())
    }

    /// Delete the settings file; the next [`load`](Config::load) recreates it
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

    /// Profile data file
    #[must_use]
    pub fn data_file_path(&self) -> PathBuf {
        non_empty_path(&self.paths.data_file)
            .unwrap_or_else(|| Self::get_moddy_dir().join("moddy.json"))
    }

    /// Module catalog override, if configured
    #[must_use]
    pub fn module_catalog_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.paths.module_catalog)
    }

    /// Course catalog override, if configured
    #[must_use]
    pub fn course_catalog_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.paths.course_catalog)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, keys) in [
            ("logging", &ConfigKey::ALL[..3]),
            ("paths", &ConfigKey::ALL[3..]),
        ] {
            writeln!(f, "[{section}]")?;
            for key in keys {
                match self.text(*key) {
                    Some(value) => writeln!(f, "  {key} = \"{value}\"")?,
                    None => writeln!(f, "  {key} = {}", self.logging.verbose)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_aliases() {
        assert_eq!("data-file".parse::<ConfigKey>(), Ok(ConfigKey::DataFile));
        assert_eq!(" level ".parse::<ConfigKey>(), Ok(ConfigKey::Level));
        assert!("paths.data_file".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_only_path_keys_expand() {
        let config = Config::from_toml(
            "[logging]\nlevel = \"$MODDY\"\n[paths]\ncourse_catalog = \"$MODDY/c.json\"\n",
        )
        .unwrap();
        assert_eq!(config.logging.level, "$MODDY");
        assert!(!config.paths.course_catalog.contains(DIR_VARIABLE));
    }

    #[test]
    fn test_display_lists_every_key() {
        let text = Config::default().to_string();
        for key in ConfigKey::ALL {
            assert!(text.contains(key.name()), "missing {key}");
        }
        assert!(text.contains("verbose = false"));
    }
}
