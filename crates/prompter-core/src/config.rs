//! Configuration management for Prompter.
//!
//! Loads configuration from ${PROMPTER_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::font::FontSize;
use crate::core::scroll::ScrollSettings;
use crate::core::speed::ScrollSpeed;

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Prompter configuration and data directories.
    //!
    //! PROMPTER_HOME resolution order:
    //! 1. PROMPTER_HOME environment variable (if set)
    //! 2. ~/.config/prompter (default)
    //! 3. ./.prompter when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the Prompter home directory.
    pub fn prompter_home() -> PathBuf {
        if let Ok(home) = std::env::var("PROMPTER_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".prompter"),
            |h| h.join(".config").join("prompter"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        prompter_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        prompter_home().join("logs")
    }
}

/// Scroll engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Initial speed multiplier.
    pub speed: f64,
    /// Delay between steps at speed 1.0, in milliseconds.
    pub base_delay_ms: u64,
    /// Fraction of the script advanced per step.
    pub increment: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            speed: ScrollSpeed::DEFAULT,
            base_delay_ms: ScrollSettings::DEFAULT_BASE_DELAY.as_millis() as u64,
            increment: ScrollSettings::DEFAULT_INCREMENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: u16,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: FontSize::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Upper bound on waiting for the scroll worker at close, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_ms: 1000 }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scroll: ScrollConfig,
    pub font: FontConfig,
    pub shutdown: ShutdownConfig,
}

impl Config {
    /// Smallest accepted base delay; zero would turn the worker into a busy loop.
    const MIN_BASE_DELAY_MS: u64 = 1;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Renders `Config::default()` into the commented template.
    ///
    /// Keeps the template's comments and layout while taking every value
    /// from the Rust defaults, so the two cannot drift apart silently.
    ///
    /// # Errors
    /// Returns an error if the template or the serialized defaults fail to parse.
    pub fn generate() -> Result<String> {
        use toml_edit::{DocumentMut, Item};

        fn merge(target: &mut toml_edit::Table, source: &toml_edit::Table) {
            for (key, value) in source {
                match value {
                    Item::Value(v) => {
                        if let Some(Item::Value(existing)) = target.get_mut(key) {
                            let decor = existing.decor().clone();
                            *existing = v.clone();
                            *existing.decor_mut() = decor;
                        } else {
                            target[key] = Item::Value(v.clone());
                        }
                    }
                    Item::Table(src_table) => {
                        if let Some(Item::Table(target_table)) = target.get_mut(key) {
                            merge(target_table, src_table);
                        } else {
                            target[key] = Item::Table(src_table.clone());
                        }
                    }
                    _ => {}
                }
            }
        }

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge(doc.as_table_mut(), generated_doc.as_table());
        Ok(doc.to_string())
    }

    /// Initial scroll speed, clamped into range.
    pub fn speed(&self) -> ScrollSpeed {
        ScrollSpeed::new(self.scroll.speed)
    }

    /// Initial font size, clamped into range.
    pub fn font_size(&self) -> FontSize {
        FontSize::new(i64::from(self.font.size))
    }

    pub fn scroll_settings(&self) -> ScrollSettings {
        let increment = if self.scroll.increment.is_finite() && self.scroll.increment > 0.0 {
            self.scroll.increment.min(1.0)
        } else {
            ScrollSettings::DEFAULT_INCREMENT
        };
        ScrollSettings {
            base_delay: Duration::from_millis(self.scroll.base_delay_ms.max(Self::MIN_BASE_DELAY_MS)),
            increment,
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown.timeout_ms)
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
