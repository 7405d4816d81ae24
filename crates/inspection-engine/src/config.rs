//! Engine configuration
//!
//! All fields have defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! checkbox_match = "any"
//! cascade_hidden = true
//! daily_label_format = "%b %-d"
//! ```

use crate::reports::period::{validate_label_format, DEFAULT_DAILY_LABEL};
use anyhow::Context;
use inspection_types::MatchMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Checkbox matching used when a rule carries no `match_mode`
    pub checkbox_match: MatchMode,
    /// Hide questions whose controlling question is itself hidden
    pub cascade_hidden: bool,
    /// chrono format for daily series labels
    pub daily_label_format: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            checkbox_match: MatchMode::Any,
            cascade_hidden: true,
            daily_label_format: default_daily_label_format(),
        }
    }
}

fn default_daily_label_format() -> String {
    DEFAULT_DAILY_LABEL.to_string()
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// [`EngineConfig::validate`] rejects it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// ```
    /// use inspection_engine::config::EngineConfig;
    /// use inspection_types::MatchMode;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = EngineConfig::from_str(r#"checkbox_match = "all""#)?;
    /// assert_eq!(config.checkbox_match, MatchMode::All);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.daily_label_format.trim().is_empty() {
            anyhow::bail!("daily_label_format must not be empty");
        }
        validate_label_format(&self.daily_label_format)?;
        Ok(())
    }
}
