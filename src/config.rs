//! Settings with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. A TOML settings file, if given
//! 3. Environment variables: `FORMULA_*` prefix, `__` between nested keys
//!    (e.g. `FORMULA_VALIDATION__MAX_FRACTION_DIGITS=12`)

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SettingsError;
use crate::render::RenderOptions;

/// Limits applied by the [validator](crate::validate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationSettings {
    /// More digits than this after the decimal point of a number produce a warning.
    pub max_fraction_digits: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self { max_fraction_digits: 10 }
    }
}

/// Unified settings for the formula engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub validation: ValidationSettings,
    pub render: RenderOptions,
}

impl Settings {
    /// Loads settings from the defaults, the optional TOML file at `path`, and the environment.
    /// A missing file is an error; a file which is present but sets nothing is not.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with(path, Self::environment())
    }

    /// Like [Settings::load], but with the environment layer given by the caller.
    pub fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "loading settings file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings: Self = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        settings.checked()
    }

    /// The `FORMULA_*` environment layer read by [Settings::load].
    pub fn environment() -> Environment {
        Environment::with_prefix("FORMULA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Loads settings from TOML text layered over the defaults. The environment is not consulted.
    pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
        let settings: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.checked()
    }

    fn checked(self) -> Result<Self, SettingsError> {
        if self.render.error_color.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "render.error_color",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}
