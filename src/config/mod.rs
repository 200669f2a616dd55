#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{ExclusionSet, DEFAULT_IDENTITY_FIELD};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Effective comparison settings: built-in defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareSettings {
    pub identity_field: String,
    pub excluded_fields: ExclusionSet,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
            excluded_fields: ExclusionSet::default(),
        }
    }
}

impl CompareSettings {
    pub fn apply_toml(&mut self, toml: &TomlConfig) {
        if let Some(identity_field) = toml.identity_field() {
            self.identity_field = identity_field.to_string();
        }
        if let Some(excluded) = toml.excluded_fields() {
            self.excluded_fields = excluded.iter().cloned().collect();
        }
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        validation::validate_path("left_log", &cli.left_log)?;
        validation::validate_path("right_log", &cli.right_log)?;

        let mut settings = Self::default();

        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let toml = TomlConfig::from_file(path)?;
            toml.validate()?;
            settings.apply_toml(&toml);
        }

        if cli.no_default_excludes {
            settings.excluded_fields = ExclusionSet::empty();
        }
        for name in &cli.exclude {
            settings.excluded_fields.insert(name.clone());
        }
        if let Some(identity_field) = &cli.identity_field {
            settings.identity_field = identity_field.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for CompareSettings {
    fn identity_field(&self) -> &str {
        &self.identity_field
    }

    fn excluded_fields(&self) -> &ExclusionSet {
        &self.excluded_fields
    }
}

impl Validate for CompareSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("identity_field", &self.identity_field)?;
        validation::validate_field_names("excluded_fields", self.excluded_fields.iter())
    }
}
