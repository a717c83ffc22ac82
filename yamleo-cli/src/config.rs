//! Layered settings for `yamleo`.
//!
//! Values are merged from lowest to highest precedence: compiled defaults,
//! a TOML file, `YAMLEO_*` environment variables, then command-line
//! overrides. Nested keys in the environment are separated by `__`, for
//! example `YAMLEO_AUDIT__PREVIEW_LIMIT=10`.

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;
use yamleo::{ArrayPolicy, DEFAULT_MARKER};

use crate::cli::{Cli, Commands};
use crate::error::{Result, YamleoError};

/// File read from the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "yamleo.toml";

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "YAMLEO_";

/// Effective settings for one invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Array handling when flattening catalogs.
    pub arrays: ArrayPolicy,
    /// Text appended to leaves copied in by `sync`.
    pub marker: String,
    /// Settings for the unused-key audit.
    pub audit: AuditSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arrays: ArrayPolicy::default(),
            marker: DEFAULT_MARKER.to_owned(),
            audit: AuditSettings::default(),
        }
    }
}

/// Settings for `yamleo unused`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    /// Source file extensions scanned for key usage, without the dot.
    pub extensions: Vec<String>,
    /// Number of unused keys printed before the listing is truncated.
    pub preview_limit: usize,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            extensions: ["vue", "ts", "js"].map(str::to_owned).to_vec(),
            preview_limit: 50,
        }
    }
}

/// Values supplied on the command line; unset fields leave lower layers alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    /// `--arrays`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrays: Option<ArrayPolicy>,
    /// `sync --marker`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Overrides {
    /// Collects the overrides carried by parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let marker = match &cli.command {
            Commands::Sync(args) => args.marker.clone(),
            Commands::Compare(_)
            | Commands::Sort(_)
            | Commands::ToExcel(_)
            | Commands::FromExcel(_)
            | Commands::Unused(_) => None,
        };
        Self {
            arrays: cli.arrays.map(ArrayPolicy::from),
            marker,
        }
    }
}

/// Loads settings from every layer.
///
/// `config_path` names the TOML file to read; when absent, [`CONFIG_FILE_NAME`]
/// is read from the working directory if it exists.
///
/// # Errors
///
/// Returns [`YamleoError::ConfigNotFound`] when `config_path` does not exist
/// and [`YamleoError::Config`] when a layer fails to parse or the merged
/// values do not fit [`Settings`].
pub fn load_settings(config_path: Option<&Utf8Path>, overrides: &Overrides) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    match config_path {
        Some(path) if !path.is_file() => {
            return Err(YamleoError::ConfigNotFound(path.to_path_buf()));
        }
        Some(path) => {
            debug!(path = %path, "reading configuration file");
            figment = figment.merge(Toml::file(path));
        }
        None if Utf8Path::new(CONFIG_FILE_NAME).is_file() => {
            debug!(path = CONFIG_FILE_NAME, "reading configuration file");
            figment = figment.merge(Toml::file(CONFIG_FILE_NAME));
        }
        None => {}
    }
    let settings = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Serialized::defaults(overrides))
        .extract()?;
    Ok(settings)
}
