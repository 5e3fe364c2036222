use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "agenda";
/// Prefix of environment variable overrides (`AGENDA__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "AGENDA";

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config {
        #[source]
        source: config::ConfigError,
        context: Option<Cow<'static, str>>,
    },
}

trait ConfigErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError>;
}

impl<T> ConfigErrorExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Loads a configuration structure from an optional file plus environment overrides.
///
/// Layers, lowest precedence first:
/// 1. **Defaults**: whatever `T` falls back to through `#[serde(default)]`.
/// 2. **File**: `path`, or `agenda` in the working directory when `None`. The extension may be
///    omitted, any format supported by the `config` crate is probed. A missing file is fine.
/// 3. **Environment**: variables prefixed with `AGENDA`, nested with double underscores
///    (`AGENDA__DATABASE__URL` maps to `database.url`).
///
/// # Errors
/// Returns an error if a present file cannot be parsed or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use agenda_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    debug!("Loading config from {}", effective_path.display());

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
