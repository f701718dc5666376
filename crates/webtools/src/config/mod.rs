use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the configuration file used when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "webtools";

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "WEBTOOLS";

#[webtools_derive::webtools_error]
pub enum ConfigError {
    #[status(INTERNAL_SERVER_ERROR)]
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered settings: a base file, then `<PREFIX>__*` variables on top.
///
/// Nested keys use double underscores, so `WEBTOOLS__LIMITS__MAX_JSON_SIZE` sets
/// `limits.max_json_size`. Variable values are parsed as numbers or booleans when they look like
/// one.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: PathBuf,
    required: bool,
    env_prefix: Cow<'static, str>,
    env_vars: Option<config::Map<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CONFIG_FILE),
            required: true,
            env_prefix: Cow::Borrowed(ENV_PREFIX),
            env_vars: None,
        }
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File to read; the format follows the extension, and a bare name matches any of them.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = path.into();
        self
    }

    /// Whether a missing file is an error (the default) or just an empty layer.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Takes overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// # Errors
    /// Fails when a required file is missing or unreadable, or when the merged settings do not
    /// fit `T`.
    pub fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let environment = Environment::with_prefix(&self.env_prefix)
            .separator("__")
            .convert_case(config::Case::Snake)
            .try_parsing(true)
            .source(self.env_vars.clone());

        info!(
            file = %self.file.display(),
            required = self.required,
            prefix = %self.env_prefix,
            "Loading config"
        );

        Config::builder()
            .add_source(File::from(self.file.as_path()).required(self.required))
            .add_source(environment)
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")
    }
}

/// Loads `T` from `path` (or `webtools.*` in the working directory) with `WEBTOOLS__*` overrides.
///
/// # Errors
/// See [`ConfigLoader::load`]; the file is required.
///
/// # Example
/// ```rust
/// use webtools::config::load_config;
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
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.file(path.as_ref()).load(),
        None => loader.load(),
    }
}
