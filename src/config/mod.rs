//! Configuration resolution for the inference endpoint and model name.
//!
//! Values are resolved once at startup with the following precedence,
//! highest first:
//!
//! 1. `--model` on the command line (model name only)
//! 2. Process environment (`OLLAMA_API_URL`, `OLLAMA_DEFAULT_MODEL`)
//! 3. The `.env` file next to the executable
//! 4. Compiled-in defaults
//!
//! Resolution never fails. When nothing was configured the user gets an
//! informational hint on stderr and the defaults are used.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "gemma3:1b";

pub const API_URL_VAR: &str = "OLLAMA_API_URL";
pub const MODEL_VAR: &str = "OLLAMA_DEFAULT_MODEL";

const CONFIG_FILE_NAME: &str = ".env";

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cli,
    Environment,
    ConfigFile,
    Default,
}

/// Effective settings for one run. Immutable once resolved.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub api_url: Url,
    pub model: String,
    pub api_url_origin: Origin,
    pub model_origin: Origin,
    /// An `OLLAMA_API_URL` value that failed to parse, and where it came from.
    pub rejected_api_url: Option<(String, Origin)>,
}

impl Configuration {
    /// True when neither the environment nor the config file supplied a value.
    pub fn is_defaulted(&self) -> bool {
        let configured = |origin: Origin| matches!(origin, Origin::Environment | Origin::ConfigFile);
        !configured(self.api_url_origin) && !configured(self.model_origin)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: DEFAULT_MODEL.to_string(),
            api_url_origin: Origin::Default,
            model_origin: Origin::Default,
            rejected_api_url: None,
        }
    }
}

fn default_api_url() -> Url {
    // The constant is a literal that always parses.
    Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("default API URL is valid"))
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

pub struct ConfigResolver {
    config_file: Option<PathBuf>,
    env: EnvLookup,
}

impl ConfigResolver {
    /// Resolver reading the real process environment and the `.env` file
    /// in the executable's directory.
    pub fn new() -> Self {
        Self {
            config_file: default_config_path(),
            env: Box::new(|key| std::env::var(key).ok()),
        }
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn without_config_file(mut self) -> Self {
        self.config_file = None;
        self
    }

    /// Replace the environment lookup. Used by tests to avoid touching
    /// process-wide state.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.env = Box::new(lookup);
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Resolve the configuration, printing the defaults hint if applicable.
    pub fn resolve(&self, cli_model: Option<&str>) -> Configuration {
        let config = self.resolve_quiet(cli_model);
        for line in self.defaults_hint(&config).unwrap_or_default() {
            eprintln!("{}", line);
        }
        config
    }

    /// Lines explaining why defaults are in effect, or `None` when the
    /// environment or the config file supplied a value.
    pub fn defaults_hint(&self, config: &Configuration) -> Option<Vec<String>> {
        if !config.is_defaulted() {
            return None;
        }

        let rejected = move |wanted: Origin| {
            config
                .rejected_api_url
                .as_ref()
                .filter(|(_, origin)| *origin == wanted)
                .map(|(raw, _)| raw.as_str())
        };
        let file_state = match (self.config_file.as_deref(), rejected(Origin::ConfigFile)) {
            (Some(path), Some(raw)) => {
                format!("'{}' sets an invalid {} '{}'", path.display(), API_URL_VAR, raw)
            }
            (Some(path), None) if path.exists() => {
                format!("'{}' sets neither {} nor {}", path.display(), API_URL_VAR, MODEL_VAR)
            }
            _ => format!("No '{}' file found", CONFIG_FILE_NAME),
        };
        let env_state = match rejected(Origin::Environment) {
            Some(raw) => format!("the environment's {} '{}' is not a valid URL", API_URL_VAR, raw),
            None => "no environment variables set".to_string(),
        };
        let location = self
            .config_file
            .as_deref()
            .and_then(Path::parent)
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "the executable's directory".to_string());

        Some(vec![
            format!("Info: {} and {}. Using default settings.", file_state, env_state),
            format!(
                "Info: Consider copying '.env.example' to '{}' in {} and customizing it.",
                CONFIG_FILE_NAME, location
            ),
        ])
    }

    /// Resolve without emitting the defaults hint.
    pub fn resolve_quiet(&self, cli_model: Option<&str>) -> Configuration {
        let file_vars = self.read_config_file();
        let lookup = |key: &str| -> Option<(String, Origin)> {
            non_empty((self.env)(key))
                .map(|v| (v, Origin::Environment))
                .or_else(|| non_empty(file_vars.get(key).cloned()).map(|v| (v, Origin::ConfigFile)))
        };

        let (api_url, api_url_origin, rejected_api_url) = resolve_api_url(&lookup);

        let (model, model_origin) = match non_empty(cli_model.map(str::to_string)) {
            Some(model) => (model, Origin::Cli),
            None => lookup(MODEL_VAR).unwrap_or_else(|| (DEFAULT_MODEL.to_string(), Origin::Default)),
        };

        debug!(%api_url, ?api_url_origin, %model, ?model_origin, "configuration resolved");

        Configuration {
            api_url,
            model,
            api_url_origin,
            model_origin,
            rejected_api_url,
        }
    }

    fn read_config_file(&self) -> HashMap<String, String> {
        let Some(path) = self.config_file.as_deref() else {
            return HashMap::new();
        };
        if !path.exists() {
            return HashMap::new();
        }
        match dotenvy::from_path_iter(path) {
            Ok(iter) => iter
                .filter_map(|item| match item {
                    Ok(pair) => Some(pair),
                    Err(e) => {
                        warn!("Skipping malformed line in {}: {}", path.display(), e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                warn!("Failed to read config file {}: {}", path.display(), e);
                HashMap::new()
            }
        }
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the `.env` file into the process environment without overriding
/// variables that are already set.
pub fn load_config_file_into_env(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = dotenvy::from_path(path) {
        warn!("Failed to load {}: {}", path.display(), e);
    }
}

/// `.env` in the directory containing the running executable.
pub fn default_config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Returns the endpoint, its origin, and any value that had to be rejected.
fn resolve_api_url(
    lookup: &impl Fn(&str) -> Option<(String, Origin)>,
) -> (Url, Origin, Option<(String, Origin)>) {
    let Some((raw, origin)) = lookup(API_URL_VAR) else {
        return (default_api_url(), Origin::Default, None);
    };
    match Url::parse(raw.trim()) {
        Ok(url) => (url, origin, None),
        Err(e) => {
            eprintln!(
                "Warning: Ignoring invalid {} value '{}' ({}). Using the default endpoint.",
                API_URL_VAR, raw, e
            );
            (default_api_url(), Origin::Default, Some((raw, origin)))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
