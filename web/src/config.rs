use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tracing::debug;

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ListenConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_DATABASE: &str = "locations.db";

fn default_listen() -> ListenConfig {
    ListenConfig {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
    }
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_cors() -> bool {
    true
}

// This handles the case where the `listen` block is PRESENT, but a field may be missing.
fn deserialize_listen_with_defaults<'de, D>(deserializer: D) -> Result<ListenConfig, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct PartialListenConfig {
        host: Option<String>,
        port: Option<u16>,
    }

    let partial_config = PartialListenConfig::deserialize(deserializer)?;

    Ok(ListenConfig {
        host: partial_config
            .host
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: partial_config.port.unwrap_or(DEFAULT_PORT),
    })
}

/// The settings for a single named environment (e.g. `dev` or `prod`)
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    #[serde(default = "default_listen")]
    #[serde(deserialize_with = "deserialize_listen_with_defaults")]
    pub(crate) listen: ListenConfig,
    #[serde(default = "default_database")]
    pub(crate) database: String,
    /// Whether to answer cross-origin requests from any origin
    #[serde(default = "default_cors")]
    pub(crate) cors: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            database: default_database(),
            cors: default_cors(),
        }
    }
}

/// The config file that is used when none is given on the command line
pub(crate) fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "quotidian", "waypoint")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}

fn parse(contents: &str, envname: &str) -> Result<EnvConfig> {
    let mut configs: HashMap<String, EnvConfig> =
        serde_yaml::from_str(contents).with_context(|| "Failed to parse config file")?;
    configs
        .remove(envname)
        .ok_or_else(|| anyhow!("No configuration found for environment '{envname}'"))
}

/// Load the configuration for `envname`.
///
/// An explicitly requested file must exist. When no file is given and there is no
/// file at [default_config_path()], the built-in defaults are used.
pub(crate) fn load(path: Option<&Path>, envname: &str) -> Result<EnvConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(p) => p,
            None => {
                debug!("No config file found, using default configuration");
                return Ok(EnvConfig::default());
            }
        },
    };
    debug!(?path, envname, "Loading configuration");
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Unable to read config file {}", path.display()))?;
    parse(&contents, envname)
}
