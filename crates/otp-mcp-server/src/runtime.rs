//! Runtime configuration
//!
//! Configuration is read from an optional YAML file, with `OTP_MCP_` prefixed environment
//! variables taking precedence.

mod category_source;
mod config;
pub mod logging;
mod schema_source;
mod schemas;

use std::path::Path;

pub use category_source::CategorySource;
pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
pub use schema_source::SchemaSource;

/// Prefix of the environment variables read into the config
const ENV_PREFIX: &str = "OTP_MCP_";

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Read configuration from environment variables only
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    let content = std::fs::read_to_string(yaml_path.as_ref()).map_err(|e| {
        figment::Error::from(format!(
            "failed to read config file '{}': {}",
            yaml_path.as_ref().display(),
            e
        ))
    })?;

    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::string(&content))
        .extract()
}
