use std::{fs, path::Path};

use geoscan_core::{geometry::DistanceUnit, record::FieldNames};
use serde::Deserialize;
use thiserror::Error;

/// An error that happened while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read configuration file `{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration file `{path}' is malformed")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings that can be given in a TOML configuration file
///
/// ```toml
/// default_unit = "mi"
///
/// [fields]
/// location = "location"
/// region = "region"
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Names of the document members holding geo attributes
    pub fields: FieldNames,

    /// Unit of distances given without one
    pub default_unit: DistanceUnit,
}

impl Config {
    /// Loads the configuration from the given file or returns the default
    /// configuration if there is none
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
