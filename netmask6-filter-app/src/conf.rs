//! Simple configuration file manager

use serde::{Deserialize, Serialize};

/// Definition of all filters
#[derive(Debug, Deserialize, Serialize)]
pub struct Configuration {
    pub filters: Vec<FilterDefinition>,
}

/// General properties of a filter in its definition
#[derive(Debug, Deserialize, Serialize)]
pub struct FilterDefinition {
    pub name: String,
    pub netmask6: String, // network in CIDR notation, e.g. "2001:db8::/32"
    #[serde(default)]
    pub negate: bool,
}

/// Load configuration for the filter
///
/// # Arguments
/// * `path` - path to configuration file
///
/// Returns the configuration [`Configuration`] or an error ([`std::error::Error`]). Fails if the file cannot be opened or parsed
///
pub fn load_config(path: &str) -> Result<Configuration, Box<dyn std::error::Error>> {
    let f = std::fs::File::open(path).map_err(|err| format!("Cannot open file {}: {}", path, err))?;
    let conf = serde_yaml::from_reader(f)?;
    Ok(conf)
}
