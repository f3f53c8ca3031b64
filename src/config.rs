//! Resolver policy configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::DEFAULT_MAX_NEIGHBOURS;

/// Tunable resolver policy. All values have working defaults; a TOML
/// file only needs to name the knobs it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Radius of the object/neighbour search, meters
    pub object_radius_m: u32,

    /// Radius of the highway search, meters
    pub highway_radius_m: u32,

    /// Radius of the place-point locality fallback, meters
    pub locality_radius_m: u32,

    /// Neighbour cap applied when a request does not set one
    pub default_max_neighbours: usize,

    /// Re-issue a failed index query once before surfacing the failure
    pub resend_on_fail: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            object_radius_m: 1000,
            highway_radius_m: 25,
            locality_radius_m: 1000,
            default_max_neighbours: DEFAULT_MAX_NEIGHBOURS,
            resend_on_fail: true,
        }
    }
}

impl ResolverConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: ResolverConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
