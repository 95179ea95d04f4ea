// -
// Configuration sources

/// Environment variable naming an optional configuration file
pub(crate) const CONFIG_PATH_ENV: &str = "GRID_CONFIG_PATH";

/// Prefix for environment overrides, e.g. `GRID__NEIGHBORS__DISTANCE`
pub(crate) const CONFIG_ENV_PREFIX: &str = "GRID";
pub(crate) const CONFIG_ENV_SEPARATOR: &str = "__";

// -
// Neighbor enumeration defaults

pub(crate) const DEFAULT_NEIGHBOR_DISTANCE: u32 = 1;
pub(crate) const DEFAULT_NEIGHBOR_MAX_DISTANCE: u32 = 16;

// -
// Rendering

/// Rendering of a cell with no materialized content
pub(crate) const ABSENT_RENDER: &str = "None";
