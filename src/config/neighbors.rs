use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_NEIGHBOR_DISTANCE;
use crate::constants::DEFAULT_NEIGHBOR_MAX_DISTANCE;
use crate::Error;
use crate::Result;

/// Defaults applied by `Cell::neighbors()`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NeighborConfig {
    /// Per-axis radius of the hyper-cube enumerated around a cell
    #[serde(default = "default_distance")]
    pub distance: u32,

    /// Whether unset cells are yielded
    #[serde(default = "default_include_empty")]
    pub include_empty: bool,

    /// Upper bound accepted for `distance`; the enumeration grows as
    /// `(2 * distance + 1) ^ dimensions`
    #[serde(default = "default_max_distance")]
    pub max_distance: u32,
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            include_empty: default_include_empty(),
            max_distance: default_max_distance(),
        }
    }
}

impl NeighborConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.max_distance == 0 {
            return Err(Error::Config(ConfigError::Message(
                "neighbors.max_distance must be greater than 0".into(),
            )));
        }

        if self.distance > self.max_distance {
            return Err(Error::Config(ConfigError::Message(format!(
                "neighbors.distance ({}) exceeds neighbors.max_distance ({})",
                self.distance, self.max_distance
            ))));
        }

        Ok(())
    }
}

fn default_distance() -> u32 {
    DEFAULT_NEIGHBOR_DISTANCE
}
fn default_include_empty() -> bool {
    true
}
fn default_max_distance() -> u32 {
    DEFAULT_NEIGHBOR_MAX_DISTANCE
}
