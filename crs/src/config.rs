//! Matrix configuration

use crs_core::GrowthPolicy;

/// Construction and growth settings of a [`CrsMatrix`](crate::CrsMatrix)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CrsConfig {
    /// Prefix of the logical buffer names reported to residency trackers
    pub name: String,
    /// How rows grow when an insertion overflows them
    pub growth: GrowthPolicy,
    /// Capacity given to rows created by `resize`
    pub initial_row_capacity: usize,
}

impl CrsConfig {
    /// Default logical name of a matrix
    pub const DEFAULT_NAME: &'static str = "crs";

    /// Create config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logical buffer name prefix
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the row growth multiplier (clamped to at least 1)
    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth = GrowthPolicy::new(factor);
        self
    }

    /// Set the capacity of rows created by `resize`
    pub fn with_initial_row_capacity(mut self, capacity: usize) -> Self {
        self.initial_row_capacity = capacity;
        self
    }

    /// Parse a config from JSON; missing fields take their defaults
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the config to JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for CrsConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            growth: GrowthPolicy::default(),
            initial_row_capacity: 0,
        }
    }
}
