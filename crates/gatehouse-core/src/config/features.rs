//! Feature flags.

use serde::{Deserialize, Serialize};

/// Product feature switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Whether enterprise procedures may be called.
    #[serde(default)]
    pub enterprise_enabled: bool,
}
