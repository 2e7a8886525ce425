use serde::{Deserialize, Serialize};

use crate::models::Version;

/// Identifies a markup strategy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorInfo {
    pub name: String,
    pub version: Version,
}

impl std::fmt::Display for ExtractorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}
