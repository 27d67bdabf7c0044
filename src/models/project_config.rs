//! Project settings file model.

use crate::constants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub project: ProjectSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Credentials profile this project deploys with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl ProjectFile {
    /// Configured profile name, falling back to `default`.
    pub fn profile_name(&self) -> &str {
        self.project
            .profile
            .as_deref()
            .unwrap_or(constants::DEFAULT_PROFILE)
    }
}
