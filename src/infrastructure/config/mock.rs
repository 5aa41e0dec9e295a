//! Mock backend server settings.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MockConfig {
    /// Socket address the mock backend listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Seed for reproducible artifacts; entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bind() -> String {
    "127.0.0.1:4040".into()
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            seed: None,
        }
    }
}
