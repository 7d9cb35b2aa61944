use serde::{Deserialize, Serialize};

use crate::scoring::RulesConfig;

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub rules: Option<RulesConfig>,
}

impl Config {
    /// Rule parameters with built-in defaults filling anything unset
    pub fn effective_rules(&self) -> RulesConfig {
        self.rules.clone().unwrap_or_default()
    }
}
