use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Platform {
    #[serde(rename = "browser")]
    Browser,
    #[serde(rename = "node")]
    Node,
}

/// The slice of the host bundler's options this plugin cares about.
/// `define` is the only field the plugin writes back to.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    pub platform: Platform,
    pub entry_points: Vec<String>,
    pub define: HashMap<String, String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            platform: Platform::Browser,
            entry_points: vec![],
            define: HashMap::new(),
        }
    }
}

impl BuildOptions {
    pub fn from_literal_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
