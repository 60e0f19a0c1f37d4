use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use recipe_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "recipes.toml";
pub const ENV_PREFIX: &str = "RECIPES_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub index_dir: PathBuf,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self { index_dir: PathBuf::from("./index"), engine: EngineConfig::default() }
    }
}

impl Settings {
    /// Defaults, then `recipes.toml`, then `RECIPES_*` variables (`RECIPES_ENGINE__MAX_FEATURES=...`).
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self> {
        Self::figment()
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to load settings: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_defaults() {
        let s: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::string("index_dir = \"/tmp/idx\"\n[engine]\nsnippet_window = 4\n"))
            .extract()
            .unwrap();
        assert_eq!(s.index_dir, PathBuf::from("/tmp/idx"));
        assert_eq!(s.engine.snippet_window, 4);
        assert_eq!(s.engine.max_features, 5000);
    }

    #[test]
    fn defaults_extract_cleanly() {
        let s: Settings = Figment::from(Serialized::defaults(Settings::default())).extract().unwrap();
        assert_eq!(s, Settings::default());
    }
}
