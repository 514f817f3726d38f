use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const CONFIG_FILE: &str = "config/inventory.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_collection_path")]
    pub collection_path: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_collection_path() -> String {
    "/api/computadores".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection_path: default_collection_path(),
        }
    }
}

impl ApiConfig {
    /// Absolute URL of the collection endpoint.
    pub fn collection_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.collection_path.trim_matches('/');
        format!("{}/{}", base, path)
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    /// Load from `config/inventory.toml` (optional) and `INVENTORY__*` env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix("INVENTORY").separator("__"))
            .build()?
            .try_deserialize()
            .map_err(|e| {
                ConfigError::Message(format!(
                    "La configuración no pudo cargarse desde {} ni del entorno: {}",
                    CONFIG_FILE, e
                ))
            })
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
