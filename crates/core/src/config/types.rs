use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_MAX_VISIBLE_PAGES};
use crate::persistence::DEFAULT_STORAGE_KEY;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for any path outside `/api`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

/// Catalog storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite database file holding the key-value slots
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Slot the catalog is saved under
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// Maximum bytes across all slots (unlimited when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            key: default_storage_key(),
            quota_bytes: None,
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("chartshelf.db")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// List paging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_max_visible_pages")]
    pub max_visible_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            max_visible_pages: default_max_visible_pages(),
        }
    }
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_max_visible_pages() -> usize {
    DEFAULT_MAX_VISIBLE_PAGES
}

/// Config view for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: SanitizedServerConfig,
    pub storage: SanitizedStorageConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedServerConfig {
    pub port: u16,
}

/// Storage config without the database location
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedStorageConfig {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: SanitizedServerConfig {
                port: config.server.port,
            },
            storage: SanitizedStorageConfig {
                key: config.storage.key.clone(),
                quota_bytes: config.storage.quota_bytes,
            },
            pagination: config.pagination.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.server.static_dir.to_str().unwrap(), "public");
        assert_eq!(config.storage.path.to_str().unwrap(), "chartshelf.db");
        assert_eq!(config.storage.key, "rocksmith-file-manager-data");
        assert!(config.storage.quota_bytes.is_none());
        assert_eq!(config.pagination.items_per_page, 21);
        assert_eq!(config.pagination.max_visible_pages, 7);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
static_dir = "/srv/chartshelf"

[storage]
path = "/data/catalog.sqlite"
key = "my-charts"
quota_bytes = 5242880

[pagination]
items_per_page = 30
max_visible_pages = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.storage.path.to_str().unwrap(), "/data/catalog.sqlite");
        assert_eq!(config.storage.key, "my-charts");
        assert_eq!(config.storage.quota_bytes, Some(5_242_880));
        assert_eq!(config.pagination.items_per_page, 30);
        assert_eq!(config.pagination.max_visible_pages, 5);
    }

    #[test]
    fn test_deserialize_partial_section() {
        let toml = r#"
[pagination]
items_per_page = 50
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.pagination.items_per_page, 50);
        assert_eq!(config.pagination.max_visible_pages, 7);
    }

    #[test]
    fn test_deserialize_wrong_port_type_fails() {
        let toml = r#"
[server]
port = "eighty"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_paths() {
        let config = Config::default();
        let sanitized = SanitizedConfig::from(&config);
        let json = serde_json::to_value(&sanitized).unwrap();

        assert_eq!(json["server"]["port"], 8080);
        assert_eq!(json["storage"]["key"], "rocksmith-file-manager-data");
        assert!(json["storage"].get("path").is_none());
        assert!(json["storage"].get("quota_bytes").is_none());
        assert_eq!(json["pagination"]["items_per_page"], 21);
    }
}
