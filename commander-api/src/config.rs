use std::env;
use std::net::SocketAddr;

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid COMMANDER_BIND {value}: {reason}")]
    InvalidBind { value: String, reason: String },
    #[error("unsupported COMMANDER_STORAGE {0}; use memory or postgres")]
    UnsupportedStorage(String),
    #[error("DATABASE_URL is required when COMMANDER_STORAGE=postgres")]
    MissingDatabaseUrl,
    #[error("COMMANDER_ROUTE_PREFIX must start with '/' and not end with '/': {0}")]
    InvalidRoutePrefix(String),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub route_prefix: String,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub max_body_bytes: usize,
    pub log_json: bool,
    pub seed_sample_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            route_prefix: "/api/commands".to_string(),
            storage: StorageBackend::Memory,
            database_url: None,
            db_max_connections: 5,
            max_body_bytes: 16 * 1024,
            log_json: false,
            seed_sample_data: false,
        }
    }
}

impl ApiConfig {
    /// 从环境变量加载，未设置的项取默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = match lookup("COMMANDER_BIND") {
            Some(raw) => raw.trim().parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidBind {
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.bind_addr,
        };

        let route_prefix = lookup("COMMANDER_ROUTE_PREFIX")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.route_prefix);
        if !route_prefix.starts_with('/') || route_prefix.len() < 2 || route_prefix.ends_with('/') {
            return Err(ConfigError::InvalidRoutePrefix(route_prefix));
        }

        let storage = match lookup("COMMANDER_STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => StorageBackend::Memory,
            Some("postgres") => StorageBackend::Postgres,
            Some(other) => return Err(ConfigError::UnsupportedStorage(other.to_string())),
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self {
            bind_addr,
            route_prefix,
            storage,
            database_url,
            db_max_connections: parse_or(
                &lookup,
                "COMMANDER_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            ),
            max_body_bytes: parse_or(&lookup, "COMMANDER_MAX_BODY_BYTES", defaults.max_body_bytes),
            log_json: bool_or(&lookup, "COMMANDER_LOG_JSON", defaults.log_json),
            seed_sample_data: bool_or(&lookup, "COMMANDER_SEED", defaults.seed_sample_data),
        })
    }
}

fn bool_or(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    lookup(name)
        .and_then(|v| match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    lookup(name)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
