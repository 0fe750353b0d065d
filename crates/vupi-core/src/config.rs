//! Configuration module
//!
//! Settings are read from the environment (a `.env` file is honoured through
//! dotenvy) once at startup and validated before any collaborator is built.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DB_PORT: u16 = 5432;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_BODY_SIZE_MB: usize = 25;
const STORAGE_TIMEOUT_SECS: u64 = 30;

/// Bucket used when `IMAGE_BUCKET` is unset.
pub const DEFAULT_IMAGE_BUCKET: &str = "vupi-questions-images";

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "pretty" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub host: String,
    pub server_port: u16,
    pub environment: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_body_size_bytes: usize,
    pub log_format: LogFormat,
}

/// Question ingestion service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Object store configuration
    pub storage_backend: StorageBackend,
    pub image_bucket: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, Supabase S3, etc.)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub storage_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn as_service(&self) -> &ServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment().to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn host(&self) -> &str {
        &self.as_service().base.host
    }

    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().base.db_timeout_seconds
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.as_service().base.max_body_size_bytes
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_service().base.log_format
    }

    pub fn database_url(&self) -> &str {
        &self.as_service().database_url
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_service().storage_backend
    }

    pub fn image_bucket(&self) -> &str {
        &self.as_service().image_bucket
    }

    pub fn supabase_url(&self) -> Option<&str> {
        self.as_service().supabase_url.as_deref()
    }

    pub fn supabase_key(&self) -> Option<&str> {
        self.as_service().supabase_key.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_service().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_service().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_service().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_service().local_storage_base_url.as_deref()
    }

    pub fn storage_timeout_secs(&self) -> u64 {
        self.as_service().storage_timeout_secs
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` passes `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let log_format = match var("LOG_FORMAT") {
            Some(s) => s.parse()?,
            None => LogFormat::default(),
        };

        let max_body_size_mb: usize = parse_number(&var, "MAX_BODY_SIZE_MB", MAX_BODY_SIZE_MB)?;

        let base = BaseConfig {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port: parse_number(&var, "PORT", DEFAULT_PORT)?,
            environment,
            db_max_connections: parse_number(&var, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_number(&var, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            max_body_size_bytes: max_body_size_mb
                .checked_mul(1024 * 1024)
                .ok_or_else(|| anyhow::anyhow!("MAX_BODY_SIZE_MB is too large"))?,
            log_format,
        };

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&var)?,
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(s) => s.parse()?,
            None => StorageBackend::default(),
        };

        let config = ServiceConfig {
            base,
            database_url,
            storage_backend,
            image_bucket: var("IMAGE_BUCKET").unwrap_or_else(|| DEFAULT_IMAGE_BUCKET.to_string()),
            supabase_url: var("SUPABASE_URL"),
            supabase_key: var("SUPABASE_KEY"),
            s3_region: var("S3_REGION").or_else(|| var("AWS_REGION")),
            s3_endpoint: var("S3_ENDPOINT"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            storage_timeout_secs: parse_number(&var, "STORAGE_TIMEOUT_SECS", STORAGE_TIMEOUT_SECS)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.database_url.starts_with("postgres://")
            || self.database_url.starts_with("postgresql://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS cannot be 0"));
        }

        if self.base.db_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS cannot be 0"));
        }

        if self.base.max_body_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_SIZE_MB cannot be 0"));
        }

        if self.storage_timeout_secs == 0 {
            return Err(anyhow::anyhow!("STORAGE_TIMEOUT_SECS cannot be 0"));
        }

        if self.image_bucket.contains('/') {
            return Err(anyhow::anyhow!("IMAGE_BUCKET must not contain '/'"));
        }

        match self.storage_backend {
            StorageBackend::Supabase => {
                if self.supabase_url.is_none() || self.supabase_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "SUPABASE_URL and SUPABASE_KEY must be set when using the supabase storage backend"
                    ));
                }
            }
            StorageBackend::S3 => {
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Parse a numeric setting, using `default` only when `key` is unset.
fn parse_number<F, T>(var: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

/// Compose a connection URL from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`
/// and `DB_PASSWORD`. Credentials are percent-encoded.
fn database_url_from_parts<F>(var: &F) -> Result<String, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    let host = var("DB_HOST")
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL or DB_HOST must be set"))?;
    let name = var("DB_NAME").ok_or_else(|| anyhow::anyhow!("DB_NAME must be set"))?;
    let user = var("DB_USER").ok_or_else(|| anyhow::anyhow!("DB_USER must be set"))?;
    let port: u16 = parse_number(var, "DB_PORT", DEFAULT_DB_PORT)?;

    let credentials = match var("DB_PASSWORD") {
        Some(password) => format!(
            "{}:{}",
            urlencoding::encode(&user),
            urlencoding::encode(&password)
        ),
        None => urlencoding::encode(&user).into_owned(),
    };

    Ok(format!(
        "postgresql://{}@{}:{}/{}",
        credentials, host, port, name
    ))
}
