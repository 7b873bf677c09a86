//! Configuration module
//!
//! Settings for the API server, upload policy, storage roots, and the
//! conversion worker pool. Everything is read from the environment (with
//! `.env` support) so nothing is hardcoded into logic.

use std::env;

const SERVER_PORT: u16 = 8000;
const MAX_FILE_SIZE_MB: usize = 1000;
const CONVERSION_MAX_WORKERS: usize = 4;
const CONVERSION_QUEUE_CAPACITY: usize = 256;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Upload validation ceiling in bytes.
    pub max_file_size_bytes: usize,
    /// Accepted upload extensions, lowercased, without the leading dot.
    pub allowed_extensions: Vec<String>,
    /// Root directory for raw uploads.
    pub upload_dir: String,
    /// Root directory for converted artifacts.
    pub output_dir: String,
    pub conversion_max_workers: usize,
    pub conversion_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "vsd,vsdx".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "outputs".to_string()),
            conversion_max_workers: env::var("CONVERSION_MAX_WORKERS")
                .unwrap_or_else(|_| CONVERSION_MAX_WORKERS.to_string())
                .parse()
                .unwrap_or(CONVERSION_MAX_WORKERS),
            conversion_queue_capacity: env::var("CONVERSION_QUEUE_CAPACITY")
                .unwrap_or_else(|_| CONVERSION_QUEUE_CAPACITY.to_string())
                .parse()
                .unwrap_or(CONVERSION_QUEUE_CAPACITY),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }
        if self.upload_dir.trim().is_empty() || self.output_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR and OUTPUT_DIR must be set"));
        }
        if self.upload_dir == self.output_dir {
            return Err(anyhow::anyhow!(
                "UPLOAD_DIR and OUTPUT_DIR must be different directories"
            ));
        }
        if self.conversion_max_workers == 0 {
            return Err(anyhow::anyhow!(
                "CONVERSION_MAX_WORKERS must be greater than 0"
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_extensions: vec!["vsd".to_string(), "vsdx".to_string()],
            upload_dir: "uploads".to_string(),
            output_dir: "outputs".to_string(),
            conversion_max_workers: CONVERSION_MAX_WORKERS,
            conversion_queue_capacity: CONVERSION_QUEUE_CAPACITY,
        }
    }
}
