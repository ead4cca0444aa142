//! Environment-driven configuration for the validation service: server
//! settings, the classification allow-list, the status service client, and
//! OpenTelemetry export settings.

use std::env;

// Defaults
const STATUS_API_TIMEOUT_SECS: u64 = 30;
const MAX_EVENT_SIZE_KB: usize = 1024;

/// Read an env var, falling back to `default` when unset.
fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Base configuration shared by the service shell and telemetry
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    // OTLP export settings
    pub otel_enabled: bool,
    pub otel_endpoint: String,
    pub otel_service_name: String,
    pub otel_service_version: String,
    pub otel_protocol: String,
    pub otel_sampler: String,
    pub otel_sample_ratio: f64,
    pub otel_metrics_interval_secs: u64,
}

/// Ingestion validator configuration
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    pub base: BaseConfig,
    /// Extension allow-list used for classification. Defaults to `pdf`.
    pub supported_extensions: Vec<String>,
    // Status service client configuration
    pub status_api_url: String,
    pub status_api_key: Option<String>,
    pub status_api_timeout_seconds: u64,
    /// Upper bound on the incoming event body.
    pub max_event_size_bytes: usize,
}

/// Application configuration (ingestion validator).
#[derive(Clone, Debug)]
pub struct Config(pub Box<ValidatorConfig>);

impl Config {
    fn inner(&self) -> &ValidatorConfig {
        &self.0
    }

    /// True when ENVIRONMENT/APP_ENV names a production deployment.
    pub fn is_production(&self) -> bool {
        matches!(
            self.inner().base.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ValidatorConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Accessors over the boxed inner config
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn supported_extensions(&self) -> &[String] {
        &self.inner().supported_extensions
    }

    pub fn status_api_url(&self) -> &str {
        &self.inner().status_api_url
    }

    pub fn status_api_key(&self) -> Option<&str> {
        self.inner().status_api_key.as_deref()
    }

    pub fn status_api_timeout_seconds(&self) -> u64 {
        self.inner().status_api_timeout_seconds
    }

    pub fn max_event_size_bytes(&self) -> usize {
        self.inner().max_event_size_bytes
    }

    pub fn otel_enabled(&self) -> bool {
        self.inner().base.otel_enabled
    }

    pub fn otel_endpoint(&self) -> Option<&str> {
        Some(self.inner().base.otel_endpoint.as_str()).filter(|ep| !ep.is_empty())
    }

    pub fn otel_service_name(&self) -> &str {
        &self.inner().base.otel_service_name
    }

    pub fn otel_service_version(&self) -> &str {
        &self.inner().base.otel_service_version
    }

    pub fn otel_protocol(&self) -> &str {
        &self.inner().base.otel_protocol
    }

    pub fn otel_sampler(&self) -> &str {
        &self.inner().base.otel_sampler
    }

    pub fn otel_sample_ratio(&self) -> f64 {
        self.inner().base.otel_sample_ratio
    }

    pub fn otel_metrics_interval_secs(&self) -> u64 {
        self.inner().base.otel_metrics_interval_secs
    }
}

/// Split a comma-separated env value into trimmed, lower-cased entries,
/// dropping empties.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ValidatorConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let base = BaseConfig {
            server_port: env_or("PORT", "4000")
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            otel_enabled: env_or("OTEL_ENABLED", "false")
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            otel_endpoint: env_or("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
            otel_service_name: env_or("OTEL_SERVICE_NAME", "docgate"),
            otel_service_version: env_or("OTEL_SERVICE_VERSION", env!("CARGO_PKG_VERSION")),
            otel_protocol: env_or("OTEL_EXPORTER_OTLP_PROTOCOL", "grpc"),
            otel_sampler: env_or("OTEL_SAMPLER", "always_on").to_lowercase(),
            otel_sample_ratio: env_or("OTEL_SAMPLE_RATIO", "1.0").parse().unwrap_or(1.0),
            otel_metrics_interval_secs: env_or("OTEL_METRICS_INTERVAL_SECS", "30")
                .parse()
                .unwrap_or(30),
        };

        let config = ValidatorConfig {
            base,
            supported_extensions: split_list(&env_or("SUPPORTED_EXTENSIONS", "pdf")),
            status_api_url: env::var("STATUS_API_URL")
                .map_err(|_| anyhow::anyhow!("STATUS_API_URL must be set"))?,
            status_api_key: env::var("STATUS_API_KEY").ok().filter(|s| !s.is_empty()),
            status_api_timeout_seconds: env_or(
                "STATUS_API_TIMEOUT_SECONDS",
                &STATUS_API_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .unwrap_or(STATUS_API_TIMEOUT_SECS),
            max_event_size_bytes: env_or("MAX_EVENT_SIZE_KB", &MAX_EVENT_SIZE_KB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_EVENT_SIZE_KB)
                * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.supported_extensions.is_empty() {
            anyhow::bail!("SUPPORTED_EXTENSIONS must contain at least one extension");
        }

        if !self.status_api_url.starts_with("http://")
            && !self.status_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "STATUS_API_URL must be an http(s) URL, got: {}",
                self.status_api_url
            );
        }

        if self.status_api_timeout_seconds == 0 {
            anyhow::bail!("STATUS_API_TIMEOUT_SECONDS must be at least 1");
        }

        if self.max_event_size_bytes == 0 {
            anyhow::bail!("MAX_EVENT_SIZE_KB must be at least 1");
        }

        Ok(())
    }
}
