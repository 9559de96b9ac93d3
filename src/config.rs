use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Value the Apps Script URL holds in freshly generated deployments.
pub const APPS_SCRIPT_PLACEHOLDER: &str = "YOUR_WEBAPP_URL_HERE";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub teams_file: PathBuf,
    pub static_dir: PathBuf,
    pub validation: ValidationMode,
    pub max_body_size: usize,
    pub log_level: String,
    pub sync: SyncConfig,
    pub sync_timeout: Duration,
}

/// How strictly `POST /api/submit-form` checks its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationMode {
    /// `companyName` and `selectionYear` must be present and non-empty.
    Strict,
    /// Any JSON object is accepted.
    Lenient,
}

/// External spreadsheet integration. `Disabled` is a normal operating mode.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncConfig {
    Disabled,
    Enabled { url: String },
}

impl SyncConfig {
    /// Interpret a raw `APPS_SCRIPT_URL` value.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        let Some(url) = raw.map(str::trim) else {
            return Ok(SyncConfig::Disabled);
        };

        if url.is_empty() || url == APPS_SCRIPT_PLACEHOLDER {
            return Ok(SyncConfig::Disabled);
        }

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!("Invalid APPS_SCRIPT_URL: expected an http(s) URL, got '{url}'"));
        }

        Ok(SyncConfig::Enabled {
            url: url.to_string(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, SyncConfig::Enabled { .. })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("FORMSYNC_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMSYNC_HOST: {e}"))?;

        let port: u16 = env_or("FORMSYNC_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid FORMSYNC_PORT: {e}"))?;

        let data_dir = PathBuf::from(env_or("FORMSYNC_DATA_DIR", "data"));
        let teams_file = PathBuf::from(env_or("FORMSYNC_TEAMS_FILE", "team-list.json"));
        let static_dir = PathBuf::from(env_or("FORMSYNC_STATIC_DIR", "public"));

        let validation = match env_or("FORMSYNC_VALIDATION", "strict").as_str() {
            "lenient" => ValidationMode::Lenient,
            "strict" => ValidationMode::Strict,
            other => return Err(format!("Invalid FORMSYNC_VALIDATION: '{other}'")),
        };

        let max_body_size: usize = env_or("FORMSYNC_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORMSYNC_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("FORMSYNC_LOG_LEVEL", "info");

        let sync = SyncConfig::parse(std::env::var("APPS_SCRIPT_URL").ok().as_deref())?;

        let sync_timeout_secs: u64 = env_or("FORMSYNC_SYNC_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid FORMSYNC_SYNC_TIMEOUT_SECS: {e}"))?;

        Ok(Config {
            host,
            port,
            data_dir,
            teams_file,
            static_dir,
            validation,
            max_body_size,
            log_level,
            sync,
            sync_timeout: Duration::from_secs(sync_timeout_secs),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
