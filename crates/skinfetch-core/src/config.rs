use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

pub const DEFAULT_REMOTE_BASE_URL: &str =
    "https://static.wikia.nocookie.net/leagueoflegends/images";
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://ddragon.leagueoflegends.com";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per candidate fetch (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/skinfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum number of asset jobs running at once.
    pub max_concurrent: usize,
    /// Delay after each successful download before the worker takes more work.
    pub pacing_ms: u64,
    /// JPEG quality used when re-encoding downloaded artwork (1..=100).
    pub jpeg_quality: u8,
    /// Where artifacts are written. Unset means `~/.local/share/skinfetch/wallpapers`.
    #[serde(default)]
    pub artifact_dir: Option<PathBuf>,
    /// Base address of the sharded image host.
    pub remote_base_url: String,
    /// Base address of the catalog source (versions, champions, skins).
    pub catalog_base_url: String,
    /// Catalog locale, e.g. `en_US`.
    pub locale: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 10,
            pacing_ms: 10,
            jpeg_quality: 100,
            artifact_dir: None,
            remote_base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            locale: "en_US".to_string(),
            retry: None,
        }
    }
}

impl SyncConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent == 0 {
            anyhow::bail!("max_concurrent must be at least 1");
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            anyhow::bail!("jpeg_quality must be in 1..=100, got {}", self.jpeg_quality);
        }
        for (key, value) in [
            ("remote_base_url", &self.remote_base_url),
            ("catalog_base_url", &self.catalog_base_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| anyhow::anyhow!("{} is not a valid URL ({}): {}", key, value, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("{} must be http or https, got {}", key, parsed.scheme());
            }
        }
        Ok(())
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    /// Resolved artifact directory (configured value or the XDG data default).
    pub fn artifact_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.artifact_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("skinfetch")?;
        Ok(xdg_dirs.get_data_home().join("wallpapers"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("skinfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SyncConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
