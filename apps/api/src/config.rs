use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::render::compile::DEFAULT_TIMEOUT;
use crate::render::EngineMode;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// `tectonic` (default) runs every template through Tectonic;
    /// `native` runs each template's own engine.
    pub latex_engine: EngineMode,
    pub compile_timeout: Duration,
    /// Parent for per-compilation scratch directories. System temp dir if unset.
    pub scratch_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let compile_timeout_secs = match var("LATEX_COMPILE_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .context("LATEX_COMPILE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT.as_secs(),
        };
        if compile_timeout_secs == 0 {
            return Err(anyhow!("LATEX_COMPILE_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            latex_engine: var("LATEX_ENGINE")
                .unwrap_or_else(|| "tectonic".to_string())
                .parse::<EngineMode>()
                .map_err(|e| anyhow!("LATEX_ENGINE: {e}"))?,
            compile_timeout: Duration::from_secs(compile_timeout_secs),
            scratch_dir: var("LATEX_SCRATCH_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(matches!(config.latex_engine, EngineMode::Tectonic));
        assert_eq!(config.compile_timeout, Duration::from_secs(120));
        assert!(config.scratch_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("LATEX_ENGINE", "native"),
            ("LATEX_COMPILE_TIMEOUT_SECS", "30"),
            ("LATEX_SCRATCH_DIR", "/var/tmp/resumes"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert!(matches!(config.latex_engine, EngineMode::Native));
        assert_eq!(config.compile_timeout, Duration::from_secs(30));
        assert_eq!(config.scratch_dir, Some(PathBuf::from("/var/tmp/resumes")));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("LATEX_ENGINE", "word")]).is_err());
        assert!(config_from(&[("LATEX_COMPILE_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("LATEX_COMPILE_TIMEOUT_SECS", "-5")]).is_err());
    }

    #[test]
    fn test_blank_scratch_dir_means_system_temp() {
        let config = config_from(&[("LATEX_SCRATCH_DIR", "  ")]).unwrap();
        assert!(config.scratch_dir.is_none());
    }
}
