use anyhow::{Context, Result};
use budget_ingest::{DEFAULT_CUTOFF, DEFAULT_TIMEZONE, ParseOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "budget-email.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub statements: StatementsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementsSection {
    /// Local time; only transactions strictly after it are kept
    pub cutoff: String,
    /// IANA zone for statement timestamps and the cutoff
    pub timezone: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

impl Default for StatementsSection {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Config {
    pub fn parse_options(&self) -> Result<ParseOptions> {
        ParseOptions::from_strs(&self.statements.cutoff, &self.statements.timezone)
            .context("invalid [statements] config")
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.server.bind))
    }
}

pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Read the config file; a missing file means defaults.
pub fn load_config(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(p: &Path) -> Result<()> {
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("budget-email-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_are_usable() {
        let cfg = Config::default();
        assert_eq!(cfg.bind_addr().unwrap().port(), 3000);
        let opts = cfg.parse_options().unwrap();
        assert_eq!(opts.cutoff.to_rfc3339(), "2024-06-24T00:00:00+02:00");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[server]\nbind = \"127.0.0.1:8080\"\n").unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.statements, StatementsSection::default());
    }

    #[test]
    fn test_custom_cutoff_and_zone() {
        let cfg: Config = toml::from_str(
            "[statements]\ncutoff = \"2025-01-01T00:00:00\"\ntimezone = \"UTC\"\n",
        )
        .unwrap();
        let opts = cfg.parse_options().unwrap();
        assert_eq!(opts.cutoff.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_bad_values_are_errors() {
        let mut cfg = Config::default();
        cfg.statements.timezone = "Nowhere/Special".to_string();
        assert!(cfg.parse_options().is_err());

        cfg.server.bind = "localhost".to_string();
        assert!(cfg.bind_addr().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = load_config(&scratch("does-not-exist.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let p = scratch("roundtrip.toml");
        let mut cfg = Config::default();
        cfg.statements.timezone = "UTC".to_string();
        save_config(&p, &cfg).unwrap();

        let loaded = load_config(&p).unwrap();
        let _ = fs::remove_file(&p);
        assert_eq!(loaded, cfg);
    }
}
