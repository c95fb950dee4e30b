use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tally_finance::{RecategoriseMode, RecategoriseOptions};

use crate::state::{ensure_tally_home, tally_home};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter used when RUST_LOG is unset
    pub log_level: String,
    pub business: BusinessSection,
    pub recategorise: RecategoriseSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessSection {
    /// e.g. "12 Main St, Swords, Co. Dublin"
    pub primary_address: String,
    pub fallback_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecategoriseSection {
    pub batch_size: usize,
    pub uncategorised_threshold: u8,
    pub miscellaneous_threshold: u8,
    pub reclassify_all_threshold: u8,
    pub invoice_window_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            business: BusinessSection::default(),
            recategorise: RecategoriseSection::default(),
        }
    }
}

impl Default for RecategoriseSection {
    fn default() -> Self {
        Self {
            batch_size: 20,
            uncategorised_threshold: RecategoriseMode::UncategorisedOnly.default_threshold(),
            miscellaneous_threshold: RecategoriseMode::ReclassifyMiscellaneous.default_threshold(),
            reclassify_all_threshold: RecategoriseMode::ReclassifyAll.default_threshold(),
            invoice_window_days: 2,
        }
    }
}

impl BusinessSection {
    fn non_empty(s: &str) -> Option<&str> {
        Some(s.trim()).filter(|s| !s.is_empty())
    }

    pub fn primary(&self) -> Option<&str> {
        Self::non_empty(&self.primary_address)
    }

    pub fn fallback(&self) -> Option<&str> {
        Self::non_empty(&self.fallback_address)
    }
}

impl RecategoriseSection {
    pub fn options(&self, mode: RecategoriseMode) -> RecategoriseOptions {
        let threshold = match mode {
            RecategoriseMode::UncategorisedOnly => self.uncategorised_threshold,
            RecategoriseMode::ReclassifyMiscellaneous => self.miscellaneous_threshold,
            RecategoriseMode::ReclassifyAll => self.reclassify_all_threshold,
        };
        RecategoriseOptions::new(mode)
            .with_threshold(threshold)
            .with_batch_size(self.batch_size)
            .with_invoice_window(self.invoice_window_days)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_tally_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
