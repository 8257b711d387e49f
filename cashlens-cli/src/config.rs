use anyhow::{bail, Context, Result};
use cashlens_core::CategorizationPolicy;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{cashlens_home, ensure_cashlens_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub report: ReportSection,
    pub analysis: AnalysisSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSection {
    pub format: OutputFormat,
    /// Print skipped-row warnings under the report
    pub show_warnings: bool,
    pub color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSection {
    /// "amount-sign" (default) or "type-name"
    pub categorization: CategorizationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_warnings: true,
            color: true,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(cashlens_home()?.join("config.toml"))
}

/// Load from `explicit` if given, else from the default location.
/// A missing default file means defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => {
            if !p.exists() {
                bail!("config not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };

    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => ensure_cashlens_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}
