use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_taskdeck_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiSection,
    pub ui: UiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Base URL of the remote task collection (GET/POST {url}, PUT/DELETE {url}/{id}).
    pub task_store_url: String,
    /// Base URL of the character API.
    pub character_api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSection {
    /// IANA timezone used for the relative date labels.
    pub timezone: String,
    /// Seconds before a transient error banner auto-hides.
    pub notice_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSection {
                task_store_url: "https://693843864618a71d77cf99b8.mockapi.io/Api".to_string(),
                character_api_url: "https://rickandmortyapi.com/api".to_string(),
            },
            ui: UiSection {
                timezone: "America/Chicago".to_string(),
                notice_secs: 4,
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_taskdeck_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
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
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}
