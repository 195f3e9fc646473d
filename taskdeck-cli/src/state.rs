use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn taskdeck_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".taskdeck"))
}

pub fn ensure_taskdeck_home() -> Result<PathBuf> {
    let dir = taskdeck_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn logs_dir() -> Result<PathBuf> {
    let dir = ensure_taskdeck_home()?.join("logs");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
