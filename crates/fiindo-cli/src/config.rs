use anyhow::{Context, Result};
use fiindo_core::Config as CoreConfig;
use fiindo_loaders::IndustryFilter;
use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "./data";
const KNOWN_SYMBOLS_FILE: &str = "known_symbols.json";

#[derive(Debug, Clone)]
pub struct Config {
  pub api_config: CoreConfig,
  /// Only needed by commands that touch the database
  pub database_url: Option<String>,
  pub data_dir: PathBuf,
  pub known_symbols_path: PathBuf,
  pub target_industries: IndustryFilter,
}

impl Config {
  pub fn from_env() -> Result<Self> {
    let api_config = CoreConfig::from_env().context("Failed to load Fiindo API configuration")?;
    Ok(Self::with_api_config(api_config, |key| env::var(key).ok()))
  }

  /// Build from an explicit variable source
  pub fn with_api_config<F>(api_config: CoreConfig, var: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    let data_dir =
      PathBuf::from(non_empty("FIINDO_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
    let known_symbols_path = non_empty("FIINDO_KNOWN_SYMBOLS")
      .map(PathBuf::from)
      .unwrap_or_else(|| data_dir.join(KNOWN_SYMBOLS_FILE));
    let target_industries = non_empty("FIINDO_TARGET_INDUSTRIES")
      .map(|list| IndustryFilter::parse(&list))
      .unwrap_or_default();

    Self {
      api_config,
      database_url: non_empty("DATABASE_URL"),
      data_dir,
      known_symbols_path,
      target_industries,
    }
  }

  pub fn require_database_url(&self) -> Result<&str> {
    self.database_url.as_deref().context("DATABASE_URL environment variable not set")
  }
}
