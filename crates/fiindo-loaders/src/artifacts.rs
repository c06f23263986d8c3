//! Timestamped JSON files exchanged between pipeline stages

use crate::{LoaderError, LoaderResult};
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp format embedded in artifact file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Summary of the latest fetch, overwritten on every run
pub const COLLECTION_SUMMARY_FILE: &str = "collection_summary.json";

/// Artifact families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
  FinancialData,
  TickerStatistics,
  IndustryAggregation,
}

impl ArtifactKind {
  pub fn prefix(&self) -> &'static str {
    match self {
      ArtifactKind::FinancialData => "financial_data",
      ArtifactKind::TickerStatistics => "ticker_statistics",
      ArtifactKind::IndustryAggregation => "industry_aggregation",
    }
  }

  pub fn file_name(&self, timestamp: &str) -> String {
    format!("{}_{}.json", self.prefix(), timestamp)
  }

  fn matches(&self, file_name: &str) -> bool {
    file_name
      .strip_prefix(self.prefix())
      .and_then(|rest| rest.strip_prefix('_'))
      .is_some_and(|rest| rest.ends_with(".json"))
  }
}

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn timestamp() -> String {
  Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn artifact_path(dir: &Path, kind: ArtifactKind, timestamp: &str) -> PathBuf {
  dir.join(kind.file_name(timestamp))
}

/// Write `value` as pretty-printed JSON, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> LoaderResult<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, serde_json::to_string_pretty(value)?)?;
  info!("Wrote {}", path.display());
  Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> LoaderResult<T> {
  let content = fs::read_to_string(path)
    .map_err(|e| LoaderError::IoError(format!("{}: {}", path.display(), e)))?;
  let value = serde_json::from_str(&content)
    .map_err(|e| LoaderError::SerializationError(format!("{}: {}", path.display(), e)))?;
  debug!("Read {}", path.display());
  Ok(value)
}

/// Lexicographically greatest artifact of `kind` in `dir`, which is also the newest
pub fn latest_artifact(dir: &Path, kind: ArtifactKind) -> LoaderResult<Option<PathBuf>> {
  if !dir.exists() {
    return Ok(None);
  }

  let mut latest: Option<String> = None;
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    if !entry.file_type()?.is_file() {
      continue;
    }
    let Some(name) = entry.file_name().to_str().map(str::to_string) else {
      continue;
    };
    if kind.matches(&name) && latest.as_ref().is_none_or(|current| name > *current) {
      latest = Some(name);
    }
  }

  Ok(latest.map(|name| dir.join(name)))
}

/// `explicit` when given, otherwise the latest artifact of `kind`
pub fn resolve_artifact(
  explicit: Option<&Path>,
  dir: &Path,
  kind: ArtifactKind,
) -> LoaderResult<PathBuf> {
  if let Some(path) = explicit {
    return Ok(path.to_path_buf());
  }
  latest_artifact(dir, kind)?.ok_or_else(|| {
    LoaderError::InvalidData(format!("No {} files found in {}", kind.prefix(), dir.display()))
  })
}
