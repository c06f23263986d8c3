/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Local cache of symbol to industry classifications.
//!
//! Stored as a pretty-printed JSON object with sorted keys so the file diffs
//! cleanly between runs.

use crate::industry::IndustryLookup;
use crate::LoaderResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of recording a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolUpdate {
  Added,
  Updated,
  Unchanged,
}

/// File-backed symbol to industry map
#[derive(Debug, Clone)]
pub struct KnownSymbols {
  path: PathBuf,
  entries: BTreeMap<String, String>,
  dirty: bool,
}

impl KnownSymbols {
  /// Load the cache at `path`.
  ///
  /// A missing file is an empty cache. An unreadable or corrupt file is also
  /// treated as empty, with a warning; it is overwritten on the next save.
  pub fn load(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let entries = match fs::read_to_string(&path) {
      Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
        Ok(entries) => entries,
        Err(e) => {
          warn!("Could not parse {}, starting with empty cache: {}", path.display(), e);
          BTreeMap::new()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!("No known symbols file at {}", path.display());
        BTreeMap::new()
      }
      Err(e) => {
        warn!("Could not read {}, starting with empty cache: {}", path.display(), e);
        BTreeMap::new()
      }
    };

    info!("Loaded {} known symbols from {}", entries.len(), path.display());
    Self { path, entries, dirty: false }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get(&self, symbol: &str) -> Option<&str> {
    self.entries.get(symbol).map(String::as_str)
  }

  pub fn entries(&self) -> &BTreeMap<String, String> {
    &self.entries
  }

  /// Record a classification; only new symbols or changed industries mark the cache dirty
  pub fn update(&mut self, symbol: &str, industry: &str) -> SymbolUpdate {
    let outcome = match self.entries.get(symbol) {
      None => SymbolUpdate::Added,
      Some(existing) if existing != industry => SymbolUpdate::Updated,
      Some(_) => return SymbolUpdate::Unchanged,
    };

    self.entries.insert(symbol.to_string(), industry.to_string());
    self.dirty = true;
    debug!("{:?} {}: {}", outcome, symbol, industry);
    outcome
  }

  /// Symbols classified into `industry`
  pub fn count_in(&self, industry: &str) -> usize {
    self.entries.values().filter(|i| i.as_str() == industry).count()
  }

  /// Write the cache if anything changed. Returns whether a write happened.
  pub fn save(&mut self) -> LoaderResult<bool> {
    if !self.dirty {
      return Ok(false);
    }
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
    self.dirty = false;
    info!("Known symbols saved to {}", self.path.display());
    Ok(true)
  }
}

impl IndustryLookup for KnownSymbols {
  fn industry(&self, symbol: &str) -> Option<String> {
    self.get(symbol).map(str::to_string)
  }
}
