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

//! Base traits and types for data loaders

use crate::{LoaderResult, ProcessTracker};
use async_trait::async_trait;
use fiindo_client::FiindoClient;
use std::sync::Arc;

/// Configuration for data loaders
#[derive(Debug, Clone)]
pub struct LoaderConfig {
  /// Maximum concurrent symbols in flight
  pub max_concurrent_requests: usize,

  /// Enable progress bars
  pub show_progress: bool,

  /// Enable process state tracking
  pub track_process: bool,

  /// Symbols per batch
  pub batch_size: usize,
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self { max_concurrent_requests: 5, show_progress: true, track_process: true, batch_size: 50 }
  }
}

/// Shared context for all loaders
pub struct LoaderContext {
  pub client: Arc<FiindoClient>,
  pub config: LoaderConfig,
  pub process_tracker: Option<ProcessTracker>,
}

impl LoaderContext {
  pub fn new(client: Arc<FiindoClient>, config: LoaderConfig) -> Self {
    Self { client, config, process_tracker: None }
  }

  pub fn with_process_tracker(mut self, tracker: ProcessTracker) -> Self {
    self.process_tracker = Some(tracker);
    self
  }
}

/// Base trait for all data loaders
#[async_trait]
pub trait DataLoader: Send + Sync {
  /// The type of data this loader processes
  type Input;

  /// The result type after loading
  type Output;

  /// Load data from the given input
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output>;

  /// Validate input before loading
  async fn validate_input(&self, _input: &Self::Input) -> LoaderResult<()> {
    Ok(())
  }

  /// Get loader name for logging/tracking
  fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client() -> Arc<FiindoClient> {
    let config = fiindo_core::Config::default_with_token("first.last".to_string());
    Arc::new(FiindoClient::new(config).expect("Failed to create client"))
  }

  #[test]
  fn test_loader_config_default() {
    let config = LoaderConfig::default();
    assert_eq!(config.max_concurrent_requests, 5);
    assert!(config.show_progress);
    assert!(config.track_process);
    assert_eq!(config.batch_size, 50);
  }

  #[test]
  fn test_loader_config_debug() {
    let config = LoaderConfig::default();
    let debug_str = format!("{:?}", config);
    assert!(debug_str.contains("LoaderConfig"));
    assert!(debug_str.contains("max_concurrent_requests"));
  }

  #[test]
  fn test_loader_context_new() {
    let context = LoaderContext::new(client(), LoaderConfig::default());
    assert!(context.process_tracker.is_none());
    assert_eq!(context.config.batch_size, 50);
  }

  #[test]
  fn test_loader_context_builder_chain() {
    let loader_config = LoaderConfig { batch_size: 10, ..LoaderConfig::default() };
    let context =
      LoaderContext::new(client(), loader_config).with_process_tracker(ProcessTracker::new());

    assert!(context.process_tracker.is_some());
    assert_eq!(context.config.batch_size, 10);
  }
}
