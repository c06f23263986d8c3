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

//! Bounded-concurrency batch processing for per-symbol work

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::{LoaderError, LoaderResult};

/// Configuration for batch processing
#[derive(Debug, Clone)]
pub struct BatchConfig {
  /// Items per batch
  pub batch_size: usize,

  /// Items in flight at once inside a batch
  pub max_concurrent: usize,

  /// Whether to continue processing on errors
  pub continue_on_error: bool,

  /// Pause between batches in milliseconds
  pub batch_delay_ms: Option<u64>,
}

impl Default for BatchConfig {
  fn default() -> Self {
    Self { batch_size: 50, max_concurrent: 5, continue_on_error: true, batch_delay_ms: None }
  }
}

/// Outcome of a batch run.
///
/// `success` keeps the input order of the items that succeeded.
#[derive(Debug, Clone)]
pub struct BatchResult<T> {
  pub success: Vec<T>,

  /// Input index and error of every failed item
  pub failures: Vec<(usize, LoaderError)>,

  pub total_processed: usize,
}

impl<T> Default for BatchResult<T> {
  fn default() -> Self {
    Self { success: Vec::new(), failures: Vec::new(), total_processed: 0 }
  }
}

impl<T> BatchResult<T> {
  pub fn success_count(&self) -> usize {
    self.success.len()
  }

  pub fn failure_count(&self) -> usize {
    self.failures.len()
  }

  pub fn success_rate(&self) -> f64 {
    if self.total_processed == 0 {
      0.0
    } else {
      self.success_count() as f64 / self.total_processed as f64
    }
  }
}

#[derive(Debug, Clone)]
pub struct BatchProcessor {
  config: BatchConfig,
}

impl BatchProcessor {
  pub fn new(config: BatchConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &BatchConfig {
    &self.config
  }

  /// Run `processor` over every item, batch by batch.
  ///
  /// Inside a batch at most `max_concurrent` futures run at once and their
  /// results are collected in input order.
  pub async fn process<T, O, F>(&self, items: Vec<T>, processor: F) -> LoaderResult<BatchResult<O>>
  where
    T: Send,
    O: Send,
    F: Fn(T) -> BoxFuture<'static, LoaderResult<O>> + Send + Sync,
  {
    let batch_size = self.config.batch_size.max(1);
    let total = items.len();
    let total_batches = total.div_ceil(batch_size);
    let mut result = BatchResult { total_processed: total, ..BatchResult::default() };

    debug!("Processing {} items in {} batches of {}", total, total_batches, batch_size);

    let mut offset = 0;
    let mut remaining = items.into_iter().peekable();
    let mut batch_idx = 0;

    while remaining.peek().is_some() {
      let batch: Vec<T> = remaining.by_ref().take(batch_size).collect();
      let len = batch.len();
      batch_idx += 1;
      debug!("Processing batch {} of {}", batch_idx, total_batches);

      let outcomes = stream::iter(batch)
        .map(&processor)
        .buffered(self.config.max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await;

      for (idx, outcome) in outcomes.into_iter().enumerate() {
        let global_idx = offset + idx;
        match outcome {
          Ok(output) => result.success.push(output),
          Err(e) => {
            warn!("Item {} failed: {}", global_idx, e);
            if !self.config.continue_on_error {
              return Err(LoaderError::BatchProcessingError(format!(
                "Batch processing failed at item {}: {}",
                global_idx, e
              )));
            }
            result.failures.push((global_idx, e));
          }
        }
      }
      offset += len;

      if let Some(delay_ms) = self.config.batch_delay_ms {
        if remaining.peek().is_some() {
          tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }
      }
    }

    debug!(
      "Batch processing complete: {} successes, {} failures",
      result.success_count(),
      result.failure_count()
    );

    Ok(result)
  }
}
