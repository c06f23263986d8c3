//! Process tracking for monitoring ETL jobs
//! This version uses in-memory tracking instead of database

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
  Running,
  Success,
  Failed,
  CompletedWithErrors,
}

#[derive(Debug, Clone)]
pub struct ProcessInfo {
  pub process_name: String,
  pub start_time: DateTime<Utc>,
  pub end_time: Option<DateTime<Utc>>,
  pub state: ProcessState,
  pub records_processed: Option<usize>,
}

impl ProcessInfo {
  /// Elapsed time; `None` while still running
  pub fn duration(&self) -> Option<Duration> {
    self.end_time.map(|end| end - self.start_time)
  }
}

/// In-memory process tracker
#[derive(Clone, Default)]
pub struct ProcessTracker {
  processes: Arc<Mutex<Vec<ProcessInfo>>>,
}

impl ProcessTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn start(&self, process_name: &str) {
    let mut processes = self.processes.lock().await;
    processes.push(ProcessInfo {
      process_name: process_name.to_string(),
      start_time: Utc::now(),
      end_time: None,
      state: ProcessState::Running,
      records_processed: None,
    });
  }

  /// Close the most recently started process
  pub async fn complete(&self, state: ProcessState, records_processed: usize) {
    let mut processes = self.processes.lock().await;
    if let Some(last) = processes.last_mut() {
      last.state = state;
      last.end_time = Some(Utc::now());
      last.records_processed = Some(records_processed);
    }
  }

  pub async fn get_all(&self) -> Vec<ProcessInfo> {
    self.processes.lock().await.clone()
  }

  /// One line per tracked process, in start order
  pub async fn summary(&self) -> Vec<String> {
    self
      .get_all()
      .await
      .iter()
      .map(|p| {
        let records = p.records_processed.map_or_else(|| "-".to_string(), |n| n.to_string());
        let elapsed = p
          .duration()
          .map_or_else(|| "running".to_string(), |d| format!("{}ms", d.num_milliseconds()));
        format!("{}: {:?}, {} records, {}", p.process_name, p.state, records, elapsed)
      })
      .collect()
  }

  pub async fn log_summary(&self) {
    for line in self.summary().await {
      info!("  {}", line);
    }
  }
}
