//! Asynchronous job polling.
//!
//! Large and multi-page documents are analyzed by a job the service runs in
//! the background. [`JobDriver`] owns the client side of that flow: query
//! status at a fixed interval until the job is terminal, then follow
//! continuation tokens until every result page has been collected.
//!
//! Job state and pagination are two orthogonal signals. A SUCCEEDED report
//! can still carry a continuation token; the driver keeps fetching in that
//! case, without waiting, because the remaining pages already exist on the
//! service side. Waits happen only after a non-terminal status report.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::graph::BlockMap;
use crate::model::{AnalysisResponse, JobStatus};

use super::AnalysisService;

/// Polling configuration for asynchronous jobs.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Wait between status queries while the job is running.
    pub interval: Duration,

    /// Maximum number of status queries before giving up.
    pub max_attempts: u32,
}

impl PollOptions {
    /// Create poll options with defaults (5 s interval, 60 attempts).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait between status queries.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the maximum number of status queries.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// A finished job with all of its result pages.
#[derive(Debug, Clone)]
pub struct CompletedJob {
    /// Job id the service assigned at submission.
    pub job_id: String,

    /// Result pages, in delivery order.
    pub pages: Vec<AnalysisResponse>,

    /// Total status queries performed, including page fetches.
    pub attempts: u32,

    /// When polling started.
    pub submitted_at: DateTime<Utc>,

    /// When the final page arrived.
    pub completed_at: DateTime<Utc>,
}

impl CompletedJob {
    /// Build the merged block lookup across all pages.
    pub fn block_map(&self) -> BlockMap {
        BlockMap::from_pages(&self.pages)
    }

    /// Total blocks across all pages.
    pub fn total_blocks(&self) -> usize {
        self.pages.iter().map(|p| p.block_count()).sum()
    }
}

/// Drives one asynchronous job to completion.
///
/// One job per invocation, synchronously; the only suspension points are
/// the fixed-interval sleeps between status queries. There is no
/// cancellation beyond the attempt budget.
pub struct JobDriver<'a, S: AnalysisService + ?Sized> {
    service: &'a S,
    options: PollOptions,
}

impl<'a, S: AnalysisService + ?Sized> JobDriver<'a, S> {
    /// Create a driver with default poll options.
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            options: PollOptions::default(),
        }
    }

    /// Create a driver with the given poll options.
    pub fn with_options(service: &'a S, options: PollOptions) -> Self {
        Self { service, options }
    }

    /// Poll the job until it is terminal and collect every result page.
    ///
    /// Outcomes, all distinguishable by the caller:
    /// - every page collected: `Ok(CompletedJob)`
    /// - service reports FAILED: [`Error::JobFailed`] with the service's
    ///   status message
    /// - attempt budget exhausted while still running: [`Error::JobTimedOut`]
    /// - job succeeded but returned no blocks: [`Error::EmptyAnalysis`]
    pub fn run(&self, job_id: &str) -> Result<CompletedJob> {
        let submitted_at = Utc::now();
        let mut pages: Vec<AnalysisResponse> = Vec::new();
        let mut next_token: Option<String> = None;
        let mut attempts = 0u32;

        loop {
            let response = self.service.fetch_analysis(job_id, next_token.as_deref())?;
            attempts += 1;

            let status = response.job_status.unwrap_or(JobStatus::InProgress);
            log::debug!("job {}: {:?} after {} checks", job_id, status, attempts);

            match status {
                JobStatus::Failed => {
                    let message = response
                        .status_message
                        .unwrap_or_else(|| "no status message provided".to_string());
                    return Err(Error::JobFailed(message));
                }
                JobStatus::Succeeded => {
                    next_token = response.next_token.clone();
                    pages.push(response);
                    if next_token.is_none() {
                        break;
                    }
                }
                JobStatus::Submitted | JobStatus::InProgress | JobStatus::Unknown => {
                    if attempts >= self.options.max_attempts {
                        return Err(Error::JobTimedOut { attempts });
                    }
                    thread::sleep(self.options.interval);
                }
            }
        }

        if pages.iter().all(|p| p.blocks.is_empty()) {
            return Err(Error::EmptyAnalysis);
        }

        let job = CompletedJob {
            job_id: job_id.to_string(),
            pages,
            attempts,
            submitted_at,
            completed_at: Utc::now(),
        };
        log::info!(
            "job {} complete: {} pages, {} blocks, {} status checks",
            job.job_id,
            job.pages.len(),
            job.total_blocks(),
            job.attempts
        );
        Ok(job)
    }
}
