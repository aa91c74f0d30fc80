//! Response-level types.

use serde::{Deserialize, Serialize};

use super::Block;

/// One raw response from the analysis service.
///
/// The synchronous mode returns exactly one of these per document; the
/// asynchronous mode returns a paginated sequence of them, joined by
/// continuation tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResponse {
    /// All blocks reported for this page of results.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,

    /// Document-level information reported alongside the blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// Job state, present only on asynchronous results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,

    /// Continuation token; present when more result pages follow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    /// Service-provided detail, populated on failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl AnalysisResponse {
    /// Create a response holding the given blocks and nothing else.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Default::default()
        }
    }

    /// Whether more result pages follow this one.
    pub fn has_more_pages(&self) -> bool {
        self.next_token.is_some()
    }

    /// Number of blocks in this response.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Document-level metadata reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    /// Number of pages in the analyzed document.
    #[serde(default)]
    pub pages: u32,
}

/// State of an asynchronous analysis job.
///
/// Status strings this version does not model parse to
/// [`JobStatus::Unknown`], which the job driver treats as still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Accepted, not yet running
    Submitted,
    /// Running
    InProgress,
    /// Finished; results available
    Succeeded,
    /// Finished; no results
    Failed,
    /// Any status this version does not model
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether this status ends the job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}
