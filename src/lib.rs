//! # docgrid
//!
//! Structured extraction from document-analysis block graphs.
//!
//! Cloud OCR / document-analysis services return a flat, graph-shaped
//! payload: a list of typed blocks (lines, words, tables, cells, form
//! keys) connected by id-based relationship edges. This library normalizes
//! that graph and extracts useful structure from it (plain text,
//! reconstructed tables, and form key/value pairs), and drives the
//! service's asynchronous multi-page job flow.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docgrid::{extract_tables, parse_response_file};
//!
//! fn main() -> docgrid::Result<()> {
//!     // Parse a saved raw response
//!     let response = parse_response_file("response.json")?;
//!
//!     // Reconstruct every table as a grid of strings
//!     for grid in extract_tables(&response) {
//!         println!("{}", grid.to_tsv());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table reconstruction**: dense rectangular grids from CELL blocks,
//!   with word-level fallback for tokenized cells
//! - **Form extraction**: KEY_VALUE_SET blocks to key/value maps
//! - **Malformed-input tolerance**: dangling ids, missing fields, and
//!   duplicate cell coordinates are handled, never raised
//! - **Async job driver**: fixed-interval polling with a bounded attempt
//!   budget and continuation-token pagination
//! - **Service seams**: transport stays behind traits; no SDK dependency

pub mod analyzer;
pub mod dump;
pub mod error;
pub mod extract;
pub mod graph;
pub mod model;
pub mod service;

// Re-export commonly used types
pub use analyzer::{AnalysisOutput, Analyzer};
pub use dump::{to_json, JsonFormat};
pub use error::{Error, Result};
pub use extract::{block_text, form_fields, lines, plain_text, reconstruct_table, tables, Grid};
pub use graph::BlockMap;
pub use model::{
    AnalysisResponse, Block, BlockType, DocumentMetadata, EntityType, JobStatus, Relationship,
    RelationshipType,
};
pub use service::{
    verify_credentials, AnalysisService, CompletedJob, CredentialValidator, Credentials,
    DocumentLocation, FeatureType, JobDriver, PollOptions, StagingStore,
};

use std::collections::HashMap;
use std::path::Path;

/// Parse a raw analysis response from JSON text.
pub fn parse_response(json: &str) -> Result<AnalysisResponse> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a raw analysis response from a saved JSON file.
///
/// # Example
///
/// ```no_run
/// use docgrid::parse_response_file;
///
/// let response = parse_response_file("response.json").unwrap();
/// println!("Blocks: {}", response.block_count());
/// ```
pub fn parse_response_file<P: AsRef<Path>>(path: P) -> Result<AnalysisResponse> {
    let json = std::fs::read_to_string(path)?;
    parse_response(&json)
}

/// Parse an ordered list of saved response files (one per result page).
pub fn parse_response_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<AnalysisResponse>> {
    paths.iter().map(parse_response_file).collect()
}

/// Extract all line text from a response, newline-joined.
pub fn extract_text(response: &AnalysisResponse) -> String {
    plain_text(&BlockMap::from_response(response))
}

/// Reconstruct every table in a response.
pub fn extract_tables(response: &AnalysisResponse) -> Vec<Grid> {
    tables(&BlockMap::from_response(response))
}

/// Extract form fields from a response.
pub fn extract_form_fields(response: &AnalysisResponse) -> HashMap<String, String> {
    form_fields(&BlockMap::from_response(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_lenient() {
        // Responses with unknown fields and missing blocks still parse.
        let response = parse_response(r#"{"AnalyzeDocumentModelVersion": "1.0"}"#).unwrap();
        assert_eq!(response.block_count(), 0);
    }

    #[test]
    fn test_parse_response_rejects_invalid_json() {
        assert!(matches!(parse_response("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_extract_text_end_to_end() {
        let response = parse_response(
            r#"{"Blocks": [
                {"Id": "1", "BlockType": "LINE", "Text": "Invoice"},
                {"Id": "2", "BlockType": "LINE", "Text": "Total: 42"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response), "Invoice\nTotal: 42");
    }

    #[test]
    fn test_extract_tables_end_to_end() {
        let response = parse_response(
            r#"{"Blocks": [
                {"Id": "t", "BlockType": "TABLE",
                 "Relationships": [{"Type": "CHILD", "Ids": ["c1", "c2"]}]},
                {"Id": "c1", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1, "Text": "a"},
                {"Id": "c2", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2, "Text": "b"}
            ]}"#,
        )
        .unwrap();

        let grids = extract_tables(&response);
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].rows, vec![vec!["a".to_string(), "b".to_string()]]);
    }
}
