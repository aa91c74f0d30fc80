//! High-level analysis façade.
//!
//! [`Analyzer`] ties the pieces together: it calls the service in the
//! right mode, drives asynchronous jobs, and hands back an
//! [`AnalysisOutput`] ready for extraction.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::dump::{to_json, JsonFormat};
use crate::error::Result;
use crate::extract::{form_fields, plain_text, tables, Grid};
use crate::graph::BlockMap;
use crate::model::AnalysisResponse;
use crate::service::{
    AnalysisService, DocumentLocation, FeatureType, JobDriver, PollOptions, StagingStore,
};

/// Runs documents through the analysis service.
///
/// # Example
///
/// ```no_run
/// use docgrid::{Analyzer, FeatureType};
/// # struct MyService;
/// # impl docgrid::AnalysisService for MyService {
/// #     fn detect_text(&self, _: &[u8]) -> docgrid::Result<docgrid::AnalysisResponse> { unimplemented!() }
/// #     fn analyze(&self, _: &[u8], _: &[FeatureType]) -> docgrid::Result<docgrid::AnalysisResponse> { unimplemented!() }
/// #     fn start_analysis(&self, _: &docgrid::DocumentLocation, _: &[FeatureType]) -> docgrid::Result<String> { unimplemented!() }
/// #     fn fetch_analysis(&self, _: &str, _: Option<&str>) -> docgrid::Result<docgrid::AnalysisResponse> { unimplemented!() }
/// # }
///
/// fn main() -> docgrid::Result<()> {
///     let analyzer = Analyzer::new(MyService).with_features(vec![FeatureType::Tables]);
///     let document = std::fs::read("scan.png")?;
///     let output = analyzer.analyze_bytes(&document)?;
///     for grid in output.tables() {
///         println!("{}", grid.to_tsv());
///     }
///     Ok(())
/// }
/// ```
pub struct Analyzer<S> {
    service: S,
    features: Vec<FeatureType>,
    poll_options: PollOptions,
}

impl<S: AnalysisService> Analyzer<S> {
    /// Create an analyzer requesting tables and forms.
    pub fn new(service: S) -> Self {
        Self {
            service,
            features: vec![FeatureType::Tables, FeatureType::Forms],
            poll_options: PollOptions::default(),
        }
    }

    /// Set which analysis features to request.
    pub fn with_features(mut self, features: Vec<FeatureType>) -> Self {
        self.features = features;
        self
    }

    /// Set polling behavior for the asynchronous path.
    pub fn with_poll_options(mut self, options: PollOptions) -> Self {
        self.poll_options = options;
        self
    }

    /// Synchronous text detection: no feature analysis, lines only.
    pub fn detect_text(&self, document: &[u8]) -> Result<AnalysisOutput> {
        let response = self.service.detect_text(document)?;
        Ok(AnalysisOutput::from_response(response))
    }

    /// Synchronous analysis of a single-page document.
    pub fn analyze_bytes(&self, document: &[u8]) -> Result<AnalysisOutput> {
        let response = self.service.analyze(document, &self.features)?;
        Ok(AnalysisOutput::from_response(response))
    }

    /// Asynchronous analysis of a staged document (multi-page path).
    ///
    /// Stages the bytes first; a staging failure aborts before any job is
    /// submitted. Then submits the job and drives it to completion,
    /// collecting all result pages.
    pub fn analyze_stored(
        &self,
        store: &dyn StagingStore,
        document: &[u8],
        location: &DocumentLocation,
    ) -> Result<AnalysisOutput> {
        store.upload(document, location)?;
        log::debug!("staged {} bytes at {}", document.len(), location);

        let job_id = self.service.start_analysis(location, &self.features)?;
        let driver = JobDriver::with_options(&self.service, self.poll_options.clone());
        let job = driver.run(&job_id)?;
        Ok(AnalysisOutput::from_pages(job.pages))
    }
}

/// Extraction results for one analyzed document.
///
/// Wraps the raw response pages together with the normalized block lookup;
/// the accessors run the extractors on demand.
#[derive(Debug)]
pub struct AnalysisOutput {
    pages: Vec<AnalysisResponse>,
    map: BlockMap,
}

/// Structured extraction shape used by [`AnalysisOutput::to_json`].
#[derive(Debug, Serialize)]
struct Extraction {
    text: String,
    tables: Vec<Grid>,
    form_fields: BTreeMap<String, String>,
}

impl AnalysisOutput {
    /// Wrap a single synchronous response.
    pub fn from_response(response: AnalysisResponse) -> Self {
        Self::from_pages(vec![response])
    }

    /// Wrap an ordered list of result pages.
    pub fn from_pages(pages: Vec<AnalysisResponse>) -> Self {
        let map = BlockMap::from_pages(&pages);
        Self { pages, map }
    }

    /// The raw response pages, in delivery order.
    pub fn pages(&self) -> &[AnalysisResponse] {
        &self.pages
    }

    /// The normalized block lookup.
    pub fn block_map(&self) -> &BlockMap {
        &self.map
    }

    /// Page count reported by the service, falling back to the number of
    /// result pages.
    pub fn page_count(&self) -> u32 {
        self.pages
            .iter()
            .find_map(|p| p.document_metadata)
            .map(|m| m.pages)
            .unwrap_or(self.pages.len() as u32)
    }

    /// All line text, newline-joined.
    pub fn text(&self) -> String {
        plain_text(&self.map)
    }

    /// Every reconstructed table, in source order.
    pub fn tables(&self) -> Vec<Grid> {
        tables(&self.map)
    }

    /// Form fields as a key/value map.
    pub fn form_fields(&self) -> HashMap<String, String> {
        form_fields(&self.map)
    }

    /// Serialize the structured extraction (text, tables, form fields).
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let extraction = Extraction {
            text: self.text(),
            tables: self.tables(),
            form_fields: self.form_fields().into_iter().collect(),
        };
        to_json(&extraction, format)
    }

    /// Serialize the raw response pages exactly as the service sent them.
    pub fn raw_json(&self, format: JsonFormat) -> Result<String> {
        to_json(&self.pages, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockType};

    fn line(id: &str, text: &str) -> Block {
        let mut block = Block::new(id, BlockType::Line);
        block.text = text.to_string();
        block
    }

    #[test]
    fn test_output_from_pages_merges() {
        let page1 = AnalysisResponse::with_blocks(vec![line("a", "one")]);
        let page2 = AnalysisResponse::with_blocks(vec![line("b", "two")]);

        let output = AnalysisOutput::from_pages(vec![page1, page2]);
        assert_eq!(output.text(), "one\ntwo");
        assert_eq!(output.page_count(), 2);
    }

    #[test]
    fn test_structured_json_contains_all_sections() {
        let output =
            AnalysisOutput::from_response(AnalysisResponse::with_blocks(vec![line("a", "hi")]));
        let json = output.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"text\""));
        assert!(json.contains("\"tables\""));
        assert!(json.contains("\"form_fields\""));
    }

    #[test]
    fn test_raw_json_round_trips() {
        let pages = vec![AnalysisResponse::with_blocks(vec![line("a", "hi")])];
        let output = AnalysisOutput::from_pages(pages.clone());

        let json = output.raw_json(JsonFormat::Pretty).unwrap();
        let reparsed: Vec<AnalysisResponse> = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, pages);
    }
}
