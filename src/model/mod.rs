//! Wire-facing model types for analysis service responses.
//!
//! These types mirror the JSON shapes the service produces. Deserialization
//! is deliberately lenient: every optional field defaults to an empty value,
//! because partial or inconsistent OCR output is expected input, not an
//! error.

mod block;
mod response;

pub use block::{Block, BlockType, EntityType, Relationship, RelationshipType};
pub use response::{AnalysisResponse, DocumentMetadata, JobStatus};
