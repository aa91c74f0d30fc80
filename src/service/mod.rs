//! Seams to the analysis service and its collaborators.
//!
//! Network transport is out of scope for this crate. Callers supply
//! implementations of these traits backed by whatever SDK or HTTP stack
//! they use; the library contains the logic that sits on top: credential
//! gating, document staging order, and the job polling state machine.

mod job;

pub use job::{CompletedJob, JobDriver, PollOptions};

use crate::error::{Error, Result};
use crate::model::AnalysisResponse;

/// Cloud credentials for the analysis service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key id.
    pub access_key: String,

    /// Secret access key.
    pub secret_key: String,

    /// Region identifier, e.g. "us-east-2".
    pub region: String,
}

impl Credentials {
    /// Create credentials from the access key / secret key / region triple.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
        }
    }
}

// Manual Debug so the secret key never lands in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

/// Location of a staged document in object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    /// Bucket name.
    pub bucket: String,

    /// Object name within the bucket.
    pub object: String,
}

impl DocumentLocation {
    /// Create a location from bucket and object names.
    pub fn new(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }
}

impl std::fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.object)
    }
}

/// Analysis features to request from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    /// Table detection and cell layout
    Tables,
    /// Form key/value detection
    Forms,
}

impl FeatureType {
    /// Wire name of the feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Tables => "TABLES",
            FeatureType::Forms => "FORMS",
        }
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The document-analysis service, in both invocation modes.
///
/// Implementations map their transport failures to [`Error::Service`]
/// (or [`Error::Unauthorized`] for authentication failures) so callers can
/// tell service faults apart from job-level outcomes. The library performs
/// no retries on these; retry policy belongs to the implementation.
pub trait AnalysisService {
    /// Synchronous text detection: document bytes in, one response out.
    fn detect_text(&self, document: &[u8]) -> Result<AnalysisResponse>;

    /// Synchronous analysis with the given features enabled.
    fn analyze(&self, document: &[u8], features: &[FeatureType]) -> Result<AnalysisResponse>;

    /// Submit an asynchronous analysis job for a staged document.
    ///
    /// Returns the job id to poll.
    fn start_analysis(
        &self,
        location: &DocumentLocation,
        features: &[FeatureType],
    ) -> Result<String>;

    /// Fetch one page of asynchronous results.
    ///
    /// `next_token` continues a paginated result set; `None` asks for the
    /// first page / current status.
    fn fetch_analysis(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<AnalysisResponse>;
}

impl<T: AnalysisService + ?Sized> AnalysisService for &T {
    fn detect_text(&self, document: &[u8]) -> Result<AnalysisResponse> {
        (**self).detect_text(document)
    }

    fn analyze(&self, document: &[u8], features: &[FeatureType]) -> Result<AnalysisResponse> {
        (**self).analyze(document, features)
    }

    fn start_analysis(
        &self,
        location: &DocumentLocation,
        features: &[FeatureType],
    ) -> Result<String> {
        (**self).start_analysis(location, features)
    }

    fn fetch_analysis(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<AnalysisResponse> {
        (**self).fetch_analysis(job_id, next_token)
    }
}

/// Object storage used to stage documents for asynchronous analysis.
pub trait StagingStore {
    /// Upload document bytes to the given location.
    fn upload(&self, document: &[u8], location: &DocumentLocation) -> Result<()>;
}

/// Validates credentials against the identity service.
pub trait CredentialValidator {
    /// Whether the credentials are usable. Transport failures are errors;
    /// a clean rejection is `Ok(false)`.
    fn validate(&self, credentials: &Credentials) -> Result<bool>;
}

/// Check credentials, mapping rejection to [`Error::Unauthorized`].
pub fn verify_credentials(
    validator: &dyn CredentialValidator,
    credentials: &Credentials,
) -> Result<()> {
    if validator.validate(credentials)? {
        Ok(())
    } else {
        Err(Error::Unauthorized(format!(
            "credentials rejected for region {}",
            credentials.region
        )))
    }
}
