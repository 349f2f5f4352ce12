use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ScanError;
use crate::models::scan_types::{ClassificationResult, Evidence, ScanTarget};
use crate::models::wire_types::{PredictRequest, PredictResponse};

/// Production scoring endpoint.
pub const DEFAULT_API_URL: &str = "https://phishing-detection-api.onrender.com/predict";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the remote classifier.
///
/// One POST per scan, at-most-once; no retries, no caching. A failed call
/// yields no result and mutates nothing beyond the returned error.
pub struct ClassifierClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ClassifierClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        ClassifierClient {
            http,
            endpoint: DEFAULT_API_URL.to_string(),
        }
    }

    /// Point the client at a different scoring endpoint (dev target, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Submit one settled collection pass for scoring.
    ///
    /// Transport failures carry the underlying error text verbatim; any
    /// non-success status collapses to the fixed server-connection failure;
    /// a success body missing required fields is a malformed response.
    pub async fn classify(
        &self,
        target: &ScanTarget,
        evidence: Evidence,
    ) -> Result<ClassificationResult, ScanError> {
        let request = PredictRequest::new(target, evidence);
        debug!(
            url = %request.url,
            markup_len = request.html_content.len(),
            snapshot_len = request.screenshot_base64.len(),
            "submitting page for classification"
        );

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "classifier rejected the request");
            return Err(ScanError::server_rejected(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: PredictResponse = serde_json::from_str(&body)?;
        Ok(ClassificationResult::from(parsed))
    }
}

impl Default for ClassifierClient {
    fn default() -> Self {
        Self::new()
    }
}
