use serde::{Deserialize, Serialize};

use crate::models::scan_types::{ClassificationResult, Evidence, ScanTarget, Verdict};

/// Wire payload submitted to the classifier. Field names are fixed by the
/// server contract; `html_content` and `screenshot_base64` may be empty.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub url: String,
    pub html_content: String,
    pub screenshot_base64: String,
}

impl PredictRequest {
    /// Builds the payload from a settled collection pass. Consumes the
    /// evidence; the request is the last owner of anything captured from the
    /// page.
    pub fn new(target: &ScanTarget, evidence: Evidence) -> Self {
        PredictRequest {
            url: target.url.clone(),
            html_content: evidence.markup,
            screenshot_base64: evidence.snapshot,
        }
    }
}

/// Classifier response body. `final_verdict`, `confidence` and the two
/// required detail fields must be present; anything else the server sends
/// (it echoes the url, for one) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub final_verdict: String,
    pub confidence: f64,
    pub details: PredictDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictDetails {
    pub url_score: f64,
    pub modules_run: Vec<String>,
    #[serde(default)]
    pub text_score: Option<f64>,
    #[serde(default)]
    pub logo_detected: Vec<String>,
}

impl From<PredictResponse> for ClassificationResult {
    fn from(response: PredictResponse) -> Self {
        ClassificationResult {
            verdict: Verdict::from_final_verdict(&response.final_verdict),
            confidence: response.confidence,
            url_score: response.details.url_score,
            modules_run: response.details.modules_run,
            text_score: response.details.text_score,
            logo_detected: response.details.logo_detected,
        }
    }
}
