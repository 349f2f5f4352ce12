use serde::Serialize;

/// Opaque identifier of a browser tab, as issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabHandle(pub i64);

/// What a scan is about: the page URL and the tab it lives in.
///
/// Resolved from the host when a scan is triggered and dropped when the scan
/// completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub url: String,
    pub tab: TabHandle,
}

/// Page evidence gathered for one scan. Either field may be empty when the
/// corresponding capture was not possible; empty means "not collectable",
/// never an error. `snapshot` is base64 image data exactly as the host
/// produced it (a data-URL prefix, if any, is forwarded untouched).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    pub markup: String,
    pub snapshot: String,
}

/// The classifier's binary judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Safe,
    Phishing,
}

impl Verdict {
    /// Wire rule: exactly the literal `"PHISHING"` raises the alarm; every
    /// other value, including lowercase variants, is treated as safe.
    pub fn from_final_verdict(raw: &str) -> Self {
        if raw == "PHISHING" {
            Verdict::Phishing
        } else {
            Verdict::Safe
        }
    }
}

/// A successful classifier answer, immutable once received.
///
/// `text_score` and `logo_detected` are only produced by servers that ran the
/// corresponding analysis modules; they are carried for logging and display,
/// never required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub verdict: Verdict,
    pub confidence: f64,
    pub url_score: f64,
    pub modules_run: Vec<String>,
    pub text_score: Option<f64>,
    pub logo_detected: Vec<String>,
}

/// The single authoritative state of a scan invocation.
///
/// Exactly one value exists per scan manager; transitions are the only
/// mutation path and all presentation derives from the current value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScanState {
    Idle,
    Scanning,
    Processing,
    Resolved(ClassificationResult),
    Failed(String),
}

impl ScanState {
    /// True while a scan holds the trigger (evidence collection or
    /// submission still running).
    pub fn is_active(&self) -> bool {
        matches!(self, ScanState::Scanning | ScanState::Processing)
    }

    /// True once a scan has concluded with a verdict or a failure.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Resolved(_) | ScanState::Failed(_))
    }
}
