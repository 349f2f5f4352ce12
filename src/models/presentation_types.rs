use serde::Serialize;

/// Which status card the UI should show, one variant per visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusIndicator {
    Neutral,
    Scanning,
    Phishing,
    Safe,
}

/// Score figures shown once a verdict is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeView {
    /// Rounded percentage with a `%` suffix, e.g. `"92%"`.
    pub confidence_label: String,
    /// The same rounded percentage as a 0..=100 proportional fill.
    pub confidence_fill: u8,
    /// URL risk score with exactly two decimal digits, e.g. `"4.50"`.
    pub url_score_label: String,
}

/// Everything a UI needs to draw one scan state. Derived from `ScanState`
/// alone, so redrawing is idempotent and stale content cannot linger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub indicator: StatusIndicator,
    pub headline: &'static str,
    pub detail: &'static str,
    /// Present only for resolved scans.
    pub outcome: Option<OutcomeView>,
    /// Verbatim failure message, present only for failed scans.
    pub error_text: Option<String>,
    pub trigger_enabled: bool,
    pub trigger_label: &'static str,
}
