use crate::models::presentation_types::{OutcomeView, Presentation, StatusIndicator};
use crate::models::scan_types::{ClassificationResult, ScanState, Verdict};

/// Derive the full user-visible surface for a scan state.
///
/// Pure and idempotent: equal states yield equal presentations, so a UI can
/// redraw from scratch on every transition and nothing from an earlier scan
/// can linger once a new one starts.
pub fn present(state: &ScanState) -> Presentation {
    match state {
        ScanState::Idle => Presentation {
            indicator: StatusIndicator::Neutral,
            headline: "Ready to Scan",
            detail: "Run a scan to check this website",
            outcome: None,
            error_text: None,
            trigger_enabled: true,
            trigger_label: "Scan Website",
        },
        ScanState::Scanning => Presentation {
            indicator: StatusIndicator::Scanning,
            headline: "Scanning...",
            detail: "Collecting page data for analysis",
            outcome: None,
            error_text: None,
            trigger_enabled: false,
            trigger_label: "Analyzing...",
        },
        ScanState::Processing => Presentation {
            indicator: StatusIndicator::Scanning,
            headline: "Processing...",
            detail: "AI is analyzing the website",
            outcome: None,
            error_text: None,
            trigger_enabled: false,
            trigger_label: "Analyzing...",
        },
        ScanState::Resolved(result) => match result.verdict {
            Verdict::Phishing => Presentation {
                indicator: StatusIndicator::Phishing,
                headline: "Threat Detected",
                detail: "This website appears to be a phishing attempt",
                outcome: Some(outcome_view(result)),
                error_text: None,
                trigger_enabled: true,
                trigger_label: "Scan Again",
            },
            Verdict::Safe => Presentation {
                indicator: StatusIndicator::Safe,
                headline: "Website Safe",
                detail: "No threats detected on this website",
                outcome: Some(outcome_view(result)),
                error_text: None,
                trigger_enabled: true,
                trigger_label: "Scan Again",
            },
        },
        ScanState::Failed(reason) => Presentation {
            indicator: StatusIndicator::Neutral,
            headline: "Scan Failed",
            // The detail line stays fixed; the specific reason is shown on
            // its own line via error_text.
            detail: "Could not connect to the analysis server",
            outcome: None,
            error_text: Some(reason.clone()),
            trigger_enabled: true,
            trigger_label: "Scan Again",
        },
    }
}

fn outcome_view(result: &ClassificationResult) -> OutcomeView {
    let percent = (result.confidence * 100.0).round() as u8;
    OutcomeView {
        confidence_label: format!("{}%", percent),
        confidence_fill: percent,
        url_score_label: format!("{:.2}", result.url_score),
    }
}
