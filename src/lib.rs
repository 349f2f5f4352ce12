//! Client-side orchestration for on-demand phishing scans.
//!
//! A scan targets the page open in the active browser tab: it collects
//! best-effort evidence (rendered markup, a visual snapshot), submits it
//! together with the page URL to a remote classifier, and maps the answer
//! onto a fixed set of presentation states. The browser is abstracted behind
//! the [`PageHost`] trait; the classifier behind [`ClassifierClient`]; the
//! whole flow is driven by [`ScanManager`].

pub mod error;
pub mod models;
pub mod services;

pub use error::{CaptureError, ScanError};
pub use models::presentation_types::{OutcomeView, Presentation, StatusIndicator};
pub use models::scan_types::{
    ClassificationResult, Evidence, ScanState, ScanTarget, TabHandle, Verdict,
};
pub use services::classifier::{ClassifierClient, DEFAULT_API_URL};
pub use services::collector::collect_evidence;
pub use services::host::PageHost;
pub use services::presenter::present;
pub use services::scan_manager::ScanManager;
