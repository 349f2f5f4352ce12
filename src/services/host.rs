use async_trait::async_trait;

use crate::error::CaptureError;
use crate::models::scan_types::{ScanTarget, TabHandle};

/// Capabilities the browser host lends to the scan core.
///
/// Implementations wrap the concrete extension APIs (tab query, script
/// injection, visible-tab capture); tests substitute scripted stubs. Every
/// method is a single attempt; retry policy, if any, belongs to the host.
#[async_trait]
pub trait PageHost: Send + Sync {
    /// Resolve the tab currently in front, the subject of any triggered scan.
    async fn active_tab(&self) -> Result<ScanTarget, CaptureError>;

    /// Capture the page's rendered markup. Fails on restricted pages where
    /// the host refuses script injection.
    async fn capture_markup(&self, tab: &TabHandle) -> Result<String, CaptureError>;

    /// Capture a visual snapshot of the visible viewport as base64 image
    /// data, data-URL prefix and all. Fails where capture is disallowed.
    async fn capture_visual(&self, tab: &TabHandle) -> Result<String, CaptureError>;
}
