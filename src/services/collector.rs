use futures::join;
use tracing::{debug, warn};

use crate::models::scan_types::{Evidence, ScanTarget};
use crate::services::host::PageHost;

/// Gather whatever the page yields, best effort.
///
/// Both captures run concurrently and are attempted exactly once. A failed
/// capture degrades its field to the empty string; it never aborts the scan
/// and never cancels the other capture. Returns only after both attempts
/// have settled. Captured content is forwarded opaquely, without inspection.
pub async fn collect_evidence<H: PageHost>(host: &H, target: &ScanTarget) -> Evidence {
    let (markup, snapshot) = join!(
        host.capture_markup(&target.tab),
        host.capture_visual(&target.tab)
    );

    let markup = match markup {
        Ok(markup) => {
            debug!(len = markup.len(), "page markup captured");
            markup
        }
        Err(err) => {
            warn!(error = %err, "could not capture page markup, scanning without it");
            String::new()
        }
    };

    let snapshot = match snapshot {
        Ok(snapshot) => {
            debug!(len = snapshot.len(), "page snapshot captured");
            snapshot
        }
        Err(err) => {
            warn!(error = %err, "could not capture page snapshot, scanning without it");
            String::new()
        }
    };

    Evidence { markup, snapshot }
}
