use std::fmt;

/// Failure of a single evidence capture attempt on the host side.
///
/// Capture failures never abort a scan: the collector degrades the affected
/// evidence field to empty and submission proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureError {
    pub message: String,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CaptureError {}

impl From<String> for CaptureError {
    fn from(msg: String) -> Self {
        CaptureError { message: msg }
    }
}

impl From<&str> for CaptureError {
    fn from(msg: &str) -> Self {
        CaptureError {
            message: msg.to_string(),
        }
    }
}

/// Scan-level error.
///
/// `ScanInProgress` and `NoActiveTab` reject a trigger before any state is
/// published. The remaining variants describe why a submission failed; their
/// `Display` text is exactly what the operator sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A scan is already running; the trigger was rejected.
    ScanInProgress,

    /// The host could not resolve a tab to scan.
    NoActiveTab(String),

    /// The request never produced a usable response (unreachable, timed out,
    /// connection dropped mid-body).
    Transport(String),

    /// The classifier answered with a non-success status.
    ServerRejected(u16),

    /// The response body did not match the expected schema.
    MalformedResponse(String),
}

impl ScanError {
    pub fn no_active_tab(message: impl Into<String>) -> Self {
        Self::NoActiveTab(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn server_rejected(status: u16) -> Self {
        Self::ServerRejected(status)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// True for errors that reject a trigger without starting a scan.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ScanError::ScanInProgress | ScanError::NoActiveTab(_))
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::ScanInProgress => write!(f, "A scan is already in progress"),
            ScanError::NoActiveTab(msg) => write!(f, "No active tab to scan: {}", msg),
            // Transport text is shown verbatim, matching whatever the
            // underlying client reported.
            ScanError::Transport(msg) => write!(f, "{}", msg),
            ScanError::ServerRejected(_) => write!(f, "Server connection failed"),
            ScanError::MalformedResponse(msg) => {
                write!(f, "Invalid classifier response: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScanError {}

impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        ScanError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::MalformedResponse(err.to_string())
    }
}
