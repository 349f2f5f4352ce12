use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde_json::json;
use tokio::sync::Semaphore;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use phish_lense::{
    present, CaptureError, ClassifierClient, PageHost, ScanError, ScanManager, ScanState,
    ScanTarget, StatusIndicator, TabHandle, Verdict,
};

/// Host double with scriptable capture outcomes. An optional semaphore gate
/// lets a test hold a scan inside evidence collection until released.
struct ScriptedHost {
    url: String,
    markup: Option<String>,
    snapshot: Option<String>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedHost {
    fn new(url: &str) -> Self {
        let b64 = base64::engine::general_purpose::STANDARD.encode(b"fake jpeg bytes");
        ScriptedHost {
            url: url.to_string(),
            markup: Some("<html><body>sign in to continue</body></html>".to_string()),
            snapshot: Some(format!("data:image/jpeg;base64,{}", b64)),
            gate: None,
        }
    }

    fn without_evidence(mut self) -> Self {
        self.markup = None;
        self.snapshot = None;
        self
    }

    fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    async fn wait_at_gate(&self) {
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.unwrap();
        }
    }
}

#[async_trait]
impl PageHost for ScriptedHost {
    async fn active_tab(&self) -> Result<ScanTarget, CaptureError> {
        Ok(ScanTarget {
            url: self.url.clone(),
            tab: TabHandle(1),
        })
    }

    async fn capture_markup(&self, _tab: &TabHandle) -> Result<String, CaptureError> {
        self.wait_at_gate().await;
        self.markup
            .clone()
            .ok_or_else(|| CaptureError::from("restricted page"))
    }

    async fn capture_visual(&self, _tab: &TabHandle) -> Result<String, CaptureError> {
        self.wait_at_gate().await;
        self.snapshot
            .clone()
            .ok_or_else(|| CaptureError::from("capture disallowed"))
    }
}

fn phishing_body() -> serde_json::Value {
    json!({
        "final_verdict": "PHISHING",
        "confidence": 0.92,
        "details": { "url_score": 4.5, "modules_run": ["url", "dom"] }
    })
}

fn safe_body() -> serde_json::Value {
    json!({
        "final_verdict": "SAFE",
        "confidence": 0.9,
        "details": { "url_score": 0.12, "modules_run": ["URL"] }
    })
}

async fn predict_server(body: serde_json::Value) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;
    mock_server
}

fn manager_for<H: PageHost>(host: H, server: &MockServer) -> ScanManager<H> {
    ScanManager::new(
        host,
        ClassifierClient::new().with_endpoint(format!("{}/predict", server.uri())),
    )
}

#[tokio::test]
async fn phishing_scan_runs_to_the_alarm_presentation() {
    let server = predict_server(phishing_body()).await;
    let manager = manager_for(ScriptedHost::new("https://suspicious.example/login"), &server);

    let terminal = manager.scan().await.unwrap();
    match &terminal {
        ScanState::Resolved(result) => {
            assert_eq!(result.verdict, Verdict::Phishing);
            assert_eq!(result.modules_run, vec!["url", "dom"]);
        }
        other => panic!("expected a resolved scan, got {:?}", other),
    }

    let view = present(&terminal);
    assert_eq!(view.indicator, StatusIndicator::Phishing);
    assert_eq!(view.headline, "Threat Detected");
    let outcome = view.outcome.unwrap();
    assert_eq!(outcome.confidence_label, "92%");
    assert_eq!(outcome.confidence_fill, 92);
    assert_eq!(outcome.url_score_label, "4.50");
    assert!(view.trigger_enabled);
    assert_eq!(view.trigger_label, "Scan Again");

    assert_eq!(manager.state(), terminal);
}

#[tokio::test]
async fn other_verdicts_reach_the_all_clear_presentation() {
    let server = predict_server(safe_body()).await;
    let manager = manager_for(ScriptedHost::new("https://example.com"), &server);

    let terminal = manager.scan().await.unwrap();
    assert!(matches!(
        &terminal,
        ScanState::Resolved(result) if result.verdict == Verdict::Safe
    ));

    let view = manager.presentation();
    assert_eq!(view.indicator, StatusIndicator::Safe);
    assert_eq!(view.headline, "Website Safe");
    assert_eq!(view.error_text, None);
}

#[tokio::test]
async fn scans_submit_even_when_every_capture_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_partial_json(json!({
            "html_content": "",
            "screenshot_base64": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(safe_body()))
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager_for(
        ScriptedHost::new("https://blocked.example").without_evidence(),
        &server,
    );

    let terminal = manager.scan().await.unwrap();
    assert!(matches!(terminal, ScanState::Resolved(_)));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["url"], "https://blocked.example");
}

#[tokio::test]
async fn unreachable_server_fails_the_scan_with_the_transport_text() {
    let manager = ScanManager::new(
        ScriptedHost::new("https://example.com"),
        ClassifierClient::new().with_endpoint("http://127.0.0.1:1/predict"),
    );

    let terminal = manager.scan().await.unwrap();
    let reason = match &terminal {
        ScanState::Failed(reason) => reason.clone(),
        other => panic!("expected a failed scan, got {:?}", other),
    };
    assert!(!reason.is_empty());

    let view = present(&terminal);
    assert_eq!(view.headline, "Scan Failed");
    assert_eq!(view.error_text.as_deref(), Some(reason.as_str()));
    assert!(view.trigger_enabled);
    assert_eq!(view.trigger_label, "Scan Again");
}

#[tokio::test]
async fn server_rejection_collapses_to_the_fixed_failure_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(503).set_body_string("scaling down"))
        .mount(&server)
        .await;

    let manager = manager_for(ScriptedHost::new("https://example.com"), &server);
    let terminal = manager.scan().await.unwrap();

    assert_eq!(
        terminal,
        ScanState::Failed("Server connection failed".to_string())
    );
}

#[tokio::test]
async fn malformed_response_fails_the_scan() {
    let server = predict_server(json!({ "final_verdict": "SAFE" })).await;
    let manager = manager_for(ScriptedHost::new("https://example.com"), &server);

    let terminal = manager.scan().await.unwrap();
    match terminal {
        ScanState::Failed(reason) => {
            assert!(reason.starts_with("Invalid classifier response:"))
        }
        other => panic!("expected a failed scan, got {:?}", other),
    }
}

#[tokio::test]
async fn in_flight_scan_rejects_a_second_trigger() {
    let server = predict_server(safe_body()).await;
    let gate = Arc::new(Semaphore::new(0));
    let manager = Arc::new(manager_for(
        ScriptedHost::new("https://example.com").gated(gate.clone()),
        &server,
    ));

    let mut states = manager.subscribe();
    let running = tokio::spawn({
        let manager = manager.clone();
        async move { manager.scan().await }
    });

    // The gate parks the first scan inside collection, so Scanning persists
    // until the permits arrive.
    states
        .wait_for(|state| *state == ScanState::Scanning)
        .await
        .unwrap();
    assert!(!manager.presentation().trigger_enabled);

    let err = manager.scan().await.unwrap_err();
    assert_eq!(err, ScanError::ScanInProgress);
    assert_eq!(manager.state(), ScanState::Scanning);

    gate.add_permits(2);
    let terminal = running.await.unwrap().unwrap();
    assert!(terminal.is_terminal());
    assert!(manager.presentation().trigger_enabled);
}

#[tokio::test]
async fn every_scan_passes_through_processing_before_its_terminal_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(safe_body())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let gate = Arc::new(Semaphore::new(0));
    let manager = Arc::new(manager_for(
        ScriptedHost::new("https://example.com").gated(gate.clone()),
        &server,
    ));

    let mut states = manager.subscribe();
    let running = tokio::spawn({
        let manager = manager.clone();
        async move { manager.scan().await }
    });

    states
        .wait_for(|state| *state == ScanState::Scanning)
        .await
        .unwrap();
    gate.add_permits(2);
    states
        .wait_for(|state| *state == ScanState::Processing)
        .await
        .unwrap();
    states.wait_for(|state| state.is_terminal()).await.unwrap();

    let terminal = running.await.unwrap().unwrap();
    assert!(matches!(terminal, ScanState::Resolved(_)));
}

#[tokio::test]
async fn a_new_scan_fully_overwrites_the_previous_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(phishing_body()))
        .mount(&server)
        .await;

    let manager = manager_for(ScriptedHost::new("https://example.com"), &server);

    let first = manager.scan().await.unwrap();
    assert_eq!(
        first,
        ScanState::Failed("Server connection failed".to_string())
    );
    assert!(manager.presentation().error_text.is_some());

    let second = manager.scan().await.unwrap();
    assert!(matches!(second, ScanState::Resolved(_)));

    let view = manager.presentation();
    assert_eq!(view.error_text, None);
    assert_eq!(view.indicator, StatusIndicator::Phishing);
    assert!(view.outcome.is_some());
}
