mod support;

use std::sync::Arc;
use std::time::Duration;

use recdash::api::{ApiError, CtrQuery, DashboardBackend, HttpBackend, parse_date};
use recdash::config::{DashboardSettings, ServerSettings};
use recdash::dashboard::DashboardController;
use recdash::http_client::Timeouts;
use support::fake_backend::{poll_until, wait_idle};
use support::http_server::serve_once;

const REPORT_BODY: &str = r#"{"data": [{"data": {"when": "2024-01-01",
    "H": {"ctr": 0.12345, "show_per_ud": 2, "click_per_ud": 0.25, "ud": 8, "uid": 7, "pub": 30, "show": 16, "click_ud": 2, "click_uid": 2, "click_pub": 3, "click": 4},
    "a": {"ctr": 0.1, "show_per_ud": 2, "click_per_ud": 0.25, "ud": 4, "uid": 4, "pub": 15, "show": 8, "click_ud": 1, "click_uid": 1, "click_pub": 1, "click": 2},
    "b": {"ctr": 0.2, "show_per_ud": 2, "click_per_ud": 0.25, "ud": 4, "uid": 3, "pub": 15, "show": 8, "click_ud": 1, "click_uid": 1, "click_pub": 2, "click": 2}}}]}"#;

fn backend(base: &str) -> HttpBackend {
    let timeouts = Timeouts {
        connect: Duration::from_secs(2),
        read: Duration::from_secs(2),
        write: Duration::from_secs(2),
    };
    HttpBackend::new(base, timeouts, 64 * 1024).unwrap()
}

fn received(rx: std::sync::mpsc::Receiver<String>) -> String {
    rx.recv_timeout(Duration::from_secs(5)).unwrap()
}

#[test]
fn report_request_carries_dates_and_decodes_rows() {
    let (base, rx) = serve_once("200 OK", REPORT_BODY);
    let query = CtrQuery {
        start: Some(parse_date("2024-01-01").unwrap()),
        end: Some(parse_date("2024-01-31").unwrap()),
    };

    let report = backend(&base).fetch_report(&query).unwrap();

    assert_eq!(
        received(rx),
        "GET /ctr/?start=2024-01-01&end=2024-01-31 HTTP/1.1"
    );
    assert_eq!(report.data.len(), 1);
    assert_eq!(report.data[0].all.ctr, 0.12345);
    assert_eq!(report.data[0].cohort_b.uid, 3);
}

#[test]
fn unfiltered_report_sends_no_query_string() {
    let (base, rx) = serve_once("200 OK", r#"{"data": []}"#);
    let report = backend(&base).fetch_report(&CtrQuery::default()).unwrap();
    assert_eq!(received(rx), "GET /ctr/ HTTP/1.1");
    assert!(report.data.is_empty());
}

#[test]
fn sample_and_trace_endpoints() {
    let (base, rx) = serve_once("200 OK", r#"{"count": 2, "sample": ["u1", "u2"]}"#);
    let samples = backend(&base).fetch_samples().unwrap();
    assert_eq!(received(rx), "GET /ud_sample/ HTTP/1.1");
    assert_eq!(samples.sample, ["u1", "u2"]);

    let body = r#"{"word": {"count": 1, "items": [["rust", 0.75]]},
        "show": {"count": 2, "items": [["p-1", 3], ["p-2", 1]]},
        "recommend": {"count": 0, "items": []}}"#;
    let (base, rx) = serve_once("200 OK", body);
    let trace = backend(&base).fetch_trace("ud 42").unwrap();
    assert_eq!(received(rx), "GET /ud_action/?ud=ud+42 HTTP/1.1");
    assert_eq!(trace.word.items[0].score.to_string(), "0.75");
    assert_eq!(trace.show.items[0].score.to_string(), "3");
}

#[test]
fn error_status_surfaces_reason_phrase() {
    let (base, _rx) = serve_once("404 Not Found", "{}");
    let err = backend(&base).fetch_samples().unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            code: 404,
            status_text: "Not Found".to_string()
        }
    );
    assert_eq!(err.to_string(), "Not Found");
}

#[test]
fn non_json_body_is_a_decode_error() {
    let (base, _rx) = serve_once("200 OK", "<html>oops</html>");
    let err = backend(&base).fetch_samples().unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn missing_field_is_a_decode_error() {
    let (base, _rx) = serve_once("200 OK", r#"{"count": 1}"#);
    let err = backend(&base).fetch_samples().unwrap_err();
    assert!(matches!(err, ApiError::Decode(message) if message.contains("sample")));
}

#[test]
fn wrapped_row_missing_field_is_named_in_status_text() {
    let body = r#"{"data":[{"data":{"when":"2024-01-01","H":{"ctr":0.5},"a":{},"b":{}}}]}"#;
    let (base, _rx) = serve_once("200 OK", body);
    let mut settings = DashboardSettings::default();
    settings.server.base_url = base;
    settings.panels.ud_container = "none".to_string();
    let backend = HttpBackend::from_settings(&settings.server).unwrap();
    let mut controller = DashboardController::new(Arc::new(backend), &settings);

    wait_idle(&mut controller);

    let status = controller.ctr_panel().unwrap().form().status_text().unwrap();
    assert!(status.starts_with("Unexpected payload: "), "{status}");
    assert!(status.contains("missing field `show_per_ud`"), "{status}");
}

#[test]
fn scores_keep_server_digits() {
    let body = r#"{"word": {"count": 2, "items": [["a", 1.0], ["b", 2.50]]},
        "show": {"count": 0, "items": []}, "recommend": {"count": 0, "items": []}}"#;
    let (base, _rx) = serve_once("200 OK", body);
    let trace = backend(&base).fetch_trace("u1").unwrap();
    let scores: Vec<_> = trace.word.items.iter().map(|item| item.score.to_string()).collect();
    assert_eq!(scores, ["1.0", "2.50"]);
}

#[test]
fn oversized_body_is_rejected() {
    let body = format!(r#"{{"count": 1, "sample": ["{}"]}}"#, "x".repeat(2048));
    let (base, _rx) = serve_once("200 OK", &body);
    let backend = HttpBackend::new(&base, Timeouts::default(), 1024).unwrap();
    assert!(matches!(backend.fetch_samples(), Err(ApiError::Body(_))));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = backend(&format!("http://{addr}/"))
        .fetch_samples()
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn controller_renders_report_from_http_backend() {
    let (base, _rx) = serve_once("200 OK", REPORT_BODY);
    let mut settings = DashboardSettings::default();
    settings.server = ServerSettings {
        base_url: base,
        ..ServerSettings::default()
    };
    settings.panels.ud_container = "none".to_string();
    let backend = HttpBackend::from_settings(&settings.server).unwrap();
    let mut controller = DashboardController::new(Arc::new(backend), &settings);

    poll_until(&mut controller, |c| {
        c.ctr_panel().is_some_and(|panel| panel.form().view().is_some())
    });
    wait_idle(&mut controller);

    let table = controller.ctr_panel().unwrap().form().view().unwrap();
    assert_eq!(table.rows[0].cells[2].text, "0.1235");
    assert_eq!(table.rows[1].cells[1].text, "0.1000");
    assert_eq!(table.rows[0].cells[3].text, "2.0000");
}
