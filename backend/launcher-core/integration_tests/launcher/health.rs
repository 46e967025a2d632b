use launcher_core::launcher::health::{HealthProbe, HttpProbe, health_url};

use std::time::Duration;

use tokio::task::spawn_blocking;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROBE_TIMEOUT: Duration = Duration::from_millis(200);

// HttpProbe is blocking; from an async test it must run on the blocking pool.
async fn probe(url: String) -> bool {
    spawn_blocking(move || HttpProbe::new(PROBE_TIMEOUT).is_healthy(&url))
        .await
        .expect("probe task should not panic")
}

async fn server_answering(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

// ----------------------------------------------------------------------------
// health_url()
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies the health endpoint is derived the same way regardless of slashes.
///
/// **BUG THIS CATCHES**: Would catch `//health` (some servers 404 on it) or a lost path
/// prefix when the backend is mounted under `/api`.
#[test]
fn given_target_variants_when_health_url_called_then_joins_without_double_slash() {
    // GIVEN: Targets with and without trailing slashes or a prefix
    let cases = [
        ("http://127.0.0.1:8000", "http://127.0.0.1:8000/health"),
        ("http://127.0.0.1:8000/", "http://127.0.0.1:8000/health"),
        ("http://127.0.0.1:8000///", "http://127.0.0.1:8000/health"),
        ("http://localhost:8000/api/", "http://localhost:8000/api/health"),
    ];

    // WHEN / THEN
    for (target, expected) in cases {
        assert_eq!(health_url(target, "/health"), expected, "{target}");
    }
}

// ----------------------------------------------------------------------------
// HttpProbe::is_healthy()
// ----------------------------------------------------------------------------

#[tokio::test]
async fn given_backend_answers_200_when_probed_then_healthy() {
    // GIVEN: A backend whose health endpoint answers 200
    let server = server_answering(200).await;

    // WHEN: Probing
    let healthy = probe(health_url(&server.uri(), "/health")).await;

    // THEN
    assert!(healthy, "200 should be healthy");
}

/// **VALUE**: Verifies an answering-but-broken backend is not mistaken for a ready one.
///
/// **WHY THIS MATTERS**: Backends commonly bind the port before their database or model
/// loading is done and answer 503 until then. Treating that as ready lets the frontend
/// fire requests that fail.
#[tokio::test]
async fn given_backend_answers_error_status_when_probed_then_unhealthy() {
    for status in [500, 503, 204] {
        // GIVEN: A health endpoint answering a non-200 status
        let server = server_answering(status).await;

        // WHEN: Probing
        let healthy = probe(health_url(&server.uri(), "/health")).await;

        // THEN: Not healthy
        assert!(!healthy, "{status} should be unhealthy");
    }
}

#[tokio::test]
async fn given_no_health_route_when_probed_then_unhealthy() {
    // GIVEN: Something listening that has no /health route (wiremock answers 404)
    let server = MockServer::start().await;

    // WHEN
    let healthy = probe(health_url(&server.uri(), "/health")).await;

    // THEN
    assert!(!healthy);
}

/// **VALUE**: Verifies the per-probe timeout bounds a hung backend.
///
/// **WHY THIS MATTERS**: A wedged backend that accepts connections but never answers would
/// otherwise stall the launcher's polling loop far past its deadline.
///
/// **BUG THIS CATCHES**: Would catch the timeout not being applied to the request.
#[tokio::test]
async fn given_slow_backend_when_probed_then_times_out_as_unhealthy() {
    // GIVEN: A health endpoint slower than the probe timeout
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    // WHEN: Probing
    let url = health_url(&server.uri(), "/health");
    let start = std::time::Instant::now();
    let healthy = probe(url).await;

    // THEN: Unhealthy, and returned close to the timeout rather than the delay
    assert!(!healthy);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn given_unreachable_port_when_probed_then_unhealthy() {
    // GIVEN: A port with nothing listening
    let probe = HttpProbe::new(PROBE_TIMEOUT);

    // WHEN
    let healthy = probe.is_healthy("http://127.0.0.1:65534/health");

    // THEN
    assert!(!healthy, "Connection refused should be unhealthy");
}

#[test]
fn given_malformed_url_when_probed_then_unhealthy_without_panic() {
    // GIVEN / WHEN: A URL reqwest cannot build a request for
    let healthy = HttpProbe::new(PROBE_TIMEOUT).is_healthy("not a url/health");

    // THEN
    assert!(!healthy);
}
