//! Integration tests for `FetchClient::fetch`.
//!
//! Uses `wiremock` to stand up a local HTTP server per test and a recording
//! pacer so no test actually sleeps.

mod common;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::RecordingPacer;
use scout_scraper::retry::{backoff_span, PRE_REQUEST_JITTER};
use scout_scraper::{FetchClient, FetchError, FetchErrorKind, HtmlNode, USER_AGENTS};

fn test_client(base_url: &str, max_retries: u32) -> FetchClient<RecordingPacer> {
    FetchClient::new(base_url, 5, max_retries, RecordingPacer::default())
        .expect("failed to build test FetchClient")
}

fn user_agents(requests: &[wiremock::Request]) -> Vec<String> {
    requests
        .iter()
        .map(|r| {
            r.headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_owned()
        })
        .collect()
}

#[tokio::test]
async fn success_on_first_attempt_returns_parsed_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><head><title>ok</title></head></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 6);
    let page = client
        .fetch(&format!("{}/s?k=blender", server.uri()))
        .await
        .expect("fetch should succeed");

    let title = page.root().select_first("title").map(|t| t.visible_text());
    assert_eq!(title.as_deref(), Some("ok"));
    assert_eq!(client.pacer().sleeps(), vec![PRE_REQUEST_JITTER]);
}

#[tokio::test]
async fn request_carries_browser_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 6);
    client
        .fetch(&format!("{}/s?k=blender", server.uri()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let header = |name: &str| {
        requests[0]
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(header("user-agent").as_deref(), Some(USER_AGENTS[0]));
    assert_eq!(header("accept-language").as_deref(), Some("en-US,en;q=0.9"));
    assert_eq!(
        header("accept").as_deref(),
        Some("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
    );
    assert_eq!(header("referer"), Some(format!("{}/", server.uri())));
}

#[tokio::test]
async fn two_unavailable_responses_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 6);
    let result = client.fetch(&format!("{}/s?k=chair", server.uri())).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    let agents = user_agents(&requests);
    assert_ne!(agents[0], agents[1]);
    assert_ne!(agents[1], agents[2]);

    assert_eq!(
        client.pacer().sleeps(),
        vec![PRE_REQUEST_JITTER, backoff_span(1), backoff_span(2)]
    );
}

#[tokio::test]
async fn rate_limited_response_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 6);
    let result = client.fetch(&format!("{}/s?k=chair", server.uri())).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn six_unavailable_responses_exhaust_after_six_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 6);
    let err = client
        .fetch(&format!("{}/s?k=laptop", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Exhausted);
    match &err {
        FetchError::Exhausted { attempts, last, .. } => {
            assert_eq!(*attempts, 6);
            assert!(matches!(**last, FetchError::Unknown), "got {last:?}");
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }

    assert_eq!(server.received_requests().await.unwrap().len(), 6);
    // jitter + one backoff between each pair of attempts
    let sleeps = client.pacer().sleeps();
    assert_eq!(sleeps.len(), 6);
    assert_eq!(sleeps[5], backoff_span(5));
}

#[tokio::test]
async fn non_retryable_status_fails_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 6);
    let err = client
        .fetch(&format!("{}/s?k=blender", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, FetchError::UnexpectedStatus { status: 404, .. }),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
    assert_eq!(err.kind(), FetchErrorKind::TransportError);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(client.pacer().sleeps(), vec![PRE_REQUEST_JITTER]);
}

#[tokio::test]
async fn connection_failures_exhaust_with_transport_cause() {
    // Bind then drop a listener to get a local port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = format!("http://127.0.0.1:{port}");

    let client = test_client(&base, 3);
    let err = client
        .fetch(&format!("{base}/s?k=blender"))
        .await
        .unwrap_err();

    match &err {
        FetchError::Exhausted { attempts, last, .. } => {
            assert_eq!(*attempts, 3);
            assert!(matches!(**last, FetchError::Transport(_)), "got {last:?}");
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
    assert_eq!(client.pacer().sleeps().len(), 3);
}
