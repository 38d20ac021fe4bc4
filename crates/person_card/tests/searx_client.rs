//! SearXNG client against a local stub backend
//!
//! Covers every way the backend can fail and checks that each one still
//! ends in a fallback card once it goes through the resolver.

mod common;

use common::{dead_endpoint, serve_hang, serve_once, Canned};
use std::time::Duration;
use person_card::{
    resolve, FallbackPolicy, LookupError, LookupFailure, PersonLookup, Resolution, SearxClient,
    SearxConfig,
};
use serde_json::json;

fn client_for(endpoint: String) -> SearxClient {
    SearxClient::new(SearxConfig {
        endpoint,
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn searx_found_person() {
    let (base, server) = serve_once(Canned::json(json!({
        "query": "Steve Jobs",
        "results": [{
            "title": "Steve Jobs - Wikipedia",
            "content": "Steven Paul Jobs was an American businessman.",
            "url": "https://en.wikipedia.org/wiki/Steve_Jobs",
            "img_src": "https://upload.wikimedia.org/steve.jpg",
            "engine": "wikipedia"
        }]
    })));

    let client = client_for(format!("{}/search", base));
    let card = client.find_person("Steve Jobs").unwrap();

    assert_eq!(card.name, "Steve Jobs - Wikipedia");
    assert_eq!(card.url, "https://en.wikipedia.org/wiki/Steve_Jobs");
    assert_eq!(card.image.as_deref(), Some("https://upload.wikimedia.org/steve.jpg"));

    let request = server.join().unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /search?"));
    assert!(request_line.contains("q=Steve+Jobs"));
    assert!(request_line.contains("format=json"));
    assert!(request_line.contains("language=en-US"));
    assert!(request_line.contains("categories=general"));
}

#[test]
fn searx_wikipedia_engine_params() {
    let (base, server) = serve_once(Canned::json(json!({"results": []})));

    let client = SearxClient::new(SearxConfig {
        endpoint: format!("{}/search", base),
        categories: None,
        engines: Some("wikipedia".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(client.find_person("Elon Musk"), Err(LookupError::EmptyPayload));

    let request = server.join().unwrap();
    assert!(request.contains("engines=wikipedia"));
    assert!(!request.contains("categories="));
}

#[test]
fn searx_non_success_status() {
    let (base, server) = serve_once(Canned::status("429 Too Many Requests", "rate limited"));

    let err = client_for(format!("{}/search", base))
        .find_person("Steve Jobs")
        .unwrap_err();

    assert_eq!(err, LookupError::HttpStatus(429));
    assert_eq!(err.failure(), LookupFailure::Transport);
    server.join().unwrap();
}

#[test]
fn searx_html_body_is_malformed() {
    let (base, server) = serve_once(Canned {
        status: "200 OK",
        content_type: "text/html",
        body: b"<html><body>Too many requests</body></html>".to_vec(),
    });

    let err = client_for(format!("{}/search", base))
        .find_person("Steve Jobs")
        .unwrap_err();

    assert_eq!(err.failure(), LookupFailure::Malformed);
    server.join().unwrap();
}

#[test]
fn searx_connection_refused_is_transport() {
    let err = client_for(dead_endpoint()).find_person("Steve Jobs").unwrap_err();
    assert_eq!(err.failure(), LookupFailure::Transport);
}

#[test]
fn resolver_falls_back_when_backend_down() {
    let client = client_for(dead_endpoint());
    let policy = FallbackPolicy::default();

    match resolve("steve jobs", &client, &policy) {
        Resolution::Fallback { card, cause } => {
            assert_eq!(cause.failure(), LookupFailure::Transport);
            assert_eq!(card.name, "Steve Jobs");
            assert_eq!(card.url, "https://www.google.com/search?q=steve jobs");
            assert!(card.image.is_none());
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[test]
fn resolver_empty_results_fall_back() {
    let (base, server) = serve_once(Canned::json(json!({"results": [], "answers": []})));
    let client = client_for(format!("{}/search", base));

    let envelope = resolve("Steve Jobs", &client, &FallbackPolicy::default())
        .into_envelope()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "action": {
                "type": "person",
                "name": "Steve Jobs",
                "description": "Press Enter to search info.",
                "url": "https://www.google.com/search?q=Steve Jobs",
                "image": null
            }
        })
    );
    server.join().unwrap();
}

#[test]
fn diagnose_reports_first_hit() {
    let (base, server) = serve_once(Canned::json(json!({
        "results": [
            {"title": "Steve Jobs", "content": "Apple co-founder", "url": "https://example.org/sj", "engine": "bing"},
            {"title": "Steve Jobs (film)", "url": "https://example.org/film"}
        ]
    })));

    let diagnostics = client_for(format!("{}/search", base))
        .diagnose("Steve Jobs")
        .unwrap();

    assert_eq!(diagnostics.status, 200);
    assert_eq!(diagnostics.result_count, 2);
    assert_eq!(diagnostics.first_keys, vec!["content", "engine", "title", "url"]);

    let first = diagnostics.first_hit.unwrap();
    assert_eq!(first.title.as_deref(), Some("Steve Jobs"));
    assert_eq!(first.content.as_deref(), Some("Apple co-founder"));
    assert!(first.snippet.is_none());
    server.join().unwrap();
}

#[test]
fn diagnose_keeps_error_body() {
    let (base, server) = serve_once(Canned::status("403 Forbidden", "format json is not allowed"));

    let diagnostics = client_for(format!("{}/search", base))
        .diagnose("Steve Jobs")
        .unwrap();

    assert_eq!(diagnostics.status, 403);
    assert_eq!(diagnostics.result_count, 0);
    assert_eq!(diagnostics.error_body.as_deref(), Some("format json is not allowed"));
    server.join().unwrap();
}

#[test]
fn searx_unanswered_request_times_out() {
    let client = SearxClient::new(SearxConfig {
        endpoint: serve_hang(Duration::from_secs(5)),
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap();

    let err = client.find_person("Steve Jobs").unwrap_err();

    assert_eq!(err, LookupError::Timeout(1));
    assert_eq!(err.failure(), LookupFailure::Transport);
}

#[test]
fn resolver_falls_back_on_timeout() {
    let client = SearxClient::new(SearxConfig {
        endpoint: serve_hang(Duration::from_secs(5)),
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap();

    match resolve("ada lovelace", &client, &FallbackPolicy::default()) {
        Resolution::Fallback { card, cause } => {
            assert_eq!(cause, LookupError::Timeout(1));
            assert_eq!(card.name, "Ada Lovelace");
            assert!(card.image.is_none());
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[test]
fn searx_zero_timeout_uses_client_default() {
    let (base, server) = serve_once(Canned::json(json!({
        "results": [{"title": "Steve Jobs", "url": "https://example.org/sj"}]
    })));

    let client = SearxClient::new(SearxConfig {
        endpoint: format!("{}/search", base),
        timeout_secs: 0,
        ..Default::default()
    })
    .unwrap();

    let card = client.find_person("Steve Jobs").unwrap();
    assert_eq!(card.name, "Steve Jobs");
    server.join().unwrap();
}
