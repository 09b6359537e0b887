use std::time::Duration;

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;

use loglink::config::RelayConfig;
use loglink::error::LoglinkError;
use loglink::interfaces::relay::MessageSource;
use loglink::services::formatter::format_block;
use loglink::{FetchResponse, MessageFetcher, PLUGIN_VERSION};

fn fetcher_for(server: &MockServer) -> MessageFetcher {
    let relay = RelayConfig {
        timeout_seconds: Some(5),
        ..RelayConfig::with_base_url(server.base_url())
    };
    MessageFetcher::new(&relay).expect("build fetcher")
}

#[tokio::test]
async fn posts_token_and_version_and_keeps_message_order() {
    let server = MockServer::start_async().await;
    let relay_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/get_new_messages/")
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .json_body(json!({"user_id": "telegram123", "plugin_version": PLUGIN_VERSION}));
            then.status(200).json_body(json!({
                "messages": {"contents": [{"contents": "a"}, {"contents": "b"}]}
            }));
        })
        .await;

    let fetcher = fetcher_for(&server);
    assert!(fetcher.endpoint().ends_with("/get_new_messages/"));
    let response = fetcher.fetch("telegram123").await.expect("fetch");

    assert_eq!(
        response,
        FetchResponse::Success {
            messages: vec!["a".to_string(), "b".to_string()]
        }
    );
    relay_mock.assert_hits(1);
}

#[tokio::test]
async fn service_error_carries_status_and_message() {
    let server = MockServer::start_async().await;
    let relay_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/get_new_messages/");
            then.status(403).json_body(json!({"message": "bad token"}));
        })
        .await;

    let response = fetcher_for(&server).fetch("wrong").await.expect("fetch");

    assert_eq!(
        response,
        FetchResponse::Failure {
            status_code: 403,
            service_message: Some("bad token".to_string())
        }
    );
    relay_mock.assert_hits(1);
}

#[tokio::test]
async fn service_error_without_json_body_has_no_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/get_new_messages/");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let response = fetcher_for(&server).fetch("t").await.expect("fetch");
    assert_eq!(
        response,
        FetchResponse::Failure {
            status_code: 502,
            service_message: None
        }
    );
}

#[tokio::test]
async fn empty_batch_formats_to_header_only() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/get_new_messages/");
            then.status(200)
                .json_body(json!({"messages": {"contents": []}}));
        })
        .await;

    let response = fetcher_for(&server).fetch("t").await.expect("fetch");
    assert_eq!(response, FetchResponse::Success { messages: vec![] });

    let FetchResponse::Success { messages } = response else {
        panic!("expected success");
    };
    let block = format_block(&messages, time::macros::datetime!(2024-03-07 21:05:03 UTC));
    assert_eq!(
        block.as_str(),
        "Inserted from [[LogLink]] on 3/7/2024, 9:05:03 PM:\n"
    );
}

#[tokio::test]
async fn ok_status_with_unexpected_shape_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/get_new_messages/");
            then.status(200).json_body(json!({"messages": "none"}));
        })
        .await;

    let err = fetcher_for(&server).fetch("t").await.unwrap_err();
    assert!(matches!(err, LoglinkError::MalformedResponse(_)), "got {err}");
}

#[tokio::test]
async fn ok_status_with_non_json_body_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/get_new_messages/");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = fetcher_for(&server).fetch("t").await.unwrap_err();
    assert!(matches!(err, LoglinkError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn unreachable_relay_is_transport_error() {
    let relay = RelayConfig {
        connect_timeout_seconds: Some(1),
        timeout_seconds: Some(2),
        ..RelayConfig::with_base_url("http://127.0.0.1:1/")
    };
    let err = MessageFetcher::new(&relay)
        .unwrap()
        .fetch("t")
        .await
        .unwrap_err();
    assert!(matches!(err, LoglinkError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn slow_relay_hits_the_request_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/get_new_messages/");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({"messages": {"contents": []}}));
        })
        .await;

    let relay = RelayConfig {
        timeout_seconds: Some(1),
        ..RelayConfig::with_base_url(server.base_url())
    };
    let err = MessageFetcher::new(&relay)
        .unwrap()
        .fetch("t")
        .await
        .unwrap_err();
    assert!(matches!(err, LoglinkError::Transport(_)), "got {err}");
}
