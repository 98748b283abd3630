//! Integration tests over a real socket, exercising the default
//! reqwest-backed transport against a mockito server.

use reqkit::{CallDescriptor, Client, ErrorKind};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn get_round_trips_path_query_and_headers() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/hello")
        .match_query(mockito::Matcher::UrlEncoded("pag".into(), "2".into()))
        .match_header("accept", "application/json,text/plain,application/pdf,image/jpg")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"ok"}"#)
        .create_async()
        .await;

    let client = Client::new();
    let descriptor = CallDescriptor::new(server.url())
        .with_path("hello")
        .with_query_param("pag", 2);
    let response = client.call(descriptor).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.status_message, "OK");
    assert_eq!(response.http_version, "1.1");
    assert!(response.complete);
    assert!(!response.aborted);
    assert_eq!(
        response.body.as_json().unwrap(),
        &serde_json::json!({"message": "ok"})
    );
    assert_eq!(response.headers["content-type"], "application/json");
    assert!(response
        .raw_headers
        .iter()
        .any(|h| h.eq_ignore_ascii_case("content-type")));
}

#[tokio::test]
async fn post_writes_serialized_json_payload() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/todos")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::JsonString(
            r#"{"test":"test"}"#.to_string(),
        ))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"created":true}"#)
        .create_async()
        .await;

    let client = Client::new();
    let endpoint = format!("{}/todos", server.url());
    let response = client
        .post(endpoint, serde_json::json!({"test": "test"}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status_code, 201);
    assert_eq!(
        response.body.as_json().unwrap(),
        &serde_json::json!({"created": true})
    );
}

#[tokio::test]
async fn error_status_rejects_and_safe_mode_settles() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"internal error"}"#)
        .expect_at_least(2)
        .create_async()
        .await;

    let raising = Client::new();
    let err = raising.get(server.url()).await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Request));
    assert!(err.to_string().contains("internal error"));

    let safe = Client::safe();
    let response = safe.get(server.url()).await.unwrap();
    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.body.as_json().unwrap(),
        &serde_json::json!({"message": "internal error"})
    );
}

#[tokio::test]
async fn strict_mode_rejects_html_response() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<h1>test</h1>")
        .create_async()
        .await;

    let client = Client::new();
    let err = client
        .call(CallDescriptor::new(server.url()).with_strict_mode(true))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Request));
}

#[tokio::test]
async fn non_json_body_degrades_to_raw() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<h1>test</h1>")
        .create_async()
        .await;

    let client = Client::new();
    let response = client.get(server.url()).await.unwrap();
    assert!(response.body.as_json().is_none());
    assert_eq!(response.body.to_text(), "<h1>test</h1>");
    assert_eq!(response.raw_body, bytes::Bytes::from_static(b"<h1>test</h1>"));
}

#[tokio::test]
async fn mid_stream_failure_propagates_unclassified() {
    use std::error::Error as _;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Serve valid headers claiming a 1000-byte body, send a fragment of it,
    // and drop the connection so the body stream errors mid-buffering.
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  content-type: application/json\r\n\
                  content-length: 1000\r\n\
                  \r\n\
                  {\"partial\":",
            )
            .await;
        let _ = socket.flush().await;
    });

    let client = Client::new();
    let err = client.get(format!("http://{addr}")).await.unwrap_err();
    assert_eq!(err.kind(), None);
    assert!(matches!(err, reqkit::Error::Transport(_)));
    assert!(err.to_string().contains("stream"), "message was: {err}");
    // The underlying cause is chained, not swallowed.
    assert!(err.source().is_some());
}

#[tokio::test]
async fn connection_failure_propagates_unclassified() {
    init_tracing();
    // Nothing listens on port 1.
    let client = Client::new();
    let err = client.get("http://127.0.0.1:1").await.unwrap_err();
    assert_eq!(err.kind(), None);
    assert!(matches!(err, reqkit::Error::Transport(_)));
}
