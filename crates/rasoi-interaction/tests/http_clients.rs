use rasoi_core::dialogue::{DialogueSession, FlowEngine, TurnOutput};
use rasoi_core::prediction::{
    PredictionError, PredictionRequest, PredictionService, ReplyLanguage, SuggestionOption,
    TerminalActionInvoker,
};
use rasoi_core::trends::{TrendsError, TrendsService};
use rasoi_interaction::{PredictionApiClient, TrendsApiClient};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Reads one HTTP/1.1 request and returns `(request line, body)`.
async fn read_request(stream: &mut TcpStream) -> (String, String) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request_line = head.lines().next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    (request_line, body)
}

/// Serves a single canned response; the handle yields what the client sent.
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<(String, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/suggest", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        request
    });

    (url, handle)
}

fn margherita_request() -> PredictionRequest {
    PredictionRequest {
        dish_name: "Margherita Pizza".to_string(),
        order_date: "2025-10-20".to_string(),
        option: SuggestionOption::Both,
        language: ReplyLanguage::English,
    }
}

const MARGHERITA_RESPONSE: &str = r#"{"dish_name":"Margherita Pizza","date":"2025-10-20","season":"Autumn","festival":"None","toppings":["Basil","Olives"],"addons":["Garlic Bread"]}"#;

#[tokio::test]
async fn test_success_response_is_passed_through() {
    let (url, server) = serve_once(200, MARGHERITA_RESPONSE).await;
    let client = PredictionApiClient::new(url, TIMEOUT).unwrap();

    let payload = client.predict(&margherita_request()).await.unwrap();

    let expected: Value = serde_json::from_str(MARGHERITA_RESPONSE).unwrap();
    assert_eq!(payload.as_json(), &expected);

    let (request_line, body) = server.await.unwrap();
    assert!(request_line.starts_with("POST /api/suggest"));
    let sent: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        sent,
        json!({
            "dish_name": "Margherita Pizza",
            "order_date": "2025-10-20",
            "option": "both",
            "language": "English"
        })
    );
}

#[tokio::test]
async fn test_server_error_status() {
    let (url, _server) =
        serve_once(500, r#"{"error": "Server Error", "message": "boom"}"#).await;
    let client = PredictionApiClient::new(url, TIMEOUT).unwrap();

    let err = client.predict(&margherita_request()).await.unwrap_err();

    assert_eq!(err, PredictionError::status(500, "Server Error: boom"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_bad_request_status() {
    let (url, _server) = serve_once(400, r#"{"error": "No JSON payload provided"}"#).await;
    let client = PredictionApiClient::new(url, TIMEOUT).unwrap();

    let err = client.predict(&margherita_request()).await.unwrap_err();

    assert!(matches!(err, PredictionError::Status { status: 400, .. }));
    assert!(!err.message().is_empty());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_html_body_is_malformed() {
    let (url, _server) = serve_once(200, "<html>oops</html>").await;
    let client = PredictionApiClient::new(url, TIMEOUT).unwrap();

    let err = client.predict(&margherita_request()).await.unwrap_err();

    assert!(matches!(err, PredictionError::Malformed { .. }));
}

#[tokio::test]
async fn test_error_indicator_in_success_body() {
    let (url, _server) = serve_once(200, r#"{"error": "llm_failed", "message": "quota"}"#).await;
    let client = PredictionApiClient::new(url, TIMEOUT).unwrap();

    let err = client.predict(&margherita_request()).await.unwrap_err();

    assert_eq!(err, PredictionError::remote("llm_failed: quota"));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = PredictionApiClient::new(format!("http://{addr}/api/suggest"), TIMEOUT).unwrap();

    let err = client.predict(&margherita_request()).await.unwrap_err();

    assert!(matches!(err, PredictionError::Network { timed_out: false, .. }));
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_timeout_maps_to_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/suggest", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(stream);
    });
    let client = PredictionApiClient::new(url, Duration::from_millis(200)).unwrap();

    let err = client.predict(&margherita_request()).await.unwrap_err();

    assert!(err.is_timeout(), "{err:?}");
}

#[tokio::test]
async fn test_truncated_body_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/suggest", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await;
        let partial = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{\"dish_name\":";
        stream.write_all(partial.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    });
    let client = PredictionApiClient::new(url, TIMEOUT).unwrap();

    let err = client.predict(&margherita_request()).await.unwrap_err();

    assert!(matches!(err, PredictionError::Network { timed_out: false, .. }), "{err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_flow_engine_over_http() {
    let (url, server) = serve_once(200, MARGHERITA_RESPONSE).await;
    let client = PredictionApiClient::new(url, TIMEOUT).unwrap();
    let engine = FlowEngine::new(TerminalActionInvoker::new(Arc::new(client)));
    let mut session = DialogueSession::chef_guru();

    let mut last = None;
    for input in ["Margherita Pizza", "2025-10-20", "both", "english", "predict"] {
        last = Some(engine.submit(&mut session, input).await.unwrap());
    }

    let TurnOutput::Predicted(payload) = last.unwrap().output else {
        panic!("expected a prediction");
    };
    assert_eq!(payload.summary().unwrap().season, "Autumn");
    assert!(session.is_terminal());

    let (_, body) = server.await.unwrap();
    let sent: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(sent["language"], "English");
}

#[tokio::test]
async fn test_trends_success() {
    let (url, server) = serve_once(
        200,
        r#"{"status": "success", "data": [{"dish_name": "Vada Pav", "views": 10, "likes": 2, "comments_count": 1, "popularity_score": 12.5}]}"#,
    )
    .await;
    let client = TrendsApiClient::new(url, TIMEOUT).unwrap();

    let trends = client.fetch_trends().await.unwrap();

    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].dish_name, "Vada Pav");
    let (request_line, _) = server.await.unwrap();
    assert!(request_line.starts_with("GET "));
}

#[tokio::test]
async fn test_trends_error_envelope() {
    let (url, _server) = serve_once(500, r#"{"status": "error", "message": "csv missing"}"#).await;
    let client = TrendsApiClient::new(url, TIMEOUT).unwrap();

    let err = client.fetch_trends().await.unwrap_err();

    assert_eq!(err, TrendsError::Status { status: 500 });
}
