use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bridgejob_backend::services::telegram_service::{ChatTransport, TelegramClient};
use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One scripted reply of the stub Bot API.
#[derive(Clone)]
struct Reply {
    delay: Duration,
    status: &'static str,
    body: &'static str,
}

impl Reply {
    fn ok(body: &'static str) -> Self {
        Self { delay: Duration::ZERO, status: "200 OK", body }
    }

    fn status(status: &'static str, body: &'static str) -> Self {
        Self { delay: Duration::ZERO, status, body }
    }

    fn slow(delay: Duration, body: &'static str) -> Self {
        Self { delay, status: "200 OK", body }
    }
}

const SENT: &str = r#"{"ok":true,"result":{"message_id":77}}"#;
const DELETED: &str = r#"{"ok":true,"result":true}"#;
const SERVER_ERROR: &str = r#"{"ok":false,"error_code":500,"description":"Internal Server Error"}"#;
const RATE_LIMITED: &str = r#"{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 0","parameters":{"retry_after":0}}"#;

struct StubApi {
    url: String,
    requests: Arc<AtomicUsize>,
}

impl StubApi {
    /// Replies follow the script; the last entry repeats.
    async fn start(script: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let reply = script[n.min(script.len() - 1)].clone();
                tokio::spawn(serve(stream, reply));
            }
        });
        Self { url, requests }
    }

    fn client(&self, timeout: Duration) -> TelegramClient {
        let http = Client::builder().timeout(timeout).build().unwrap();
        TelegramClient::new(http, &self.url, "1:test")
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn serve(mut stream: TcpStream, reply: Reply) {
    read_request(&mut stream).await;
    tokio::time::sleep(reply.delay).await;
    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let Ok(read) = stream.read(&mut chunk).await else {
            return;
        };
        if read == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..read]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}

#[tokio::test]
async fn send_is_not_repeated_after_a_timeout() {
    let api = StubApi::start(vec![Reply::slow(Duration::from_millis(400), SENT)]).await;
    let client = api.client(Duration::from_millis(100));

    let result = client.send_text(-100, "channel post").await;

    assert!(result.is_err());
    assert_eq!(api.requests(), 1);
}

#[tokio::test]
async fn send_is_not_repeated_after_a_server_error() {
    let api = StubApi::start(vec![
        Reply::status("500 Internal Server Error", SERVER_ERROR),
        Reply::ok(SENT),
    ])
    .await;
    let client = api.client(Duration::from_secs(5));

    let result = client.send_text(-100, "channel post").await;

    assert!(result.is_err());
    assert_eq!(api.requests(), 1);
}

#[tokio::test]
async fn rate_limited_send_is_retried() {
    let api = StubApi::start(vec![
        Reply::status("429 Too Many Requests", RATE_LIMITED),
        Reply::ok(SENT),
    ])
    .await;
    let client = api.client(Duration::from_secs(5));

    let message_id = client.send_text(-100, "channel post").await.unwrap();

    assert_eq!(message_id, 77);
    assert_eq!(api.requests(), 2);
}

#[tokio::test]
async fn delete_is_retried_after_a_server_error() {
    let api = StubApi::start(vec![
        Reply::status("500 Internal Server Error", SERVER_ERROR),
        Reply::ok(DELETED),
    ])
    .await;
    let client = api.client(Duration::from_secs(5));

    client.delete_message(-100, 77).await.unwrap();

    assert_eq!(api.requests(), 2);
}
