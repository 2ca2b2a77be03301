//! Blocking HTTP server used to observe ingest requests in tests.
//!
//! The server accepts a fixed number of connections on a background thread,
//! parses each request, answers with whatever the responder returns, and
//! forwards the captured request over a channel.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, unbounded};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    /// Look up a header by lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

/// Status and body returned for a captured request.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Parses a single header line into a key-value pair.
fn parse_header_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    line.split_once(':')
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
}

/// Reads all headers from the request and returns them with the content length.
fn read_headers(reader: &mut BufReader<TcpStream>) -> (Vec<(String, String)>, usize) {
    let mut headers = Vec::new();
    let mut content_length = 0usize;

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = parse_header_line(&line) else {
            continue;
        };
        if key == "content-length" {
            content_length = value.parse().unwrap_or(0);
        }
        headers.push((key, value));
    }

    (headers, content_length)
}

fn read_body(reader: &mut BufReader<TcpStream>, content_length: usize) -> String {
    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).expect("read body");
    }
    String::from_utf8_lossy(&body).to_string()
}

fn read_http_request(stream: &mut TcpStream) -> CapturedRequest {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let parts: Vec<&str> = request_line.trim().split(' ').collect();
    let method = parts.first().unwrap_or(&"").to_string();
    let path = parts.get(1).unwrap_or(&"").to_string();

    let (headers, content_length) = read_headers(&mut reader);
    let body = read_body(&mut reader, content_length);

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

fn write_response(stream: &mut TcpStream, response: &MockResponse) {
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        status_text(response.status),
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
    let _ = stream.flush();
}

/// Bind an ephemeral listener on the loopback interface.
pub fn loopback_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

/// Serve `requests` connections, answering each through `respond`.
pub fn spawn_mock_server<F>(
    listener: TcpListener,
    requests: usize,
    respond: F,
) -> (SocketAddr, Receiver<CapturedRequest>)
where
    F: Fn(&CapturedRequest) -> MockResponse + Send + 'static,
{
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = unbounded();

    thread::spawn(move || {
        for _ in 0..requests {
            let Ok((mut stream, _)) = listener.accept() else {
                break;
            };
            let captured = read_http_request(&mut stream);
            write_response(&mut stream, &respond(&captured));
            let _ = tx.send(captured);
        }
    });

    (addr, rx)
}

/// Serve `requests` connections, answering every one with `status` and an
/// empty body.
pub fn spawn_status_server(
    listener: TcpListener,
    requests: usize,
    status: u16,
) -> (SocketAddr, Receiver<CapturedRequest>) {
    spawn_mock_server(listener, requests, move |_| MockResponse::new(status, ""))
}

/// Mimic the ingest endpoint's token check: `200` when the bearer token
/// matches `token`, `401` otherwise.
pub fn spawn_ingest_server(
    listener: TcpListener,
    requests: usize,
    token: &str,
) -> (SocketAddr, Receiver<CapturedRequest>) {
    let expected = (!token.is_empty()).then(|| format!("Bearer {token}"));
    spawn_mock_server(listener, requests, move |req| {
        let authorised =
            expected.is_some() && req.header("authorization") == expected.as_deref();
        if authorised {
            MockResponse::new(200, "{}")
        } else {
            MockResponse::new(401, "The supplied ingest token is not valid")
        }
    })
}

/// Address nothing is listening on, for connection-refused scenarios.
pub fn refused_addr() -> SocketAddr {
    let listener = loopback_listener();
    let addr = listener.local_addr().expect("listener has address");
    drop(listener);
    addr
}
