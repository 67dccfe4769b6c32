use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

/// A request as seen by [`StubServer`]
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query, e.g. `/notes?folder_id=f1`
    pub target: String,
    pub body: String,
}

/// Canned reply for one request
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

#[allow(dead_code)]
impl StubResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(status: u16, content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status,
            content_type,
            body: body.to_vec(),
        }
    }
}

/// Minimal HTTP/1.1 server answering a fixed sequence of requests, one
/// connection each, then shutting down.
pub struct StubServer {
    pub url: String,
    handle: JoinHandle<Result<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub fn serve(responses: Vec<StubResponse>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind stub server")?;
        let url = format!("http://{}", listener.local_addr()?);

        let handle = std::thread::spawn(move || {
            let mut recorded = Vec::new();
            for response in responses {
                let (stream, _) = listener.accept().context("Failed to accept connection")?;
                recorded.push(handle_connection(stream, &response)?);
            }
            Ok(recorded)
        });

        Ok(Self { url, handle })
    }

    /// Wait for all canned responses to be served and return what was asked.
    pub fn finish(self) -> Result<Vec<RecordedRequest>> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("Stub server thread panicked"))?
    }
}

fn handle_connection(stream: TcpStream, response: &StubResponse) -> Result<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let stream = reader.get_mut();
    write!(
        stream,
        "HTTP/1.1 {} Stub\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.content_type,
        response.body.len()
    )?;
    stream.write_all(&response.body)?;
    stream.flush()?;

    Ok(RecordedRequest {
        method,
        target,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Address nothing listens on.
#[allow(dead_code)]
pub fn closed_port_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
