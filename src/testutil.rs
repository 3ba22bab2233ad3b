// src/testutil.rs

//! Minimal HTTP/1.1 server for loader tests. Serves one canned response for
//! every GET and counts requests.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct Shared {
    status: u16,
    body: String,
    paths: Vec<String>,
}

pub struct SheetServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    shared: Arc<Mutex<Shared>>,
}

impl SheetServer {
    /// Bind to an ephemeral port; the accept loop runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let hits = Arc::new(AtomicUsize::new(0));
        let shared = Arc::new(Mutex::new(Shared {
            status: 200,
            ..Shared::default()
        }));

        let (h, s) = (Arc::clone(&hits), Arc::clone(&shared));
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let (h, s) = (Arc::clone(&h), Arc::clone(&s));
                thread::spawn(move || handle(stream, &h, &s));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/", port),
            hits,
            shared,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn respond(&self, status: u16, body: &str) {
        let mut s = self.shared.lock().unwrap();
        s.status = status;
        s.body = body.to_string();
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request targets (path + query) seen so far.
    pub fn paths(&self) -> Vec<String> {
        self.shared.lock().unwrap().paths.clone()
    }
}

/// A base URL nothing listens on, for simulating an unreachable network.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn handle(mut stream: TcpStream, hits: &AtomicUsize, shared: &Mutex<Shared>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();

    hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = {
        let mut s = shared.lock().unwrap();
        s.paths.push(target);
        (s.status, s.body.clone())
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
    let _ = stream.flush();
}
