//! Minimal HTTP/1.1 server serving named files for integration tests.
//!
//! Routes:
//! - `GET /models/<name>`: 200 with the registered body, 404 for unknown names
//! - `GET /moved/<name>`: 302 to `/models/<name>`
//! - `GET /truncated/<name>`: advertises the full length, sends half, closes
//! - `GET /flaky/<name>`: 503 on the first request for a name, then the body
//!
//! Every request is counted so tests can assert on network activity.

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

pub struct ModelServer {
    addr: String,
    hits: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

struct Shared {
    files: HashMap<String, Vec<u8>>,
    flaky_seen: Mutex<HashSet<String>>,
}

impl ModelServer {
    /// Starts a server in a background thread. The server runs until the process exits.
    pub fn start(files: &[(&str, &[u8])]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let hits = Arc::new(AtomicUsize::new(0));
        let paths = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::new(Shared {
            files: files
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_vec()))
                .collect(),
            flaky_seen: Mutex::new(HashSet::new()),
        });

        let (h, p) = (Arc::clone(&hits), Arc::clone(&paths));
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let shared = Arc::clone(&shared);
                let h = Arc::clone(&h);
                let p = Arc::clone(&p);
                thread::spawn(move || handle(stream, &shared, &h, &p));
            }
        });

        Self {
            addr: format!("http://127.0.0.1:{}", port),
            hits,
            paths,
        }
    }

    /// Base URL for one of the routes, e.g. `base("models")`.
    pub fn base(&self, route: &str) -> String {
        format!("{}/{}", self.addr, route)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, shared: &Shared, hits: &AtomicUsize, paths: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    hits.fetch_add(1, Ordering::SeqCst);
    paths.lock().unwrap().push(path.clone());

    let mut parts = path.trim_start_matches('/').splitn(2, '/');
    let route = parts.next().unwrap_or("");
    let name = parts.next().unwrap_or("");
    let body = shared.files.get(name);

    match (route, body) {
        ("models", Some(body)) => respond(&mut stream, "200 OK", &[], body),
        ("moved", Some(_)) => {
            let location = format!("Location: /models/{}", name);
            respond(&mut stream, "302 Found", &[location.as_str()], b"");
        }
        ("truncated", Some(body)) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body[..body.len() / 2]);
        }
        ("flaky", Some(body)) => {
            let first = shared.flaky_seen.lock().unwrap().insert(name.to_string());
            if first {
                respond(&mut stream, "503 Service Unavailable", &[], b"busy");
            } else {
                respond(&mut stream, "200 OK", &[], body);
            }
        }
        _ => respond(&mut stream, "404 Not Found", &[], b"not found"),
    }
}

fn respond(stream: &mut TcpStream, status: &str, headers: &[&str], body: &[u8]) {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        body.len()
    );
    for h in headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
