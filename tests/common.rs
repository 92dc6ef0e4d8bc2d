#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Binary under test, isolated from the developer's own config file.
pub fn whops(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("whops");
    cmd.env("HOME", home).env_remove("WHOPS_API_BASE_URL");
    for proxy in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(proxy);
    }
    cmd
}

/// Unique temp dir holding a fresh HOME and database for one test.
pub struct TestEnv {
    pub home: String,
    pub db: String,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        let mut dir: PathBuf = env::temp_dir();
        dir.push(format!("whops_it_{name}"));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).expect("create test dir");
        let db = dir.join("whops.sqlite").to_string_lossy().to_string();
        Self {
            home: dir.to_string_lossy().to_string(),
            db,
        }
    }

    /// Command with `--db` set; run `init` once before anything else.
    pub fn cmd(&self) -> Command {
        let mut c = whops(&self.home);
        c.args(["--db", &self.db]);
        c
    }

    pub fn cmd_against(&self, server: &StubServer) -> Command {
        let mut c = self.cmd();
        c.env("WHOPS_API_BASE_URL", server.base_url());
        c
    }

    pub fn init(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub auth: Option<String>,
    pub body: Value,
}

type Handler = dyn Fn(&Request) -> (u16, String) + Send + Sync + 'static;

/// Minimal HTTP/1.1 server answering canned JSON, one connection at a time.
pub struct StubServer {
    addr: String,
    stop: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<Request>>>,
    handle: Option<JoinHandle<()>>,
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut len = 0usize;
    let mut auth = None;
    loop {
        let mut h = String::new();
        reader.read_line(&mut h).ok()?;
        let h = h.trim_end();
        if h.is_empty() {
            break;
        }
        if let Some((k, v)) = h.split_once(':') {
            match k.trim().to_ascii_lowercase().as_str() {
                "content-length" => len = v.trim().parse().unwrap_or(0),
                "authorization" => auth = Some(v.trim().to_string()),
                _ => {}
            }
        }
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).ok()?;
    let body = serde_json::from_slice(&buf).unwrap_or(Value::Null);
    Some(Request { method, path, auth, body })
}

impl StubServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Request) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        listener.set_nonblocking(true).expect("nonblocking");
        let addr = listener.local_addr().expect("addr").to_string();
        let stop = Arc::new(AtomicBool::new(false));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let stop_flag = Arc::clone(&stop);
        let log = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((mut stream, _)) => {
                        stream.set_nonblocking(false).ok();
                        let Some(req) = read_request(&mut stream) else {
                            continue;
                        };
                        let (status, body) = handler(&req);
                        log.lock().expect("lock").push(req);
                        let resp = format!(
                            "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        stream.write_all(resp.as_bytes()).ok();
                        stream.flush().ok();
                    }
                    Err(_) => thread::sleep(Duration::from_millis(5)),
                }
            }
        });

        Self {
            addr,
            stop,
            requests,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("lock").clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(h) = self.handle.take() {
            h.join().ok();
        }
    }
}

pub fn login_ok() -> (u16, String) {
    (
        200,
        r#"{"token":"user-tok","user":{"_id":"u1","name":"Ali Raza","email":"ali@example.com","role":"warehouse_manager"}}"#.into(),
    )
}

pub fn admin_login_ok() -> (u16, String) {
    (
        200,
        r#"{"token":"admin-tok","admin":{"_id":"a1","name":"Sara","email":"sara@example.com"}}"#.into(),
    )
}
