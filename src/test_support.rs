//! Loopback DynamoDB endpoint for tests.
//!
//! Speaks just enough HTTP/1.1 and the DynamoDB JSON 1.0 protocol for a real
//! `StoreClient` to run against it. Every request is recorded with its
//! operation name (from `X-Amz-Target`) and decoded JSON body.

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::client::{ClientConfig, StoreClient};

type Handler = dyn Fn(&str, &Value) -> (u16, Value) + Send + Sync;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    pub body: Value,
}

pub struct StubDynamo {
    endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubDynamo {
    /// Bind to an ephemeral port and answer every request with `handler(operation, body)`.
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> (u16, Value) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let log = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let handler = handler.clone();
                let log = log.clone();
                thread::spawn(move || serve_connection(stream, handler.as_ref(), &log));
            }
        });

        Self { endpoint, requests }
    }

    /// A client pointed at this stub with dummy credentials.
    pub fn client(&self) -> StoreClient {
        let config = ClientConfig {
            region: Some("us-east-1".to_string()),
            ..ClientConfig::local(self.endpoint.clone())
        };
        StoreClient::new(config).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.operation).collect()
    }
}

/// Response for a DynamoDB service error such as `ResourceNotFoundException`.
pub fn service_error(code: &str, message: &str) -> (u16, Value) {
    (
        400,
        json!({
            "__type": format!("com.amazonaws.dynamodb.v20120810#{code}"),
            "message": message,
        }),
    )
}

/// Successful DescribeTable response for an ACTIVE table.
pub fn active_table(name: &str) -> (u16, Value) {
    (
        200,
        json!({ "Table": { "TableName": name, "TableStatus": "ACTIVE" } }),
    )
}

fn serve_connection(stream: TcpStream, handler: &Handler, log: &Mutex<Vec<RecordedRequest>>) {
    let Ok(mut writer) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(stream);

    // One request per iteration; the SDK keeps connections alive.
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let mut operation = String::new();
        let mut content_length = 0usize;
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap_or(0) == 0 {
                return;
            }
            let header = line.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                let value = value.trim();
                match name.trim().to_ascii_lowercase().as_str() {
                    "x-amz-target" => {
                        operation = value.rsplit('.').next().unwrap_or_default().to_string();
                    }
                    "content-length" => content_length = value.parse().unwrap_or(0),
                    _ => {}
                }
            }
        }

        let mut raw = vec![0u8; content_length];
        if reader.read_exact(&mut raw).is_err() {
            return;
        }
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        let (status, response) = handler(&operation, &body);
        log.lock().unwrap().push(RecordedRequest { operation, body });

        let payload = response.to_string();
        let reason = if status == 200 { "OK" } else { "Bad Request" };
        let head = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/x-amz-json-1.0\r\nContent-Length: {}\r\n\r\n",
            payload.len()
        );
        if writer.write_all(head.as_bytes()).is_err()
            || writer.write_all(payload.as_bytes()).is_err()
        {
            return;
        }
    }
}

/// Scratch directory removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "seqstore-{label}-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
