use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiki_core::errors::WikiError;
use wiki_core::model::{Item, Page, Panel};
use wiki_core::reactive::{Observer, Value};

/// Create a paragraph item
#[allow(dead_code)]
pub fn paragraph(id: &str, text: &str) -> Item {
    Item::new(id, "paragraph", text)
}

/// Create a panel with a fixed id and flag
#[allow(dead_code)]
pub fn test_panel(id: &str, title: &str, story: Vec<Item>) -> Panel {
    Panel::new(id, "./icon-120.png", Page::new(title, story))
}

/// One notification seen by a [`RecordingObserver`]
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Pending(String),
    Fulfilled(String, Value),
    Rejected(String, WikiError),
}

/// Observer that records every notification into a shared log
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub log: Arc<Mutex<Vec<Seen>>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.log.lock().unwrap().clone()
    }

    /// Last settled notification, skipping pending ones
    pub fn last_settled(&self) -> Option<Seen> {
        self.seen()
            .into_iter()
            .rev()
            .find(|s| !matches!(s, Seen::Pending(_)))
    }
}

impl Observer for RecordingObserver {
    fn pending(&mut self, name: &str) {
        self.log.lock().unwrap().push(Seen::Pending(name.to_string()));
    }

    fn fulfilled(&mut self, name: &str, value: &Value) {
        self.log
            .lock()
            .unwrap()
            .push(Seen::Fulfilled(name.to_string(), value.clone()));
    }

    fn rejected(&mut self, name: &str, error: &WikiError) {
        self.log
            .lock()
            .unwrap()
            .push(Seen::Rejected(name.to_string(), error.clone()));
    }
}

/// Serve one canned HTTP response on a local port; returns `host:port`
#[allow(dead_code)]
pub async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    addr.to_string()
}

/// An address nothing listens on
#[allow(dead_code)]
pub async fn refused_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}
