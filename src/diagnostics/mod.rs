//! Diagnostics capture.
//!
//! Server-side counterpart of `static/console-capture.js`: every tracing event
//! and every navigated path lands in a bounded in-memory buffer that an
//! embedding dashboard can poll from `/api/diagnostics`.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Entries kept before the oldest is dropped.
pub const MAX_LOGS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    #[serde(rename = "console-log")]
    ConsoleLog,
    #[serde(rename = "route-change")]
    RouteChange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LogEntry {
    fn now(kind: EntryKind, level: &str, message: String, url: Option<String>) -> Self {
        Self {
            kind,
            timestamp: Utc::now().to_rfc3339(),
            level: level.to_string(),
            message,
            url,
        }
    }
}

/// Shared ring buffer of diagnostic entries.
#[derive(Debug, Clone)]
pub struct DiagnosticsBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl Default for DiagnosticsBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOGS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn record_route(&self, url: &str) {
        self.push(LogEntry::now(
            EntryKind::RouteChange,
            "info",
            format!("navigated to {}", url),
            Some(url.to_string()),
        ));
    }

    /// Oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `tracing` layer that copies events into a [`DiagnosticsBuffer`].
#[derive(Debug, Clone)]
pub struct CaptureLayer {
    buffer: DiagnosticsBuffer,
}

impl CaptureLayer {
    pub fn new(buffer: DiagnosticsBuffer) -> Self {
        Self { buffer }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.buffer.push(LogEntry::now(
            EntryKind::ConsoleLog,
            level_name(metadata.level()),
            visitor.finish(metadata.target()),
            None,
        ));
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::WARN => "warn",
        Level::INFO => "info",
        Level::DEBUG => "debug",
        Level::TRACE => "trace",
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self, target: &str) -> String {
        let mut out = self.message.unwrap_or_else(|| target.to_string());
        for field in self.fields {
            out.push(' ');
            out.push_str(&field);
        }
        out
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// Middleware recording each page navigation as a `route-change` entry.
pub async fn record_navigation(
    State(buffer): State<DiagnosticsBuffer>,
    request: Request,
    next: Next,
) -> Response {
    let uri = request.uri();
    if !uri.path().starts_with("/static/") {
        let url = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        buffer.record_route(url);
    }
    next.run(request).await
}
