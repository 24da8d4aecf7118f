//! Per-request metadata handed to business handlers.

use std::collections::HashMap;
use std::fmt;

use crate::Identifier;

/// Transport a request arrived on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// In-process call, no transport involved.
    #[default]
    Local,
    Http,
    WebSocket,
    Tcp,
}

impl TransportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Local => "local",
            TransportKind::Http => "http",
            TransportKind::WebSocket => "websocket",
            TransportKind::Tcp => "tcp",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is calling and how. Read-only once the pipeline starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Locale error descriptors are produced for.
    pub locale: String,
    pub transport: TransportKind,
    pub remote_addr: Option<String>,
    pub correlation_id: Option<Identifier>,
    pub metadata: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<Identifier>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_every_field() {
        let ctx = RequestContext::new("de")
            .with_transport(TransportKind::WebSocket)
            .with_remote_addr("10.0.0.7:4040")
            .with_correlation_id("req-1")
            .with_metadata("tenant", "acme");
        assert_eq!(ctx.locale, "de");
        assert_eq!(ctx.transport.to_string(), "websocket");
        assert_eq!(ctx.remote_addr.as_deref(), Some("10.0.0.7:4040"));
        assert_eq!(ctx.correlation_id, Some(Identifier::new("req-1")));
        assert_eq!(ctx.metadata("tenant"), Some("acme"));
        assert_eq!(ctx.metadata("missing"), None);
    }

    #[test]
    fn default_is_local_without_locale() {
        let ctx = RequestContext::default();
        assert_eq!(ctx.transport, TransportKind::Local);
        assert!(ctx.locale.is_empty());
    }
}
