//! Clipboard service
//!
//! The host page provides the real key/value persistence (browser
//! storage); the editor only sees this trait and receives an instance
//! explicitly wherever copy/paste happens. Payloads are JSON arrays of
//! serialized objects, the same record format documents use.

/// Key/value clipboard persistence provided by the host
pub trait Clipboard {
    fn is_empty(&self) -> bool;
    fn get(&self) -> Option<String>;
    fn set(&mut self, payload: String);
    fn clear(&mut self);
}

/// In-memory clipboard, for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    payload: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    fn get(&self) -> Option<String> {
        self.payload.clone()
    }

    fn set(&mut self, payload: String) {
        self.payload = Some(payload);
    }

    fn clear(&mut self) {
        self.payload = None;
    }
}
