//! Response type

use crate::request::{KeyValuePairs, prettify_json};

/// The result of executing a request.
///
/// Responses are never persisted; they live only in the execution context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Full response body
    pub content: Vec<u8>,
    /// Response headers, in the order the server sent them
    pub headers: KeyValuePairs,
}

impl Response {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: u16, content: Vec<u8>, headers: KeyValuePairs) -> Self {
        Self {
            status,
            content,
            headers,
        }
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    /// Returns the body pretty-printed when it is JSON.
    #[must_use]
    pub fn pretty_content(&self) -> String {
        prettify_json(&self.content)
    }
}
