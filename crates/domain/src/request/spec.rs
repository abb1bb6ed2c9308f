//! Request definition type

use serde::{Deserialize, Serialize};

use super::body::{minify_json, prettify_json, text_or_base64};
use super::{HttpMethod, KeyValuePairs};
use crate::id::generate_id;

/// A stored HTTP request definition.
///
/// The `id` is assigned once and never changes; it names the request's
/// record on disk. Duplicating a request goes through [`Request::duplicate`],
/// which always assigns a fresh id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    id: String,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL
    #[serde(default)]
    pub url: String,
    /// Raw body bytes, conventionally JSON text
    #[serde(default, with = "text_or_base64")]
    pub body: Vec<u8>,
    /// Query parameters, in order
    #[serde(default)]
    pub params: KeyValuePairs,
    /// Headers, in order
    #[serde(default)]
    pub headers: KeyValuePairs,
    /// Opaque authorization value
    #[serde(default)]
    pub auth: String,
}

impl Request {
    /// Creates a request with a freshly generated id.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self::with_id(generate_id(), method, url)
    }

    /// Creates a request with a caller-chosen id.
    #[must_use]
    pub fn with_id(id: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            method,
            url: url.into(),
            body: Vec::new(),
            params: KeyValuePairs::new(),
            headers: KeyValuePairs::new(),
            auth: String::new(),
        }
    }

    /// Returns the immutable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a copy of this request under a new id.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: generate_id(),
            ..self.clone()
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the body, minifying it when it is valid JSON.
    #[must_use]
    pub fn with_body(mut self, body: impl AsRef<[u8]>) -> Self {
        self.body = minify_json(body.as_ref());
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn with_params(mut self, params: KeyValuePairs) -> Self {
        self.params = params;
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(key, value);
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn with_headers(mut self, headers: KeyValuePairs) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the authorization value.
    #[must_use]
    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = auth.into();
        self
    }

    /// Returns the label to show for this request, falling back to the URL.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.url,
        }
    }

    /// Returns the body pretty-printed when it is JSON.
    #[must_use]
    pub fn pretty_body(&self) -> String {
        prettify_json(&self.body)
    }
}
