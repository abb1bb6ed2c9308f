//! HTTP transport port

use std::future::Future;
use std::pin::Pin;

use agora_domain::{Request, RequestErrorKind, Response};

/// Error returned by the transport when no full response could be read.
///
/// A non-2xx status is not an error; it comes back as a normal `Response`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be built from its headers or body.
    #[error("Invalid request: {0}")]
    InvalidBody(String),

    /// Host name resolution failed.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error text.
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established or was dropped.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The transport's own timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The redirect limit was exceeded.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Any other transport failure, including errors reading the body.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Classifies the error for display.
    #[must_use]
    pub const fn to_error_kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::InvalidBody(_) => RequestErrorKind::InvalidBody,
            Self::DnsError { .. } => RequestErrorKind::DnsError,
            Self::ConnectionRefused { .. } => RequestErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            Self::Timeout => RequestErrorKind::Timeout,
            Self::TooManyRedirects { .. } => RequestErrorKind::TooManyRedirects,
            Self::Other(_) => RequestErrorKind::Unknown,
        }
    }
}

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<Response, HttpClientError>> + Send + 'a>>;

/// Port for sending a request over the network.
///
/// Implementations build the wire request from the method, URL, params,
/// headers, body and auth of the given `Request`, and resolve once the
/// entire response body has been read.
pub trait HttpClient: Send + Sync {
    /// Executes the request.
    fn execute(&self, request: &Request) -> HttpFuture<'_>;
}
