//! HTTP transport using reqwest.
//!
//! Implements the `HttpClient` port. The wire request is built synchronously
//! from the stored request, then sent, and the response body is read in
//! full before the future resolves.

use agora_application::ports::{HttpClient, HttpClientError, HttpFuture};
use agora_domain::{HttpMethod, KeyValuePairs, Request, Response, is_json};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

/// Redirects followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// No request timeout is configured; a request only fails on time if the
/// operating system gives up on the connection.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client that follows up to [`MAX_REDIRECTS`] redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("agora/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Trace => Method::TRACE,
        }
    }

    /// Parses `url` and appends `params` to its query, keeping any query
    /// the URL already has.
    fn build_url(url: &str, params: &KeyValuePairs) -> Result<Url, HttpClientError> {
        let mut parsed =
            Url::parse(url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;
        if !params.is_empty() {
            let mut query = parsed.query_pairs_mut();
            for param in params {
                query.append_pair(&param.key, &param.value);
            }
        }
        Ok(parsed)
    }

    /// Builds the wire request.
    ///
    /// Headers are added in order, repeated keys included. `auth` becomes
    /// the `Authorization` header unless a header already sets it. A body
    /// that parses as JSON gets `Content-Type: application/json` unless a
    /// content type is already set.
    fn build_request(&self, request: &Request) -> Result<reqwest::Request, HttpClientError> {
        let url = Self::build_url(&request.url, &request.params)?;
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for header in &request.headers {
            builder = builder.header(header.key.as_str(), header.value.as_str());
        }

        if !request.auth.is_empty() && !request.headers.contains_key(AUTHORIZATION.as_str()) {
            builder = builder.header(AUTHORIZATION, request.auth.as_str());
        }

        if !request.body.is_empty() {
            if is_json(&request.body) && !request.headers.contains_key(CONTENT_TYPE.as_str()) {
                builder = builder.header(CONTENT_TYPE, "application/json");
            }
            builder = builder.body(request.body.clone());
        }

        builder
            .build()
            .map_err(|e| HttpClientError::InvalidBody(e.to_string()))
    }

    /// Maps reqwest errors to the port's error type.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_timeout() {
            return HttpClientError::Timeout;
        }

        if error.is_builder() {
            return HttpClientError::InvalidBody(error.to_string());
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &Request) -> HttpFuture<'_> {
        let built = self.build_request(request);

        Box::pin(async move {
            let built = built?;
            debug!(method = %built.method(), url = %built.url(), "Sending request");

            let response = self
                .client
                .execute(built)
                .await
                .map_err(|e| Self::map_error(&e))?;

            let status = response.status().as_u16();
            let headers: KeyValuePairs = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();

            let content = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            debug!(status, bytes = content.len(), "Response received");
            Ok(Response::new(status, content, headers))
        })
    }
}
