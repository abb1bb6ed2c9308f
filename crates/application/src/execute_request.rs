//! Execute Request Use Case
//!
//! Validates a request and hands it to the transport.

use std::sync::Arc;

use agora_domain::{Request, RequestErrorKind, Response};
use thiserror::Error;

use crate::ports::{HttpClient, HttpClientError};

/// Result type for request execution.
pub type ExecuteResult = Result<Response, ExecutionError>;

/// Why an execution produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is not an http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed.
    #[error("{0}")]
    Transport(#[from] HttpClientError),
}

impl ExecutionError {
    /// Returns true if the request was rejected before reaching the transport.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyUrl | Self::InvalidUrl(_))
    }

    /// Classifies the error for display.
    #[must_use]
    pub const fn kind(&self) -> RequestErrorKind {
        match self {
            Self::EmptyUrl | Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::Transport(e) => e.to_error_kind(),
        }
    }
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let response = use_case.execute(&Request::new(HttpMethod::Get, "https://example.com")).await?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request and returns the response.
    ///
    /// Any status code counts as a response; only validation and transport
    /// failures are errors.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError` on validation or transport failures.
    pub async fn execute(&self, request: &Request) -> ExecuteResult {
        Self::validate(request)?;
        let response = self.client.execute(request).await?;
        Ok(response)
    }

    fn validate(request: &Request) -> Result<(), ExecutionError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(ExecutionError::EmptyUrl);
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ExecutionError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{HttpMethod, KeyValuePairs};

    use crate::ports::HttpFuture;

    struct MockHttpClient {
        response: Result<Response, HttpClientError>,
    }

    impl MockHttpClient {
        fn status(status: u16) -> Self {
            Self {
                response: Ok(Response::new(status, b"OK".to_vec(), KeyValuePairs::new())),
            }
        }

        fn error(err: HttpClientError) -> Self {
            Self { response: Err(err) }
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(&self, _request: &Request) -> HttpFuture<'_> {
            let result = self.response.clone();
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::status(200)));

        let request = Request::new(HttpMethod::Get, "https://api.example.com/test");
        let response = use_case.execute(&request).await.expect("should be ok");

        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_non_2xx_is_not_an_error() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::status(500)));

        let request = Request::new(HttpMethod::Get, "https://api.example.com/test");
        let response = use_case.execute(&request).await.expect("should be ok");

        assert!(response.is_server_error());
    }

    #[tokio::test]
    async fn test_execute_empty_url() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::status(200)));

        let result = use_case.execute(&Request::new(HttpMethod::Get, "  ")).await;

        assert_eq!(result, Err(ExecutionError::EmptyUrl));
    }

    #[tokio::test]
    async fn test_execute_invalid_url() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::status(200)));

        let result = use_case
            .execute(&Request::new(HttpMethod::Get, "ftp://example.com"))
            .await;

        assert!(matches!(result, Err(ExecutionError::InvalidUrl(_))));
        assert!(result.is_err_and(|e| e.is_validation()));
    }

    #[tokio::test]
    async fn test_execute_transport_error() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::error(
            HttpClientError::Timeout,
        )));

        let request = Request::new(HttpMethod::Get, "https://api.example.com/test");
        let error = use_case.execute(&request).await.expect_err("should fail");

        assert_eq!(error, ExecutionError::Transport(HttpClientError::Timeout));
        assert_eq!(error.kind(), RequestErrorKind::Timeout);
        assert!(!error.is_validation());
    }
}
