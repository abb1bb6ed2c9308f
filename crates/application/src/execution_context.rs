//! The currently selected request and its latest execution result.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use agora_domain::{ExecutionPhase, Request, Response};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::execute_request::{ExecuteRequest, ExecuteResult, ExecutionError};
use crate::ports::HttpClient;

/// Opaque version marker of an [`ExecutionContext`].
///
/// Every state change produces a token different from the previous one.
/// Consumers keep the last token they rendered and recompute derived views
/// only when it changes, instead of comparing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeToken(Uuid);

impl ChangeToken {
    fn fresh() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ChangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tracks one selected request and the outcome of its latest execution.
///
/// Holds at most one of a response or an error. Execution failures are
/// stored here rather than returned, so a failed call is displayed like any
/// other result.
pub struct ExecutionContext<C: HttpClient> {
    executor: ExecuteRequest<C>,
    request: Option<Request>,
    outcome: Option<ExecuteResult>,
    duration: Duration,
    token: ChangeToken,
}

impl<C: HttpClient> ExecutionContext<C> {
    /// Creates an empty context that executes through `client`.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            executor: ExecuteRequest::new(client),
            request: None,
            outcome: None,
            duration: Duration::ZERO,
            token: ChangeToken::fresh(),
        }
    }

    fn refresh(&mut self) {
        self.token = ChangeToken::fresh();
    }

    /// Returns the current change token.
    #[must_use]
    pub const fn token(&self) -> ChangeToken {
        self.token
    }

    /// Returns true if no request is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.request.is_none()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> ExecutionPhase {
        match (&self.request, &self.outcome) {
            (None, _) => ExecutionPhase::Empty,
            (Some(_), None) => ExecutionPhase::Selected,
            (Some(_), Some(Ok(_))) => ExecutionPhase::Succeeded,
            (Some(_), Some(Err(_))) => ExecutionPhase::Failed,
        }
    }

    /// Returns the selected request.
    #[must_use]
    pub const fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    /// Selects a request, discarding any previous result.
    pub fn set_request(&mut self, request: Request) {
        self.request = Some(request);
        self.outcome = None;
        self.duration = Duration::ZERO;
        self.refresh();
    }

    /// Edits the selected request in place.
    ///
    /// Returns `None` without touching the token if nothing is selected.
    pub fn update_request<R>(&mut self, edit: impl FnOnce(&mut Request) -> R) -> Option<R> {
        let result = edit(self.request.as_mut()?);
        self.refresh();
        Some(result)
    }

    /// Returns the latest response.
    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().ok())
    }

    /// Returns the latest execution error.
    #[must_use]
    pub fn error(&self) -> Option<&ExecutionError> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().err())
    }

    /// Records a response, replacing any stored error.
    pub fn set_response(&mut self, response: Response) {
        self.outcome = Some(Ok(response));
        self.refresh();
    }

    /// Records an error, replacing any stored response.
    pub fn set_error(&mut self, error: ExecutionError) {
        self.outcome = Some(Err(error));
        self.refresh();
    }

    /// Returns how long the latest execution took, from sending the request
    /// to reading the last byte of the body.
    ///
    /// `None` unless a result is available.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        if self.phase().is_resolved() {
            Some(self.duration)
        } else {
            None
        }
    }

    /// Overrides the recorded duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        self.refresh();
    }

    /// Drops the selected request and any result.
    pub fn clear(&mut self) {
        self.request = None;
        self.outcome = None;
        self.duration = Duration::ZERO;
        self.refresh();
    }

    /// Executes the selected request and stores the outcome.
    ///
    /// Waits for the full response body. With no request selected the
    /// context stays `Empty`, but the token is still refreshed like after
    /// any other call.
    pub async fn exec(&mut self) {
        let Some(request) = self.request.as_ref() else {
            warn!("exec called with no request selected");
            self.refresh();
            return;
        };

        let start = Instant::now();
        let result = self.executor.execute(request).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => debug!(
                id = request.id(),
                status = response.status,
                elapsed_ms = elapsed.as_millis(),
                "request executed"
            ),
            Err(error) => debug!(
                id = request.id(),
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "request failed"
            ),
        }

        self.duration = elapsed;
        self.outcome = Some(result);
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{HttpMethod, KeyValuePairs};
    use pretty_assertions::assert_eq;

    use crate::ports::{HttpClientError, HttpFuture};

    /// Answers every request with the request's URL as body, after `delay`.
    struct EchoClient {
        status: u16,
        delay: Duration,
    }

    impl HttpClient for EchoClient {
        fn execute(&self, request: &Request) -> HttpFuture<'_> {
            let body = request.url.clone().into_bytes();
            let headers: KeyValuePairs = [("Content-Type", "text/plain")].into_iter().collect();
            Box::pin(async move {
                tokio::time::sleep(self.delay).await;
                Ok(Response::new(self.status, body, headers))
            })
        }
    }

    struct FailingClient;

    impl HttpClient for FailingClient {
        fn execute(&self, _request: &Request) -> HttpFuture<'_> {
            let error = HttpClientError::ConnectionFailed("reset".to_string());
            Box::pin(async move { Err::<Response, _>(error) })
        }
    }

    fn echo(status: u16) -> ExecutionContext<EchoClient> {
        ExecutionContext::new(Arc::new(EchoClient {
            status,
            delay: Duration::ZERO,
        }))
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let context = echo(200);
        assert!(context.is_empty());
        assert_eq!(context.phase(), ExecutionPhase::Empty);
        assert!(context.duration().is_none());
    }

    #[tokio::test]
    async fn test_exec_success_resolves_with_response() {
        let mut context = echo(200);
        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        assert_eq!(context.phase(), ExecutionPhase::Selected);

        context.exec().await;

        assert_eq!(context.phase(), ExecutionPhase::Succeeded);
        let response = context.response().expect("response stored");
        assert_eq!(response.content, b"http://x".to_vec());
        assert!(context.error().is_none());
        assert!(context.duration().is_some());
    }

    #[tokio::test]
    async fn test_non_2xx_resolves_as_response() {
        let mut context = echo(404);
        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        context.exec().await;

        assert_eq!(context.phase(), ExecutionPhase::Succeeded);
        assert_eq!(context.response().map(|r| r.status), Some(404));
    }

    #[tokio::test]
    async fn test_transport_failure_is_captured() {
        let mut context = ExecutionContext::new(Arc::new(FailingClient));
        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        context.exec().await;

        assert_eq!(context.phase(), ExecutionPhase::Failed);
        assert!(context.response().is_none());
        assert!(matches!(
            context.error(),
            Some(ExecutionError::Transport(HttpClientError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_validation_failure_is_captured() {
        let mut context = echo(200);
        context.set_request(Request::with_id("a", HttpMethod::Get, ""));
        context.exec().await;

        assert_eq!(context.error(), Some(&ExecutionError::EmptyUrl));
    }

    #[tokio::test]
    async fn test_duration_covers_the_full_call() {
        let mut context = ExecutionContext::new(Arc::new(EchoClient {
            status: 200,
            delay: Duration::from_millis(20),
        }));
        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        context.exec().await;

        assert!(context.duration().expect("resolved") >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_set_request_discards_previous_result() {
        let mut context = echo(200);
        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        context.exec().await;

        context.set_request(Request::with_id("b", HttpMethod::Get, "http://y"));

        assert_eq!(context.phase(), ExecutionPhase::Selected);
        assert!(context.response().is_none());
        assert!(context.duration().is_none());
    }

    #[tokio::test]
    async fn test_set_error_replaces_response() {
        let mut context = echo(200);
        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        context.set_response(Response::default());
        context.set_error(ExecutionError::EmptyUrl);

        assert!(context.response().is_none());
        assert_eq!(context.phase(), ExecutionPhase::Failed);
    }

    #[tokio::test]
    async fn test_clear_returns_to_empty() {
        let mut context = echo(200);
        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        context.exec().await;
        context.clear();

        assert_eq!(context.phase(), ExecutionPhase::Empty);
        assert!(context.request().is_none());
        assert!(context.response().is_none());
    }

    #[tokio::test]
    async fn test_every_transition_changes_the_token() {
        let mut context = echo(200);
        let mut last = context.token();
        let mut assert_changed = |context: &ExecutionContext<EchoClient>| {
            assert_ne!(context.token(), last);
            last = context.token();
        };

        for id in ["a", "b", "c"] {
            context.set_request(Request::with_id(id, HttpMethod::Get, "http://x"));
            assert_changed(&context);
            context.exec().await;
            assert_changed(&context);
            context.exec().await;
            assert_changed(&context);
        }
        context.update_request(|request| request.url = "http://z".to_string());
        assert_changed(&context);
        context.set_duration(Duration::from_millis(5));
        assert_changed(&context);
        context.clear();
        assert_changed(&context);
    }

    #[tokio::test]
    async fn test_exec_without_request_stays_empty_with_new_token() {
        let mut context = echo(200);
        let token = context.token();
        context.exec().await;

        assert_ne!(context.token(), token);
        assert_eq!(context.phase(), ExecutionPhase::Empty);
        assert!(context.response().is_none());
        assert!(context.error().is_none());
    }

    #[tokio::test]
    async fn test_update_request_keeps_id() {
        let mut context = echo(200);
        assert!(context.update_request(|r| r.auth.clear()).is_none());

        context.set_request(Request::with_id("a", HttpMethod::Get, "http://x"));
        context.update_request(|r| r.method = HttpMethod::Delete);

        let request = context.request().expect("selected");
        assert_eq!(request.id(), "a");
        assert_eq!(request.method, HttpMethod::Delete);
    }
}
