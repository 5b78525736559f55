//! Request harness: one synchronous handler invocation.
//!
//! A [`HandlerRequest`] holds the method, route and handler; [`send`]
//! builds a fresh request around a body, runs the handler against a
//! [`ResponseRecorder`], reads the body to completion and checks the status
//! against an accepted set.
//!
//! [`send`]: HandlerRequest::send

use std::io::Read;

use apitest_application::{Handler, HarnessError, HarnessResult};
use apitest_domain::{CapturedResponse, HttpMethod, RequestSpec, Route};

use crate::adapters::ResponseRecorder;
use crate::testing::guard::run_guarded;

/// Everything needed to call a handler repeatedly.
#[derive(Clone)]
pub struct HandlerRequest<'a> {
    method: HttpMethod,
    route: &'a Route,
    handler: &'a dyn Handler,
    catch_panics: bool,
}

impl<'a> HandlerRequest<'a> {
    /// Creates a request target for `handler`.
    #[must_use]
    pub fn new(method: HttpMethod, route: &'a Route, handler: &'a dyn Handler) -> Self {
        Self {
            method,
            route,
            handler,
            catch_panics: true,
        }
    }

    /// Whether a panicking handler is reported as an error instead of
    /// unwinding through the caller. On by default.
    #[must_use]
    pub fn catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    /// Method of every request sent.
    #[must_use]
    pub const fn method(&self) -> &HttpMethod {
        &self.method
    }

    /// Route of every request sent.
    #[must_use]
    pub const fn route(&self) -> &Route {
        self.route
    }

    /// Sends `content` to the handler.
    ///
    /// An empty `accepted` slice disables the status check. The captured
    /// response is returned even when an error is reported, so callers can
    /// inspect what the handler actually produced.
    #[must_use]
    pub fn send(&self, content: &str, accepted: &[u16]) -> Invocation {
        let request = RequestSpec::new(self.method.clone(), self.route.clone(), content);
        let mut recorder = ResponseRecorder::new();

        let served = run_guarded(self.catch_panics, || {
            self.handler.serve(&mut recorder, &request);
        });

        let recorded = recorder.finish();
        let mut reader = recorded.body;
        let mut body = Vec::new();
        let read = reader.read_to_end(&mut body);

        let response = CapturedResponse::new(recorded.status, recorded.headers, body);
        tracing::debug!(
            method = %self.method,
            route = %self.route,
            status = response.status_u16(),
            body_len = response.body.len(),
            "handler request completed"
        );

        let error = if let Err(reason) = served {
            Some(HarnessError::HandlerPanicked {
                route: self.route.to_string(),
                reason,
            })
        } else if let Err(source) = read {
            Some(HarnessError::BodyRead {
                route: self.route.to_string(),
                source,
            })
        } else if !accepted.is_empty() && !accepted.contains(&response.status_u16()) {
            Some(HarnessError::UnacceptedStatus {
                route: self.route.to_string(),
                status: response.status_u16(),
                body: response.body_text(),
            })
        } else {
            None
        };

        Invocation { response, error }
    }
}

/// The outcome of one handler invocation.
#[derive(Debug)]
pub struct Invocation {
    /// Whatever the handler produced.
    pub response: CapturedResponse,
    /// The harness error, if any.
    pub error: Option<HarnessError>,
}

impl Invocation {
    /// Whether the invocation raised no harness error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, dropping the response on error.
    ///
    /// # Errors
    ///
    /// Returns the harness error if one was raised.
    pub fn into_result(self) -> HarnessResult<CapturedResponse> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.response),
        }
    }
}
