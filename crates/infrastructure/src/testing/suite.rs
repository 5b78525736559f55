//! Suite runner: many cases against one handler, route and method.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use apitest_application::{Clock, Handler};
use apitest_domain::{
    Case, CaseReport, DomainResult, Hook, HttpMethod, Route, RunnerSettings, SuiteReport,
    TestContext,
};

use super::runner::CaseRunner;
use crate::adapters::SystemClock;
use crate::config::{ConfigError, load_settings_from};
use crate::harness::HandlerRequest;

/// A handler under test together with its shared hooks.
///
/// Every case run by a suite targets the same method, route and handler.
/// The suite hooks run around each case unless the case opts out.
///
/// A new suite uses [`RunnerSettings::default`]. The `APITEST_*` variables
/// are only read through [`Suite::with_env_settings`].
pub struct Suite {
    method: HttpMethod,
    route: Route,
    handler: Box<dyn Handler>,
    before_each: Option<Hook>,
    after_each: Option<Hook>,
    settings: RunnerSettings,
    clock: Arc<dyn Clock>,
}

impl Suite {
    /// Creates a suite for `handler` served at `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if `route` is not a valid request target.
    pub fn new(
        method: HttpMethod,
        route: &str,
        handler: impl Handler + 'static,
    ) -> DomainResult<Self> {
        Ok(Self {
            method,
            route: Route::parse(route)?,
            handler: Box::new(handler),
            before_each: None,
            after_each: None,
            settings: RunnerSettings::default(),
            clock: Arc::new(SystemClock),
        })
    }

    /// Sets the hook run before every case.
    #[must_use]
    pub fn before_each(mut self, hook: impl Fn(&mut TestContext) + Send + Sync + 'static) -> Self {
        self.before_each = Some(Box::new(hook));
        self
    }

    /// Sets the hook run after every case.
    #[must_use]
    pub fn after_each(mut self, hook: impl Fn(&mut TestContext) + Send + Sync + 'static) -> Self {
        self.after_each = Some(Box::new(hook));
        self
    }

    /// Overrides the runner settings for this suite.
    #[must_use]
    pub fn with_settings(mut self, settings: RunnerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Applies settings from the `APITEST_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable with a malformed value.
    pub fn with_env_settings(self) -> Result<Self, ConfigError> {
        self.with_settings_from(|var| std::env::var(var).ok())
    }

    /// Applies settings read through `lookup`, as [`load_settings_from`]
    /// does.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable with a malformed value.
    pub fn with_settings_from(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(self.with_settings(load_settings_from(lookup)?))
    }

    /// Uses `clock` for report timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Method every case is sent with.
    #[must_use]
    pub const fn method(&self) -> &HttpMethod {
        &self.method
    }

    /// Route every case is sent to.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// A bare request against this suite's handler, for use outside a case.
    #[must_use]
    pub fn request(&self) -> HandlerRequest<'_> {
        HandlerRequest::new(self.method.clone(), &self.route, self.handler.as_ref())
            .catch_panics(self.settings.catch_panics)
    }

    /// Runs one case in its own context and reports the outcome.
    pub fn run_handler_test(&self, case: &Case) -> CaseReport {
        let span = tracing::info_span!(
            "case",
            case = %case.name,
            method = %self.method,
            route = %self.route,
        );
        let _guard = span.enter();

        let started_at = self.clock.now();
        let timer = Instant::now();
        let mut ctx = TestContext::new(&case.name);

        CaseRunner::new(self.request(), &self.settings)
            .with_suite_hooks(self.before_each.as_ref(), self.after_each.as_ref())
            .run(&mut ctx, case);

        for failure in ctx.failures() {
            tracing::warn!(%failure, "check failed");
        }
        CaseReport::from_context(ctx, started_at, elapsed_ms(timer))
    }

    /// Runs every case in order.
    ///
    /// With `stop_on_failure` set, the cases after the first failure are
    /// reported as skipped and none of their hooks run.
    pub fn run_handler_tests(&self, cases: &[Case]) -> SuiteReport {
        let started_at = self.clock.now();
        let timer = Instant::now();

        let mut seen = HashSet::new();
        let mut reports = Vec::with_capacity(cases.len());
        let mut stopped = false;

        for case in cases {
            if !seen.insert(case.name.as_str()) {
                tracing::warn!(case = %case.name, "duplicate case name");
            }
            if stopped {
                reports.push(CaseReport::skipped(&case.name, self.clock.now()));
                continue;
            }
            let report = self.run_handler_test(case);
            stopped = self.settings.stop_on_failure && !report.passed();
            reports.push(report);
        }

        let report = SuiteReport::new(
            self.method.clone(),
            self.route.as_str(),
            reports,
            started_at,
            elapsed_ms(timer),
        );
        tracing::info!(
            method = %report.method,
            route = %report.route,
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms = report.duration_ms,
            "suite finished"
        );
        report
    }

    /// Runs every case and panics if any of them did not pass.
    ///
    /// # Panics
    ///
    /// Panics with the failing cases and their failures.
    pub fn assert_handler_tests(&self, cases: &[Case]) -> SuiteReport {
        let report = self.run_handler_tests(cases);
        report.assert_passed();
        report
    }
}

impl std::fmt::Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("method", &self.method)
            .field("route", &self.route)
            .field("before_each", &self.before_each.is_some())
            .field("after_each", &self.after_each.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(timer: Instant) -> u64 {
    u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX)
}
