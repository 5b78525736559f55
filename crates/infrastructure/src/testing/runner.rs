//! Runs one case: hooks, request, validation.

use apitest_application::HarnessError;
use apitest_domain::{Case, Failure, Hook, RunnerSettings, Stage, TestContext};

use super::guard::run_guarded;
use super::validator::ResponseValidator;
use crate::harness::HandlerRequest;

/// Executes a single case against a handler.
///
/// The order is fixed: suite before-hook (unless the case skips it), case
/// before-hook, request, validation, case after-hook, suite after-hook
/// (unless skipped). Every stage runs even if an earlier one failed.
pub struct CaseRunner<'a> {
    request: HandlerRequest<'a>,
    suite_before: Option<&'a Hook>,
    suite_after: Option<&'a Hook>,
    validator: ResponseValidator,
    catch_panics: bool,
}

impl<'a> CaseRunner<'a> {
    /// Creates a runner for `request` with no suite hooks.
    #[must_use]
    pub fn new(request: HandlerRequest<'a>, settings: &RunnerSettings) -> Self {
        Self {
            request: request.catch_panics(settings.catch_panics),
            suite_before: None,
            suite_after: None,
            validator: ResponseValidator::new(settings),
            catch_panics: settings.catch_panics,
        }
    }

    /// Sets the suite-level hooks.
    #[must_use]
    pub fn with_suite_hooks(mut self, before: Option<&'a Hook>, after: Option<&'a Hook>) -> Self {
        self.suite_before = before;
        self.suite_after = after;
        self
    }

    /// Runs `case`, recording every failure on `ctx`.
    pub fn run(&self, ctx: &mut TestContext, case: &Case) {
        if case.suite_before.runs() {
            self.run_hook(ctx, Stage::SuiteBefore, self.suite_before);
        }
        self.run_hook(ctx, Stage::CaseBefore, case.before.as_ref());

        let invocation = self.request.send(&case.content, &[case.expected_status]);
        match &invocation.error {
            Some(HarnessError::HandlerPanicked { reason, .. }) => ctx.record(Failure::Panicked {
                stage: Stage::Handler,
                reason: reason.clone(),
            }),
            Some(err) => ctx.record(Failure::Harness {
                reason: err.to_string(),
            }),
            None => {}
        }
        self.validator.validate(ctx, case, &invocation.response);

        self.run_hook(ctx, Stage::CaseAfter, case.after.as_ref());
        if case.suite_after.runs() {
            self.run_hook(ctx, Stage::SuiteAfter, self.suite_after);
        }
    }

    fn run_hook(&self, ctx: &mut TestContext, stage: Stage, hook: Option<&Hook>) {
        let Some(hook) = hook else {
            return;
        };
        tracing::debug!(%stage, "running hook");
        if let Err(reason) = run_guarded(self.catch_panics, || hook(ctx)) {
            ctx.record(Failure::Panicked { stage, reason });
        }
    }
}
