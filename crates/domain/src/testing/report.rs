//! Per-case and per-suite results.

use std::fmt;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Failure, TestContext};
use crate::request::HttpMethod;

/// Final state of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Every check held.
    Passed,
    /// At least one failure was recorded.
    Failed,
    /// The case was not run.
    Skipped,
}

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Final state.
    pub status: CaseStatus,
    /// Every failure recorded, in order.
    pub failures: Vec<Failure>,
    /// Number of checks evaluated.
    pub checks: usize,
    /// When the case started.
    pub started_at: DateTime<Utc>,
    /// Wall time spent in the case.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Builds a report from a finished context.
    #[must_use]
    pub fn from_context(ctx: TestContext, started_at: DateTime<Utc>, duration_ms: u64) -> Self {
        let (name, failures, checks) = ctx.into_parts();
        let status = if failures.is_empty() {
            CaseStatus::Passed
        } else {
            CaseStatus::Failed
        };
        Self {
            name,
            status,
            failures,
            checks,
            started_at,
            duration_ms,
        }
    }

    /// Report for a case that was never run.
    #[must_use]
    pub fn skipped(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Skipped,
            failures: Vec::new(),
            checks: 0,
            started_at: at,
            duration_ms: 0,
        }
    }

    /// Whether the case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.status {
            CaseStatus::Passed => "PASS",
            CaseStatus::Failed => "FAIL",
            CaseStatus::Skipped => "SKIP",
        };
        write!(
            f,
            "{label} {} ({} checks, {}ms)",
            self.name, self.checks, self.duration_ms
        )?;
        for failure in &self.failures {
            write!(f, "\n    - {failure}")?;
        }
        Ok(())
    }
}

/// Results from running every case of a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Method the suite targets.
    pub method: HttpMethod,
    /// Route the suite targets.
    pub route: String,
    /// Case reports in execution order.
    pub cases: Vec<CaseReport>,
    /// Number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Number of skipped cases.
    pub skipped: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall time of the run.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Builds a suite report, tallying case states.
    #[must_use]
    pub fn new(
        method: HttpMethod,
        route: impl Into<String>,
        cases: Vec<CaseReport>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
    ) -> Self {
        let count = |status| cases.iter().filter(|c| c.status == status).count();
        let passed = count(CaseStatus::Passed);
        let failed = count(CaseStatus::Failed);
        let skipped = count(CaseStatus::Skipped);

        Self {
            run_id: Uuid::now_v7(),
            method,
            route: route.into(),
            total: cases.len(),
            cases,
            passed,
            failed,
            skipped,
            started_at,
            duration_ms,
        }
    }

    /// Check if every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    /// Pass rate as a percentage of cases that ran.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        let ran = self.passed + self.failed;
        if ran == 0 {
            100.0
        } else {
            (self.passed as f64 / ran as f64) * 100.0
        }
    }

    /// Looks up a case report by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Every failure with the name of the case it belongs to.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.cases
            .iter()
            .flat_map(|c| c.failures.iter().map(move |f| (c.name.as_str(), f)))
    }

    /// Panics with every failing and skipped case if the run did not pass.
    ///
    /// This is how a suite run surfaces in `cargo test`.
    ///
    /// # Panics
    ///
    /// Panics when any case failed or was skipped.
    #[allow(clippy::panic)]
    pub fn assert_passed(&self) {
        if self.all_passed() {
            return;
        }
        let mut message = format!(
            "{} {}: {} of {} cases failed, {} skipped",
            self.method, self.route, self.failed, self.total, self.skipped
        );
        for case in self.cases.iter().filter(|c| !c.passed()) {
            let _ = write!(message, "\n  {case}");
        }
        panic!("{message}");
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} passed, {} failed, {} skipped ({}ms)",
            self.method, self.route, self.passed, self.failed, self.skipped, self.duration_ms
        )?;
        for case in &self.cases {
            write!(f, "\n  {case}")?;
        }
        Ok(())
    }
}
