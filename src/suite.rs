//! Suite execution with group-level setup/teardown hooks.
//!
//! A [`Suite`] runs an ordered sequence of [`Case`]s, each belonging to a
//! shared [`Group`]. The runner tracks the current group across consecutive
//! cases and fires the group's optional `set_up` hook before the first case
//! of a contiguous run and its `tear_down` hook after the last — on every
//! transition, so a group appearing twice with other groups in between gets
//! its hooks twice. Absent hooks are skipped silently.
//!
//! The shared [`RunResult`] carries a stop flag: once set, no further cases
//! execute, but the teardown for the group active at the stop still runs
//! exactly once before `run` returns.
//!
//! Everything here is single-threaded; the stop flag is shared through
//! [`StopHandle`] clones so hooks and case bodies can request a stop.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::error::TestFailure;

// =============================================================================
// Group
// =============================================================================

/// Shared group identity with optional class-level hooks.
///
/// Cases reference their group through an `Arc`; the runner compares group
/// identity by pointer, so two cases belong to the same group only when
/// they share the same `Arc<Group>`.
pub struct Group {
    name: String,
    set_up: Option<Box<dyn Fn()>>,
    tear_down: Option<Box<dyn Fn()>>,
}

impl Group {
    /// Create a hookless group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set_up: None,
            tear_down: None,
        }
    }

    /// Attach a setup hook, run before the first case of each contiguous
    /// run of this group's cases.
    #[must_use]
    pub fn with_set_up(mut self, hook: impl Fn() + 'static) -> Self {
        self.set_up = Some(Box::new(hook));
        self
    }

    /// Attach a teardown hook, run after the last case of each contiguous
    /// run of this group's cases.
    #[must_use]
    pub fn with_tear_down(mut self, hook: impl Fn() + 'static) -> Self {
        self.tear_down = Some(Box::new(hook));
        self
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn run_set_up(&self) {
        if let Some(hook) = &self.set_up {
            debug!(group = %self.name, "running group set_up");
            hook();
        }
    }

    fn run_tear_down(&self) {
        if let Some(hook) = &self.tear_down {
            debug!(group = %self.name, "running group tear_down");
            hook();
        }
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("set_up", &self.set_up.is_some())
            .field("tear_down", &self.tear_down.is_some())
            .finish()
    }
}

// =============================================================================
// Case
// =============================================================================

/// A single named test with a fallible body, belonging to a group.
pub struct Case {
    name: String,
    group: Arc<Group>,
    body: Box<dyn FnMut() -> Result<(), TestFailure>>,
}

impl Case {
    /// Create a case in the given group.
    pub fn new(
        name: impl Into<String>,
        group: &Arc<Group>,
        body: impl FnMut() -> Result<(), TestFailure> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            group: Arc::clone(group),
            body: Box::new(body),
        }
    }

    /// Case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the group this case belongs to.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.group.name()
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("group", &self.group.name)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Run Result
// =============================================================================

/// One recorded case failure.
#[derive(Debug)]
pub struct CaseFailure {
    pub case: String,
    pub group: String,
    pub failure: TestFailure,
}

/// Clonable handle onto a result's stop flag, for hooks and case bodies.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request that the run stop before the next case.
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Shared result object for a suite run.
#[derive(Debug, Default)]
pub struct RunResult {
    run: usize,
    passed: usize,
    failures: Vec<CaseFailure>,
    stop: Arc<AtomicBool>,
    fail_fast: bool,
}

impl RunResult {
    /// Fresh result; failing cases are recorded and the run continues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh result that requests a stop after the first failure.
    #[must_use]
    pub fn fail_fast() -> Self {
        Self {
            fail_fast: true,
            ..Self::default()
        }
    }

    /// Request that the run stop before the next case.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Handle onto the stop flag, for hooks and case bodies.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop),
        }
    }

    /// Number of cases executed.
    #[must_use]
    pub const fn run_count(&self) -> usize {
        self.run
    }

    /// Number of cases that passed.
    #[must_use]
    pub const fn passed_count(&self) -> usize {
        self.passed
    }

    /// Number of cases that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Recorded failures, in execution order.
    #[must_use]
    pub fn failures(&self) -> &[CaseFailure] {
        &self.failures
    }

    /// Whether every executed case passed.
    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_pass(&mut self) {
        self.run += 1;
        self.passed += 1;
    }

    fn record_failure(&mut self, case: String, group: String, failure: TestFailure) {
        self.run += 1;
        self.failures.push(CaseFailure {
            case,
            group,
            failure,
        });
        if self.fail_fast {
            self.request_stop();
        }
    }
}

// =============================================================================
// Suite
// =============================================================================

/// Ordered collection of cases executed together.
#[derive(Debug, Default)]
pub struct Suite {
    cases: Vec<Case>,
}

impl Suite {
    /// Empty suite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a case. Cases run in insertion order.
    pub fn push(&mut self, case: Case) {
        self.cases.push(case);
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the suite holds no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Run every case in order, firing group hooks on each transition.
    ///
    /// The stop flag is checked before each case: once set, no further
    /// cases execute (and no new group is set up), but the teardown for the
    /// group active at that moment still runs exactly once.
    pub fn run(&mut self, result: &mut RunResult) {
        let mut active: Option<Arc<Group>> = None;

        for case in &mut self.cases {
            if result.stop_requested() {
                break;
            }

            let same_group = active
                .as_ref()
                .is_some_and(|group| Arc::ptr_eq(group, &case.group));
            if !same_group {
                if let Some(previous) = active.take() {
                    previous.run_tear_down();
                }
                case.group.run_set_up();
                active = Some(Arc::clone(&case.group));
            }

            debug!(case = %case.name, group = %case.group.name, "running case");
            match (case.body)() {
                Ok(()) => result.record_pass(),
                Err(failure) => {
                    warn!(case = %case.name, error = %failure, "case failed");
                    result.record_failure(
                        case.name.clone(),
                        case.group.name.clone(),
                        failure,
                    );
                }
            }
        }

        if let Some(previous) = active.take() {
            previous.run_tear_down();
        }
    }
}
