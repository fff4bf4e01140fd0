use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::audit::{audit, Violation};
use super::conflicts::{ConflictChecker, ConflictPolicy, ConflictRejection, Proposal};
use super::domain::{Assignment, AssignmentCandidate, AssignmentId, LecturerId, SectionId};
use super::repository::{AssignmentFilter, AssignmentStore, StoreError};
use super::validation::{validate_candidate, ValidatedCandidate, ValidationError};

/// Validates and conflict-checks submissions before persisting them.
///
/// Reading the snapshot and writing the records are separate store calls with no isolation
/// between them: two writers validating against the same snapshot can both succeed and
/// collide. [`audit`](super::audit::audit) detects such collisions after the fact.
pub struct AssignmentWriter<S> {
    store: Arc<S>,
    checker: Arc<ConflictChecker>,
}

static SECTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Issue a section id numbered above every `sec-N` already present in `snapshot`, so sections
/// written by an earlier run or imported from a file are never reused.
fn next_section_id(snapshot: &[Assignment]) -> SectionId {
    let floor = snapshot
        .iter()
        .filter_map(|assignment| assignment.section.0.strip_prefix("sec-")?.parse::<u64>().ok())
        .max()
        .map_or(1, |highest| highest.saturating_add(1));
    SECTION_SEQUENCE.fetch_max(floor, Ordering::Relaxed);
    let id = SECTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SectionId(format!("sec-{id:06}"))
}

impl<S> AssignmentWriter<S>
where
    S: AssignmentStore + 'static,
{
    pub fn new(store: Arc<S>, policy: ConflictPolicy) -> Self {
        Self {
            store,
            checker: Arc::new(ConflictChecker::new(policy)),
        }
    }

    pub fn checker(&self) -> &ConflictChecker {
        &self.checker
    }

    /// Current contents of the assignment collection.
    pub fn snapshot(&self) -> Result<Vec<Assignment>, StoreError> {
        self.store.query(&AssignmentFilter::default())
    }

    pub fn assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, StoreError> {
        self.store.query(filter)
    }

    /// A lecturer's assignments ordered by block, slot, then room.
    pub fn lecturer_timetable(
        &self,
        lecturer: &LecturerId,
    ) -> Result<Vec<Assignment>, StoreError> {
        let mut assignments = self
            .store
            .query(&AssignmentFilter::default().lecturer(lecturer.clone()))?;
        assignments.sort_by(|left, right| {
            (left.block, left.time_slot, left.room, &left.course_code).cmp(&(
                right.block,
                right.time_slot,
                right.room,
                &right.course_code,
            ))
        });
        Ok(assignments)
    }

    /// Assignments for any of a student's modules, matched on course name.
    pub fn student_timetable(&self, modules: &[String]) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|assignment| modules.contains(&assignment.course))
            .collect())
    }

    /// Invariant breaches present in the current snapshot.
    pub fn audit(&self) -> Result<Vec<Violation>, StoreError> {
        let snapshot = self.snapshot()?;
        let violations = audit(&snapshot, self.checker.policy());
        if !violations.is_empty() {
            warn!(violations = violations.len(), "assignment audit found violations");
        }
        Ok(violations)
    }

    /// Run the conflict checker against a fresh snapshot without writing anything.
    pub fn check(
        &self,
        proposal: &Proposal,
        exclude: Option<&AssignmentId>,
    ) -> Result<(), AssignmentWriteError> {
        let snapshot = self.snapshot()?;
        self.checker.check(proposal, &snapshot, exclude)?;
        Ok(())
    }

    /// Create (no `target`) or update (`target` set) from a form submission, re-reading the
    /// snapshot from the store first.
    pub fn save(
        &self,
        candidate: &AssignmentCandidate,
        target: Option<&AssignmentId>,
    ) -> Result<SaveOutcome, AssignmentWriteError> {
        let validated = validate_candidate(candidate, target.is_some())?;
        let snapshot = self.snapshot()?;
        self.commit(validated, target, &snapshot)
    }

    /// Same as [`save`](Self::save) but checks against a snapshot supplied by the caller.
    pub fn save_against(
        &self,
        candidate: &AssignmentCandidate,
        target: Option<&AssignmentId>,
        snapshot: &[Assignment],
    ) -> Result<SaveOutcome, AssignmentWriteError> {
        let validated = validate_candidate(candidate, target.is_some())?;
        self.commit(validated, target, snapshot)
    }

    /// Remove an assignment, freeing its room, slot, and block load.
    pub fn relieve(&self, id: &AssignmentId) -> Result<(), AssignmentWriteError> {
        self.store.delete(id)?;
        info!(assignment = %id.0, "assignment relieved");
        Ok(())
    }

    fn commit(
        &self,
        validated: ValidatedCandidate,
        target: Option<&AssignmentId>,
        snapshot: &[Assignment],
    ) -> Result<SaveOutcome, AssignmentWriteError> {
        let mut proposal = validated.proposal();
        if target.is_some() {
            proposal.records = 1;
        }

        if let Err(rejection) = self.checker.check(&proposal, snapshot, target) {
            info!(
                reason = rejection.reason.code(),
                lecturer = %proposal.lecturer.0,
                room = %proposal.room,
                time_slot = %proposal.time_slot,
                block = %proposal.block,
                "assignment rejected"
            );
            return Err(rejection.into());
        }

        match target {
            Some(id) => self.overwrite(validated, id, snapshot),
            None => self.create_all(validated, snapshot),
        }
    }

    fn overwrite(
        &self,
        validated: ValidatedCandidate,
        id: &AssignmentId,
        snapshot: &[Assignment],
    ) -> Result<SaveOutcome, AssignmentWriteError> {
        let section = snapshot
            .iter()
            .find(|assignment| &assignment.id == id)
            .map(|assignment| assignment.section.clone())
            .unwrap_or_else(|| next_section_id(snapshot));
        let draft = validated.draft(section, &validated.courses[0]);

        self.store.update(id, draft.clone())?;
        info!(
            assignment = %id.0,
            room = %draft.room,
            time_slot = %draft.time_slot,
            "assignment updated"
        );

        Ok(SaveOutcome {
            written: vec![Assignment::from_draft(id.clone(), draft)],
        })
    }

    fn create_all(
        &self,
        validated: ValidatedCandidate,
        snapshot: &[Assignment],
    ) -> Result<SaveOutcome, AssignmentWriteError> {
        let section = next_section_id(snapshot);
        let mut written = Vec::with_capacity(validated.courses.len());
        let mut failed = Vec::new();

        for course in &validated.courses {
            let draft = validated.draft(section.clone(), course);
            match self.store.create(draft.clone()) {
                Ok(id) => {
                    debug!(assignment = %id.0, course_code = %course.code, "assignment created");
                    written.push(Assignment::from_draft(id, draft));
                }
                Err(error) => {
                    warn!(course_code = %course.code, %error, "assignment write failed");
                    failed.push(FailedWrite {
                        course_code: course.code.clone(),
                        error,
                    });
                }
            }
        }

        if !failed.is_empty() {
            return Err(AssignmentWriteError::Incomplete { written, failed });
        }

        info!(
            section = %section.0,
            lecturer = %validated.lecturer.id.0,
            records = written.len(),
            "assignments created"
        );
        Ok(SaveOutcome { written })
    }
}

/// Records written by a successful save, so callers can refresh their view without re-reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub written: Vec<Assignment>,
}

/// A course code whose record could not be written during a multi-code create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedWrite {
    pub course_code: String,
    pub error: StoreError,
}

/// Error raised by the assignment writer.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentWriteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Conflict(#[from] ConflictRejection),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(
        "{} of {} course code(s) were written",
        written.len(),
        written.len() + failed.len()
    )]
    Incomplete {
        written: Vec<Assignment>,
        failed: Vec<FailedWrite>,
    },
}

impl AssignmentWriteError {
    /// Stable code for API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            AssignmentWriteError::Validation(_) => "VALIDATION_ERROR",
            AssignmentWriteError::Conflict(rejection) => rejection.reason.code(),
            AssignmentWriteError::Store(_) => "STORE_ERROR",
            AssignmentWriteError::Incomplete { .. } => "INCOMPLETE_WRITE",
        }
    }
}
