//! Faculty assignments: which lecturer teaches a course code in a given room, slot and block.
//!
//! The conflict checker is a pure function over an explicit snapshot; the writer composes it with
//! the [`AssignmentStore`] seam for create, update, and relieve.

pub mod audit;
pub mod conflicts;
pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub(crate) mod validation;
pub mod writer;

#[cfg(test)]
mod tests;

pub use audit::{audit, Violation};
pub use conflicts::{
    check_conflict, ConflictChecker, ConflictPolicy, ConflictReason, ConflictRejection, Proposal,
};
pub use domain::{
    Assignment, AssignmentCandidate, AssignmentDraft, AssignmentId, CourseRef, LecturerId,
    LecturerRef, SectionId,
};
pub use memory::MemoryAssignmentStore;
pub use repository::{AssignmentFilter, AssignmentStore, StoreError};
pub use router::assignment_router;
pub use validation::{RequiredField, ValidationError};
pub use writer::{AssignmentWriteError, AssignmentWriter, FailedWrite, SaveOutcome};
