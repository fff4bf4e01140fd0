use std::fmt;

use super::conflicts::Proposal;
use super::domain::{AssignmentCandidate, AssignmentDraft, CourseRef, LecturerRef, SectionId};
use crate::scheduling::calendar::{Block, Room, TimeSlot};

/// Form fields that must be present before any store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Lecturer,
    Faculty,
    Module,
    CourseCode,
    Block,
    Room,
    TimeSlot,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Lecturer => "lecturer",
            RequiredField::Faculty => "faculty",
            RequiredField::Module => "module",
            RequiredField::CourseCode => "course code",
            RequiredField::Block => "block",
            RequiredField::Room => "room",
            RequiredField::TimeSlot => "time slot",
        };
        f.write_str(name)
    }
}

/// Validation errors raised before the conflict checker runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field missing: {0}")]
    MissingField(RequiredField),
    #[error("an update rewrites a single record but {0} course codes were selected")]
    MultipleCodesOnUpdate(usize),
}

/// A candidate with every required field present and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedCandidate {
    pub lecturer: LecturerRef,
    pub faculty: String,
    pub courses: Vec<CourseRef>,
    pub block: Block,
    pub room: Room,
    pub time_slot: TimeSlot,
}

impl ValidatedCandidate {
    pub(crate) fn proposal(&self) -> Proposal {
        Proposal::new(
            self.lecturer.id.clone(),
            self.room,
            self.time_slot,
            self.block,
        )
        .with_records(self.courses.len())
    }

    pub(crate) fn draft(&self, section: SectionId, course: &CourseRef) -> AssignmentDraft {
        AssignmentDraft {
            section,
            lecturer: self.lecturer.clone(),
            faculty: self.faculty.clone(),
            course: course.name.clone(),
            course_code: course.code.clone(),
            block: self.block,
            room: self.room,
            time_slot: self.time_slot,
        }
    }
}

fn present(value: Option<&String>) -> Option<String> {
    value
        .map(|raw| raw.trim())
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Check that every required field is present. Blank strings count as missing, duplicate codes
/// collapse to one, and a course without a name takes the module's.
pub(crate) fn validate_candidate(
    candidate: &AssignmentCandidate,
    updating: bool,
) -> Result<ValidatedCandidate, ValidationError> {
    use ValidationError::MissingField;

    let lecturer = candidate
        .lecturer
        .as_ref()
        .filter(|lecturer| !lecturer.id.0.trim().is_empty())
        .cloned()
        .ok_or(MissingField(RequiredField::Lecturer))?;
    let faculty =
        present(candidate.faculty.as_ref()).ok_or(MissingField(RequiredField::Faculty))?;
    let module = present(candidate.module.as_ref()).ok_or(MissingField(RequiredField::Module))?;

    let mut courses: Vec<CourseRef> = Vec::with_capacity(candidate.courses.len());
    for course in &candidate.courses {
        let Some(code) = present(Some(&course.code)) else {
            continue;
        };
        if courses.iter().any(|kept| kept.code == code) {
            continue;
        }
        let name = present(Some(&course.name)).unwrap_or_else(|| module.clone());
        courses.push(CourseRef { name, code });
    }
    if courses.is_empty() {
        return Err(MissingField(RequiredField::CourseCode));
    }

    let block = candidate.block.ok_or(MissingField(RequiredField::Block))?;
    let room = candidate.room.ok_or(MissingField(RequiredField::Room))?;
    let time_slot = candidate
        .time_slot
        .ok_or(MissingField(RequiredField::TimeSlot))?;

    if updating && courses.len() > 1 {
        return Err(ValidationError::MultipleCodesOnUpdate(courses.len()));
    }

    Ok(ValidatedCandidate {
        lecturer,
        faculty,
        courses,
        block,
        room,
        time_slot,
    })
}
