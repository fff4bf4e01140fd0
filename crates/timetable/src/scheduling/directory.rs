//! Lecturer and course records held by the directory, plus the lookups the faculty assignment
//! screen performs before submitting a candidate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::assignments::{AssignmentCandidate, CourseRef, LecturerId, LecturerRef};
use super::calendar::{Block, Room, TimeSlot};

/// Identifier wrapper for course offerings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    pub first_name: String,
    pub last_name: String,
    pub faculty: String,
}

impl Lecturer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn reference(&self) -> LecturerRef {
        LecturerRef {
            id: self.id.clone(),
            name: self.full_name(),
        }
    }
}

/// One course code; several codes may share a name when a module runs for several cohorts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub faculty: String,
    pub field: String,
    pub name: String,
    pub code: String,
}

impl Course {
    pub fn reference(&self) -> CourseRef {
        CourseRef {
            name: self.name.clone(),
            code: self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("unknown lecturer '{0}'")]
    UnknownLecturer(String),
    #[error("unknown course '{0}'")]
    UnknownCourse(String),
}

/// Slot choices made on the assignment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSelection {
    pub block: Block,
    pub room: Room,
    pub time_slot: TimeSlot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub lecturers: Vec<Lecturer>,
    pub courses: Vec<Course>,
}

impl Directory {
    pub fn new(lecturers: Vec<Lecturer>, courses: Vec<Course>) -> Self {
        Self { lecturers, courses }
    }

    /// Distinct faculties that have at least one lecturer, sorted.
    pub fn faculties(&self) -> Vec<String> {
        self.lecturers
            .iter()
            .map(|lecturer| lecturer.faculty.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn lecturers_in<'a>(&'a self, faculty: &'a str) -> impl Iterator<Item = &'a Lecturer> + 'a {
        self.lecturers
            .iter()
            .filter(move |lecturer| lecturer.faculty == faculty)
    }

    pub fn lecturer(&self, id: &LecturerId) -> Option<&Lecturer> {
        self.lecturers.iter().find(|lecturer| &lecturer.id == id)
    }

    /// Distinct module names, sorted.
    pub fn modules(&self) -> Vec<String> {
        self.courses
            .iter()
            .map(|course| course.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Courses whose name contains `filter`, ignoring case and surrounding whitespace.
    pub fn codes_for_module(&self, filter: &str) -> Vec<&Course> {
        let needle = filter.trim().to_lowercase();
        self.courses
            .iter()
            .filter(|course| course.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Build the candidate the form would submit for `lecturer` teaching the selected courses.
    pub fn candidate_for(
        &self,
        lecturer: &LecturerId,
        module: &str,
        course_ids: &[CourseId],
        slot: SlotSelection,
    ) -> Result<AssignmentCandidate, DirectoryError> {
        let lecturer = self
            .lecturer(lecturer)
            .ok_or_else(|| DirectoryError::UnknownLecturer(lecturer.0.clone()))?;

        let courses = course_ids
            .iter()
            .map(|id| {
                self.courses
                    .iter()
                    .find(|course| &course.id == id)
                    .map(Course::reference)
                    .ok_or_else(|| DirectoryError::UnknownCourse(id.0.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AssignmentCandidate {
            lecturer: Some(lecturer.reference()),
            faculty: Some(lecturer.faculty.clone()),
            module: Some(module.to_string()),
            courses,
            block: Some(slot.block),
            room: Some(slot.room),
            time_slot: Some(slot.time_slot),
        })
    }
}
