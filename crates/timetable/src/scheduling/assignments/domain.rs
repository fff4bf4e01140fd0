use serde::{Deserialize, Serialize};

use crate::scheduling::calendar::{Block, Room, TimeSlot};

/// Identifier wrapper for stored assignment records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

/// Identifier wrapper for lecturers in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LecturerId(pub String);

/// Shared by every record written from one submission: a single class meeting listed under
/// several course codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(pub String);

/// Lecturer reference with the display name denormalized onto each record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerRef {
    pub id: LecturerId,
    pub name: String,
}

/// Field values persisted for an assignment, without the store-issued id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub section: SectionId,
    pub lecturer: LecturerRef,
    pub faculty: String,
    pub course: String,
    pub course_code: String,
    pub block: Block,
    pub room: Room,
    pub time_slot: TimeSlot,
}

/// One lecturer teaching one course code in one room and weekly slot for a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub section: SectionId,
    pub lecturer: LecturerRef,
    pub faculty: String,
    pub course: String,
    pub course_code: String,
    pub block: Block,
    pub room: Room,
    pub time_slot: TimeSlot,
}

impl Assignment {
    pub fn from_draft(id: AssignmentId, draft: AssignmentDraft) -> Self {
        let AssignmentDraft {
            section,
            lecturer,
            faculty,
            course,
            course_code,
            block,
            room,
            time_slot,
        } = draft;

        Self {
            id,
            section,
            lecturer,
            faculty,
            course,
            course_code,
            block,
            room,
            time_slot,
        }
    }

    pub fn draft(&self) -> AssignmentDraft {
        AssignmentDraft {
            section: self.section.clone(),
            lecturer: self.lecturer.clone(),
            faculty: self.faculty.clone(),
            course: self.course.clone(),
            course_code: self.course_code.clone(),
            block: self.block,
            room: self.room,
            time_slot: self.time_slot,
        }
    }

    /// True when both records describe the same physical class meeting.
    pub fn shares_meeting_with(&self, other: &Assignment) -> bool {
        self.section == other.section
            && self.room == other.room
            && self.time_slot == other.time_slot
            && self.lecturer.id == other.lecturer.id
    }
}

/// A selected course code together with the course name it is offered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub name: String,
    pub code: String,
}

/// Form submission from the faculty assignment screen. Every field is optional so that missing
/// input can be reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCandidate {
    #[serde(default)]
    pub lecturer: Option<LecturerRef>,
    #[serde(default)]
    pub faculty: Option<String>,
    /// Module selected on the form; the courses are the codes offered under it.
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub courses: Vec<CourseRef>,
    #[serde(default)]
    pub block: Option<Block>,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
}
