use serde::{Deserialize, Serialize};

use super::domain::{Assignment, AssignmentDraft, AssignmentId, LecturerId};
use crate::scheduling::calendar::{Block, Room, TimeSlot};

/// Conjunctive field predicates for assignment queries. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentFilter {
    pub lecturer: Option<LecturerId>,
    pub room: Option<Room>,
    pub time_slot: Option<TimeSlot>,
    pub block: Option<Block>,
    /// Course (module) name, compared exactly.
    pub course: Option<String>,
}

impl AssignmentFilter {
    pub fn lecturer(mut self, lecturer: LecturerId) -> Self {
        self.lecturer = Some(lecturer);
        self
    }

    pub fn room(mut self, room: Room) -> Self {
        self.room = Some(room);
        self
    }

    pub fn time_slot(mut self, time_slot: TimeSlot) -> Self {
        self.time_slot = Some(time_slot);
        self
    }

    pub fn block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    pub fn matches(&self, assignment: &Assignment) -> bool {
        self.lecturer
            .as_ref()
            .map_or(true, |lecturer| &assignment.lecturer.id == lecturer)
            && self.room.map_or(true, |room| assignment.room == room)
            && self
                .time_slot
                .map_or(true, |time_slot| assignment.time_slot == time_slot)
            && self.block.map_or(true, |block| assignment.block == block)
            && self
                .course
                .as_ref()
                .map_or(true, |course| &assignment.course == course)
    }
}

/// Narrow interface onto the hosted document store's assignment collection.
pub trait AssignmentStore: Send + Sync {
    fn query(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, StoreError>;
    fn create(&self, draft: AssignmentDraft) -> Result<AssignmentId, StoreError>;
    fn update(&self, id: &AssignmentId, draft: AssignmentDraft) -> Result<(), StoreError>;
    fn delete(&self, id: &AssignmentId) -> Result<(), StoreError>;
}

/// Failures surfaced by the document store, propagated to callers unmodified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
