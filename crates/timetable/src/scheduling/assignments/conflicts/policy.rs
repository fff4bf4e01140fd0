use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::AssignmentId;
use super::Proposal;

/// Machine-checkable reason a proposal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictReason {
    RoomTimeConflict,
    LecturerTimeConflict,
    LecturerOverloaded,
}

impl ConflictReason {
    pub const fn code(self) -> &'static str {
        match self {
            ConflictReason::RoomTimeConflict => "ROOM_TIME_CONFLICT",
            ConflictReason::LecturerTimeConflict => "LECTURER_TIME_CONFLICT",
            ConflictReason::LecturerOverloaded => "LECTURER_OVERLOADED",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rejection raised by the conflict checker, naming the records that blocked the proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ConflictRejection {
    pub reason: ConflictReason,
    pub conflicting: Vec<AssignmentId>,
    pub message: String,
}

impl ConflictRejection {
    pub(crate) fn room_time(proposal: &Proposal, conflicting: Vec<AssignmentId>) -> Self {
        Self {
            reason: ConflictReason::RoomTimeConflict,
            message: format!(
                "room {} is already booked for {}",
                proposal.room,
                proposal.time_slot.label()
            ),
            conflicting,
        }
    }

    pub(crate) fn lecturer_time(proposal: &Proposal, conflicting: Vec<AssignmentId>) -> Self {
        Self {
            reason: ConflictReason::LecturerTimeConflict,
            message: format!(
                "lecturer {} already teaches during {}",
                proposal.lecturer.0,
                proposal.time_slot.label()
            ),
            conflicting,
        }
    }

    pub(crate) fn overloaded(
        proposal: &Proposal,
        conflicting: Vec<AssignmentId>,
        max_block_load: usize,
    ) -> Self {
        Self {
            reason: ConflictReason::LecturerOverloaded,
            message: format!(
                "lecturer {} already holds {} assignment(s) in {} (limit {})",
                proposal.lecturer.0,
                conflicting.len(),
                proposal.block,
                max_block_load
            ),
            conflicting,
        }
    }
}
