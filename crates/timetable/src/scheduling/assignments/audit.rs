//! After-the-fact detection of invariant breaches. Check-then-write is not atomic against the
//! store, so concurrent submissions can both pass the checker; an audit over a fresh snapshot
//! reports what slipped through.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::conflicts::{ConflictPolicy, ConflictReason};
use super::domain::{Assignment, AssignmentId, LecturerId, SectionId};
use crate::scheduling::calendar::{Block, Room, TimeSlot};

/// A group of assignments that together breach one invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub reason: ConflictReason,
    pub assignments: Vec<AssignmentId>,
    pub detail: String,
}

/// Scan a snapshot for double bookings and overloaded blocks.
/// Cross-listed records of one section taught by the same lecturer in the same room count as a
/// single meeting.
pub fn audit(assignments: &[Assignment], policy: &ConflictPolicy) -> Vec<Violation> {
    let mut by_room: BTreeMap<(Room, TimeSlot), Vec<&Assignment>> = BTreeMap::new();
    let mut by_lecturer_slot: BTreeMap<(&LecturerId, TimeSlot), Vec<&Assignment>> =
        BTreeMap::new();
    let mut by_lecturer_block: BTreeMap<(&LecturerId, Block), Vec<&Assignment>> = BTreeMap::new();

    for assignment in assignments {
        by_room
            .entry((assignment.room, assignment.time_slot))
            .or_default()
            .push(assignment);
        by_lecturer_slot
            .entry((&assignment.lecturer.id, assignment.time_slot))
            .or_default()
            .push(assignment);
        by_lecturer_block
            .entry((&assignment.lecturer.id, assignment.block))
            .or_default()
            .push(assignment);
    }

    let mut violations = Vec::new();

    for ((room, time_slot), group) in &by_room {
        let meetings: BTreeSet<(&SectionId, &LecturerId)> =
            group.iter().map(|a| (&a.section, &a.lecturer.id)).collect();
        if meetings.len() > 1 {
            violations.push(Violation {
                reason: ConflictReason::RoomTimeConflict,
                assignments: ids(group),
                detail: format!(
                    "room {room} holds {} separate classes during {}",
                    meetings.len(),
                    time_slot.label()
                ),
            });
        }
    }

    for ((lecturer, time_slot), group) in &by_lecturer_slot {
        let meetings: BTreeSet<(&SectionId, Room)> =
            group.iter().map(|a| (&a.section, a.room)).collect();
        if meetings.len() > 1 {
            violations.push(Violation {
                reason: ConflictReason::LecturerTimeConflict,
                assignments: ids(group),
                detail: format!(
                    "lecturer {} teaches {} classes during {}",
                    lecturer.0,
                    meetings.len(),
                    time_slot.label()
                ),
            });
        }
    }

    if let Some(max_block_load) = policy.max_block_load {
        for ((lecturer, block), group) in &by_lecturer_block {
            if group.len() > max_block_load {
                violations.push(Violation {
                    reason: ConflictReason::LecturerOverloaded,
                    assignments: ids(group),
                    detail: format!(
                        "lecturer {} holds {} assignments in {block} (limit {max_block_load})",
                        lecturer.0,
                        group.len()
                    ),
                });
            }
        }
    }

    violations
}

fn ids(group: &[&Assignment]) -> Vec<AssignmentId> {
    group.iter().map(|assignment| assignment.id.clone()).collect()
}
