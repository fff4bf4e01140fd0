mod config;
mod policy;
mod rules;

pub use config::{ConflictPolicy, DEFAULT_MAX_BLOCK_LOAD};
pub use policy::{ConflictReason, ConflictRejection};

use serde::{Deserialize, Serialize};

use super::domain::{Assignment, AssignmentId, LecturerId};
use crate::scheduling::calendar::{Block, Room, TimeSlot};
use rules::CheckScope;

/// The slot a submission wants to occupy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub lecturer: LecturerId,
    pub room: Room,
    pub time_slot: TimeSlot,
    pub block: Block,
    /// Records the submission will add; one per selected course code on create.
    #[serde(default = "single_record")]
    pub records: usize,
}

fn single_record() -> usize {
    1
}

impl Proposal {
    pub fn new(lecturer: LecturerId, room: Room, time_slot: TimeSlot, block: Block) -> Self {
        Self {
            lecturer,
            room,
            time_slot,
            block,
            records: 1,
        }
    }

    pub fn with_records(mut self, records: usize) -> Self {
        self.records = records;
        self
    }
}

/// Pure decision logic over an explicit snapshot of existing assignments.
#[derive(Debug, Clone, Default)]
pub struct ConflictChecker {
    policy: ConflictPolicy,
}

impl ConflictChecker {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ConflictPolicy {
        &self.policy
    }

    /// Decide whether `proposal` may be written. `exclude` names the record being edited in
    /// place. Checks run room-time, lecturer-time, then block load; the first failure wins.
    pub fn check(
        &self,
        proposal: &Proposal,
        existing: &[Assignment],
        exclude: Option<&AssignmentId>,
    ) -> Result<(), ConflictRejection> {
        let scope = CheckScope::new(proposal, existing, exclude);

        let clashes = rules::room_time_clashes(&scope, existing);
        if !clashes.is_empty() {
            return Err(ConflictRejection::room_time(proposal, clashes));
        }

        let clashes = rules::lecturer_time_clashes(&scope, existing);
        if !clashes.is_empty() {
            return Err(ConflictRejection::lecturer_time(proposal, clashes));
        }

        if let Some(max_block_load) = self.policy.max_block_load {
            let held = rules::block_load(&scope, existing);
            if held.len().saturating_add(proposal.records.max(1)) > max_block_load {
                return Err(ConflictRejection::overloaded(proposal, held, max_block_load));
            }
        }

        Ok(())
    }
}

/// Check `proposal` against `existing` under the default policy.
pub fn check_conflict(
    proposal: &Proposal,
    existing: &[Assignment],
    exclude: Option<&AssignmentId>,
) -> Result<(), ConflictRejection> {
    ConflictChecker::default().check(proposal, existing, exclude)
}
