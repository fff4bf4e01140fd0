use super::super::domain::{Assignment, AssignmentId, SectionId};
use super::Proposal;

/// What a single check looks at: the proposal, the record being replaced, and that record's
/// section when it is part of the snapshot.
pub(crate) struct CheckScope<'a> {
    pub proposal: &'a Proposal,
    pub exclude: Option<&'a AssignmentId>,
    pub section: Option<&'a SectionId>,
}

impl<'a> CheckScope<'a> {
    pub(crate) fn new(
        proposal: &'a Proposal,
        existing: &'a [Assignment],
        exclude: Option<&'a AssignmentId>,
    ) -> Self {
        let section = exclude.and_then(|id| {
            existing
                .iter()
                .find(|assignment| &assignment.id == id)
                .map(|assignment| &assignment.section)
        });

        Self {
            proposal,
            exclude,
            section,
        }
    }

    fn is_excluded(&self, assignment: &Assignment) -> bool {
        self.exclude == Some(&assignment.id)
    }

    /// Cross-listed siblings of the edited record that still meet with the proposal.
    fn is_same_meeting(&self, assignment: &Assignment) -> bool {
        self.section == Some(&assignment.section)
            && assignment.room == self.proposal.room
            && assignment.time_slot == self.proposal.time_slot
            && assignment.lecturer.id == self.proposal.lecturer
    }

    fn competes(&self, assignment: &Assignment) -> bool {
        !self.is_excluded(assignment) && !self.is_same_meeting(assignment)
    }
}

pub(crate) fn room_time_clashes(
    scope: &CheckScope<'_>,
    existing: &[Assignment],
) -> Vec<AssignmentId> {
    existing
        .iter()
        .filter(|assignment| {
            assignment.room == scope.proposal.room
                && assignment.time_slot == scope.proposal.time_slot
                && scope.competes(assignment)
        })
        .map(|assignment| assignment.id.clone())
        .collect()
}

pub(crate) fn lecturer_time_clashes(
    scope: &CheckScope<'_>,
    existing: &[Assignment],
) -> Vec<AssignmentId> {
    existing
        .iter()
        .filter(|assignment| {
            assignment.lecturer.id == scope.proposal.lecturer
                && assignment.time_slot == scope.proposal.time_slot
                && scope.competes(assignment)
        })
        .map(|assignment| assignment.id.clone())
        .collect()
}

/// Records the lecturer already holds in the proposal's block. Siblings count toward the load.
pub(crate) fn block_load(scope: &CheckScope<'_>, existing: &[Assignment]) -> Vec<AssignmentId> {
    existing
        .iter()
        .filter(|assignment| {
            assignment.lecturer.id == scope.proposal.lecturer
                && assignment.block == scope.proposal.block
                && !scope.is_excluded(assignment)
        })
        .map(|assignment| assignment.id.clone())
        .collect()
}
