use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::scheduling::assignments::domain::{
    Assignment, AssignmentCandidate, AssignmentDraft, AssignmentId, CourseRef, LecturerId,
    LecturerRef, SectionId,
};
use crate::scheduling::assignments::repository::{AssignmentFilter, AssignmentStore, StoreError};
use crate::scheduling::assignments::{
    AssignmentWriter, ConflictPolicy, MemoryAssignmentStore, Proposal,
};
use crate::scheduling::calendar::{Block, Room, TimeSlot};

pub(super) fn room(token: &str) -> Room {
    token.parse().expect("valid room token")
}

pub(super) fn lecturer(id: &str) -> LecturerRef {
    LecturerRef {
        id: LecturerId(id.to_string()),
        name: format!("Lecturer {id}"),
    }
}

/// A stored record in its own section.
pub(super) fn assignment(
    id: &str,
    lecturer_id: &str,
    block: Block,
    room_token: &str,
    time_slot: TimeSlot,
) -> Assignment {
    cross_listed(id, &format!("sec-{id}"), lecturer_id, block, room_token, time_slot)
}

pub(super) fn cross_listed(
    id: &str,
    section: &str,
    lecturer_id: &str,
    block: Block,
    room_token: &str,
    time_slot: TimeSlot,
) -> Assignment {
    Assignment {
        id: AssignmentId(id.to_string()),
        section: SectionId(section.to_string()),
        lecturer: lecturer(lecturer_id),
        faculty: "Computing".to_string(),
        course: "Database Systems".to_string(),
        course_code: format!("BCS-{id}"),
        block,
        room: room(room_token),
        time_slot,
    }
}

pub(super) fn proposal(
    lecturer_id: &str,
    room_token: &str,
    time_slot: TimeSlot,
    block: Block,
) -> Proposal {
    Proposal::new(
        LecturerId(lecturer_id.to_string()),
        room(room_token),
        time_slot,
        block,
    )
}

pub(super) fn candidate(
    lecturer_id: &str,
    codes: &[&str],
    block: Block,
    room_token: &str,
    time_slot: TimeSlot,
) -> AssignmentCandidate {
    AssignmentCandidate {
        lecturer: Some(lecturer(lecturer_id)),
        faculty: Some("Computing".to_string()),
        module: Some("Database Systems".to_string()),
        courses: codes
            .iter()
            .map(|code| CourseRef {
                name: "Database Systems".to_string(),
                code: code.to_string(),
            })
            .collect(),
        block: Some(block),
        room: Some(room(room_token)),
        time_slot: Some(time_slot),
    }
}

pub(super) fn build_writer(
    seed: Vec<Assignment>,
) -> (AssignmentWriter<MemoryAssignmentStore>, MemoryAssignmentStore) {
    let store = MemoryAssignmentStore::with_assignments(seed);
    let writer = AssignmentWriter::new(Arc::new(store.clone()), ConflictPolicy::default());
    (writer, store)
}

/// Three Block 1 assignments for `l1` in distinct rooms and slots.
pub(super) fn full_block_for_l1() -> Vec<Assignment> {
    vec![
        assignment("a1", "l1", Block::One, "501", TimeSlot::DayMorning),
        assignment("a2", "l1", Block::One, "502", TimeSlot::DayAfternoon),
        assignment("a3", "l1", Block::One, "503", TimeSlot::Evening),
    ]
}

/// Memory store whose `fail_on`-th create (1-based) reports the store as unavailable.
#[derive(Debug, Default)]
pub(super) struct FailingStore {
    pub inner: MemoryAssignmentStore,
    fail_on: usize,
    creates: AtomicUsize,
}

impl FailingStore {
    pub(super) fn failing_on(fail_on: usize) -> Self {
        Self {
            inner: MemoryAssignmentStore::new(),
            fail_on,
            creates: AtomicUsize::new(0),
        }
    }
}

impl AssignmentStore for FailingStore {
    fn query(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, StoreError> {
        self.inner.query(filter)
    }

    fn create(&self, draft: AssignmentDraft) -> Result<AssignmentId, StoreError> {
        let attempt = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(StoreError::Unavailable("write quota exceeded".to_string()));
        }
        self.inner.create(draft)
    }

    fn update(&self, id: &AssignmentId, draft: AssignmentDraft) -> Result<(), StoreError> {
        self.inner.update(id, draft)
    }

    fn delete(&self, id: &AssignmentId) -> Result<(), StoreError> {
        self.inner.delete(id)
    }
}

/// Store that refuses every call; counts how often it was reached.
#[derive(Debug, Default)]
pub(super) struct UnavailableStore {
    pub calls: AtomicUsize,
}

impl UnavailableStore {
    fn refuse<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection reset".to_string()))
    }
}

impl AssignmentStore for UnavailableStore {
    fn query(&self, _filter: &AssignmentFilter) -> Result<Vec<Assignment>, StoreError> {
        self.refuse()
    }

    fn create(&self, _draft: AssignmentDraft) -> Result<AssignmentId, StoreError> {
        self.refuse()
    }

    fn update(&self, _id: &AssignmentId, _draft: AssignmentDraft) -> Result<(), StoreError> {
        self.refuse()
    }

    fn delete(&self, _id: &AssignmentId) -> Result<(), StoreError> {
        self.refuse()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
