use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Assignment, AssignmentDraft, AssignmentId};
use super::repository::{AssignmentFilter, AssignmentStore, StoreError};

/// In-process assignment collection with sequential ids.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssignmentStore {
    records: Arc<Mutex<BTreeMap<AssignmentId, Assignment>>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with records that already carry ids.
    pub fn with_assignments(assignments: impl IntoIterator<Item = Assignment>) -> Self {
        let store = Self::default();
        {
            let mut records = store.records.lock().unwrap_or_else(|err| err.into_inner());
            for assignment in assignments {
                records.insert(assignment.id.clone(), assignment);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<AssignmentId, Assignment>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("assignment store lock poisoned".to_string()))
    }

    fn next_id(&self) -> AssignmentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        AssignmentId(format!("asg-{id:06}"))
    }
}

impl AssignmentStore for MemoryAssignmentStore {
    fn query(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, StoreError> {
        let records = self.lock()?;
        Ok(records
            .values()
            .filter(|assignment| filter.matches(assignment))
            .cloned()
            .collect())
    }

    fn create(&self, draft: AssignmentDraft) -> Result<AssignmentId, StoreError> {
        let mut records = self.lock()?;
        let mut id = self.next_id();
        while records.contains_key(&id) {
            id = self.next_id();
        }
        records.insert(id.clone(), Assignment::from_draft(id.clone(), draft));
        Ok(id)
    }

    fn update(&self, id: &AssignmentId, draft: AssignmentDraft) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        match records.get_mut(id) {
            Some(record) => {
                *record = Assignment::from_draft(id.clone(), draft);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    /// Deleting an id that is already gone succeeds, as the hosted store does.
    fn delete(&self, id: &AssignmentId) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        records.remove(id);
        Ok(())
    }
}
