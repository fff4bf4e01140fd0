use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use timetable::error::AppError;
use timetable::scheduling::assignments::MemoryAssignmentStore;
use timetable::scheduling::calendar::{Block, Room, TimeSlot};
use timetable::scheduling::import::assignments_from_path;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Memory store seeded from a CSV snapshot when one is given.
pub(crate) fn load_store(snapshot: Option<&Path>) -> Result<MemoryAssignmentStore, AppError> {
    let Some(path) = snapshot else {
        return Ok(MemoryAssignmentStore::new());
    };

    let assignments = assignments_from_path(path)?;
    info!(path = %path.display(), records = assignments.len(), "assignment snapshot loaded");
    Ok(MemoryAssignmentStore::with_assignments(assignments))
}

pub(crate) fn parse_room(raw: &str) -> Result<Room, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn parse_time_slot(raw: &str) -> Result<TimeSlot, String> {
    raw.parse().map_err(|err| {
        let codes: Vec<&str> = TimeSlot::ALL.iter().map(|slot| slot.code()).collect();
        format!("{err} (expected one of {})", codes.join(", "))
    })
}

pub(crate) fn parse_block(raw: &str) -> Result<Block, String> {
    let trimmed = raw.trim();
    // "2" is accepted as shorthand for "Block 2"
    let label = if trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("Block {trimmed}")
    } else {
        trimmed.to_string()
    };
    label.parse().map_err(|err| format!("{err}"))
}
