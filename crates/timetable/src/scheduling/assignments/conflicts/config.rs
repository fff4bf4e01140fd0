use serde::{Deserialize, Serialize};

/// Assignments a lecturer may hold within one block under the canonical rule set.
pub const DEFAULT_MAX_BLOCK_LOAD: usize = 3;

/// Rule dials for the conflict checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPolicy {
    /// `None` disables the lecturer block load check.
    pub max_block_load: Option<usize>,
}

impl ConflictPolicy {
    pub const fn with_max_block_load(max_block_load: usize) -> Self {
        Self {
            max_block_load: Some(max_block_load),
        }
    }

    pub const fn unbounded() -> Self {
        Self {
            max_block_load: None,
        }
    }
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self::with_max_block_load(DEFAULT_MAX_BLOCK_LOAD)
    }
}
