mod common;
mod conflicts;
