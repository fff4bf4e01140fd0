//! Timetabling domain: calendar vocabulary, faculty assignments, cohorts, and the directory the
//! assignment screen draws from.

pub mod assignments;
pub mod calendar;
pub mod cohort;
pub mod directory;
pub mod import;
