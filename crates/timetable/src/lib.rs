//! Faculty assignment conflict checking and student cohort resolution for the timetabling portal.

pub mod config;
pub mod error;
pub mod scheduling;
pub mod telemetry;
