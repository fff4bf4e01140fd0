//! Student cohorts: registration number parsing and cohort-wide module assignment.

pub mod enrolment;
pub mod registration;

pub use enrolment::{assign_modules, EnrolmentError, ModulePlan, Student, StudentId};
pub use registration::{
    parse_registration, resolve_cohort, CohortError, CohortKey, RegistrationCohort,
};
