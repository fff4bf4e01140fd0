use serde::{Deserialize, Serialize};
use tracing::info;

use super::registration::{parse_registration, CohortError, CohortKey};
use crate::scheduling::calendar::{Block, Trimester};

/// Identifier wrapper for student records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Student record as held by the directory, including the modules assigned to their cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub reg_number: String,
    pub faculty: String,
    /// Field of study, taken from the registration number.
    pub course: String,
    pub cohort: CohortKey,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub trimester: Option<Trimester>,
    #[serde(default)]
    pub block: Option<Block>,
}

impl Student {
    /// Register a student, deriving course and cohort from the registration number. A number the
    /// strict parser rejects fails the whole registration.
    pub fn register(
        id: StudentId,
        full_name: impl Into<String>,
        faculty: impl Into<String>,
        reg_number: &str,
    ) -> Result<Self, CohortError> {
        let parsed = parse_registration(reg_number)?;
        Ok(Self {
            id,
            full_name: full_name.into(),
            reg_number: reg_number.trim().to_string(),
            faculty: faculty.into(),
            course: parsed.course.clone(),
            cohort: parsed.cohort(),
            modules: Vec::new(),
            trimester: None,
            block: None,
        })
    }

    pub fn takes_module(&self, module: &str) -> bool {
        self.modules.iter().any(|assigned| assigned == module)
    }
}

/// Modules to hand to every student of one faculty, field, and intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePlan {
    pub faculty: String,
    pub field: String,
    pub intake_year: String,
    pub intake_month: String,
    pub period: String,
    #[serde(default)]
    pub trimester: Option<Trimester>,
    #[serde(default)]
    pub block: Option<Block>,
    #[serde(default)]
    pub modules: Vec<String>,
}

impl ModulePlan {
    fn matches(&self, student: &Student) -> bool {
        student.faculty == self.faculty
            && student.course == self.field
            && student.cohort.intake_year == self.intake_year
            && student.cohort.intake_month == self.intake_month
            && student.cohort.period == self.period
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrolmentError {
    #[error("module plan is missing {0}")]
    MissingField(&'static str),
    #[error("no students match the selected cohort")]
    NoMatchingStudents,
}

/// Apply `plan` to the matching students and return their updated records. Students outside the
/// cohort are left untouched and are not returned.
pub fn assign_modules(
    students: &[Student],
    plan: &ModulePlan,
) -> Result<Vec<Student>, EnrolmentError> {
    let required = [
        ("faculty", plan.faculty.as_str()),
        ("field", plan.field.as_str()),
        ("intake year", plan.intake_year.as_str()),
        ("intake month", plan.intake_month.as_str()),
        ("period", plan.period.as_str()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(EnrolmentError::MissingField(*field));
    }
    let trimester = plan.trimester.ok_or(EnrolmentError::MissingField("trimester"))?;
    let block = plan.block.ok_or(EnrolmentError::MissingField("block"))?;
    if plan.modules.iter().all(|module| module.trim().is_empty()) {
        return Err(EnrolmentError::MissingField("modules"));
    }

    let updated: Vec<Student> = students
        .iter()
        .filter(|student| plan.matches(student))
        .map(|student| Student {
            modules: plan.modules.clone(),
            trimester: Some(trimester),
            block: Some(block),
            ..student.clone()
        })
        .collect();

    if updated.is_empty() {
        return Err(EnrolmentError::NoMatchingStudents);
    }

    info!(
        faculty = %plan.faculty,
        field = %plan.field,
        students = updated.len(),
        "modules assigned to cohort"
    );
    Ok(updated)
}
