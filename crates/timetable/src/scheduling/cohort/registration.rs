use std::fmt;

use chrono::Month;
use serde::{Deserialize, Serialize};

/// Fields extracted from a registration number of the form `ORG-COURSE-YYMM-SERIAL-PERIOD`.
///
/// `intake_month` is empty when the month number is outside `01`-`12`; callers must treat such
/// a record as invalid. Use [`parse_registration`] to get that check for free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCohort {
    pub course: String,
    pub intake_year: String,
    pub intake_month: String,
    pub period: String,
}

impl RegistrationCohort {
    pub fn cohort(&self) -> CohortKey {
        CohortKey {
            intake_year: self.intake_year.clone(),
            intake_month: self.intake_month.clone(),
            period: self.period.clone(),
        }
    }
}

/// Grouping key matching students to the modules assigned to their intake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CohortKey {
    pub intake_year: String,
    pub intake_month: String,
    pub period: String,
}

impl CohortKey {
    /// Space separated form used on timetable entries, e.g. `2023 September DAY`.
    pub fn label(&self) -> String {
        format!("{} {} {}", self.intake_year, self.intake_month, self.period)
    }

    pub fn from_label(label: &str) -> Result<Self, CohortError> {
        let parts: Vec<&str> = label.split_whitespace().collect();
        match parts.as_slice() {
            [intake_year, intake_month, period] => Ok(Self {
                intake_year: intake_year.to_string(),
                intake_month: intake_month.to_string(),
                period: period.to_string(),
            }),
            _ => Err(CohortError::InvalidLabel(label.to_string())),
        }
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CohortError {
    #[error("registration number '{registration}' is unparseable: {problem}")]
    UnparseableRegistration {
        registration: String,
        problem: &'static str,
    },
    #[error("cohort label '{0}' must be '<year> <month> <period>'")]
    InvalidLabel(String),
}

const MIN_TOKENS: usize = 5;

/// Split a registration number into its cohort fields. Returns `None` when fewer than five
/// `-` separated tokens are present. Years are assumed to fall in the 2000s.
pub fn resolve_cohort(registration: &str) -> Option<RegistrationCohort> {
    let tokens: Vec<&str> = registration.trim().split('-').collect();
    if tokens.len() < MIN_TOKENS {
        return None;
    }

    let year_month = tokens[2];
    let year_suffix: String = year_month.chars().take(2).collect();
    let month_number: String = year_month.chars().skip(2).take(2).collect();

    Some(RegistrationCohort {
        course: tokens[1].to_string(),
        intake_year: format!("20{year_suffix}"),
        intake_month: month_name(&month_number).unwrap_or_default().to_string(),
        period: tokens[4].to_string(),
    })
}

/// Strict form of [`resolve_cohort`]: every field must be present and the year/month block must
/// be four digits naming a real month.
pub fn parse_registration(registration: &str) -> Result<RegistrationCohort, CohortError> {
    let unparseable = |problem| CohortError::UnparseableRegistration {
        registration: registration.to_string(),
        problem,
    };

    let cohort = resolve_cohort(registration)
        .ok_or_else(|| unparseable("expected five '-' separated tokens"))?;

    let year_month = registration.trim().split('-').nth(2).unwrap_or_default();
    if year_month.len() != 4 || !year_month.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(unparseable("intake block must be four digits (YYMM)"));
    }
    if cohort.intake_month.is_empty() {
        return Err(unparseable("intake month must be between 01 and 12"));
    }
    if cohort.course.trim().is_empty() {
        return Err(unparseable("course code is empty"));
    }
    if cohort.period.trim().is_empty() {
        return Err(unparseable("period is empty"));
    }

    Ok(cohort)
}

fn month_name(number: &str) -> Option<&'static str> {
    if number.len() != 2 || !number.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let number: u8 = number.parse().ok()?;
    Month::try_from(number).ok().map(|month| month.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_a_well_formed_registration() {
        let cohort = resolve_cohort("VU-BCS-2309-0412-DAY").expect("parseable");
        assert_eq!(
            cohort,
            RegistrationCohort {
                course: "BCS".to_string(),
                intake_year: "2023".to_string(),
                intake_month: "September".to_string(),
                period: "DAY".to_string(),
            }
        );
        assert_eq!(cohort.cohort().label(), "2023 September DAY");
    }

    #[test]
    fn short_registrations_resolve_to_nothing() {
        assert_eq!(resolve_cohort("VU-BCS-0412"), None);
        assert_eq!(resolve_cohort(""), None);
    }

    #[test]
    fn out_of_range_months_resolve_to_an_empty_month() {
        let cohort = resolve_cohort("VU-BCS-2313-0412-DAY").expect("five tokens");
        assert_eq!(cohort.intake_month, "");
        assert_eq!(cohort.intake_year, "2023");

        let cohort = resolve_cohort("VU-BCS-2300-0412-EVE").expect("five tokens");
        assert_eq!(cohort.intake_month, "");
    }

    #[test]
    fn every_month_number_maps_to_its_name() {
        let expected = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        for (index, name) in expected.iter().enumerate() {
            let registration = format!("VU-BIT-24{:02}-0001-WKND", index + 1);
            let cohort = resolve_cohort(&registration).expect("parseable");
            assert_eq!(&cohort.intake_month, name);
        }
    }

    #[test]
    fn strict_parse_rejects_what_resolve_lets_through() {
        for registration in [
            "VU-BCS-0412",
            "VU-BCS-2313-0412-DAY",
            "VU-BCS-23X9-0412-DAY",
            "VU-BCS-239-0412-DAY",
            "VU--2309-0412-DAY",
            "VU-BCS-2309-0412-",
        ] {
            match parse_registration(registration) {
                Err(CohortError::UnparseableRegistration { .. }) => {}
                other => panic!("expected '{registration}' to be rejected, got {other:?}"),
            }
        }

        let cohort = parse_registration("VU-BCS-2309-0412-DAY").expect("valid");
        assert_eq!(cohort.intake_month, "September");
    }

    #[test]
    fn cohort_labels_round_trip() {
        let key = CohortKey::from_label("2024 February EVE").expect("valid label");
        assert_eq!(key.intake_month, "February");
        assert_eq!(key.to_string(), "2024 February EVE");
        assert!(CohortKey::from_label("2024 February").is_err());
    }
}
