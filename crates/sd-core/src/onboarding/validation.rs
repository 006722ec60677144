//! Per-step field validation.
//!
//! Validation is synchronous and pure with respect to the submitted
//! values. A step either passes wholesale or blocks advancement; the
//! outcome carries a field → human-readable message map for inline
//! display.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{BusinessType, OwnerPosition, Theme};
use crate::onboarding::record::SetupRecord;
use crate::onboarding::wizard::WizardStep;

/// Minimum number of digits a branch phone must contain.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Allowed range for the team size step.
pub const EMPLOYEE_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=20;

/// Outcome of validating one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepValidation {
    pub field_errors: BTreeMap<String, String>,
}

impl StepValidation {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    fn reject(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors.insert(field.into(), message.into());
    }
}

pub struct StepValidator;

impl StepValidator {
    /// Validate the fields required by `step`.
    pub fn validate(step: WizardStep, record: &SetupRecord) -> StepValidation {
        let mut outcome = StepValidation::default();
        match step {
            WizardStep::BusinessInfo => Self::validate_business_info(record, &mut outcome),
            WizardStep::Locations => Self::validate_locations(record, &mut outcome),
            WizardStep::TeamSize => Self::validate_team_size(record, &mut outcome),
            WizardStep::Theme => Self::validate_theme(record, &mut outcome),
            // Review only renders an aggregate of prior steps.
            WizardStep::Review => {}
        }
        outcome
    }

    fn validate_business_info(record: &SetupRecord, outcome: &mut StepValidation) {
        if record.business_name.trim().is_empty() {
            outcome.reject("business_name", "Business name is required");
        }
        match BusinessType::find(&record.business_type) {
            None => outcome.reject("business_type", "Select a business type"),
            Some(business_type) => {
                if record.main_services.is_empty() {
                    outcome.reject("main_services", "Select at least one service");
                } else if let Some(unknown) = record
                    .main_services
                    .iter()
                    .find(|s| !business_type.offers(s))
                {
                    outcome.reject(
                        "main_services",
                        format!("Service '{unknown}' is not offered by this business type"),
                    );
                }
            }
        }
        if OwnerPosition::find(&record.owner_position).is_none() {
            outcome.reject("owner_position", "Select your position");
        }
    }

    fn validate_locations(record: &SetupRecord, outcome: &mut StepValidation) {
        for (index, branch) in record.branches.iter().enumerate() {
            if branch.name.trim().is_empty() {
                outcome.reject(format!("branches[{index}].name"), "Branch name is required");
            }
            if branch.address.trim().is_empty() {
                outcome.reject(format!("branches[{index}].address"), "Address is required");
            }
            let digits = branch.phone.chars().filter(char::is_ascii_digit).count();
            if digits < MIN_PHONE_DIGITS {
                outcome.reject(
                    format!("branches[{index}].phone"),
                    format!("Phone must contain at least {MIN_PHONE_DIGITS} digits"),
                );
            }
        }
    }

    fn validate_team_size(record: &SetupRecord, outcome: &mut StepValidation) {
        if !EMPLOYEE_COUNT_RANGE.contains(&record.employee_count) {
            outcome.reject(
                "employee_count",
                format!(
                    "Team size must be between {} and {}",
                    EMPLOYEE_COUNT_RANGE.start(),
                    EMPLOYEE_COUNT_RANGE.end()
                ),
            );
        }
    }

    fn validate_theme(record: &SetupRecord, outcome: &mut StepValidation) {
        if Theme::find(&record.theme_id).is_none() {
            outcome.reject("theme_id", "Select a theme");
        }
    }
}
