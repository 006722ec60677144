//! Wizard state machine.
//!
//! Defines a pure state transition function for the onboarding wizard.
//! Side effects (persistence, theme preview, completion) are returned
//! as actions for the application layer to execute.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{Theme, ThemeSnapshot};
use crate::ids::BranchId;
use crate::onboarding::record::{Branch, SetupRecord};
use crate::onboarding::validation::StepValidator;

/// The five-step linear sequence of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    BusinessInfo,
    Locations,
    TeamSize,
    Theme,
    Review,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::BusinessInfo;
    pub const LAST: WizardStep = WizardStep::Review;

    pub fn index(self) -> usize {
        match self {
            WizardStep::BusinessInfo => 0,
            WizardStep::Locations => 1,
            WizardStep::TeamSize => 2,
            WizardStep::Theme => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<WizardStep> {
        match index {
            0 => Some(WizardStep::BusinessInfo),
            1 => Some(WizardStep::Locations),
            2 => Some(WizardStep::TeamSize),
            3 => Some(WizardStep::Theme),
            4 => Some(WizardStep::Review),
            _ => None,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        WizardStep::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<WizardStep> {
        self.index().checked_sub(1).and_then(WizardStep::from_index)
    }
}

/// Wizard state: the current step is the sole source of truth for
/// which step's UI is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub record: SetupRecord,
    /// Field errors from the last rejected advance, keyed by field name.
    pub errors: BTreeMap<String, String>,
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::FIRST
    }
}

impl WizardState {
    pub fn resumed(step: WizardStep, record: SetupRecord) -> Self {
        Self {
            step,
            record,
            errors: BTreeMap::new(),
        }
    }
}

/// Events that drive the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// Move to the next step; gated by step validation.
    Advance,
    /// Move to the previous step.
    Retreat,
    /// Update the business-info fields.
    SetBusinessInfo {
        business_name: String,
        business_type: String,
        main_services: BTreeSet<String>,
        owner_position: String,
    },
    /// Add a branch, or update the one with the same id.
    UpsertBranch { branch: Branch },
    /// Remove a branch by id.
    RemoveBranch { branch_id: BranchId },
    /// Update the team size.
    SetEmployeeCount { count: u32 },
    /// Select a theme (triggers a live preview).
    SelectTheme { theme_id: String },
    /// Run the terminal setup transaction; only accepted at Review.
    Submit,
}

/// Side effects produced by state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Best-effort checkpoint of the accumulated values.
    PersistProgress {
        step: WizardStep,
        record: SetupRecord,
    },
    /// Show a live preview of the selected theme.
    PreviewTheme { theme: ThemeSnapshot },
    /// Run the terminal completion transaction.
    CompleteSetup { record: SetupRecord },
}

/// Pure wizard state machine: no side effects.
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        let WizardState {
            step,
            mut record,
            errors,
        } = state;
        match event {
            WizardEvent::Advance => {
                let outcome = StepValidator::validate(step, &record);
                if !outcome.is_valid() {
                    return (
                        WizardState {
                            step,
                            record,
                            errors: outcome.field_errors,
                        },
                        Vec::new(),
                    );
                }
                match step.next() {
                    Some(next) => {
                        let actions = vec![WizardAction::PersistProgress {
                            step: next,
                            record: record.clone(),
                        }];
                        (
                            WizardState {
                                step: next,
                                record,
                                errors: BTreeMap::new(),
                            },
                            actions,
                        )
                    }
                    // Already at the last step.
                    None => (
                        WizardState {
                            step,
                            record,
                            errors,
                        },
                        Vec::new(),
                    ),
                }
            }
            WizardEvent::Retreat => {
                let step = step.prev().unwrap_or(step);
                (
                    WizardState {
                        step,
                        record,
                        errors: BTreeMap::new(),
                    },
                    Vec::new(),
                )
            }
            WizardEvent::SetBusinessInfo {
                business_name,
                business_type,
                main_services,
                owner_position,
            } => {
                record.business_name = business_name;
                record.business_type = business_type;
                record.main_services = main_services;
                record.owner_position = owner_position;
                (Self::edited(step, record), Vec::new())
            }
            WizardEvent::UpsertBranch { branch } => {
                if !record.update_branch(branch.clone()) {
                    record.add_branch(branch);
                }
                (Self::edited(step, record), Vec::new())
            }
            WizardEvent::RemoveBranch { branch_id } => {
                record.remove_branch(&branch_id);
                (Self::edited(step, record), Vec::new())
            }
            WizardEvent::SetEmployeeCount { count } => {
                record.employee_count = count;
                (Self::edited(step, record), Vec::new())
            }
            WizardEvent::SelectTheme { theme_id } => {
                let theme = ThemeSnapshot::from(Theme::resolve_or_default(&theme_id));
                record.theme_id = theme_id;
                (
                    Self::edited(step, record),
                    vec![WizardAction::PreviewTheme { theme }],
                )
            }
            WizardEvent::Submit => {
                if step != WizardStep::Review {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(?step, "submit outside review step ignored");
                    return (
                        WizardState {
                            step,
                            record,
                            errors,
                        },
                        Vec::new(),
                    );
                }
                let actions = vec![WizardAction::CompleteSetup {
                    record: record.clone(),
                }];
                (
                    WizardState {
                        step,
                        record,
                        errors,
                    },
                    actions,
                )
            }
        }
    }

    /// Field edits clear stale errors from the last rejected advance.
    fn edited(step: WizardStep, record: SetupRecord) -> WizardState {
        WizardState {
            step,
            record,
            errors: BTreeMap::new(),
        }
    }
}
