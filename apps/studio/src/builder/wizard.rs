//! Linear step controller for the builder form.
//!
//! Seven fixed steps, no branching and no skipping. `next` only moves when the
//! active step's validator reports nothing missing; `previous` always moves
//! (except on the first step).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::builder::validation;
use crate::models::resume::Resume;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Personal,
    Summary,
    Experience,
    Education,
    Projects,
    SkillsLanguages,
    Additional,
}

impl WizardStep {
    pub const ORDER: [WizardStep; 7] = [
        WizardStep::Personal,
        WizardStep::Summary,
        WizardStep::Experience,
        WizardStep::Education,
        WizardStep::Projects,
        WizardStep::SkillsLanguages,
        WizardStep::Additional,
    ];

    pub fn index(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Personal => "Personal Info",
            WizardStep::Summary => "Summary",
            WizardStep::Experience => "Experience",
            WizardStep::Education => "Education",
            WizardStep::Projects => "Projects",
            WizardStep::SkillsLanguages => "Skills & Languages",
            WizardStep::Additional => "Additional",
        }
    }
}

/// Returns the missing required fields for a step; empty means "may advance".
pub type StepValidator = Arc<dyn Fn(&Resume) -> Vec<String> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// True when the active step changed.
    pub moved: bool,
    pub active_index: usize,
    pub active_step: WizardStep,
    pub is_last: bool,
    /// Fields that blocked a `next`; empty otherwise.
    pub missing_fields: Vec<String>,
}

#[derive(Clone)]
pub struct Wizard {
    active: usize,
    validators: [Option<StepValidator>; 7],
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("active", &self.active_step())
            .field(
                "validators",
                &self.validators.iter().filter(|v| v.is_some()).count(),
            )
            .finish()
    }
}

impl Default for Wizard {
    fn default() -> Self {
        let mut wizard = Self::unvalidated();
        wizard.register_validator(WizardStep::Personal, validation::personal_missing);
        wizard.register_validator(WizardStep::Experience, validation::experience_missing);
        wizard.register_validator(WizardStep::Education, validation::education_missing);
        wizard.register_validator(WizardStep::Projects, validation::projects_missing);
        wizard
    }
}

impl Wizard {
    /// A wizard with no validators registered; every step may be left.
    pub fn unvalidated() -> Self {
        Self {
            active: 0,
            validators: Default::default(),
        }
    }

    /// Registers (or replaces) the gate for `step`.
    pub fn register_validator<F>(&mut self, step: WizardStep, validator: F)
    where
        F: Fn(&Resume) -> Vec<String> + Send + Sync + 'static,
    {
        self.validators[step.index()] = Some(Arc::new(validator));
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_step(&self) -> WizardStep {
        WizardStep::ORDER[self.active]
    }

    pub fn is_last(&self) -> bool {
        self.active == WizardStep::ORDER.len() - 1
    }

    /// Missing fields for the active step under `resume`.
    pub fn check(&self, resume: &Resume) -> Vec<String> {
        self.validators[self.active]
            .as_ref()
            .map(|v| v(resume))
            .unwrap_or_default()
    }

    pub fn next(&mut self, resume: &Resume) -> StepOutcome {
        let missing = self.check(resume);
        let moved = missing.is_empty() && !self.is_last();
        if moved {
            self.active += 1;
        }
        self.outcome(moved, missing)
    }

    pub fn previous(&mut self) -> StepOutcome {
        let moved = self.active > 0;
        if moved {
            self.active -= 1;
        }
        self.outcome(moved, Vec::new())
    }

    fn outcome(&self, moved: bool, missing_fields: Vec<String>) -> StepOutcome {
        StepOutcome {
            moved,
            active_index: self.active,
            active_step: self.active_step(),
            is_last: self.is_last(),
            missing_fields,
        }
    }
}
