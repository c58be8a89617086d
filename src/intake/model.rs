//! Intake record — the four-field profile sent to `/recommend`.

use serde::{Deserialize, Serialize};

use super::state::IntakeStep;
use crate::error::IntakeError;

/// The user's financial profile, filled one field per answered question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub income: String,
    pub spending: String,
    pub perks: String,
    pub credit_score: String,
    /// Question the next answer fills.
    pub step: IntakeStep,
}

impl IntakeRecord {
    /// Store `answer` in the field selected by the current step and advance.
    ///
    /// Returns the new step.
    pub fn fill(&mut self, answer: &str) -> Result<IntakeStep, IntakeError> {
        let next = self.step.next().ok_or(IntakeError::AlreadyComplete)?;
        debug_assert!(self.step.can_transition_to(next));

        let slot = match self.step {
            IntakeStep::Income => &mut self.income,
            IntakeStep::Spending => &mut self.spending,
            IntakeStep::Perks => &mut self.perks,
            IntakeStep::CreditScore => &mut self.credit_score,
            IntakeStep::Complete => return Err(IntakeError::AlreadyComplete),
        };
        *slot = answer.to_string();

        self.step = next;
        Ok(next)
    }

    /// Whether all four questions have been answered.
    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }
}
