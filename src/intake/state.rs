//! Intake state machine — tracks which question the user is answering.

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// The steps of the intake conversation.
///
/// Progresses linearly: Income → Spending → Perks → CreditScore → Complete.
/// On the wire a step is its index (0..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum IntakeStep {
    Income,
    Spending,
    Perks,
    CreditScore,
    Complete,
}

impl IntakeStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: IntakeStep) -> bool {
        use IntakeStep::*;
        matches!(
            (self, target),
            (Income, Spending)
                | (Spending, Perks)
                | (Perks, CreditScore)
                | (CreditScore, Complete)
        )
    }

    /// Whether every question has been answered.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<IntakeStep> {
        use IntakeStep::*;
        match self {
            Income => Some(Spending),
            Spending => Some(Perks),
            Perks => Some(CreditScore),
            CreditScore => Some(Complete),
            Complete => None,
        }
    }

    /// Wire index of this step.
    pub fn index(&self) -> u8 {
        match self {
            Self::Income => 0,
            Self::Spending => 1,
            Self::Perks => 2,
            Self::CreditScore => 3,
            Self::Complete => 4,
        }
    }
}

impl Default for IntakeStep {
    fn default() -> Self {
        Self::Income
    }
}

impl From<IntakeStep> for u8 {
    fn from(step: IntakeStep) -> Self {
        step.index()
    }
}

impl TryFrom<u8> for IntakeStep {
    type Error = IntakeError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Income),
            1 => Ok(Self::Spending),
            2 => Ok(Self::Perks),
            3 => Ok(Self::CreditScore),
            4 => Ok(Self::Complete),
            other => Err(IntakeError::InvalidStep(other)),
        }
    }
}

impl std::fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Income => "income",
            Self::Spending => "spending",
            Self::Perks => "perks",
            Self::CreditScore => "credit_score",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use IntakeStep::*;
        let transitions = [
            (Income, Spending),
            (Spending, Perks),
            (Perks, CreditScore),
            (CreditScore, Complete),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use IntakeStep::*;
        assert!(!Income.can_transition_to(Perks));
        assert!(!Perks.can_transition_to(Spending));
        assert!(!Complete.can_transition_to(Income));
        assert!(!Spending.can_transition_to(Spending));
    }

    #[test]
    fn next_walks_all_steps() {
        use IntakeStep::*;
        let mut current = Income;
        for expected in [Spending, Perks, CreditScore, Complete] {
            let next = current.next().unwrap();
            assert_eq!(next, expected);
            current = next;
        }
        assert!(current.is_terminal());
        assert!(current.next().is_none());
    }

    #[test]
    fn index_roundtrips_through_u8() {
        for index in 0..=4u8 {
            let step = IntakeStep::try_from(index).unwrap();
            assert_eq!(u8::from(step), index);
        }
        assert_eq!(IntakeStep::try_from(5), Err(IntakeError::InvalidStep(5)));
    }

    #[test]
    fn serializes_as_index() {
        assert_eq!(serde_json::to_string(&IntakeStep::Complete).unwrap(), "4");
        let parsed: IntakeStep = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, IntakeStep::Perks);
        assert!(serde_json::from_str::<IntakeStep>("9").is_err());
    }
}
