//! Conversation state — mode machine, comparison selection, and the full
//! snapshot rendered by the presenter.

use uuid::Uuid;

use super::transcript::Transcript;
use crate::api::Recommendation;
use crate::intake::IntakeRecord;

/// What the conversation is currently doing.
///
/// `Collecting → AwaitingRecommendations → Summary ⇄ Compare`; restart
/// returns to `Collecting` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Asking the four intake questions.
    #[default]
    Collecting,
    /// Intake complete; recommendations not yet received.
    AwaitingRecommendations,
    /// Showing the recommendation listing.
    Summary,
    /// Showing two recommendations side by side.
    Compare,
}

impl Mode {
    /// Check if a transition from `self` to `target` is valid. Restart is
    /// handled separately since it is allowed from every mode.
    pub fn can_transition_to(&self, target: Mode) -> bool {
        use Mode::*;
        matches!(
            (self, target),
            (Collecting, AwaitingRecommendations)
                | (AwaitingRecommendations, Summary)
                | (Summary, Compare)
                | (Compare, Summary)
        )
    }

    /// Whether the recommendation presenter owns the screen.
    pub fn shows_summary(&self) -> bool {
        matches!(self, Self::Summary | Self::Compare)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Collecting => "collecting",
            Self::AwaitingRecommendations => "awaiting_recommendations",
            Self::Summary => "summary",
            Self::Compare => "compare",
        };
        write!(f, "{s}")
    }
}

/// One of the two comparison selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareSlot {
    First,
    Second,
}

impl std::fmt::Display for CompareSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "First"),
            Self::Second => write!(f, "Second"),
        }
    }
}

/// Card names picked in the two comparison selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    pub first: Option<String>,
    pub second: Option<String>,
}

impl CompareSelection {
    pub fn get(&self, slot: CompareSlot) -> Option<&str> {
        match slot {
            CompareSlot::First => self.first.as_deref(),
            CompareSlot::Second => self.second.as_deref(),
        }
    }

    pub fn set(&mut self, slot: CompareSlot, name: Option<String>) {
        match slot {
            CompareSlot::First => self.first = name,
            CompareSlot::Second => self.second = name,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the conversation owns. Cloned out as a snapshot for rendering.
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Correlation key for the remote dialogue; new on every restart.
    pub session_id: Uuid,
    pub transcript: Transcript,
    pub intake: IntakeRecord,
    pub mode: Mode,
    /// Replaced wholesale on every successful `/recommend` call.
    pub recommendations: Vec<Recommendation>,
    pub selection: CompareSelection,
    /// Set while a request is outstanding; new submissions are refused.
    pub in_flight: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            transcript: Transcript::new(),
            intake: IntakeRecord::default(),
            mode: Mode::default(),
            recommendations: Vec::new(),
            selection: CompareSelection::default(),
            in_flight: false,
        }
    }

    /// Start over: greeting-only transcript, empty intake, no recommendations
    /// or selection, `Collecting`, and a fresh session id.
    pub fn reset(&mut self) {
        self.session_id = Uuid::new_v4();
        self.transcript.reset();
        self.intake = IntakeRecord::default();
        self.mode = Mode::default();
        self.recommendations.clear();
        self.selection.clear();
        self.in_flight = false;
    }

    /// Move to `target`, returning false (and staying put) if the move is not
    /// a valid transition.
    pub fn transition(&mut self, target: Mode) -> bool {
        if !self.mode.can_transition_to(target) {
            tracing::warn!(from = %self.mode, to = %target, "Rejected mode transition");
            return false;
        }
        tracing::debug!(from = %self.mode, to = %target, "Mode transition");
        self.mode = target;
        true
    }

    /// First recommendation whose name matches, if any.
    pub fn find_recommendation(&self, name: &str) -> Option<&Recommendation> {
        self.recommendations.iter().find(|c| c.name == name)
    }

    /// Whether the compare action is currently offered.
    pub fn can_compare(&self) -> bool {
        self.mode == Mode::Summary && !self.recommendations.is_empty()
    }
}
