//! View model for the recommendation summary.

use crate::api::Recommendation;
use crate::conversation::{CompareSlot, ConversationState, Mode};

/// How many recommendations the listing shows.
pub const MAX_LISTED_CARDS: usize = 3;

/// User actions offered alongside the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Restart,
    Compare,
    Back,
}

/// One comparison selector: its current value and the resolved card.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector<'a> {
    pub slot: CompareSlot,
    pub selected: Option<&'a str>,
    pub card: Option<&'a Recommendation>,
}

/// What the summary screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryView<'a> {
    /// The service returned no cards.
    Ineligible,
    /// Up to [`MAX_LISTED_CARDS`] cards.
    Listing { cards: &'a [Recommendation] },
    /// Two selectors over every recommendation name, with resolved cards.
    Compare {
        options: Vec<&'a str>,
        selectors: [Selector<'a>; 2],
    },
}

impl SummaryView<'_> {
    /// Cards rendered side by side; unresolved slots are left out.
    pub fn compared_cards(&self) -> Vec<&Recommendation> {
        match self {
            Self::Compare { selectors, .. } => selectors.iter().filter_map(|s| s.card).collect(),
            _ => Vec::new(),
        }
    }
}

/// Build the summary view, or `None` while the chat owns the screen.
pub fn summary_view(state: &ConversationState) -> Option<SummaryView<'_>> {
    match state.mode {
        Mode::Collecting | Mode::AwaitingRecommendations => None,
        Mode::Summary if state.recommendations.is_empty() => Some(SummaryView::Ineligible),
        Mode::Summary => {
            let shown = state.recommendations.len().min(MAX_LISTED_CARDS);
            Some(SummaryView::Listing {
                cards: &state.recommendations[..shown],
            })
        }
        Mode::Compare => {
            let options = state.recommendations.iter().map(|c| c.name.as_str()).collect();
            Some(SummaryView::Compare {
                options,
                selectors: [
                    selector(state, CompareSlot::First),
                    selector(state, CompareSlot::Second),
                ],
            })
        }
    }
}

fn selector(state: &ConversationState, slot: CompareSlot) -> Selector<'_> {
    let selected = state.selection.get(slot);
    Selector {
        slot,
        selected,
        card: selected.and_then(|name| state.find_recommendation(name)),
    }
}

/// Actions available in the current mode.
pub fn available_actions(state: &ConversationState) -> Vec<Action> {
    match state.mode {
        Mode::Collecting | Mode::AwaitingRecommendations => Vec::new(),
        Mode::Summary if state.can_compare() => vec![Action::Restart, Action::Compare],
        Mode::Summary => vec![Action::Restart],
        Mode::Compare => vec![Action::Back],
    }
}
