//! Terminal rendering of transcript entries and the summary view.

use super::view::{Action, Selector, SummaryView, available_actions, summary_view};
use crate::api::Recommendation;
use crate::conversation::{ConversationState, Origin, TranscriptEntry};

/// Shown when the service returns no cards.
pub const INELIGIBLE_NOTICE: &str = "❌ You are not eligible for any credit cards.";

/// Image shown for cards that come without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

const LISTING_TITLE: &str = "🎯 Your Recommended Cards";
const COMPARE_TITLE: &str = "📊 Compare Recommended Cards";

/// One transcript line, prefixed by who said it.
pub fn render_entry(entry: &TranscriptEntry) -> String {
    let prefix = match entry.origin {
        Origin::Assistant => "🤖",
        Origin::User => "🧑",
    };
    format!("{prefix} {}", entry.text)
}

/// Full card block: details, reasons, image, and apply link.
pub fn render_card(card: &Recommendation) -> String {
    let mut lines = vec![
        format!("┌ {}", card.name),
        format!("│ Issuer: {}", card.issuer),
        format!("│ Rewards: {}", card.rewards),
        format!("│ Perks: {}", card.perks),
        format!("│ Estimated Benefit: {}", card.estimated_benefit),
    ];
    if !card.key_reasons.is_empty() {
        lines.push("│ Why this card?".to_string());
        lines.extend(card.key_reasons.iter().map(|reason| format!("│   • {reason}")));
    }
    let image = card
        .image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_URL);
    lines.push(format!("│ Image: {image}"));
    lines.push(format!("└ Apply Now: {}", card.apply_link));
    lines.join("\n")
}

fn render_selector(selector: &Selector<'_>) -> String {
    match selector.selected {
        Some(name) => format!("{} card: {name}", selector.slot),
        None => format!("Select {} Card", selector.slot),
    }
}

fn action_hint(action: Action) -> &'static str {
    match action {
        Action::Restart => "🔁 /restart",
        Action::Compare => "📊 /compare",
        Action::Back => "🔙 /back",
    }
}

/// Summary screen text, or `None` while the chat owns the screen.
pub fn render_summary(state: &ConversationState) -> Option<String> {
    let view = summary_view(state)?;
    let mut out = String::new();

    match &view {
        SummaryView::Ineligible => {
            out.push_str(INELIGIBLE_NOTICE);
            out.push('\n');
        }
        SummaryView::Listing { cards } => {
            out.push_str(LISTING_TITLE);
            out.push('\n');
            for card in cards.iter() {
                out.push_str(&format!("\n{}\n", render_card(card)));
            }
        }
        SummaryView::Compare { options, selectors } => {
            out.push_str(&format!("{COMPARE_TITLE}\nCards: {}\n", options.join(" | ")));
            for selector in selectors.iter() {
                out.push_str(&render_selector(selector));
                out.push('\n');
            }
            for card in view.compared_cards() {
                out.push_str(&format!("\n{}\n", render_card(card)));
            }
        }
    }

    let hints: Vec<_> = available_actions(state)
        .into_iter()
        .map(action_hint)
        .collect();
    if !hints.is_empty() {
        out.push_str(&format!("\n{}", hints.join("   ")));
    }
    Some(out)
}
