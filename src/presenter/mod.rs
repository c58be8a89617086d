//! Recommendation presenter — pure functions from a conversation snapshot to
//! what the user sees.

pub mod render;
pub mod view;

pub use render::{INELIGIBLE_NOTICE, PLACEHOLDER_IMAGE_URL, render_card, render_entry, render_summary};
pub use view::{Action, MAX_LISTED_CARDS, Selector, SummaryView, available_actions, summary_view};
