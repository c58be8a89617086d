//! Conversation — transcript, mode machine, and the controller that talks to
//! the recommendation service.

pub mod controller;
pub mod state;
pub mod transcript;

pub use controller::{ConversationController, SubmitOutcome};
pub use state::{CompareSelection, CompareSlot, ConversationState, Mode};
pub use transcript::{ERROR_REPLY, GREETING, Origin, Transcript, TranscriptEntry};
