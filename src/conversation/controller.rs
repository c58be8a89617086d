//! ConversationController — coordinates transcript, intake progression, and
//! the calls to the recommendation service.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::state::{CompareSlot, ConversationState, Mode};
use super::transcript::{ERROR_REPLY, TranscriptEntry};
use crate::api::{AdvisorApi, AskRequest, Endpoint, Recommendation};
use crate::error::ApiError;
use crate::intake::{IntakeRecord, IntakeStep};

/// Result of a [`ConversationController::submit`] or
/// [`ConversationController::retry_recommendations`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// Another request is still outstanding; nothing happened.
    Busy,
    /// The conversation is not in a mode that takes this action.
    NotAccepting(Mode),
    /// Chat reply received; intake advanced to `step`.
    Answered { step: IntakeStep },
    /// Recommendations received; the summary is showing.
    Recommended { count: usize },
    /// A remote call failed; the error reply was appended.
    Failed { endpoint: Endpoint },
    /// The conversation was restarted while the request was outstanding;
    /// its result was dropped.
    Discarded,
}

/// Owns the conversation state and drives the remote calls.
///
/// All operations take `&self`; share the controller behind an `Arc`. The
/// state lock is never held across a network call.
pub struct ConversationController {
    api: Arc<dyn AdvisorApi>,
    state: RwLock<ConversationState>,
}

impl ConversationController {
    pub fn new(api: Arc<dyn AdvisorApi>) -> Self {
        let state = ConversationState::new();
        info!(session_id = %state.session_id, "Conversation started");
        Self {
            api,
            state: RwLock::new(state),
        }
    }

    /// Clone of the current state for rendering.
    pub async fn snapshot(&self) -> ConversationState {
        self.state.read().await.clone()
    }

    /// Whether a request is outstanding.
    pub async fn is_busy(&self) -> bool {
        self.state.read().await.in_flight
    }

    /// Answer the current intake question.
    ///
    /// 1. Append the user's text and send it to `/ask`.
    /// 2. On a reply, append it and fill the intake field for the current step.
    /// 3. If that was the last question, post the intake record to `/recommend`
    ///    and switch to the summary.
    ///
    /// Any remote failure appends the fixed error reply; a failed `/ask` leaves
    /// the step where it was.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        let (session_id, step) = {
            let mut state = self.state.write().await;
            if state.in_flight {
                debug!(session_id = %state.session_id, "Submission refused while busy");
                return SubmitOutcome::Busy;
            }
            if state.mode != Mode::Collecting {
                debug!(mode = %state.mode, "Submission refused outside intake");
                return SubmitOutcome::NotAccepting(state.mode);
            }
            state.transcript.push(TranscriptEntry::user(text));
            state.in_flight = true;
            (state.session_id, state.intake.step)
        };

        info!(session_id = %session_id, step = %step, "Sending answer");
        let request = AskRequest {
            message: text.to_string(),
            session_id: session_id.to_string(),
        };
        let reply = self.api.ask(&request).await;

        let intake = {
            let mut state = self.state.write().await;
            if state.session_id != session_id {
                info!(session_id = %session_id, "Dropping chat reply for restarted session");
                return SubmitOutcome::Discarded;
            }

            let reply = match reply {
                Ok(reply) => reply,
                Err(e) => {
                    record_failure(&mut state, &e);
                    state.in_flight = false;
                    return SubmitOutcome::Failed {
                        endpoint: e.endpoint(),
                    };
                }
            };

            state.transcript.push(TranscriptEntry::assistant(reply));
            let next = match state.intake.fill(text) {
                Ok(next) => next,
                Err(e) => {
                    // Collecting mode implies an incomplete intake record.
                    error!(session_id = %session_id, "Intake fill failed: {}", e);
                    state.in_flight = false;
                    return SubmitOutcome::NotAccepting(state.mode);
                }
            };

            if !next.is_terminal() {
                state.in_flight = false;
                return SubmitOutcome::Answered { step: next };
            }

            state.transition(Mode::AwaitingRecommendations);
            state.intake.clone()
        };

        self.request_recommendations(session_id, intake).await
    }

    /// Re-post the completed intake record after a failed `/recommend` call.
    pub async fn retry_recommendations(&self) -> SubmitOutcome {
        let (session_id, intake) = {
            let mut state = self.state.write().await;
            if state.in_flight {
                return SubmitOutcome::Busy;
            }
            if state.mode != Mode::AwaitingRecommendations {
                return SubmitOutcome::NotAccepting(state.mode);
            }
            state.in_flight = true;
            (state.session_id, state.intake.clone())
        };

        info!(session_id = %session_id, "Retrying recommendations");
        self.request_recommendations(session_id, intake).await
    }

    async fn request_recommendations(
        &self,
        session_id: Uuid,
        intake: IntakeRecord,
    ) -> SubmitOutcome {
        info!(session_id = %session_id, "Requesting recommendations");
        let result = self.api.recommend(&intake).await;

        let mut state = self.state.write().await;
        if state.session_id != session_id {
            info!(session_id = %session_id, "Dropping recommendations for restarted session");
            return SubmitOutcome::Discarded;
        }
        state.in_flight = false;

        match result {
            Ok(recommendations) => {
                let count = recommendations.len();
                apply_recommendations(&mut state, recommendations);
                info!(session_id = %session_id, count, "Showing recommendations");
                SubmitOutcome::Recommended { count }
            }
            Err(e) => {
                record_failure(&mut state, &e);
                SubmitOutcome::Failed {
                    endpoint: e.endpoint(),
                }
            }
        }
    }

    /// Start over: greeting only, empty intake, no recommendations, and a new
    /// session id. Any outstanding request result will be discarded.
    pub async fn restart(&self) {
        let mut state = self.state.write().await;
        let previous = state.session_id;
        state.reset();
        info!(
            previous_session = %previous,
            session_id = %state.session_id,
            "Conversation restarted"
        );
    }

    /// Open the comparison view. Only offered from the summary with at least
    /// one recommendation.
    pub async fn enter_compare(&self) -> bool {
        let mut state = self.state.write().await;
        if !state.can_compare() {
            debug!(mode = %state.mode, count = state.recommendations.len(), "Compare unavailable");
            return false;
        }
        state.transition(Mode::Compare)
    }

    /// Back from the comparison view to the summary.
    pub async fn leave_compare(&self) -> bool {
        let mut state = self.state.write().await;
        if state.mode != Mode::Compare {
            return false;
        }
        state.transition(Mode::Summary)
    }

    /// Pick a card by name for one comparison slot. The name is resolved only
    /// when rendering.
    pub async fn select(&self, slot: CompareSlot, name: &str) -> bool {
        self.set_selection(slot, Some(name.to_string())).await
    }

    /// Empty one comparison slot.
    pub async fn clear_selection(&self, slot: CompareSlot) -> bool {
        self.set_selection(slot, None).await
    }

    async fn set_selection(&self, slot: CompareSlot, name: Option<String>) -> bool {
        let mut state = self.state.write().await;
        if state.mode != Mode::Compare {
            warn!(mode = %state.mode, %slot, "Selection outside compare view");
            return false;
        }
        state.selection.set(slot, name);
        true
    }
}

fn apply_recommendations(state: &mut ConversationState, recommendations: Vec<Recommendation>) {
    state.recommendations = recommendations;
    state.selection.clear();
    state.transition(Mode::Summary);
}

fn record_failure(state: &mut ConversationState, err: &ApiError) {
    error!(
        session_id = %state.session_id,
        endpoint = %err.endpoint(),
        "Advisor API error: {}",
        err
    );
    state.transcript.push(TranscriptEntry::assistant(ERROR_REPLY));
}
