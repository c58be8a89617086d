//! Integration tests for the conversation against the HTTP recommendation API.
//!
//! Each test spins up an Axum mock of `/ask` and `/recommend` on a random
//! port and drives the real `reqwest` client through the controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::time::timeout;

use card_advisor::api::{Endpoint, HttpAdvisorApi};
use card_advisor::conversation::{
    CompareSlot, ConversationController, ERROR_REPLY, Mode, Origin, SubmitOutcome,
};
use card_advisor::intake::IntakeStep;
use card_advisor::presenter::{
    INELIGIBLE_NOTICE, SummaryView, available_actions, render_summary, summary_view,
};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared state of the mock recommendation service.
#[derive(Default)]
struct MockService {
    fail_ask: AtomicBool,
    /// Raw body returned by `/recommend`; `None` means `{"recommendations": []}`.
    recommend_body: Mutex<Option<String>>,
    asks: Mutex<Vec<Value>>,
    recommends: Mutex<Vec<Value>>,
}

impl MockService {
    async fn set_recommend_body(&self, body: impl Into<String>) {
        *self.recommend_body.lock().await = Some(body.into());
    }

    async fn set_recommendations(&self, cards: Value) {
        self.set_recommend_body(json!({ "recommendations": cards }).to_string())
            .await;
    }
}

async fn ask(State(mock): State<Arc<MockService>>, Json(body): Json<Value>) -> Response {
    mock.asks.lock().await.push(body);
    if mock.fail_ask.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream model unavailable").into_response();
    }
    Json(json!({ "response": "Got it" })).into_response()
}

async fn recommend(State(mock): State<Arc<MockService>>, Json(body): Json<Value>) -> Response {
    mock.recommends.lock().await.push(body);
    let body = mock
        .recommend_body
        .lock()
        .await
        .clone()
        .unwrap_or_else(|| json!({ "recommendations": [] }).to_string());
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Start the mock service on a random port, return (controller, mock).
async fn start_server() -> (Arc<ConversationController>, Arc<MockService>) {
    let mock = Arc::new(MockService::default());
    let app = Router::new()
        .route("/ask", post(ask))
        .route("/recommend", post(recommend))
        .with_state(Arc::clone(&mock));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = Arc::new(HttpAdvisorApi::new(format!("http://127.0.0.1:{port}")));
    let controller = Arc::new(ConversationController::new(api));
    (controller, mock)
}

fn cards(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "issuer": "Acme Bank",
                    "rewards": "2% cashback",
                    "perks": ["Lounge access", "Fuel surcharge waiver"],
                    "estimated_benefit": "₹8,000/yr",
                    "key_reasons": ["Matches your spending"],
                    "apply_link": format!("https://acme.example/{name}"),
                    "image_url": "https://acme.example/card.png"
                })
            })
            .collect(),
    )
}

async fn answer_all(controller: &ConversationController) -> SubmitOutcome {
    let mut last = SubmitOutcome::Ignored;
    for answer in ["5000", "2000", "travel and dining", "750"] {
        last = controller.submit(answer).await;
    }
    last
}

// ── Chat turns ───────────────────────────────────────────────────────

#[tokio::test]
async fn first_answer_round_trip() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;

        let outcome = controller.submit("5000").await;
        assert_eq!(
            outcome,
            SubmitOutcome::Answered {
                step: IntakeStep::Spending
            }
        );

        let state = controller.snapshot().await;
        let entries = state.transcript.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!((entries[1].origin, entries[1].text.as_str()), (Origin::User, "5000"));
        assert_eq!(
            (entries[2].origin, entries[2].text.as_str()),
            (Origin::Assistant, "Got it")
        );
        assert_eq!(state.intake.step.index(), 1);

        let asks = mock.asks.lock().await;
        assert_eq!(asks.len(), 1);
        assert_eq!(asks[0]["message"], "5000");
        assert_eq!(asks[0]["session_id"], state.session_id.to_string());
        assert!(mock.recommends.lock().await.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn ask_server_error_keeps_step() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        mock.fail_ask.store(true, Ordering::SeqCst);

        let outcome = controller.submit("abc").await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                endpoint: Endpoint::Ask
            }
        );

        let state = controller.snapshot().await;
        let texts: Vec<_> = state
            .transcript
            .entries()
            .iter()
            .skip(1)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, vec!["abc", ERROR_REPLY]);
        assert_eq!(state.intake.step, IntakeStep::Income);
        assert_eq!(state.mode, Mode::Collecting);
    })
    .await
    .expect("test timed out");
}

// ── Recommendations ──────────────────────────────────────────────────

#[tokio::test]
async fn completed_intake_posts_full_record() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        mock.set_recommendations(cards(&["Gold"])).await;

        assert_eq!(
            answer_all(&controller).await,
            SubmitOutcome::Recommended { count: 1 }
        );

        let recommends = mock.recommends.lock().await;
        assert_eq!(recommends.len(), 1);
        assert_eq!(
            recommends[0],
            json!({
                "income": "5000",
                "spending": "2000",
                "perks": "travel and dining",
                "credit_score": "750",
                "step": 4
            })
        );
        assert_eq!(mock.asks.lock().await.len(), 4);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn empty_recommendations_show_ineligible_notice() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        mock.set_recommendations(json!([])).await;

        assert_eq!(
            answer_all(&controller).await,
            SubmitOutcome::Recommended { count: 0 }
        );

        let state = controller.snapshot().await;
        assert_eq!(state.mode, Mode::Summary);
        assert_eq!(summary_view(&state), Some(SummaryView::Ineligible));
        let text = render_summary(&state).unwrap();
        assert!(text.contains(INELIGIBLE_NOTICE));
        assert!(!text.contains("Apply Now"));
        assert!(!text.contains("/compare"));
        assert!(!controller.enter_compare().await);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn missing_recommendations_key_is_ineligible() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        mock.set_recommend_body("{}").await;

        assert_eq!(
            answer_all(&controller).await,
            SubmitOutcome::Recommended { count: 0 }
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn listing_shows_first_three_and_compare_resolves_names() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        mock.set_recommendations(cards(&["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]))
            .await;
        answer_all(&controller).await;

        let state = controller.snapshot().await;
        match summary_view(&state) {
            Some(SummaryView::Listing { cards }) => {
                let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
            }
            other => panic!("expected listing, got {other:?}"),
        }
        assert_eq!(available_actions(&state).len(), 2);

        assert!(controller.enter_compare().await);
        // Selectors cover the whole set, not just the listed three.
        assert!(controller.select(CompareSlot::First, "Epsilon").await);
        assert!(controller.select(CompareSlot::Second, "Epsilon").await);

        let state = controller.snapshot().await;
        let view = summary_view(&state).unwrap();
        let compared: Vec<_> = view.compared_cards().iter().map(|c| c.name.clone()).collect();
        assert_eq!(compared, vec!["Epsilon", "Epsilon"]);

        assert!(controller.leave_compare().await);
        assert_eq!(controller.snapshot().await.mode, Mode::Summary);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn loosely_typed_cards_are_shown() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        mock.set_recommendations(json!([{
            "name": "Gold",
            "issuer": "Acme Bank",
            "rewards": "2% cashback",
            "perks": null,
            "estimated_benefit": 12000,
            "key_reasons": null,
            "apply_link": "https://acme.example/gold",
            "image_url": null
        }]))
        .await;

        assert_eq!(
            answer_all(&controller).await,
            SubmitOutcome::Recommended { count: 1 }
        );

        let state = controller.snapshot().await;
        assert_eq!(state.mode, Mode::Summary);
        let text = render_summary(&state).unwrap();
        assert!(text.contains("Estimated Benefit: 12000"));
        assert!(!text.contains("Why this card?"));
        assert_ne!(state.transcript.last().unwrap().text, ERROR_REPLY);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn malformed_recommendations_can_be_retried() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        mock.set_recommend_body("<html>Bad Gateway</html>").await;

        assert_eq!(
            answer_all(&controller).await,
            SubmitOutcome::Failed {
                endpoint: Endpoint::Recommend
            }
        );
        let state = controller.snapshot().await;
        assert_eq!(state.mode, Mode::AwaitingRecommendations);
        assert_eq!(state.transcript.last().unwrap().text, ERROR_REPLY);
        // The chat reply for the last answer is still shown.
        let entries = state.transcript.entries();
        assert_eq!(entries[entries.len() - 2].text, "Got it");

        mock.set_recommendations(cards(&["Gold", "Silver"])).await;
        assert_eq!(
            controller.retry_recommendations().await,
            SubmitOutcome::Recommended { count: 2 }
        );
        assert_eq!(controller.snapshot().await.mode, Mode::Summary);
        assert_eq!(mock.recommends.lock().await.len(), 2);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn restart_uses_fresh_session() {
    timeout(TEST_TIMEOUT, async {
        let (controller, mock) = start_server().await;
        controller.submit("5000").await;
        controller.restart().await;
        controller.submit("7000").await;

        let asks = mock.asks.lock().await;
        assert_eq!(asks.len(), 2);
        assert_ne!(asks[0]["session_id"], asks[1]["session_id"]);

        let state = controller.snapshot().await;
        assert_eq!(state.intake.income, "7000");
        assert_eq!(state.transcript.len(), 3);
    })
    .await
    .expect("test timed out");
}
