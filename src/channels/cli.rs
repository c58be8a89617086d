//! CLI channel — stdin/stdout REPL driving the conversation.

use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt, stream};
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use super::command::{Command, HELP};
use crate::api::Endpoint;
use crate::conversation::{ConversationController, Mode, SubmitOutcome};
use crate::error::ChannelError;
use crate::presenter::{render_entry, render_summary};

/// Stream of raw input lines.
pub type LineStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// What a handled line produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Text to print; may be empty.
    pub output: String,
    /// Whether the session should end.
    pub quit: bool,
}

/// Terminal front end: turns lines into controller calls and prints new
/// transcript entries and the summary.
pub struct CliChannel {
    controller: Arc<ConversationController>,
    /// Transcript entries already printed for `session`.
    printed: usize,
    session: Option<Uuid>,
}

impl CliChannel {
    pub fn new(controller: Arc<ConversationController>) -> Self {
        Self {
            controller,
            printed: 0,
            session: None,
        }
    }

    /// Read stdin line by line on a background task.
    pub fn start() -> LineStream {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|line| (line, rx))
        });

        Box::pin(stream)
    }

    /// Run the REPL over `lines` until EOF or `/quit`.
    pub async fn run(mut self, banner: &str, mut lines: LineStream) -> Result<(), ChannelError> {
        eprintln!("💬 {banner}");
        eprintln!("   Type your answer and press Enter. /help for commands.\n");

        let opening = self.refresh().await;
        print_reply(&opening)?;

        while let Some(line) = lines.next().await {
            let reply = self.handle(&line).await;
            print_reply(&reply.output)?;
            if reply.quit {
                break;
            }
        }

        tracing::info!("CLI session ended");
        Ok(())
    }

    /// Handle one input line and return what should be printed.
    pub async fn handle(&mut self, line: &str) -> Reply {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                return Reply {
                    output: format!("ℹ️  {e}. Type /help for commands."),
                    quit: false,
                };
            }
        };

        let notice = match command {
            Command::Say(text) => {
                let outcome = self.controller.submit(&text).await;
                outcome_notice(&outcome)
            }
            Command::Retry => {
                let outcome = self.controller.retry_recommendations().await;
                outcome_notice(&outcome)
            }
            Command::Compare => (!self.controller.enter_compare().await)
                .then(|| "ℹ️  Compare is available once cards have been recommended.".to_string()),
            Command::Back => (!self.controller.leave_compare().await)
                .then(|| "ℹ️  Not comparing cards.".to_string()),
            Command::Select(slot, name) => {
                let accepted = match name {
                    Some(name) => self.controller.select(slot, &name).await,
                    None => self.controller.clear_selection(slot).await,
                };
                (!accepted).then(|| "ℹ️  Type /compare first.".to_string())
            }
            Command::Restart => {
                self.controller.restart().await;
                None
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => {
                return Reply {
                    output: String::new(),
                    quit: true,
                };
            }
        };

        let mut output = self.refresh().await;
        if let Some(notice) = notice {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&notice);
        }
        Reply {
            output,
            quit: false,
        }
    }

    /// New transcript entries since the last refresh, followed by the summary
    /// when it owns the screen.
    async fn refresh(&mut self) -> String {
        let state = self.controller.snapshot().await;
        if self.session != Some(state.session_id) {
            self.session = Some(state.session_id);
            self.printed = 0;
        }

        let mut lines: Vec<String> = state
            .transcript
            .entries()
            .iter()
            .skip(self.printed)
            .map(render_entry)
            .collect();
        self.printed = state.transcript.len();

        if let Some(summary) = render_summary(&state) {
            lines.push(summary);
        }
        lines.join("\n")
    }
}

/// Extra guidance for outcomes the transcript alone does not explain.
fn outcome_notice(outcome: &SubmitOutcome) -> Option<String> {
    match outcome {
        SubmitOutcome::Busy => Some("⏳ Still waiting for the last reply.".to_string()),
        SubmitOutcome::NotAccepting(Mode::AwaitingRecommendations)
        | SubmitOutcome::Failed {
            endpoint: Endpoint::Recommend,
        } => Some(
            "ℹ️  Recommendations could not be loaded. Type /retry to try again or /restart to start over."
                .to_string(),
        ),
        SubmitOutcome::NotAccepting(_) => {
            Some("ℹ️  Type /restart to start a new conversation.".to_string())
        }
        SubmitOutcome::Ignored
        | SubmitOutcome::Answered { .. }
        | SubmitOutcome::Recommended { .. }
        | SubmitOutcome::Failed { .. }
        | SubmitOutcome::Discarded => None,
    }
}

fn print_reply(output: &str) -> Result<(), ChannelError> {
    let mut stdout = std::io::stdout().lock();
    if !output.is_empty() {
        writeln!(stdout, "{output}\n")?;
    }
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
