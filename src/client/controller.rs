use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use super::envelope::Outcome;
use super::render::{Layout, View, render};
use super::state::{MAX_CARDS, Panel, Phase, UiState};
use super::transport::SearchTransport;

/// Per-page behaviour of a [`SearchController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub layout: Layout,
    /// Show the submitted query in the user-message bubble.
    pub echo_user_message: bool,
    /// Empty the query field on submit.
    pub clear_input: bool,
    pub max_cards: usize,
}

impl ControllerConfig {
    pub fn chatbot() -> Self {
        Self {
            layout: Layout::Conversation,
            echo_user_message: true,
            clear_input: true,
            max_cards: MAX_CARDS,
        }
    }

    pub fn home() -> Self {
        Self {
            layout: Layout::Inline,
            echo_user_message: false,
            clear_input: false,
            max_cards: MAX_CARDS,
        }
    }
}

/// Handle for one submission, issued by [`SearchController::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: String,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The reply was written to the panel; holds the resulting phase.
    Applied(Phase),
    /// A newer submission was issued while this one was in flight.
    Superseded,
}

/// Drives one search panel: submit, wait, render.
///
/// Submissions are numbered. Only the reply to the most recent one is applied,
/// so overlapping submits never interleave their writes.
pub struct SearchController<T> {
    transport: T,
    config: ControllerConfig,
    state: Mutex<UiState>,
    generation: AtomicU64,
}

impl<T: SearchTransport> SearchController<T> {
    pub fn new(transport: T, config: ControllerConfig) -> Self {
        Self {
            transport,
            config,
            state: Mutex::new(UiState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Types into the query field.
    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.lock().await.input = text.into();
    }

    /// Submits whatever is in the query field and waits for the reply.
    pub async fn submit(&self) -> Submission {
        let ticket = self.begin().await;
        let exchange = self.transport.post_search(ticket.query()).await;
        self.complete(ticket, Outcome::from_exchange(exchange, self.config.max_cards)).await
    }

    /// Fills the query field with `query`, then submits.
    pub async fn submit_query(&self, query: impl Into<String>) -> Submission {
        self.set_input(query).await;
        self.submit().await
    }

    /// First half of a submit: captures the query, echoes it, and marks the
    /// panel pending under a fresh generation.
    pub async fn begin(&self) -> Ticket {
        let mut state = self.state.lock().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = if self.config.clear_input {
            std::mem::take(&mut state.input)
        } else {
            state.input.clone()
        };
        if self.config.echo_user_message {
            state.user_message = Some(query.clone());
        }
        state.pending = Some(generation);

        log::debug!("search #{generation} submitted: {query:?}");
        Ticket { generation, query }
    }

    /// Second half of a submit: applies `outcome` unless a newer ticket exists.
    pub async fn complete(&self, ticket: Ticket, outcome: Outcome) -> Submission {
        let mut state = self.state.lock().await;

        if state.pending != Some(ticket.generation) {
            log::debug!(
                "search #{} superseded, dropping its reply",
                ticket.generation
            );
            return Submission::Superseded;
        }

        if let Outcome::Failed(error) = &outcome {
            log::debug!("search #{} failed: {}", ticket.generation, error);
        }

        state.panel = Panel::from_outcome(outcome, self.config.max_cards);
        state.pending = None;
        Submission::Applied(state.phase())
    }

    pub async fn state(&self) -> UiState {
        self.state.lock().await.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase()
    }

    pub async fn view(&self) -> View {
        render(self.config.layout, &*self.state.lock().await)
    }
}
