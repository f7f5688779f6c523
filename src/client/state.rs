use crate::data_models::SearchResult;

use super::envelope::Outcome;

/// Cards shown per response; anything past this is dropped.
pub const MAX_CARDS: usize = 3;

/// What the response area currently holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel {
    #[default]
    Empty,
    Results {
        message: String,
        cards: Vec<SearchResult>,
    },
    Message(String),
    /// Failure text without the `"Error: "` prefix.
    Error(String),
}

impl Panel {
    pub fn from_outcome(outcome: Outcome, max_cards: usize) -> Panel {
        match outcome {
            Outcome::Results {
                message,
                mut results,
            } => {
                results.truncate(max_cards);
                Panel::Results {
                    message,
                    cards: results,
                }
            }
            Outcome::Message(message) => Panel::Message(message),
            Outcome::Failed(error) => Panel::Error(error),
        }
    }

    /// The status line shown to the user, if any.
    pub fn text(&self) -> Option<String> {
        match self {
            Panel::Empty => None,
            Panel::Results { message, .. } => Some(message.clone()),
            Panel::Message(message) => Some(message.clone()),
            Panel::Error(error) => Some(format!("Error: {error}")),
        }
    }

    pub fn cards(&self) -> &[SearchResult] {
        match self {
            Panel::Results { cards, .. } => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    ResultsShown,
    MessageShown,
    ErrorShown,
}

/// Everything a search panel displays, owned by its controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// Current value of the query field.
    pub input: String,
    /// Echo of the last submitted query, when the layout echoes.
    pub user_message: Option<String>,
    /// Generation of the request in flight, if any.
    pub pending: Option<u64>,
    pub panel: Panel,
}

impl UiState {
    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            return Phase::Pending;
        }
        match self.panel {
            Panel::Empty => Phase::Idle,
            Panel::Results { .. } => Phase::ResultsShown,
            Panel::Message(_) => Phase::MessageShown,
            Panel::Error(_) => Phase::ErrorShown,
        }
    }
}

#[test]
fn test_results_are_capped_in_order() {
    let results: Vec<SearchResult> = (0..5)
        .map(|i| SearchResult::new(format!("item {i}"), 1.0, 4.0, 1, "/x.png"))
        .collect();
    let panel = Panel::from_outcome(
        Outcome::Results {
            message: "m".into(),
            results,
        },
        MAX_CARDS,
    );
    let names: Vec<&str> = panel.cards().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["item 0", "item 1", "item 2"]);
}

#[test]
fn test_error_text_is_prefixed() {
    assert_eq!(
        Panel::Error("timed out".into()).text().as_deref(),
        Some("Error: timed out")
    );
    assert_eq!(Panel::Empty.text(), None);
}
