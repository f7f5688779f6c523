//! The search panel: submit a query to `/search` and render the reply.

pub mod controller;
pub mod envelope;
pub mod render;
pub mod state;
pub mod transport;

pub use controller::{ControllerConfig, SearchController, Submission, Ticket};
pub use envelope::{Outcome, RawResponse, SearchError};
pub use render::{Layout, View};
pub use state::{MAX_CARDS, Panel, Phase, UiState};
pub use transport::{HttpTransport, SearchTransport};
