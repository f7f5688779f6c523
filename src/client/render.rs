//! Pure markup rendering for the search panel.

use crate::data_models::SearchResult;

use super::state::{Panel, UiState};

/// Where status text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Separate response-message panel next to the cards (chatbot page).
    Conversation,
    /// Everything inside the results container, text as `<p>` (home page).
    Inline,
}

/// A full rendering of the panel's visible parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub input_value: String,
    /// Text of the user-message bubble; `None` when hidden.
    pub user_message: Option<String>,
    /// Text of the response-message panel; `None` when hidden.
    pub response_message: Option<String>,
    pub response_container_visible: bool,
    /// Inner markup of the results container.
    pub results_html: String,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_card(result: &SearchResult) -> String {
    let name = escape_html(&result.name);
    format!(
        r#"<div class="card">
    <img src="{img}" alt="{name}" class="card-img">
    <div class="card-body">
        <h3 class="card-title">{name}</h3>
        <p class="card-price">${price}</p>
        <p class="card-rating">Rating: {rating} ({count} reviews)</p>
    </div>
</div>
"#,
        img = escape_html(&result.img),
        price = result.price,
        rating = result.avg_rating,
        count = result.rating_count,
    )
}

pub fn render_cards(cards: &[SearchResult]) -> String {
    cards.iter().map(render_card).collect()
}

fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

/// Renders `state` for `layout`. Same inputs, same markup.
pub fn render(layout: Layout, state: &UiState) -> View {
    let mut view = View {
        input_value: state.input.clone(),
        user_message: state.user_message.clone(),
        ..View::default()
    };

    match layout {
        Layout::Conversation => {
            view.response_message = state.panel.text();
            view.response_container_visible = view.response_message.is_some();
            view.results_html = render_cards(state.panel.cards());
        }
        Layout::Inline => {
            view.results_html = match &state.panel {
                Panel::Results { cards, .. } => render_cards(cards),
                Panel::Empty => String::new(),
                other => other.text().map(|t| paragraph(&t)).unwrap_or_default(),
            };
        }
    }

    view
}
