use scraper::{Html, Selector};

use crate::client::ControllerConfig;

pub mod hooks {
    pub const SEARCH_FORM: &str = "#searchForm";
    pub const QUERY_INPUT: &str = "#query";
    pub const RESULTS: &str = "#results";
    pub const USER_MESSAGE: &str = "#userMessage";
    pub const RESPONSE_MESSAGE: &str = "#responseMessage";
    pub const RESPONSE_CONTAINER: &str = "#responseContainer";

    pub const MODAL: &str = "[data-modal]";
    pub const MODAL_OVERLAY: &str = "[data-modal-overlay]";
    pub const MODAL_CLOSE: &str = "[data-modal-close]";
    pub const START_BUTTON: &str = "#startButton";
}

/// A parsed page, queried for the elements controllers attach to.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Whether an element matches `selector`. Invalid selectors match nothing.
    pub fn contains(&self, selector: &str) -> bool {
        match Selector::parse(selector) {
            Ok(selector) => self.html.select(&selector).next().is_some(),
            Err(e) => {
                log::warn!("invalid selector {selector:?}: {e:?}");
                false
            }
        }
    }
}

/// Which search-panel elements a page provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchHooks {
    pub form: bool,
    pub input: bool,
    pub results: bool,
    pub user_message: bool,
    pub response_message: bool,
    pub response_container: bool,
}

impl SearchHooks {
    pub fn locate(page: &PageDocument) -> Self {
        Self {
            form: page.contains(hooks::SEARCH_FORM),
            input: page.contains(hooks::QUERY_INPUT),
            results: page.contains(hooks::RESULTS),
            user_message: page.contains(hooks::USER_MESSAGE),
            response_message: page.contains(hooks::RESPONSE_MESSAGE),
            response_container: page.contains(hooks::RESPONSE_CONTAINER),
        }
    }

    /// Controller settings for this page, or `None` when there is no form to
    /// attach to. Pages with all three message panels get the conversation
    /// layout; the rest render inline.
    pub fn config(&self) -> Option<ControllerConfig> {
        if !(self.form && self.input && self.results) {
            return None;
        }
        if self.user_message && self.response_message && self.response_container {
            Some(ControllerConfig::chatbot())
        } else {
            Some(ControllerConfig::home())
        }
    }
}
