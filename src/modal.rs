use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::page::{PageDocument, hooks};

/// Delay before the modal opens on its own.
pub const AUTO_OPEN_DELAY: Duration = Duration::from_millis(5000);

/// Clickable parts of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Overlay,
    CloseButton,
    /// The "start" link. Closing is all we do; the link navigates by itself.
    StartButton,
}

/// Modal elements present on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalHooks {
    pub start_button: bool,
}

impl ModalHooks {
    /// `None` unless the modal, its overlay and its close control all exist.
    pub fn locate(page: &PageDocument) -> Option<Self> {
        let required = [hooks::MODAL, hooks::MODAL_OVERLAY, hooks::MODAL_CLOSE];
        if !required.iter().all(|selector| page.contains(selector)) {
            log::debug!("modal elements missing, modal disabled");
            return None;
        }
        Some(Self {
            start_button: page.contains(hooks::START_BUTTON),
        })
    }
}

/// Open/closed state of a page's modal plus its one-shot auto-open timer.
///
/// The timer is never cancelled: closing the modal early does not stop it from
/// opening at the deadline.
pub struct ModalController {
    active: Arc<watch::Sender<bool>>,
    hooks: ModalHooks,
    auto_open: JoinHandle<()>,
}

impl ModalController {
    /// Attaches to `page` and schedules the auto-open after [`AUTO_OPEN_DELAY`].
    /// Returns `None`, with no timer, when required elements are missing.
    /// Must be called inside a tokio runtime.
    pub fn initialize(page: &PageDocument) -> Option<Self> {
        Self::initialize_with_delay(page, AUTO_OPEN_DELAY)
    }

    pub fn initialize_with_delay(page: &PageDocument, delay: Duration) -> Option<Self> {
        let hooks = ModalHooks::locate(page)?;
        let (tx, _) = watch::channel(false);
        let active = Arc::new(tx);

        let deadline = tokio::time::Instant::now() + delay;
        let timer_active = active.clone();
        let auto_open = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            log::debug!("auto-opening modal");
            set_active(&timer_active, true);
        });

        Some(Self {
            active,
            hooks,
            auto_open,
        })
    }

    pub fn open(&self) {
        set_active(&self.active, true);
    }

    pub fn close(&self) {
        set_active(&self.active, false);
    }

    pub fn is_open(&self) -> bool {
        *self.active.borrow()
    }

    /// Notifies on every open/close transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.active.subscribe()
    }

    /// Handles a click. Returns whether a listener was bound to `target`.
    pub fn click(&self, target: ModalTarget) -> bool {
        match target {
            ModalTarget::Overlay | ModalTarget::CloseButton => {
                self.close();
                true
            }
            ModalTarget::StartButton if self.hooks.start_button => {
                self.close();
                true
            }
            ModalTarget::StartButton => false,
        }
    }

    /// Whether the auto-open timer has fired.
    pub fn auto_open_fired(&self) -> bool {
        self.auto_open.is_finished()
    }
}

fn set_active(active: &watch::Sender<bool>, value: bool) {
    active.send_if_modified(|current| {
        let changed = *current != value;
        *current = value;
        changed
    });
}
