use std::time::Duration;
use tokio::time::{Instant, advance};

use lookbook::modal::{AUTO_OPEN_DELAY, ModalController, ModalHooks, ModalTarget};
use lookbook::page::PageDocument;

const FULL_MODAL: &str = r#"
<div data-modal>
  <div data-modal-overlay></div>
  <button data-modal-close>x</button>
  <a id="startButton" href="/chatbot">Start Chat</a>
</div>"#;

const NO_START_BUTTON: &str = r#"
<div data-modal>
  <div data-modal-overlay></div>
  <button data-modal-close>x</button>
</div>"#;

/// Lets the timer task run after the clock moved.
async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[test]
fn test_hooks_require_modal_overlay_and_close() {
    assert_eq!(
        ModalHooks::locate(&PageDocument::parse(FULL_MODAL)),
        Some(ModalHooks { start_button: true })
    );
    assert_eq!(
        ModalHooks::locate(&PageDocument::parse(NO_START_BUTTON)),
        Some(ModalHooks {
            start_button: false
        })
    );

    let missing = [
        r#"<div data-modal-overlay></div><button data-modal-close></button>"#,
        r#"<div data-modal></div><button data-modal-close></button>"#,
        r#"<div data-modal></div><div data-modal-overlay></div>"#,
    ];
    for markup in missing {
        assert_eq!(ModalHooks::locate(&PageDocument::parse(markup)), None);
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_elements_disable_controller() {
    let page = PageDocument::parse(r#"<div data-modal></div><div data-modal-overlay></div>"#);
    assert!(ModalController::initialize(&page).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_auto_opens_after_five_seconds() {
    let modal = ModalController::initialize(&PageDocument::parse(FULL_MODAL)).unwrap();
    assert!(!modal.is_open());

    advance(AUTO_OPEN_DELAY - Duration::from_millis(1)).await;
    settle().await;
    assert!(!modal.is_open());
    assert!(!modal.auto_open_fired());

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert!(modal.is_open());
    assert!(modal.auto_open_fired());
}

#[tokio::test(start_paused = true)]
async fn test_auto_open_notifies_subscribers_at_deadline() {
    let start = Instant::now();
    let modal = ModalController::initialize(&PageDocument::parse(FULL_MODAL)).unwrap();
    let mut rx = modal.subscribe();

    rx.changed().await.unwrap();
    assert!(*rx.borrow());
    assert!(start.elapsed() >= AUTO_OPEN_DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_manual_close_does_not_cancel_auto_open() {
    let modal = ModalController::initialize(&PageDocument::parse(FULL_MODAL)).unwrap();

    modal.open();
    assert!(modal.is_open());
    assert!(modal.click(ModalTarget::CloseButton));
    assert!(!modal.is_open());

    advance(AUTO_OPEN_DELAY).await;
    settle().await;
    assert!(modal.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_overlay_and_close_button_close() {
    let modal = ModalController::initialize(&PageDocument::parse(NO_START_BUTTON)).unwrap();

    modal.open();
    assert!(modal.click(ModalTarget::Overlay));
    assert!(!modal.is_open());

    modal.open();
    assert!(modal.click(ModalTarget::CloseButton));
    assert!(!modal.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_start_button_closes_only_when_present() {
    let with_start = ModalController::initialize(&PageDocument::parse(FULL_MODAL)).unwrap();
    with_start.open();
    assert!(with_start.click(ModalTarget::StartButton));
    assert!(!with_start.is_open());

    let without_start =
        ModalController::initialize(&PageDocument::parse(NO_START_BUTTON)).unwrap();
    without_start.open();
    assert!(!without_start.click(ModalTarget::StartButton));
    assert!(without_start.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_redundant_close_does_not_notify() {
    let modal = ModalController::initialize(&PageDocument::parse(FULL_MODAL)).unwrap();
    let rx = modal.subscribe();

    modal.close();
    assert!(!rx.has_changed().unwrap());

    modal.open();
    assert!(rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_custom_delay() {
    let modal = ModalController::initialize_with_delay(
        &PageDocument::parse(FULL_MODAL),
        Duration::from_millis(10),
    )
    .unwrap();

    advance(Duration::from_millis(10)).await;
    settle().await;
    assert!(modal.is_open());
}
