mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ideas, init_logging, GatedGenerator, ScriptedGenerator};
use futuregen::ui::{EventHub, Key, UiEvent};
use futuregen::{GalleryRuntime, GenerationError, GenerationState, Msg, Phase, Pipeline};
use tokio::sync::watch;

async fn settled(updates: &mut watch::Receiver<GenerationState>) -> GenerationState {
    tokio::time::timeout(Duration::from_secs(5), updates.wait_for(|s| !s.is_loading()))
        .await
        .expect("gallery settles")
        .expect("runtime alive")
        .clone()
}

/// Lets spawned invocations run until they park on their gates.
async fn let_tasks_run() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

fn titles(state: &GenerationState) -> Vec<String> {
    state.items().iter().map(|i| i.title.clone()).collect()
}

#[tokio::test]
async fn mount_loads_six_items() {
    init_logging();
    let generator = ScriptedGenerator::new(Ok(ideas(&["a", "b", "c", "d", "e", "f"])));
    let gallery = GalleryRuntime::new(Pipeline::new(Arc::new(generator)));
    let mut updates = gallery.subscribe();

    assert!(gallery.snapshot().is_loading());
    gallery.mount();
    let state = settled(&mut updates).await;

    assert_eq!(state.phase(), Phase::Loaded);
    assert!(state.error().is_none());
    assert_eq!(
        titles(&state),
        vec!["Title a", "Title b", "Title c", "Title d", "Title e", "Title f"]
    );
}

#[tokio::test]
async fn text_failure_ends_in_failed_state() {
    init_logging();
    let generator = ScriptedGenerator::new(Err(GenerationError::Transport("offline".into())));
    let gallery = GalleryRuntime::new(Pipeline::new(Arc::new(generator)));
    let mut updates = gallery.subscribe();

    gallery.mount();
    let state = settled(&mut updates).await;

    assert_eq!(state.phase(), Phase::Failed);
    assert!(state.items().is_empty());
    assert_eq!(state.error(), Some(futuregen::gallery::GENERIC_ERROR));
}

#[tokio::test]
async fn newer_invocation_wins_when_older_resolves_last() {
    init_logging();
    let (generator, mut gates) = GatedGenerator::new(2);
    let gallery = GalleryRuntime::new(Pipeline::new(Arc::new(generator)));
    let mut updates = gallery.subscribe();

    gallery.mount();
    let_tasks_run().await;
    gallery.dispatch(Msg::Mounted);
    let_tasks_run().await;

    let old_gate = gates.remove(0);
    let new_gate = gates.remove(0);

    new_gate.send(Ok(ideas(&["new"]))).unwrap();
    let state = settled(&mut updates).await;
    assert_eq!(titles(&state), vec!["Title new"]);

    old_gate.send(Ok(ideas(&["old"]))).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = gallery.snapshot();
    assert_eq!(state.invocation(), 2);
    assert_eq!(titles(&state), vec!["Title new"]);
}

#[tokio::test]
async fn older_invocation_resolving_first_does_not_settle_the_gallery() {
    init_logging();
    let (generator, mut gates) = GatedGenerator::new(2);
    let gallery = GalleryRuntime::new(Pipeline::new(Arc::new(generator)));
    let mut updates = gallery.subscribe();

    gallery.mount();
    let_tasks_run().await;
    gallery.dispatch(Msg::Mounted);
    let_tasks_run().await;

    let old_gate = gates.remove(0);
    let new_gate = gates.remove(0);

    old_gate
        .send(Err(GenerationError::Transport("old failure".into())))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let state = gallery.snapshot();
    assert!(state.is_loading());
    assert!(state.error().is_none());

    new_gate.send(Ok(ideas(&["fresh"]))).unwrap();
    let state = settled(&mut updates).await;
    assert_eq!(titles(&state), vec!["Title fresh"]);
    assert!(state.error().is_none());
}

#[tokio::test]
async fn completion_after_teardown_is_discarded() {
    init_logging();
    let (generator, mut gates) = GatedGenerator::new(1);
    let generator = Arc::new(generator);
    let hub = EventHub::new();
    let gallery = GalleryRuntime::with_hub(Pipeline::new(generator.clone()), hub.clone());
    let updates = gallery.subscribe();

    gallery.mount();
    let_tasks_run().await;
    drop(gallery);
    assert_eq!(hub.listener_count(), 0);

    gates.remove(0).send(Ok(ideas(&["late"]))).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(*generator.settled_calls.lock().unwrap(), 1);
    assert!(updates.borrow().is_loading());
    assert!(updates.borrow().items().is_empty());
}

#[tokio::test]
async fn escape_subscription_lives_only_while_modal_is_open() {
    init_logging();
    let generator = ScriptedGenerator::new(Ok(ideas(&["a", "b"])));
    let hub = EventHub::new();
    let gallery = GalleryRuntime::with_hub(
        Pipeline::new(Arc::new(generator)).with_idea_count(2),
        hub.clone(),
    );
    let mut updates = gallery.subscribe();
    gallery.mount();
    settled(&mut updates).await;

    let base = hub.listener_count();

    gallery.handle(UiEvent::CardClicked { index: 1 });
    assert_eq!(
        gallery.snapshot().selected().map(|i| i.title.clone()),
        Some("Title b".to_string())
    );
    assert_eq!(hub.listener_count(), base + 1);

    gallery.handle(UiEvent::KeyPressed(Key::Escape));
    assert!(gallery.snapshot().selected().is_none());
    assert_eq!(hub.listener_count(), base);

    gallery.handle(UiEvent::CardKey {
        index: 0,
        key: Key::Space,
    });
    assert_eq!(hub.listener_count(), base + 1);
    gallery.handle(UiEvent::OverlayClicked);
    assert!(gallery.snapshot().selected().is_none());
    assert_eq!(hub.listener_count(), base);

    gallery.handle(UiEvent::CardKey {
        index: 0,
        key: Key::Enter,
    });
    gallery.handle(UiEvent::CloseClicked);
    assert!(gallery.snapshot().selected().is_none());
    assert_eq!(hub.listener_count(), base);
}

#[tokio::test]
async fn regenerate_button_is_inert_while_loading() {
    init_logging();
    let (generator, mut gates) = GatedGenerator::new(2);
    let gallery = GalleryRuntime::new(Pipeline::new(Arc::new(generator)));
    let mut updates = gallery.subscribe();

    gallery.mount();
    let_tasks_run().await;
    gallery.handle(UiEvent::RegenerateClicked);
    assert_eq!(gallery.snapshot().invocation(), 1);

    gates.remove(0).send(Ok(ideas(&["first"]))).unwrap();
    settled(&mut updates).await;

    gallery.handle(UiEvent::RegenerateClicked);
    let state = gallery.snapshot();
    assert_eq!(state.invocation(), 2);
    assert!(state.is_loading());
    assert!(state.items().is_empty());

    gates.remove(0).send(Ok(ideas(&["second"]))).unwrap();
    let state = settled(&mut updates).await;
    assert_eq!(titles(&state), vec!["Title second"]);
}
