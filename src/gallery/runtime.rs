use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;

use crate::{
    gallery::{update, Effect, GenerationState, Msg},
    genai::Generator,
    pipeline::Pipeline,
    ui::events::{escape_binding, page_bindings, EventHub, Subscription, UiEvent},
};

type Store = watch::Sender<GenerationState>;

/// Owns the gallery state and runs pipeline invocations on tokio.
///
/// Spawned invocations only hold a weak reference to the state, so one that
/// finishes after the runtime is dropped is discarded. Requests already in
/// flight are not cancelled.
pub struct GalleryRuntime<G: Generator + 'static> {
    store: Arc<Store>,
    pipeline: Arc<Pipeline<G>>,
    hub: EventHub,
    escape: Mutex<Option<Subscription>>,
    _bindings: Vec<Subscription>,
}

impl<G: Generator + 'static> GalleryRuntime<G> {
    pub fn new(pipeline: Pipeline<G>) -> Self {
        Self::with_hub(pipeline, EventHub::new())
    }

    pub fn with_hub(pipeline: Pipeline<G>, hub: EventHub) -> Self {
        let (store, _) = watch::channel(GenerationState::new());
        let bindings = page_bindings(&hub);
        Self {
            store: Arc::new(store),
            pipeline: Arc::new(pipeline),
            hub,
            escape: Mutex::new(None),
            _bindings: bindings,
        }
    }

    /// Starts the initial invocation. Must be called inside a tokio runtime.
    pub fn mount(&self) {
        self.dispatch(Msg::Mounted);
    }

    pub fn snapshot(&self) -> GenerationState {
        self.store.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.store.subscribe()
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// Routes a UI event through the hub and applies whatever it maps to.
    pub fn handle(&self, event: UiEvent) {
        for msg in self.hub.dispatch(&event) {
            self.dispatch(msg);
        }
    }

    pub fn dispatch(&self, msg: Msg) {
        let effects = apply(&self.store, msg);
        self.sync_escape_binding();
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn sync_escape_binding(&self) {
        let modal_open = self.store.borrow().selected().is_some();
        let Ok(mut escape) = self.escape.lock() else {
            return;
        };
        match (modal_open, escape.is_some()) {
            (true, false) => *escape = Some(escape_binding(&self.hub)),
            // Dropping the subscription releases the listener.
            (false, true) => *escape = None,
            _ => {}
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::StartGeneration { invocation } => {
                let pipeline = self.pipeline.clone();
                let store: Weak<Store> = Arc::downgrade(&self.store);
                tokio::spawn(async move {
                    let result = pipeline.run().await;
                    match store.upgrade() {
                        Some(store) => {
                            apply(&store, Msg::GenerationSettled { invocation, result });
                        }
                        None => log::debug!(
                            "Gallery torn down, discarding invocation {}",
                            invocation
                        ),
                    }
                });
            }
        }
    }
}

fn apply(store: &Store, msg: Msg) -> Vec<Effect> {
    let mut effects = Vec::new();
    store.send_modify(|state| {
        let (next, fx) = update(std::mem::take(state), msg);
        *state = next;
        effects = fx;
    });
    effects
}
