//! UI event routing through explicit, drop-released subscriptions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::gallery::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other(String),
}

impl Key {
    /// Accepts DOM `KeyboardEvent.key` values and their URL-friendly spellings.
    pub fn parse(name: &str) -> Self {
        match name {
            "Enter" | "enter" => Key::Enter,
            " " | "Space" | "space" | "Spacebar" => Key::Space,
            "Escape" | "escape" | "Esc" | "esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn activates(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    CardClicked { index: usize },
    CardKey { index: usize, key: Key },
    OverlayClicked,
    CloseClicked,
    KeyPressed(Key),
    RegenerateClicked,
}

type Listener = Box<dyn Fn(&UiEvent) -> Option<Msg> + Send + Sync>;

struct HubInner {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

/// Fan-out point for UI events. Listeners translate events into [`Msg`]s.
#[derive(Clone)]
pub struct EventHub {
    inner: Arc<HubInner>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HubInner {
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Registers `listener` until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&UiEvent) -> Option<Msg> + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.inner.listeners.lock() {
            listeners.push((id, Box::new(listener)));
        }
        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Messages produced by every listener, in subscription order.
    pub fn dispatch(&self, event: &UiEvent) -> Vec<Msg> {
        match self.inner.listeners.lock() {
            Ok(listeners) => listeners
                .iter()
                .filter_map(|(_, listener)| listener(event))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// A live listener registration. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<HubInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            if let Ok(mut listeners) = hub.listeners.lock() {
                listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Permanent bindings of the gallery page: cards, modal buttons, regenerate.
pub fn page_bindings(hub: &EventHub) -> Vec<Subscription> {
    vec![
        hub.subscribe(|event| match event {
            UiEvent::CardClicked { index } => Some(Msg::CardActivated { index: *index }),
            UiEvent::CardKey { index, key } if key.activates() => {
                Some(Msg::CardActivated { index: *index })
            }
            _ => None,
        }),
        hub.subscribe(|event| match event {
            UiEvent::OverlayClicked => Some(Msg::OverlayClicked),
            UiEvent::CloseClicked => Some(Msg::CloseClicked),
            _ => None,
        }),
        hub.subscribe(|event| match event {
            UiEvent::RegenerateClicked => Some(Msg::RegenerateClicked),
            _ => None,
        }),
    ]
}

/// Escape listener held only while the modal is open.
pub fn escape_binding(hub: &EventHub) -> Subscription {
    hub.subscribe(|event| match event {
        UiEvent::KeyPressed(Key::Escape) => Some(Msg::EscapePressed),
        _ => None,
    })
}
