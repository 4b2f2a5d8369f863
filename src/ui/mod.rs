//! Presentation: page rendering and UI event routing.
pub mod events;
pub mod view;

pub use events::{EventHub, Key, Subscription, UiEvent};
pub use view::render_page;
