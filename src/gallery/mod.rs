//! Gallery state machine: pure transitions plus a tokio runtime that executes effects.
mod effect;
mod msg;
mod runtime;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use runtime::GalleryRuntime;
pub use state::{GenerationState, InvocationId, Phase, GENERIC_ERROR};
pub use update::update;
