use crate::gallery::{Effect, GenerationState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: GenerationState, msg: Msg) -> (GenerationState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => start(&mut state),
        Msg::RegenerateClicked => {
            if state.is_loading() {
                // The button is disabled while loading.
                Vec::new()
            } else {
                start(&mut state)
            }
        }
        Msg::GenerationSettled { invocation, result } => {
            if invocation != state.invocation() || !state.is_loading() {
                log::debug!(
                    "Discarding stale completion of invocation {} (current {})",
                    invocation,
                    state.invocation()
                );
                return (state, Vec::new());
            }
            match result {
                Ok(items) => {
                    log::info!("Invocation {} loaded {} items", invocation, items.len());
                    state.load(items);
                }
                Err(err) => {
                    log::error!("Invocation {} failed: {}", invocation, err);
                    state.fail();
                }
            }
            Vec::new()
        }
        Msg::CardActivated { index } => {
            match state.items().get(index).cloned() {
                Some(item) => state.select(item),
                None => log::debug!("Ignoring activation of unknown card {}", index),
            }
            Vec::new()
        }
        Msg::OverlayClicked | Msg::CloseClicked | Msg::EscapePressed => {
            state.close();
            Vec::new()
        }
    };

    (state, effects)
}

fn start(state: &mut GenerationState) -> Vec<Effect> {
    let invocation = state.begin_invocation();
    log::info!("Starting generation invocation {}", invocation);
    vec![Effect::StartGeneration { invocation }]
}
