use crate::{error::GenerationError, gallery::InvocationId, models::DisplayItem};

#[derive(Debug)]
pub enum Msg {
    /// The gallery was (re)mounted; always starts a fresh invocation.
    Mounted,
    /// User pressed "Generate New Future". Ignored while loading.
    RegenerateClicked,
    /// A pipeline invocation finished.
    GenerationSettled {
        invocation: InvocationId,
        result: Result<Vec<DisplayItem>, GenerationError>,
    },
    /// A card was clicked or activated from the keyboard.
    CardActivated { index: usize },
    OverlayClicked,
    CloseClicked,
    EscapePressed,
}
