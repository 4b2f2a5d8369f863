use serde::Serialize;

use crate::models::DisplayItem;

/// Sequence number of a pipeline invocation. `0` means none has started.
pub type InvocationId = u64;

/// The only failure text the end user ever sees.
pub const GENERIC_ERROR: &str = "Failed to fetch innovations from the future. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Loading,
    Loaded,
    Failed,
}

/// Everything the view renders.
///
/// `items` is non-empty only when the latest invocation loaded successfully.
/// `selected` is a copy of an item, so it may outlive a regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationState {
    items: Vec<DisplayItem>,
    is_loading: bool,
    error: Option<String>,
    selected: Option<DisplayItem>,
    invocation: InvocationId,
}

impl GenerationState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            error: None,
            selected: None,
            invocation: 0,
        }
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&DisplayItem> {
        self.selected.as_ref()
    }

    pub fn invocation(&self) -> InvocationId {
        self.invocation
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Loaded
        }
    }

    /// Clears results and hands out the id of the new invocation.
    pub(crate) fn begin_invocation(&mut self) -> InvocationId {
        self.invocation += 1;
        self.items.clear();
        self.error = None;
        self.is_loading = true;
        self.invocation
    }

    pub(crate) fn load(&mut self, items: Vec<DisplayItem>) {
        self.items = items;
        self.error = None;
        self.is_loading = false;
    }

    pub(crate) fn fail(&mut self) {
        self.items.clear();
        self.error = Some(GENERIC_ERROR.to_string());
        self.is_loading = false;
    }

    pub(crate) fn select(&mut self, item: DisplayItem) {
        self.selected = Some(item);
    }

    /// Returns whether a modal was open.
    pub(crate) fn close(&mut self) -> bool {
        self.selected.take().is_some()
    }
}

impl Default for GenerationState {
    fn default() -> Self {
        Self::new()
    }
}
