use serde::{Deserialize, Serialize};

/// One raw concept as returned by the text model.
///
/// Every field is required; a missing or non-string field fails the whole
/// batch at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub title: String,
    pub description: String,
    pub image_prompt: String,
}

/// The renderable unit: an [`Idea`] whose prompt has been replaced by an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub title: String,
    pub description: String,
    /// A `data:` URI, embeddable directly in an `<img src>`.
    pub image_url: String,
}

impl DisplayItem {
    pub fn from_idea(idea: Idea, image_url: String) -> Self {
        Self {
            title: idea.title,
            description: idea.description,
            image_url,
        }
    }
}
