//! futuregen: a gallery of AI-generated future innovations.
//!
//! One invocation asks a text model for six structured ideas, generates one
//! image per idea concurrently, and merges both into ordered [`DisplayItem`]s.
//! The [`gallery`] state machine tracks loading, errors and the selected card,
//! [`ui`] renders it, and the optional [`server`] serves it over HTTP.

pub mod config;
pub mod error;
pub mod gallery;
pub mod genai;
pub mod logger;
pub mod models;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod server;
pub mod ui;

pub use config::{Config, GeminiConfig};
pub use error::{GenerationError, Result};
pub use gallery::{GalleryRuntime, GenerationState, Msg, Phase};
pub use genai::{GenAiClient, Generator, ImageClient, TextClient};
pub use models::*;
pub use pipeline::Pipeline;
