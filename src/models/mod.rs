pub mod common;
pub mod idea;
pub mod image;
pub mod text;

pub use common::*;
pub use idea::*;
pub use image::*;
pub use text::*;
