//! Text handling shared across the pipeline.

pub mod direction;
pub mod shaping;
pub mod tokenize;

pub use direction::{VisualText, to_visual, to_visual_by_line};
pub use shaping::reshape;
pub use tokenize::{paragraphs, token_count, tokenize};
