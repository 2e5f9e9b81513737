pub mod aggregator;

pub use aggregator::{aggregate, dominant_language};
