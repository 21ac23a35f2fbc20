mod engine;
mod plan;
mod sink;

pub use engine::QuizEngine;
pub use plan::shuffled_order;
pub use sink::{ProgressChannel, ProgressSink};
