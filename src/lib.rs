pub mod types;
pub mod catalog;
pub mod model;
pub mod client;
pub mod parser;
pub mod history;
pub mod pipeline;

pub use types::*;
pub use catalog::EmojiCatalog;
pub use model::{CommentaryModel, MockModel};
pub use client::{ChatCompletionClient, GeneratorConfig};
pub use parser::parse_commentary;
pub use history::{History, MAX_ENTRIES};
pub use pipeline::{CommentaryPipeline, PipelineState, DEFAULT_PROMPT};
