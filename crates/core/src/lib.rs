//! Core logic for turning Tumblr post exports into chat fine-tuning data.
//!
//! The pipeline pulls original post bodies out of text exports, flattens their
//! markup to plain text, wraps each into a fixed system/user/assistant record,
//! writes the records as JSONL and estimates how many tokens training on them
//! will consume.

/// Trait for tokenization operations.
///
/// Implementors provide token counting. For estimates that should match a
/// hosted model, use [`TiktokenTokenizer`].
pub trait Tokenizer {
    /// Count the number of tokens in the given text.
    fn count_tokens(&self, text: &str) -> usize;
}

// Blanket implementation for references to Tokenizers
impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn count_tokens(&self, text: &str) -> usize {
        (*self).count_tokens(text)
    }
}

pub mod accounting;
pub mod config;
mod error;
pub mod markup;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod segment;

pub use accounting::{count_record_tokens, TiktokenTokenizer, TOKENS_PER_MESSAGE};
pub use config::{Config, TrainingConfig};
pub use error::{Error, Result};
pub use markup::{extract_text, NOISE_CLASSES};
pub use pipeline::{discover_export_files, run, write_corpus, CorpusStats, ExportPosts};
pub use record::{build_record, ChatMessage, Prompts, Role, TrainingRecord};
pub use report::{CostEstimate, PRICE_PER_MILLION_TOKENS};
pub use segment::{count_post_headers, extract_posts, normalize_newlines};
