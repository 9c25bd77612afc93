//! Token accounting for chat fine-tuning records.
//!
//! # Approximation Warning
//!
//! The chat framing overhead used here (3 tokens per message plus 3 for the
//! reply priming `<|start|>assistant<|message|>`) follows the OpenAI cookbook
//! recipe for chat models. It is not a replica of any model's actual chat
//! template, so totals are estimates and should be reported as such.

use tiktoken_rs::CoreBPE;

use crate::record::TrainingRecord;
use crate::{Error, Result, Tokenizer};

/// Framing tokens charged per message, and once more for reply priming.
pub const TOKENS_PER_MESSAGE: usize = 3;

/// BPE tokenizer matching the encoding a model was trained with.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Resolve the encoding used by `model_name` (e.g. `gpt-4o-mini`).
    pub fn for_model(model_name: &str) -> Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model_name).map_err(|e| Error::UnknownModel {
            model: model_name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { bpe })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        // Special-token spellings inside posts are ordinary text.
        self.bpe.encode_ordinary(text).len()
    }
}

/// Estimate the tokens a record costs, framing overhead included.
///
/// Only message contents are encoded; role names are covered by the
/// per-message overhead.
pub fn count_record_tokens<T>(record: &TrainingRecord, tokenizer: &T) -> usize
where
    T: Tokenizer + ?Sized,
{
    let framing = TOKENS_PER_MESSAGE * (record.messages.len() + 1);
    record
        .messages
        .iter()
        .map(|message| tokenizer.count_tokens(&message.content))
        .sum::<usize>()
        + framing
}
