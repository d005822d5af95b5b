use std::collections::HashMap;
use anyhow::{bail, Result};
pub use tiktoken_rs::{get_bpe_from_model, CoreBPE};
use lazy_static::lazy_static;

use crate::backend::ChatMsg;
use crate::utils::token::CountToken;

const TOKENS_PER_MESSAGE: usize = 3;

lazy_static! {
    /// const map from model name to context-window size.
    /// TODO: when `LazyCell` is stabilized, use that instead
    pub static ref MODEL_TO_MAX_TOKENS: HashMap<&'static str, usize> = HashMap::from([
        ("gpt-3.5-turbo", 4096),
        ("gpt-3.5-turbo-16k", 16384),
        ("gpt-4", 8192),
        ("gpt-4-32k", 32768),
        ("gpt-4-turbo", 128_000),
    ]);
}

/// Context-window size of `model`, if known.
pub fn max_tokens(model: &str) -> Option<usize> {
    MODEL_TO_MAX_TOKENS.get(model).copied()
}

/// Counter using the Tiktoken tokenizer.
#[derive(Clone)]
#[readonly::make]
pub struct Tiktoken {
    /// The model this counter was built for. read-only.
    pub model: String,
    /// The tokenizer. read-only.
    pub bpe: CoreBPE,
}

impl Tiktoken {
    /// Create a new Tiktoken counter. The tokenizer is picked by model family, so
    /// dated variants like `gpt-4-0613` work; models outside the GPT families fail.
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        let family = if model.starts_with("gpt-4-32k") {
            "gpt-4-32k"
        } else if model.starts_with("gpt-4") {
            "gpt-4"
        } else if model.starts_with("gpt-3.5") {
            "gpt-3.5-turbo"
        } else {
            bail!("no tokenizer known for model {}", model)
        };
        get_bpe_from_model(family).map(|bpe| Tiktoken { model, bpe })
    }

    /// Tokens one chat message contributes to a request, per-message framing
    /// included. Following the accounting from the OpenAI cookbook.
    pub fn count_msg_token(&self, msg: &ChatMsg) -> usize {
        self.count_token(&msg.content) + TOKENS_PER_MESSAGE
    }

    /// Prompt-side token count of a whole message sequence.
    pub fn count_request_tokens(&self, messages: &[ChatMsg]) -> usize {
        messages.iter().map(|msg| self.count_msg_token(msg)).sum()
    }
}

impl CountToken for Tiktoken {
    fn count_token(&self, string: &str) -> usize {
        self.bpe.encode_with_special_tokens(string).len()
    }
}
