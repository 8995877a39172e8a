//! Pipeline configuration.

use std::time::Duration;

/// Knobs for a single export run.
///
/// Passed explicitly into the pipeline entry points so tests can vary limits
/// without touching shared state.
#[derive(Clone, Debug)]
pub struct ExportConfig {
    /// Embedding model identifier sent to the provider.
    pub model: String,
    /// Token budget of the embedding model's input.
    pub max_input_tokens: usize,
    /// Tuned estimate of characters per token used by the truncation budget.
    pub avg_chars_per_token: f32,
    /// Maximum number of records submitted in one provider request.
    pub batch_size: usize,
    /// Timeout applied to each outbound HTTP request.
    pub request_timeout: Duration,
}

impl ExportConfig {
    pub const DEFAULT_MODEL: &str = "text-embedding-3-small";
    pub const DEFAULT_MAX_INPUT_TOKENS: usize = 8192;
    pub const DEFAULT_AVG_CHARS_PER_TOKEN: f32 = 2.5;
    pub const DEFAULT_BATCH_SIZE: usize = 500;

    /// Character budget for a single embedding input, derived from the token
    /// budget and the characters-per-token estimate.
    pub fn char_budget(&self) -> usize {
        (self.max_input_tokens as f32 * self.avg_chars_per_token) as usize
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = if batch_size == 0 {
            Self::DEFAULT_BATCH_SIZE
        } else {
            batch_size
        };
        self
    }

    #[must_use]
    pub fn with_max_input_tokens(mut self, max_input_tokens: usize) -> Self {
        self.max_input_tokens = max_input_tokens;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            max_input_tokens: Self::DEFAULT_MAX_INPUT_TOKENS,
            avg_chars_per_token: Self::DEFAULT_AVG_CHARS_PER_TOKEN,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            request_timeout: Duration::from_secs(30),
        }
    }
}
