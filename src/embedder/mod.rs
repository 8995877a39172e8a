//! Embedding providers.
//!
//! [`EmbeddingProvider`] is the seam between the pipeline and whichever
//! service turns text into vectors. [`openai::OpenAiEmbeddings`] talks to an
//! OpenAI-compatible endpoint; [`MockEmbeddingProvider`] produces
//! deterministic vectors for tests and offline demo runs.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiEmbeddings;

/// Errors raised by an embedding provider for one batch call.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Transport failure reaching the provider.
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("embedding provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    /// The provider returned a different number of vectors than inputs.
    #[error("provider returned {received} embeddings for {expected} inputs")]
    CountMismatch { expected: usize, received: usize },

    /// The supplied credential could not be used to build a request.
    #[error("invalid embedding credential")]
    InvalidCredential,
}

/// A service that embeds a batch of input strings.
///
/// Implementations must return exactly one vector per input, in submission
/// order; the pipeline's row alignment depends on it.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Deterministic provider that derives vectors from a hash of the input.
///
/// Identical text always yields an identical vector, so tests can assert on
/// alignment without network access.
#[derive(Clone, Debug, Default)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self { dimensions: 8 }
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions.max(1);
        self
    }

    fn hash_to_vec(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();
        (0..self.dimensions)
            .map(|i| {
                let bits = seed.rotate_left((i * 8) as u32) ^ ((i as u64) << 24);
                (bits as f32) / u64::MAX as f32
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(inputs.iter().map(|input| self.hash_to_vec(input)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_provider_is_deterministic() {
        let provider = MockEmbeddingProvider::new();
        let inputs = vec![
            "Hello world".to_string(),
            "Goodbye world".to_string(),
            "Hello world".to_string(),
        ];

        let first = provider.embed_batch(&inputs).await.unwrap();
        let second = provider.embed_batch(&inputs).await.unwrap();

        assert_eq!(first, second, "same inputs should produce same vectors");
        assert_eq!(first[0], first[2], "identical text, identical vector");
        assert_ne!(first[0], first[1], "different text, different vector");
    }

    #[tokio::test]
    async fn mock_provider_returns_one_vector_per_input() {
        let provider = MockEmbeddingProvider::new().with_dimensions(4);
        let inputs = vec!["a".to_string(), "b".to_string()];
        let vectors = provider.embed_batch(&inputs).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|v| v.len() == 4));
    }
}
