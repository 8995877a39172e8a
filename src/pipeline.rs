//! Batch embedding pipeline.
//!
//! Partitions link records into contiguous batches, submits each batch to the
//! embedding provider, and pairs every returned vector with the metadata row
//! describing the same record. The aggregation is a fold over ordered
//! batches: any provider failure short-circuits and the partial accumulator
//! is discarded, so callers never observe a partially embedded collection.

use serde::Serialize;

use crate::config::ExportConfig;
use crate::embedder::EmbeddingProvider;
use crate::prepare::truncate_to_budget;
use crate::types::{EmbeddedLink, ExportError, LinkRecord, MetadataRecord};

/// The `{title, snippet}` object serialized as a single embedding input.
#[derive(Serialize)]
struct EmbeddingInput<'a> {
    title: &'a str,
    snippet: &'a str,
}

/// Serializes one record into the text the provider will embed.
///
/// The snippet is truncated to the configured token budget; the title is sent
/// raw — sanitization is a display concern and applies only to metadata.
pub fn embedding_input(link: &LinkRecord, config: &ExportConfig) -> Result<String, ExportError> {
    let input = EmbeddingInput {
        title: &link.title,
        snippet: truncate_to_budget(
            &link.snippet,
            config.max_input_tokens,
            config.avg_chars_per_token,
        ),
    };
    Ok(serde_json::to_string(&input)?)
}

/// Embeds `links` in batches, returning one paired row per record.
///
/// Rows preserve input order across batch boundaries: batch *k*'s records
/// always precede batch *k+1*'s. An empty input yields an empty result
/// without calling the provider. All-or-nothing: an error on any batch
/// aborts the whole run.
pub async fn embed_links(
    provider: &dyn EmbeddingProvider,
    links: &[LinkRecord],
    config: &ExportConfig,
) -> Result<Vec<EmbeddedLink>, ExportError> {
    if links.is_empty() {
        return Ok(Vec::new());
    }

    let total_batches = links.len().div_ceil(config.batch_size);
    let mut rows = Vec::with_capacity(links.len());

    for (batch_index, batch) in links.chunks(config.batch_size).enumerate() {
        let inputs = batch
            .iter()
            .map(|link| embedding_input(link, config))
            .collect::<Result<Vec<_>, _>>()?;

        let vectors = provider.embed_batch(&inputs).await?;
        if vectors.len() != batch.len() {
            return Err(ExportError::AlignmentMismatch {
                vectors: vectors.len(),
                metadata: batch.len(),
            });
        }

        for (link, vector) in batch.iter().zip(vectors) {
            rows.push(EmbeddedLink {
                vector,
                metadata: MetadataRecord::from_link(link),
            });
        }

        tracing::info!(
            batch = batch_index + 1,
            total_batches,
            records = batch.len(),
            "embedded batch"
        );
    }

    Ok(rows)
}
