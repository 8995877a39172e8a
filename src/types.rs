//! Core record types and the crate-level error enum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embedder::EmbeddingError;

/// One saved-bookmark entry as returned by the remote link source.
///
/// Only `link` is guaranteed to be present on the wire; every other field
/// defaults to an empty string. Duplicates are passed through unchanged —
/// the pipeline enforces no uniqueness invariant.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LinkRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    pub link: String,
    #[serde(default, rename = "createdDate")]
    pub created_date: String,
}

/// Human-readable row describing one embedded link.
///
/// The title is sanitized for single-line tabular display; `date` and `link`
/// carry the source fields verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetadataRecord {
    pub title: String,
    pub date: String,
    pub link: String,
}

impl MetadataRecord {
    /// Builds the metadata row for a link, sanitizing the title.
    pub fn from_link(link: &LinkRecord) -> Self {
        Self {
            title: crate::prepare::sanitize(&link.title),
            date: link.created_date.clone(),
            link: link.link.clone(),
        }
    }
}

/// One embedded link: the vector paired with the metadata describing it.
///
/// Keeping the pair in a single row makes the row-alignment guarantee
/// structural; the split into two column-oriented tables happens only in
/// [`crate::export`].
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddedLink {
    pub vector: Vec<f32>,
    pub metadata: MetadataRecord,
}

/// Errors surfaced by the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The link source returned a non-success status.
    #[error("link source responded with status {status}")]
    SourceStatus { status: u16 },

    /// Transport-level failure talking to the link source.
    #[error("link source request failed: {0}")]
    SourceTransport(#[source] reqwest::Error),

    /// The supplied user identifier is not a numeric id.
    #[error("invalid user identifier: {0:?}")]
    InvalidUserId(String),

    /// A batch embedding call failed; the whole run is aborted.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// The vector and metadata sequences diverged in length.
    #[error("row alignment violated: {vectors} vectors vs {metadata} metadata rows")]
    AlignmentMismatch { vectors: usize, metadata: usize },

    /// Filesystem failure while writing an output table.
    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized into an embedding input.
    #[error("failed to serialize embedding input: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_record_defaults_optional_fields() {
        let record: LinkRecord =
            serde_json::from_str(r#"{"link": "https://example.com"}"#).unwrap();
        assert_eq!(record.link, "https://example.com");
        assert!(record.title.is_empty());
        assert!(record.snippet.is_empty());
        assert!(record.created_date.is_empty());
    }

    #[test]
    fn link_record_reads_wire_field_names() {
        let record: LinkRecord = serde_json::from_str(
            r#"{"title": "Foo", "snippet": "bar", "link": "http://x", "createdDate": "2021"}"#,
        )
        .unwrap();
        assert_eq!(record.title, "Foo");
        assert_eq!(record.created_date, "2021");
    }

    #[test]
    fn link_record_without_link_is_rejected() {
        let result = serde_json::from_str::<LinkRecord>(r#"{"title": "no url"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn metadata_record_sanitizes_title_only() {
        let link = LinkRecord {
            title: "line\none".into(),
            snippet: "raw\nsnippet".into(),
            link: "http://x".into(),
            created_date: "2021-01-01".into(),
        };
        let meta = MetadataRecord::from_link(&link);
        assert_eq!(meta.title, "line one");
        assert_eq!(meta.date, "2021-01-01");
        assert_eq!(meta.link, "http://x");
    }
}
