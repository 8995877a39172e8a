//! ```text
//! Remote link source ──► source::CuriusSource::fetch ──► Vec<LinkRecord>
//!                                                          │
//!                    prepare::{truncate_to_budget, sanitize}│ (per record)
//!                                                          ▼
//! Vec<LinkRecord> ──► pipeline::embed_links ──► Vec<EmbeddedLink>
//!                              │                    (vector + metadata,
//!                              │                     batched provider calls)
//!                              ▼
//! Vec<EmbeddedLink> ──► export::write_tables ──► vectors.tsv + metadata.tsv
//! ```
//!
//! The pipeline is a single forward pass: fetch once, embed in contiguous
//! batches, write two row-aligned TSV tables for the Embedding Projector.
//! Vectors and metadata travel as paired rows end to end, so row *i* of both
//! outputs always describes the same saved link.

pub mod config;
pub mod embedder;
pub mod export;
pub mod pipeline;
pub mod prepare;
pub mod source;
pub mod types;

pub use config::ExportConfig;
pub use embedder::{EmbeddingProvider, MockEmbeddingProvider, OpenAiEmbeddings};
pub use export::{write_split_tables, write_tables};
pub use pipeline::embed_links;
pub use source::{CuriusSource, parse_user_id};
pub use types::{EmbeddedLink, ExportError, LinkRecord, MetadataRecord};
