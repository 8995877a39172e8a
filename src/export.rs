//! TSV table writer for the Embedding Projector.
//!
//! Produces two row-aligned tab-separated files: a headerless vectors table
//! (one column per dimension) and a metadata table with a `title date link`
//! header. Row index is the only join key between the two, so both tables
//! are rendered from the same paired rows and written atomically.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::types::{EmbeddedLink, ExportError, MetadataRecord};

const FIELD_DELIMITER: char = '\t';
const ROW_TERMINATOR: char = '\n';
const METADATA_HEADER: &str = "title\tdate\tlink";

fn render_vector_row(vector: &[f32], out: &mut String) {
    for (column, value) in vector.iter().enumerate() {
        if column > 0 {
            out.push(FIELD_DELIMITER);
        }
        out.push_str(&value.to_string());
    }
    out.push(ROW_TERMINATOR);
}

fn render_metadata_row(record: &MetadataRecord, out: &mut String) {
    out.push_str(&record.title);
    out.push(FIELD_DELIMITER);
    out.push_str(&record.date);
    out.push(FIELD_DELIMITER);
    out.push_str(&record.link);
    out.push(ROW_TERMINATOR);
}

fn render_tables(rows: &[EmbeddedLink]) -> (String, String) {
    let mut vectors = String::new();
    let mut metadata = String::new();
    metadata.push_str(METADATA_HEADER);
    metadata.push(ROW_TERMINATOR);

    for row in rows {
        render_vector_row(&row.vector, &mut vectors);
        render_metadata_row(&row.metadata, &mut metadata);
    }

    (vectors, metadata)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| std::ffi::OsString::from("table"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `contents` to `path` via a temporary sibling and rename, so a
/// failed write never leaves a half-written table behind.
async fn write_atomic(path: &Path, contents: &str) -> Result<(), ExportError> {
    let temp = temp_sibling(path);
    fs::write(&temp, contents).await?;
    fs::rename(&temp, path).await?;
    Ok(())
}

/// Writes the paired rows as two row-aligned TSV tables.
///
/// Row *i* of the vectors table and row *i* of the metadata table describe
/// the same source link; the paired input makes that alignment structural.
pub async fn write_tables(
    rows: &[EmbeddedLink],
    vectors_path: impl AsRef<Path>,
    metadata_path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let (vectors, metadata) = render_tables(rows);
    write_atomic(vectors_path.as_ref(), &vectors).await?;
    write_atomic(metadata_path.as_ref(), &metadata).await?;
    tracing::info!(
        rows = rows.len(),
        vectors = %vectors_path.as_ref().display(),
        metadata = %metadata_path.as_ref().display(),
        "wrote embedding tables"
    );
    Ok(())
}

/// Column-oriented entry point for callers holding two separate sequences.
///
/// Checks the row counts before writing anything and fails with
/// [`ExportError::AlignmentMismatch`] when they diverge.
pub async fn write_split_tables(
    vectors: &[Vec<f32>],
    metadata: &[MetadataRecord],
    vectors_path: impl AsRef<Path>,
    metadata_path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    if vectors.len() != metadata.len() {
        return Err(ExportError::AlignmentMismatch {
            vectors: vectors.len(),
            metadata: metadata.len(),
        });
    }

    let rows: Vec<EmbeddedLink> = vectors
        .iter()
        .zip(metadata)
        .map(|(vector, record)| EmbeddedLink {
            vector: vector.clone(),
            metadata: record.clone(),
        })
        .collect();
    write_tables(&rows, vectors_path, metadata_path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(vector: Vec<f32>, title: &str) -> EmbeddedLink {
        EmbeddedLink {
            vector,
            metadata: MetadataRecord {
                title: title.to_string(),
                date: "2021".to_string(),
                link: "http://x".to_string(),
            },
        }
    }

    #[test]
    fn vectors_table_has_no_header() {
        let (vectors, _) = render_tables(&[row(vec![0.5, 1.0], "a")]);
        assert_eq!(vectors, "0.5\t1\n");
    }

    #[test]
    fn metadata_table_starts_with_the_header_row() {
        let (_, metadata) = render_tables(&[row(vec![0.5], "a")]);
        assert_eq!(metadata, "title\tdate\tlink\na\t2021\thttp://x\n");
    }

    #[test]
    fn empty_rows_produce_empty_vectors_and_header_only_metadata() {
        let (vectors, metadata) = render_tables(&[]);
        assert!(vectors.is_empty());
        assert_eq!(metadata, "title\tdate\tlink\n");
    }

    #[test]
    fn tables_stay_row_aligned() {
        let rows = vec![row(vec![1.0], "first"), row(vec![2.0], "second")];
        let (vectors, metadata) = render_tables(&rows);
        let vector_rows: Vec<&str> = vectors.lines().collect();
        let metadata_rows: Vec<&str> = metadata.lines().skip(1).collect();
        assert_eq!(vector_rows.len(), metadata_rows.len());
        assert!(metadata_rows[0].starts_with("first"));
        assert!(metadata_rows[1].starts_with("second"));
    }

    #[tokio::test]
    async fn write_tables_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let vectors_path = dir.path().join("vectors.tsv");
        let metadata_path = dir.path().join("metadata.tsv");

        write_tables(&[row(vec![0.1, 0.2], "a")], &vectors_path, &metadata_path)
            .await
            .unwrap();

        assert!(vectors_path.exists());
        assert!(metadata_path.exists());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn split_write_rejects_mismatched_row_counts() {
        let dir = tempdir().unwrap();
        let vectors_path = dir.path().join("vectors.tsv");
        let metadata_path = dir.path().join("metadata.tsv");

        let err = write_split_tables(
            &[vec![0.1], vec![0.2]],
            &[MetadataRecord {
                title: "only one".into(),
                date: String::new(),
                link: "http://x".into(),
            }],
            &vectors_path,
            &metadata_path,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ExportError::AlignmentMismatch {
                vectors: 2,
                metadata: 1
            }
        ));
        assert!(!vectors_path.exists(), "nothing written on mismatch");
        assert!(!metadata_path.exists());
    }
}
