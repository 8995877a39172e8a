use std::env;
use std::path::PathBuf;
use std::time::Instant;

use reqwest::Client;
use tracing_subscriber::FmtSubscriber;

use linksmith::embedder::{EmbeddingProvider, MockEmbeddingProvider, OpenAiEmbeddings};
use linksmith::{CuriusSource, ExportConfig, ExportError, embed_links, parse_user_id, write_tables};

#[tokio::main]
async fn main() -> Result<(), ExportError> {
    init_tracing();
    dotenvy::dotenv().ok();

    let user_id = env::var("CURIUS_USER_ID").unwrap_or_default();
    let user_id = parse_user_id(&user_id)?;

    let vectors_path = env::var("VECTORS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("vectors.tsv"));
    let metadata_path = env::var("METADATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("metadata.tsv"));

    let config = ExportConfig::default();

    let client = Client::builder()
        .user_agent("linksmith-export/0.1")
        .timeout(config.request_timeout)
        .use_rustls_tls()
        .build()
        .map_err(ExportError::SourceTransport)?;

    let provider: Box<dyn EmbeddingProvider> = match env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Box::new(OpenAiEmbeddings::new(
            &key,
            config.model.clone(),
            config.request_timeout,
        )?),
        _ => {
            println!("OPENAI_API_KEY not set, using the deterministic mock provider");
            Box::new(MockEmbeddingProvider::new())
        }
    };

    let start = Instant::now();

    let source = CuriusSource::new(client);
    let links = source.fetch(user_id).await?;
    if links.is_empty() {
        println!("No links found for user {user_id}, nothing to export");
        return Ok(());
    }
    println!("Fetched {} links", links.len());

    let rows = embed_links(provider.as_ref(), &links, &config).await?;
    write_tables(&rows, &vectors_path, &metadata_path).await?;

    println!("\n✅ Export complete!");
    println!("  links fetched : {}", links.len());
    println!("  rows written  : {}", rows.len());
    println!("  vectors table : {}", vectors_path.display());
    println!("  metadata table: {}", metadata_path.display());
    println!("  duration      : {:.2?}", start.elapsed());

    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
