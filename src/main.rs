use std::io::Read;
use std::sync::Arc;

use anyhow::Context;

use mailscore::config::PipelineConfig;
use mailscore::pipeline::{EmailPipeline, Outcome};
use mailscore::sentiment::WatsonNlu;
use mailscore::store::{DynamoRecordStore, S3BlobStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PipelineConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export MAILSCORE_ALLOWED_SENDERS=alice@example.com");
        eprintln!("  export MAILSCORE_SOURCE_BUCKET=... MAILSCORE_ATTACHMENT_BUCKET=...");
        eprintln!("  export MAILSCORE_RECORDS_TABLE=... MAILSCORE_NLU_URL=... MAILSCORE_NLU_API_KEY=...");
        std::process::exit(1);
    });

    // Collaborator clients, constructed once and injected.
    let aws = aws_config::load_from_env().await;
    let s3 = aws_sdk_s3::Client::new(&aws);
    let dynamo = aws_sdk_dynamodb::Client::new(&aws);

    let pipeline = EmailPipeline::new(
        Arc::new(S3BlobStore::new(s3.clone(), config.source_bucket.clone())),
        Arc::new(S3BlobStore::new(s3, config.attachment_bucket.clone())),
        Arc::new(DynamoRecordStore::new(dynamo, config.records_table.clone())),
        Arc::new(WatsonNlu::new(&config)),
        config.allowed_senders.clone(),
    );

    // Event JSON from the argv path, or stdin when invoked as a filter.
    let payload = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read event from stdin")?;
            buf
        }
    };

    // The outcome is informational only; a failed message must not fail
    // the invocation.
    match pipeline.handle_event(&payload).await {
        Outcome::Processed(record) => {
            println!("processed {} (score {:.3})", record.message_id, record.score);
        }
        Outcome::Discarded { message_id } => {
            println!("discarded {message_id}");
        }
        Outcome::Failed {
            message_id, stage, ..
        } => {
            println!(
                "failed {} at {}",
                message_id.as_deref().unwrap_or("<unknown>"),
                stage.label()
            );
        }
    }

    Ok(())
}
