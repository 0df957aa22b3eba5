use std::path::Path;

use serde::Serialize;

use mail_triage::classifier::{Classification, EmailClassifier, ModelLoader};
use mail_triage::config::ClassifierConfig;
use mail_triage::ingest;

/// One output line of a batch run.
#[derive(Serialize)]
struct BatchResult<'a> {
    email: &'a str,
    subject: &'a str,
    #[serde(flatten)]
    classification: Classification,
}

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

    let config = ClassifierConfig::from_env();

    eprintln!("📬 Mail Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Mode: {}",
        if config.use_statistical_model {
            "hybrid (statistical model + keyword rules)"
        } else {
            "keyword rules only"
        }
    );
    eprintln!("   Confidence threshold: {}\n", config.confidence_threshold);

    let loader = make_loader(&config);
    let engine = EmailClassifier::new(&config, loader)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [path] if !path.starts_with("--") => classify_batch(&engine, Path::new(path)).await,
        rest => {
            let (subject, message) = parse_pair_args(rest)?;
            let result = engine.classify(&subject, &message).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

async fn classify_batch(engine: &EmailClassifier, path: &Path) -> anyhow::Result<()> {
    let records = ingest::read_batch_file(path)?;
    eprintln!("   Batch: {} ({} records)\n", path.display(), records.len());

    for record in &records {
        let classification = engine.classify(&record.subject, &record.message).await;
        let line = BatchResult {
            email: &record.email,
            subject: &record.subject,
            classification,
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

/// Parse `--subject <s> --message <m>` argument pairs.
fn parse_pair_args(args: &[String]) -> anyhow::Result<(String, String)> {
    let mut subject = None;
    let mut message = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--subject" => subject = iter.next().cloned(),
            "--message" => message = iter.next().cloned(),
            other => anyhow::bail!("unknown argument: {other}\n{USAGE}"),
        }
    }

    match (subject, message) {
        (Some(s), Some(m)) => Ok((s, m)),
        _ => anyhow::bail!("{USAGE}"),
    }
}

const USAGE: &str = "usage:\n  \
    mail-triage <batch.txt>                      classify a sender|subject|message batch file\n  \
    mail-triage --subject <s> --message <m>      classify a single email";

#[cfg(feature = "onnx")]
fn make_loader(config: &ClassifierConfig) -> Box<dyn ModelLoader> {
    Box::new(mail_triage::classifier::model::OnnxLoader::new(
        config.primary_model_dir.clone(),
        config.fallback_model_dir.clone(),
        config.max_sequence_length,
    ))
}

#[cfg(not(feature = "onnx"))]
fn make_loader(_config: &ClassifierConfig) -> Box<dyn ModelLoader> {
    Box::new(mail_triage::classifier::NullLoader)
}
