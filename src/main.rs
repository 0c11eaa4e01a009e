use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use templie::{
    DocumentParser, DocumentResult, ExtractionConfig, ExtractionEngine, FileLexicon, Lexicon,
};

/// Batch relation-template extraction over pre-annotated documents.
#[derive(Parser, Debug)]
#[command(name = "templie", version, about)]
struct Args {
    /// Annotated document (.json / .json.gz) or a directory of them.
    input: PathBuf,

    /// Directory the per-document extraction results are written to.
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Relation configuration YAML; defaults to the built-in relations.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lexical resource JSON (synonyms/holonyms/meronyms/verb synonyms).
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExtractionConfig::from_yaml_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ExtractionConfig::default(),
    };

    let lexicon: Option<Arc<dyn Lexicon>> = match &args.lexicon {
        Some(path) => Some(Arc::new(
            FileLexicon::from_path(path)
                .with_context(|| format!("loading lexicon from {}", path.display()))?,
        )),
        None => {
            log::warn!("no lexicon given: verb filtering degrades to exact seed matching");
            None
        }
    };

    let relation_order = config.relation_order();
    let engine = ExtractionEngine::new(config, lexicon)?;
    let mut docs = DocumentParser::load_path(&args.input)
        .with_context(|| format!("loading documents from {}", args.input.display()))?;
    log::info!("loaded {} document(s)", docs.len());

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    let mut written = 0usize;
    for doc in &mut docs {
        if let Err(err) = engine.process_document(doc) {
            // A failed document produces no partial output.
            log::error!("document '{}' failed: {}", doc.name, err);
            continue;
        }
        let result = DocumentResult::from_document(doc, &relation_order);
        let out_path = args.output.join(format!("{}.json", output_stem(&doc.name)));
        fs::write(&out_path, result.to_json(args.pretty)?)
            .with_context(|| format!("writing {}", out_path.display()))?;
        log::info!(
            "{}: {} template(s) -> {}",
            doc.name,
            result.template_count(),
            out_path.display()
        );
        written += 1;
    }
    log::info!("wrote {}/{} result file(s)", written, docs.len());
    Ok(())
}

/// File stem for a document's output, dropping a trailing `.txt`.
fn output_stem(name: &str) -> String {
    name.strip_suffix(".txt").unwrap_or(name).to_string()
}
