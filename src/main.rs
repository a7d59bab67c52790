use anyhow::Context;
use clap::{Parser, Subcommand};
use dedupx::{Comparators, CrfEditDistance, DataModel};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Field types, blocking predicates and comparators for entity resolution
#[derive(Parser, Debug)]
#[command(name = "dedupx")]
#[command(about = "Declare record fields and inspect their predicates and comparators", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// JSON file with CRF edit distance weights, replacing the built-in model
    #[arg(long, global = true)]
    crf_model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Declare every field and print a JSON summary
    Describe {
        /// JSON list of field definitions
        fields: PathBuf,
    },
    /// Score two values with a field's comparator
    Compare {
        /// JSON list of field definitions
        fields: PathBuf,
        /// Field alias
        alias: String,
        a: String,
        b: String,
    },
}

fn load_comparators(crf_model: Option<&PathBuf>) -> anyhow::Result<Comparators> {
    let Some(path) = crf_model else {
        return Ok(Comparators::new());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading CRF model {:?}", path))?;
    let crf = CrfEditDistance::from_json(&json)
        .with_context(|| format!("loading CRF model {:?}", path))?;
    info!("Loaded CRF model from {:?}", path);
    Ok(Comparators::with_crf(crf))
}

fn load_model(path: &PathBuf, comparators: &Comparators) -> anyhow::Result<DataModel> {
    DataModel::from_path(path, comparators)
        .with_context(|| format!("loading field definitions from {:?}", path))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries JSON output only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting DedupX v{}", env!("CARGO_PKG_VERSION"));

    let comparators = load_comparators(args.crf_model.as_ref())?;

    match args.command {
        Command::Describe { fields } => {
            let model = load_model(&fields, &comparators)?;
            println!("{}", serde_json::to_string_pretty(&model.summaries())?);
        }
        Command::Compare {
            fields,
            alias,
            a,
            b,
        } => {
            let model = load_model(&fields, &comparators)?;
            let field = model
                .field(&alias)
                .with_context(|| format!("no field with alias '{}'", alias))?;
            let score = field.compare(&a, &b);
            info!("Compared with {} comparator", field.comparator().kind());
            println!(
                "{}",
                serde_json::json!({
                    "alias": alias,
                    "comparator": field.comparator().kind(),
                    "score": if score.is_nan() { None } else { Some(score) },
                })
            );
        }
    }

    Ok(())
}
