use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nlquery::{
    compile_program, parser, CompiledProgram, DatasetSnapshot, EngineConfig, InteractiveProgram,
    InteractiveRequest, Trainset,
};

mod output;

#[derive(Parser)]
#[command(name = "nlquery-demo")]
#[command(about = "Ask natural-language questions about a CSV dataset")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question against a CSV file
    Ask {
        /// CSV file with a header row
        #[arg(long)]
        csv: PathBuf,

        /// The question to answer
        #[arg(long)]
        question: String,

        /// Dataset id to record in the response
        #[arg(long, default_value = "1")]
        dataset_id: i64,

        /// Comma-separated index columns (inferred from names when omitted)
        #[arg(long, value_delimiter = ',')]
        index_columns: Option<Vec<String>>,

        /// Engine config YAML
        #[arg(long)]
        config: Option<PathBuf>,

        /// Compiled program JSON to try before the rule-based generator
        #[arg(long)]
        program: Option<PathBuf>,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile a trainset into a program artifact
    Compile {
        /// Trainset JSON (a list of examples)
        #[arg(long)]
        trainset: PathBuf,

        /// Artifact version (timestamped when omitted)
        #[arg(long)]
        version: Option<String>,

        /// Engine config YAML for the baseline generator
        #[arg(long)]
        config: Option<PathBuf>,

        /// Where to write the compiled program
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Ask { csv, question, dataset_id, index_columns, config, program, json } => {
            handle_ask(csv, question, dataset_id, index_columns, config, program, json)
        }
        Commands::Compile { trainset, version, config, out } => {
            handle_compile(trainset, version, config, out)
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => parser::parse_config_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Handle the 'ask' subcommand
fn handle_ask(
    csv: PathBuf,
    question: String,
    dataset_id: i64,
    index_columns: Option<Vec<String>>,
    config: Option<PathBuf>,
    program: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let snapshot = DatasetSnapshot::from_csv_path(dataset_id, &csv, index_columns.as_deref())
        .with_context(|| format!("loading dataset {}", csv.display()))?;

    let predictor = match program {
        Some(path) => Some(
            CompiledProgram::from_file(&path)
                .with_context(|| format!("loading compiled program {}", path.display()))?
                .into_predictor(),
        ),
        None => None,
    };

    let app = InteractiveProgram::from_config(&config, predictor);
    let response = app.run(&InteractiveRequest::new(dataset_id, question), &snapshot)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    output::print_response(&response);
    Ok(())
}

/// Handle the 'compile' subcommand
fn handle_compile(
    trainset: PathBuf,
    version: Option<String>,
    config: Option<PathBuf>,
    out: PathBuf,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let examples = Trainset::from_file(&trainset)
        .with_context(|| format!("loading trainset {}", trainset.display()))?;

    let program = compile_program(&examples, version.as_deref(), &config.build_generator())?;
    std::fs::write(&out, program.to_json_string()?)
        .with_context(|| format!("writing {}", out.display()))?;

    output::print_compile_summary(&program, &out);
    Ok(())
}
