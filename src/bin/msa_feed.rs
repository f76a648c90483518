use std::process::ExitCode;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing::info;
use tracing_subscriber::EnvFilter;

use msa_feed::catalog::{self, KNOWN_SOURCES};
use msa_feed::config::ConfigLoader;
use msa_feed::domain::{ResidueMode, SourceDescriptor};
use msa_feed::error::FeedError;
use msa_feed::output::{self, BuildReport, JsonOutput, StderrProgress};
use msa_feed::pipeline::{Pipeline, PipelineOptions, ProgressSink};
use msa_feed::source::{DirectorySourceClient, HttpSourceClient, SourceClient};

#[derive(Parser)]
#[command(name = "msa-feed")]
#[command(about = "Assemble remote FASTA gene files into one organism-labelled multi-FASTA")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch, relabel and concatenate sources")]
    Build(BuildArgs),
    #[command(about = "List the known gene files")]
    Catalog(CatalogArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Source file names, resolved against the base URL
    sources: Vec<String>,

    /// Use every file in the catalog
    #[arg(long, conflicts_with = "sources")]
    all: bool,

    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    base_url: Option<String>,

    /// Read sources from a local directory instead of the base URL
    #[arg(long, conflicts_with = "base_url")]
    source_dir: Option<Utf8PathBuf>,

    /// Keep only the first residue line of each record
    #[arg(long)]
    first_line_only: bool,

    #[arg(long)]
    timeout_secs: Option<u64>,

    #[arg(long, short)]
    output: Option<Utf8PathBuf>,

    #[arg(long)]
    json: bool,

    /// Print per-source progress to stderr
    #[arg(long)]
    progress: bool,
}

#[derive(Args)]
struct CatalogArgs {
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<FeedError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &FeedError) -> u8 {
    match error {
        FeedError::MissingConfig
        | FeedError::ConfigRead(_)
        | FeedError::ConfigParse(_)
        | FeedError::InvalidBaseUrl(_)
        | FeedError::InvalidSource(_) => 2,
        FeedError::HttpClient(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Catalog(args) => run_catalog(args),
    }
}

fn run_catalog(args: CatalogArgs) -> miette::Result<()> {
    if args.json {
        return JsonOutput::print_catalog(&KNOWN_SOURCES).into_diagnostic();
    }
    for name in KNOWN_SOURCES {
        println!("{name}");
    }
    Ok(())
}

fn run_build(args: BuildArgs) -> miette::Result<()> {
    let resolved = ConfigLoader::resolve_or_default(args.config.as_deref())?;

    let residue_mode = if args.first_line_only {
        ResidueMode::FirstLine
    } else {
        resolved.residue_mode
    };
    let options = PipelineOptions { residue_mode };

    let cli_sources = args
        .sources
        .iter()
        .map(|name| name.parse())
        .collect::<Result<Vec<SourceDescriptor>, FeedError>>()?;
    let sources = if args.all {
        catalog::known_sources()?
    } else if !cli_sources.is_empty() {
        catalog::merge_selections([cli_sources])?
    } else {
        catalog::merge_selections([resolved.sources.clone()])?
    };

    if let Some(dir) = &args.source_dir {
        let client = DirectorySourceClient::new(dir.clone());
        let origin = client.root().to_string();
        return execute(Pipeline::new(client, options), &sources, &origin, &args);
    }

    let base_url = args.base_url.as_deref().unwrap_or(&resolved.base_url);
    let timeout = args
        .timeout_secs
        .map(Duration::from_secs)
        .or(resolved.timeout);
    let client = HttpSourceClient::new(base_url, timeout)?;
    let origin = client.base_url().to_string();
    execute(Pipeline::new(client, options), &sources, &origin, &args)
}

fn execute<C: SourceClient>(
    pipeline: Pipeline<C>,
    sources: &[SourceDescriptor],
    origin: &str,
    args: &BuildArgs,
) -> miette::Result<()> {
    let sink: &dyn ProgressSink = if args.progress && !args.json {
        &StderrProgress
    } else {
        &JsonOutput
    };
    let result = pipeline.run(sources, sink);
    info!(
        origin,
        sources = sources.len(),
        skipped = result.skipped().count(),
        records = result.buffer.record_count(),
        "alignment buffer assembled"
    );

    if args.json {
        let report = BuildReport::new(origin, pipeline.options().residue_mode, &result);
        return JsonOutput::print_report(&report).into_diagnostic();
    }

    match &args.output {
        Some(path) => output::write_file_atomic(path, result.buffer.as_str())?,
        None => output::write_stdout(result.buffer.as_str()).into_diagnostic()?,
    }
    Ok(())
}
