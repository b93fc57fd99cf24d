use assetsweep::report::TerminalReporter;
use assetsweep::{sweep_tree, Config, ReportFormat, Reporter, TreeRoot};
use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// assetsweep - Find files in an asset tree that nothing references
#[derive(Parser, Debug)]
#[command(name = "assetsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the asset tree to sweep
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional root files, relative to the tree (can be specified multiple times)
    #[arg(short, long)]
    root: Vec<String>,

    /// Patterns to exclude from the tree (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Report file (default: sweep.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output, including every dependency found
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("assetsweep v{}", env!("CARGO_PKG_VERSION"));

    let tree = std::fs::canonicalize(&cli.path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Asset tree not found: {}", cli.path.display()))?;
    let root = TreeRoot::new(tree);

    let config = load_config(&cli, &root)?;

    run_sweep(&config, &cli, &root)
}

fn run_sweep(config: &Config, cli: &Cli, root: &TreeRoot) -> Result<()> {
    let start_time = Instant::now();

    let format = match &cli.format {
        Some(format) => format.clone().into(),
        None => ReportFormat::parse(&config.report.format)
            .ok_or_else(|| miette::miette!("Unknown report format: {}", config.report.format))?,
    };

    info!("Sweeping {}...", root.base().display());
    let outcome = sweep_tree(root, config).into_diagnostic()?;

    // Only written once the sweep has fully succeeded
    let output = config.report.output.clone();
    Reporter::new(format, output.clone()).report(&outcome)?;

    if !cli.quiet {
        TerminalReporter::new().summary(&outcome, &output, start_time.elapsed());
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli, root: &TreeRoot) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        Config::from_default_locations(root.base())?
    };

    // Override with CLI arguments
    if !cli.root.is_empty() {
        config.roots.extend(cli.root.clone());
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if let Some(output) = &cli.output {
        config.report.output = output.clone();
    }

    Ok(config)
}
