use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use simhist::analysis::{self, Analysis};
use simhist::config::{Config, Overrides, Settings};
use simhist::inspect;
use simhist::report;
use simhist::units::{BaseUnit, Normalizer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "simhist")]
#[command(about = "Histogram unit-prefixed measurements from circuit simulator logs", long_about = None)]
struct Cli {
    /// Log verbosity (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a text histogram for each configured parameter
    Plot {
        #[command(flatten)]
        run: RunArgs,

        /// Number of histogram bins
        #[arg(short, long)]
        bins: Option<usize>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export normalized values as JSON
    Export {
        #[command(flatten)]
        run: RunArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the head of a file and which common parameters it mentions
    Inspect {
        /// Simulator output file
        file: PathBuf,

        /// Number of lines to show
        #[arg(short = 'n', long, default_value_t = 10)]
        lines: usize,
    },

    /// Suggest parameter names found in a file
    Suggest {
        /// Simulator output file
        file: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Simulator output files, processed one at a time
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML file with target unit, bin count and patterns
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parameter to extract as `NAME=<value>` (repeatable)
    #[arg(short, long = "param")]
    params: Vec<String>,

    /// Also extract the built-in common HSPICE measurement names
    #[arg(long)]
    common: bool,

    /// Target unit prefix: f, p, n, u, m, k, M, G or none
    #[arg(short, long)]
    target: Option<BaseUnit>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn filter(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn init_logging(log_level: LogLevel) {
    let env = env_logger::Env::default().filter_or("RUST_LOG", log_level.filter());

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = match cli.command {
        Commands::Plot { run, bins, output } => plot(&run, bins, output.as_deref()),
        Commands::Export { run, output } => export(&run, output.as_deref()),
        Commands::Inspect { file, lines } => inspect_file(&file, lines),
        Commands::Suggest { file } => suggest(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn resolve_settings(run: &RunArgs, bins: Option<usize>) -> Result<Settings> {
    let config = match &run.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::empty(),
    };

    let settings = config.resolve(Overrides {
        params: run.params.clone(),
        common: run.common,
        target: run.target,
        bins,
    })?;
    Ok(settings)
}

fn read_input(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    log::info!("Read {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

/// Analyze each file independently with the same settings
fn analyze_files(run: &RunArgs, settings: &Settings) -> Result<Vec<Analysis>> {
    let normalizer = Normalizer::new(settings.target);
    log::debug!("Normalizing to '{}'", settings.target);

    let mut analyses = Vec::with_capacity(run.files.len());
    for path in &run.files {
        let text = read_input(path)?;
        let source = path.display().to_string();
        let result = analysis::analyze_text(&source, &text, &settings.patterns, &normalizer)
            .with_context(|| format!("Failed to analyze {}", source))?;

        if result.series.iter().any(|s| s.is_empty()) {
            let names = inspect::suggest_parameter_names(&text);
            if !names.is_empty() {
                log::warn!("{}: parameters present in file: {}", source, names.join(", "));
            }
        }
        analyses.push(result);
    }

    Ok(analyses)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Report written to {}", path.display());
            println!("Report written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn plot(run: &RunArgs, bins: Option<usize>, output: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(run, bins)?;
    let analyses = analyze_files(run, &settings)?;

    let rendered: Vec<String> = analyses
        .iter()
        .map(|a| report::format_analysis(a, settings.bins))
        .collect();
    write_output(output, &rendered.join("\n"))
}

fn export(run: &RunArgs, output: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(run, None)?;
    let analyses = analyze_files(run, &settings)?;

    let mut json = report::format_json(&analyses);
    json.push('\n');
    write_output(output, &json)
}

fn inspect_file(path: &Path, lines: usize) -> Result<()> {
    let text = read_input(path)?;
    let preview = inspect::preview(&text, lines);
    print!("{}", inspect::format_preview(&preview));

    let names = inspect::suggest_parameter_names(&text);
    if !names.is_empty() {
        println!("Suggested parameters: {}", names.join(", "));
    }
    Ok(())
}

fn suggest(path: &Path) -> Result<()> {
    let text = read_input(path)?;
    let names = inspect::suggest_parameter_names(&text);

    if names.is_empty() {
        println!("No name=value parameters found in {}", path.display());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
