use clap::{Parser, Subcommand};
use rtty_manifest::config::{self, ConfigOverrides};
use rtty_manifest::filter::split_words;
use rtty_manifest::output;
use rtty_manifest::pipeline::{self, PipelineError};
use rtty_manifest::project::Format;
use rtty_manifest::text::FsTextReader;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "rtty-manifest")]
#[command(about = "Build manifest.json for the RTTY bundled mode")]
#[command(long_about = "\
Build manifest.json for the RTTY bundled mode

Scans a folder laid out like:

  rtty_offline/
  ├── ARTWORK-01/
  │   ├── 000
  │   └── 001
  └── ARTWORK-08/
      └── 042

and writes one of three manifest shapes:

  array   [\"ARTWORK-01/000\", \"ARTWORK-01/001\"]
  items   {\"base\": \"rtty_offline\", \"items\": [\"ARTWORK-01/000\", ...]}   (default)
  map     {\"base\": \"rtty_offline\", \"ARTWORK-01\": [\"000\", \"001\"], ...}

Filtering:
  --filter nude,girl,mrs        skip items whose content contains any word (case-insensitive)
  --path-filter 'nude|girl'     skip items whose relative path matches (case-insensitive)

Run 'rtty-manifest gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Root directory containing ARTWORK-0X folders [default: ./rtty_offline]
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Output manifest path [default: <root>/manifest.json]
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Manifest format [default: items]
    #[arg(long, value_enum, global = true)]
    format: Option<Format>,

    /// Base label written into the manifest [default: final component of --root]
    #[arg(long, global = true)]
    base: Option<String>,

    /// Comma-separated content words to exclude (case-insensitive)
    #[arg(long, global = true)]
    filter: Option<String>,

    /// Regex to exclude by relative path, e.g. '(?i)nude|girl|mrs'
    #[arg(long, global = true)]
    path_filter: Option<String>,

    /// TOML config file; command-line flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log warnings and errors to stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan, filter and write the manifest (the default)
    Build,
    /// Scan and filter, then print what would be written
    Check,
    /// Print a stock config file with all options documented
    GenConfig,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root: self.root.clone(),
            out: self.out.clone(),
            format: self.format,
            base: self.base.clone(),
            filter: self.filter.as_deref().map(split_words),
            path_filter: self.path_filter.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let command = cli.command.as_ref().unwrap_or(&Command::Build);
    if let Command::GenConfig = command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let settings = config::load_config(cli.config.as_deref(), &cli.overrides())?.resolve()?;
    let outcome = pipeline::run(&settings, &FsTextReader)?;

    match command {
        Command::Check => output::print_check_output(&outcome, settings.format),
        _ => {
            pipeline::write_manifest(&outcome.manifest, &settings.out)?;
            output::print_write_summary(&outcome, &settings.out);
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout only carries results.
///
/// `RUST_LOG` overrides the default level.
fn setup_tracing(quiet: bool) {
    use tracing_subscriber::fmt;

    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .with_level(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
