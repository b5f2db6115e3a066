use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wordfreq::{count_file, write_report, BoundaryRule, CollationRule, Config, OutputMode};

/// Count the words of a text file and print the most frequent ones.
#[derive(Parser, Debug)]
#[command(name = "wordfreq", version, about, long_about = None)]
struct Args {
    /// UTF-8 (or --encoding) text file to read
    file: PathBuf,

    /// Number of words to report
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Report every distinct word
    #[arg(short, long, conflicts_with = "top")]
    all: bool,

    /// Print only the words, without counts
    #[arg(short, long)]
    bare: bool,

    /// Which characters form a word
    #[arg(long, value_enum)]
    boundary: Option<BoundaryRule>,

    /// Custom separator regex, replaces --boundary
    #[arg(long, value_name = "REGEX")]
    separator: Option<String>,

    /// Case folding and ordering rule
    #[arg(long, value_enum)]
    collation: Option<CollationRule>,

    /// Locale for collation, e.g. de-DE (default: from the environment)
    #[arg(short, long, value_name = "TAG")]
    locale: Option<String>,

    /// Ignore words shorter than this many characters
    #[arg(short, long)]
    min_length: Option<usize>,

    /// Input encoding label
    #[arg(short, long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Replace malformed bytes instead of failing
    #[arg(long)]
    lossy: bool,

    /// Configuration file (default: user config dir, if present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Command line flags win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(top) = self.top {
            config.top = top;
        }
        if self.bare {
            config.output = OutputMode::Bare;
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
            config.separator = None;
        }
        if let Some(separator) = &self.separator {
            config.separator = Some(separator.clone());
        }
        if let Some(collation) = self.collation {
            config.collation = collation;
        }
        if let Some(locale) = &self.locale {
            config.locale = Some(locale.clone());
        }
        if let Some(min_length) = self.min_length {
            config.min_length = min_length;
        }
        if let Some(encoding) = &self.encoding {
            config.encoding = encoding.clone();
        }
        if self.lossy {
            config.lossy = true;
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply(&mut config);

    let counter = count_file(&args.file, &config)
        .with_context(|| format!("failed to count words in {}", args.file.display()))?;

    let table = counter.table();
    let entries = if args.all { table.ranked() } else { table.top_k(config.top) };
    write_report(std::io::stdout().lock(), &entries, config.output).context("failed to write report")?;

    Ok(())
}
