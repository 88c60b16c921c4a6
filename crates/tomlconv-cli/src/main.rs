use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tomlconv::{Config, Format, FormatConfig, Mode};

#[derive(Debug, Parser)]
#[command(
    name = "tomlconv",
    version,
    about = "Convert TOML to JSON, XML or a PHP array literal"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum)]
    to: FormatArg,
    /// Read the input as a whole document or as one bare value
    #[arg(short, long, value_enum, default_value_t = ModeArg::Table)]
    mode: ModeArg,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
    /// Spaces per nesting level for PHP and pretty JSON output
    #[arg(long, value_name = "N", default_value_t = 4)]
    indent: usize,
    /// Maximum nesting depth, 0 for unlimited
    #[arg(long, value_name = "N", default_value_t = Config::default().max_depth)]
    max_depth: u16,
    /// Maximum input size in bytes, 0 for unlimited
    #[arg(long, value_name = "BYTES", default_value_t = Config::default().max_size)]
    max_size: usize,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Xml,
    Php,
}

impl From<FormatArg> for Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => Self::Json,
            FormatArg::Xml => Self::Xml,
            FormatArg::Php => Self::Php,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Single,
    Table,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Single => Self::Single,
            ModeArg::Table => Self::Table,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = read_input(args.input.as_ref())?;
    let config = Config::new(args.max_depth, args.max_size);
    let source = args
        .input
        .as_ref()
        .map_or_else(|| "stdin".to_owned(), |path| path.display().to_string());

    let object = tomlconv::convert_with_config(args.mode.into(), &input, &config)
        .with_context(|| format!("failed to convert {source}"))?;

    let format_config = FormatConfig {
        indent_spaces: args.indent,
        pretty: args.pretty,
    };
    let mut output = tomlconv::render_with_config(&object, args.to.into(), &format_config);
    if !output.ends_with('\n') {
        output.push('\n');
    }
    debug!(bytes = output.len(), format = %Format::from(args.to), "rendered output");

    write_output(args.output.as_ref(), output.as_bytes())?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "reading input");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "writing output");
            std::fs::write(path, data)
                .with_context(|| format!("failed to write output file {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
