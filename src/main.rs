//! # unicode-util CLI - Unicode Transcoding Driver
//!
//! Command-line interface for bulk conversion between UTF-8 and UCS-4 over
//! stdin/stdout (or files), plus a self-test mode exercising the codec's
//! round-trip law over the full supported scalar range.

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;

#[cfg(feature = "cli")]
use unicode_util::{self_test, Converter, Encoding, Error, SELF_TEST_RANGE};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// unicode-util: convert between Unicode code unit encodings
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "unicode-util")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert between encodings (utf8 and ucs4 are wired up)
    Convert(ConvertArgs),

    /// Round-trip every supported scalar value through UTF-8
    Test,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ConvertArgs {
    /// Source encoding (utf8, utf16, ucs2, ucs4)
    #[arg(short = 'f', long = "from")]
    from: CliEncoding,

    /// Target encoding (utf8, utf16, ucs2, ucs4)
    #[arg(short = 't', long = "to")]
    to: CliEncoding,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum input size in KiB; larger input is a fatal error
    #[arg(long, default_value = "1024")]
    max_size: usize,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, Debug)]
struct CliEncoding(Encoding);

#[cfg(feature = "cli")]
impl std::str::FromStr for CliEncoding {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Error> {
        s.parse().map(CliEncoding)
    }
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct ConversionReport {
    success: bool,
    from: Encoding,
    to: Encoding,
    bytes_read: usize,
    bytes_written: usize,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct TestReport {
    success: bool,
    values_checked: u32,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(ref args) => convert_command(args, &cli)?,
        Commands::Test => test_command(&cli)?,
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn convert_command(args: &ConvertArgs, cli: &Cli) -> Result<()> {
    let CliEncoding(from) = args.from;
    let CliEncoding(to) = args.to;

    if cli.verbose {
        eprintln!("Converting from {} to {}", from.name(), to.name());
    }

    let converter = Converter::new(from, to)
        .with_context(|| format!("Cannot convert from {} to {}", from.name(), to.name()))?;

    let limit = args.max_size * 1024;
    let input_data = read_input(args.input.as_deref(), limit, cli.verbose)?;

    let output_data = converter
        .convert(&input_data)
        .context("Conversion failed")?;

    if let Some(ref output_path) = args.output {
        fs::write(output_path, &output_data)
            .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
        if cli.verbose {
            eprintln!("Wrote to: {}", output_path.display());
        }
    } else {
        io::stdout()
            .write_all(&output_data)
            .context("Failed to write to stdout")?;
    }

    match cli.format {
        OutputFormat::Json => {
            let report = ConversionReport {
                success: true,
                from,
                to,
                bytes_read: input_data.len(),
                bytes_written: output_data.len(),
            };
            eprintln!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if cli.verbose {
                eprintln!(
                    "Processed {} bytes -> {} bytes",
                    input_data.len(),
                    output_data.len()
                );
            }
        }
    }

    Ok(())
}

/// Single-shot read of the whole input, bounded by `limit` bytes.
///
/// Reads one byte past the limit to tell "exactly at the limit" from
/// "too large" without buffering unbounded data.
#[cfg(feature = "cli")]
fn read_input(path: Option<&std::path::Path>, limit: usize, verbose: bool) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match path {
        Some(path) => {
            if verbose {
                eprintln!("Reading from: {}", path.display());
            }
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            file.take(limit as u64 + 1)
                .read_to_end(&mut buffer)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        }
        None => {
            if verbose {
                eprintln!("Reading from stdin");
            }
            io::stdin()
                .take(limit as u64 + 1)
                .read_to_end(&mut buffer)
                .context("Failed to read from stdin")?;
        }
    }
    if buffer.len() > limit {
        return Err(Error::InputTooLarge { limit }.into());
    }
    Ok(buffer)
}

#[cfg(feature = "cli")]
fn test_command(cli: &Cli) -> Result<()> {
    if cli.verbose {
        eprintln!(
            "Round-tripping scalar values 0x{:06X}..0x{:06X} through UTF-8",
            SELF_TEST_RANGE.start, SELF_TEST_RANGE.end
        );
    }

    self_test().context("Codec self-test failed")?;

    match cli.format {
        OutputFormat::Json => {
            let report = TestReport {
                success: true,
                values_checked: SELF_TEST_RANGE.end - SELF_TEST_RANGE.start,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "✓ Round-trip verified for {} scalar values",
                SELF_TEST_RANGE.end - SELF_TEST_RANGE.start
            );
        }
    }

    Ok(())
}
