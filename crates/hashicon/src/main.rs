//! hashicon: generate identicons from the command line.
//!
//! Each positional input is hashed, turned into a symmetric 5×5 identicon,
//! and written to `<OUTPUT_DIR>/<input>.<png|svg>`. Inputs are processed
//! independently; a failure on one is reported and the rest still run.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin hashicon -- [OPTIONS] <INPUT>...
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use hashicon_io::OutputFormat;
use hashicon_pipeline::diagnostics::{Clock, PipelineDiagnostics, generate_with_diagnostics};
use hashicon_pipeline::{HashAlgorithm, IdenticonConfig, StagedResult};

/// Generate identicons: one image per input string.
///
/// The same input and options always produce the same image.
#[derive(Parser)]
#[command(name = "hashicon", version)]
struct Cli {
    /// Strings to generate identicons for.
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Directory the images are written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Digest used to derive the identicon.
    #[arg(long, value_enum, default_value_t = Hash::Md5)]
    hash: Hash,

    /// SipHash-1-3 key as `K0,K1` (only used with `--hash siphash13`).
    #[arg(long, value_parser = parse_sip_key, default_value = "0,0")]
    sip_key: (u64, u64),

    /// Canvas fill behind the drawn cells.
    #[arg(long, value_enum, default_value_t = Background::White)]
    background: Background,

    /// Side length of one grid cell in pixels.
    #[arg(long, default_value_t = IdenticonConfig::DEFAULT_CELL_SIZE, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..=u64::from(IdenticonConfig::MAX_CELL_SIZE)))]
    cell_size: u32,

    /// Output file format.
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Print per-stage timing and metrics for each input.
    #[arg(long)]
    diagnostics: bool,

    /// Print diagnostics as JSON instead of a human-readable report.
    ///
    /// Implies `--diagnostics`.
    #[arg(long)]
    json: bool,

    /// Full identicon config as a JSON string.
    ///
    /// When provided, `--hash`, `--sip-key`, `--background`, and
    /// `--cell-size` are ignored. The JSON must be a valid
    /// `IdenticonConfig` serialization; missing fields take defaults.
    #[arg(long)]
    config_json: Option<String>,
}

/// Hash algorithm selection.
#[derive(Clone, Copy, ValueEnum)]
enum Hash {
    /// MD5 (the classic identicon digest).
    Md5,
    /// Keyed SipHash-1-3 with a 128-bit output.
    Siphash13,
}

/// Background selection.
#[derive(Clone, Copy, ValueEnum)]
enum Background {
    /// Opaque white.
    White,
    /// Fully transparent.
    Transparent,
    /// Opaque black.
    Black,
}

/// Output format selection.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Raster PNG.
    Png,
    /// Vector SVG.
    Svg,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => Self::Png,
            Format::Svg => Self::Svg,
        }
    }
}

/// Parse a `K0,K1` SipHash key.
fn parse_sip_key(s: &str) -> Result<(u64, u64), String> {
    let (k0, k1) = s
        .split_once(',')
        .ok_or_else(|| format!("expected K0,K1, got {s:?}"))?;
    let parse = |k: &str| {
        k.trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid key half {k:?}: {e}"))
    };
    Ok((parse(k0)?, parse(k1)?))
}

/// Build an [`IdenticonConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual config flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<IdenticonConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(IdenticonConfig {
        hash_algorithm: match cli.hash {
            Hash::Md5 => HashAlgorithm::Md5,
            Hash::Siphash13 => HashAlgorithm::SipHash13 {
                k0: cli.sip_key.0,
                k1: cli.sip_key.1,
            },
        },
        background: match cli.background {
            Background::White => hashicon_pipeline::Background::White,
            Background::Transparent => hashicon_pipeline::Background::Transparent,
            Background::Black => hashicon_pipeline::Background::Black,
        },
        cell_size: cli.cell_size,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            log::error!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("config: {config:?}");

    let mut failures = 0usize;
    for input in &cli.inputs {
        if let Err(msg) = run_one(&cli, input, &config) {
            log::error!("{input:?}: {msg}");
            failures += 1;
        }
    }

    if failures > 0 {
        log::error!("{failures} of {} inputs failed", cli.inputs.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Generate, write, and optionally report on a single input.
fn run_one(cli: &Cli, input: &str, config: &IdenticonConfig) -> Result<(), String> {
    let format = OutputFormat::from(cli.format);
    let wants_report = cli.diagnostics || cli.json;

    if format == OutputFormat::Png && !wants_report {
        hashicon_io::create(input, &cli.output_dir, config).map_err(|e| e.to_string())?;
        return Ok(());
    }

    let (staged, diagnostics) =
        generate_with_diagnostics(input, config, &StdClock).map_err(|e| e.to_string())?;
    let path = write_output(&staged, config, format, &cli.output_dir)?;
    log::info!("created {} for {input:?}", path.display());

    if wants_report {
        print_diagnostics(&diagnostics, cli.json)?;
    }
    Ok(())
}

/// Encode `staged` in `format` and persist it.
fn write_output(
    staged: &StagedResult,
    config: &IdenticonConfig,
    format: OutputFormat,
    dir: &Path,
) -> Result<PathBuf, String> {
    let saved = match format {
        OutputFormat::Png => hashicon_io::save(&staged.png, &staged.input, dir),
        OutputFormat::Svg => {
            let desc = format!(
                "{} identicon, {} background",
                config.hash_algorithm.name(),
                config.background,
            );
            let metadata = hashicon_export::SvgMetadata {
                title: Some(staged.input.as_str()),
                description: Some(desc.as_str()),
            };
            let svg = hashicon_export::to_svg(
                &staged.pixel_map,
                staged.color,
                staged.dimensions,
                config.background,
                &metadata,
            );
            hashicon_io::save_as(svg.as_bytes(), &staged.input, format, dir)
        }
    };
    saved.map_err(|e| e.to_string())
}

fn print_diagnostics(diagnostics: &PipelineDiagnostics, json: bool) -> Result<(), String> {
    if json {
        let json = serde_json::to_string_pretty(diagnostics)
            .map_err(|e| format!("Error serializing diagnostics: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", diagnostics.report());
        println!();
    }
    Ok(())
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}
