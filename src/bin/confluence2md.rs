// Command-line interface for confluence2markdown.
//
// Usage:
//  confluence2md [INPUT] [-o OUTPUT]              - Convert one storage-format document
//  confluence2md --pages EXPORT.json [--out-dir D] - Convert every page of a saved search response
//
// Logs go to stderr (RUST_LOG, default `info`); stdout carries only Markdown.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use confluence2markdown::{convert, convert_pages, read_pages, ConvertError, DirectorySink};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "confluence2md",
    version,
    about = "Convert Confluence storage format to Markdown"
)]
struct Cli {
    /// Storage-format input file (`-` or absent reads stdin)
    #[arg(conflicts_with = "pages")]
    input: Option<PathBuf>,

    /// Write Markdown to this file instead of stdout
    #[arg(short, long, conflicts_with = "pages")]
    output: Option<PathBuf>,

    /// Saved content-search response (or array of pages) to convert in bulk
    #[arg(long, value_name = "EXPORT.json")]
    pages: Option<PathBuf>,

    /// Directory receiving converted pages in bulk mode
    #[arg(long, env = "CONFLUENCE2MD_OUT_DIR", default_value = "output")]
    out_dir: PathBuf,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match &cli.pages {
        Some(export) => run_batch(export, &cli.out_dir),
        None => run_single(cli.input.as_deref(), cli.output.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(%error, "conversion failed");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_single(input: Option<&Path>, output: Option<&Path>) -> Result<ExitCode, ConvertError> {
    let storage = match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|err| ConvertError::io(path, err))?
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|err| ConvertError::io("<stdin>", err))?;
            buf
        }
    };

    let markdown = convert(&storage);

    match output {
        Some(path) => fs::write(path, &markdown).map_err(|err| ConvertError::io(path, err))?,
        None => io::stdout()
            .write_all(markdown.as_bytes())
            .map_err(|err| ConvertError::io("<stdout>", err))?,
    }
    Ok(ExitCode::SUCCESS)
}

fn run_batch(export: &Path, out_dir: &Path) -> Result<ExitCode, ConvertError> {
    let file = File::open(export).map_err(|err| ConvertError::io(export, err))?;
    let pages = read_pages(BufReader::new(file))?;
    if pages.is_empty() {
        tracing::info!(export = %export.display(), "no pages found in export");
        return Ok(ExitCode::SUCCESS);
    }
    tracing::info!(count = pages.len(), "found pages to process");

    let mut sink = DirectorySink::create(out_dir)?;
    let report = convert_pages(&pages, &mut sink);

    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        dir = %sink.dir().display(),
        "finished processing pages"
    );

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
