use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use ogzents::{Diagnostics, OgzError, OgzMap, Result, TeeReader, encode_minimal, write_report};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Reads an uncompressed OGZ file and writes a minimal uncompressed OGZ file
/// containing only the entity data.
///
/// Specify any print flag to only print the requested fields to stdout
/// instead of the shrunk map data.
#[derive(Parser, Debug)]
#[command(name = "ogzents", disable_version_flag = true)]
struct Args {
    /// Uncompressed OGZ file to read (stdin if omitted)
    input: Option<PathBuf>,

    /// Print file format version
    #[arg(long = "version")]
    print_version: bool,

    /// Print map vars (version 29+ only)
    #[arg(long = "vars")]
    print_vars: bool,

    /// Print game identifier
    #[arg(long = "game")]
    print_game: bool,

    /// Print map entities
    #[arg(long = "ents")]
    print_ents: bool,

    /// Write the minimal OGZ here instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "trim")]
    output: Option<PathBuf>,

    /// Copy the input up to the end of the entity list into FILE instead of
    /// writing a minimal OGZ
    #[arg(long, value_name = "FILE")]
    trim: Option<PathBuf>,
}

impl Args {
    fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            version: self.print_version,
            vars: self.print_vars,
            game: self.print_game,
            ents: self.print_ents,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path).map_err(|source| OgzError::Open {
            path: path.clone(),
            source,
        })?),
        None => Box::new(std::io::stdin().lock()),
    };
    let input = BufReader::new(input);

    let map = match &args.trim {
        Some(path) => read_trimmed(input, path)?,
        None => OgzMap::read_from(input)?,
    };

    let diagnostics = args.diagnostics();
    if diagnostics.any() {
        let stdout = std::io::stdout();
        write_report(&map, &diagnostics, &mut stdout.lock()).map_err(|source| {
            OgzError::Output {
                target: "stdout".to_owned(),
                source,
            }
        })?;
    }
    if diagnostics.any() || args.trim.is_some() {
        return Ok(());
    }

    let data = encode_minimal(&map.entities)?;
    match &args.output {
        Some(path) => write_file(path, &data),
        None => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            stdout
                .write_all(&data)
                .and_then(|_| stdout.flush())
                .map_err(|source| OgzError::Output {
                    target: "stdout".to_owned(),
                    source,
                })
        }
    }
}

/// Decodes while copying every consumed byte into `path`.
fn read_trimmed<R: Read>(input: R, path: &Path) -> Result<OgzMap> {
    let output_error = |source| OgzError::Output {
        target: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(output_error)?;
    // The tee sits above the input buffering, so only consumed bytes are copied.
    let mut tee = TeeReader::new(input, BufWriter::new(file));
    match OgzMap::read_from(&mut tee) {
        Ok(map) => match tee.finish() {
            Ok(_) => {
                debug!(path = %path.display(), "wrote trimmed copy");
                Ok(map)
            }
            Err(source) => {
                remove_partial(path);
                Err(output_error(source))
            }
        },
        Err(err) => {
            drop(tee);
            remove_partial(path);
            Err(err)
        }
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let output_error = |source| OgzError::Output {
        target: path.display().to_string(),
        source,
    };
    let mut file = File::create(path).map_err(output_error)?;
    file.write_all(data)
        .and_then(|_| file.flush())
        .map_err(|source| {
            remove_partial(path);
            output_error(source)
        })
}

fn remove_partial(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        warn!(path = %path.display(), %err, "could not remove incomplete output");
    }
}
