use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

mod batch;
mod error;
mod format;
mod parser;
mod prompt;
mod records;
mod schema;
mod source;

use batch::{collect_and_write, read_batch, ReadOutcome};
use prompt::ConsolePrompter;
use records::{PersonRecord, ProductRecord};
use schema::RecordSchema;
use source::{FileSource, LineSource, PromptedFileSource};

const DATA_DIR: &str = "src";

#[derive(Debug, Parser)]
#[command(version, about = "Read and write comma-delimited person and product files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a file and print its records as a table
    Read {
        kind: RecordKind,
        /// File to read; asks on the console when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Enter records on the console and save them to a file
    Write {
        kind: RecordKind,
        /// Destination; defaults to src/<Kind>TestData.txt under the working directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RecordKind {
    Person,
    Product,
}

impl RecordKind {
    fn default_file_name(self) -> &'static str {
        match self {
            RecordKind::Person => "PersonTestData.txt",
            RecordKind::Product => "ProductTestData.txt",
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Read { kind, file } => run_read(kind, file),
        Command::Write { kind, output } => run_write(kind, output),
    }
}

fn run_read(kind: RecordKind, file: Option<PathBuf>) -> Result<()> {
    let mut source: Box<dyn LineSource> = match file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(
            PromptedFileSource::console().context("cannot determine working directory")?,
        ),
    };

    match kind {
        RecordKind::Person => read_kind::<PersonRecord>(source.as_mut()),
        RecordKind::Product => read_kind::<ProductRecord>(source.as_mut()),
    }
}

fn read_kind<R: RecordSchema>(source: &mut dyn LineSource) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = read_batch::<R, _, _>(source, &mut out)
        .with_context(|| format!("reading {} records failed", R::KIND))?;
    out.flush()?;

    if let ReadOutcome::Done(summary) = outcome {
        if summary.corrupt > 0 {
            log::warn!(
                "{} of {} lines could not be read as {} records",
                summary.corrupt,
                summary.rows + summary.corrupt,
                R::KIND
            );
        }
    }

    Ok(())
}

fn run_write(kind: RecordKind, output: Option<PathBuf>) -> Result<()> {
    let dest = match output {
        Some(path) => path,
        None => env::current_dir()
            .context("cannot determine working directory")?
            .join(DATA_DIR)
            .join(kind.default_file_name()),
    };

    let stdin = io::stdin();
    let mut prompter = ConsolePrompter::new(stdin.lock(), io::stdout());
    let mut out = io::stdout();

    let written = match kind {
        RecordKind::Person => {
            collect_and_write::<PersonRecord, _, _>(&mut prompter, &dest, &mut out)
        }
        RecordKind::Product => {
            collect_and_write::<ProductRecord, _, _>(&mut prompter, &dest, &mut out)
        }
    }
    .with_context(|| format!("saving records to {} failed", dest.display()))?;

    log::info!("{} records saved to {}", written, dest.display());
    Ok(())
}
