use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, info, warn};

use crate::{
    error::BatchError,
    format::{delimited_line, display_row, header_line, rule_line},
    parser::{parse_line, split_fields},
    prompt::FieldPrompter,
    schema::RecordSchema,
    source::{next_lines, LineSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    NoSelection,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadSummary {
    pub rows: usize,
    pub corrupt: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Aborted(AbortReason),
    Done(ReadSummary),
}

/// Returns `None` when nothing was selected.
pub fn load_lines<S, W>(source: &mut S, out: &mut W) -> Result<Option<Vec<String>>, BatchError>
where
    S: LineSource + ?Sized,
    W: Write,
{
    let Some(mut reader) = source.open()? else {
        writeln!(out, "No file selected!!! ... exiting.")?;
        return Ok(None);
    };

    let mut lines = Vec::new();
    while let Some(chunk) = next_lines(reader.as_mut()).map_err(|e| BatchError::Read {
        path: source.describe(),
        source: e,
    })? {
        for line in chunk {
            write!(out, "\nLine {:4} {:<60} ", lines.len() + 1, line)?;
            lines.push(line);
        }
    }

    writeln!(out, "\n\nData file read!")?;
    debug!("loaded {} lines from {}", lines.len(), source.describe());

    Ok(Some(lines))
}

pub fn display_lines<R, W>(lines: &[String], out: &mut W) -> Result<ReadSummary, BatchError>
where
    R: RecordSchema,
    W: Write,
{
    let mut summary = ReadSummary::default();

    writeln!(out)?;
    writeln!(out, "{}", header_line::<R>())?;
    writeln!(out, "{}", rule_line::<R>())?;

    for (index, line) in lines.iter().enumerate() {
        match parse_line::<R>(line) {
            Ok(record) => {
                writeln!(out, "{}", display_row(&record))?;
                summary.rows += 1;
            }
            Err(e) => {
                warn!("{} line {}: {}", R::KIND, index + 1, e);
                writeln!(out, "Found a record that may be corrupt: ")?;
                writeln!(out, "{}", line)?;
                summary.corrupt += 1;
            }
        }
    }

    Ok(summary)
}

pub fn read_batch<R, S, W>(source: &mut S, out: &mut W) -> Result<ReadOutcome, BatchError>
where
    R: RecordSchema,
    S: LineSource + ?Sized,
    W: Write,
{
    let Some(lines) = load_lines(source, out)? else {
        writeln!(out, "No data to process.")?;
        return Ok(ReadOutcome::Aborted(AbortReason::NoSelection));
    };

    if lines.is_empty() {
        writeln!(out, "No data to process.")?;
        return Ok(ReadOutcome::Aborted(AbortReason::Empty));
    }

    let summary = display_lines::<R, W>(&lines, out)?;
    info!(
        "displayed {} {} records, {} corrupt",
        summary.rows,
        R::KIND,
        summary.corrupt
    );

    Ok(ReadOutcome::Done(summary))
}

pub fn collect_records<R, P>(prompter: &mut P) -> Result<Vec<String>, BatchError>
where
    R: RecordSchema,
    P: FieldPrompter + ?Sized,
{
    let mut lines = Vec::new();

    loop {
        let record = R::collect(prompter)?;
        let line = delimited_line(&record);

        if split_fields(&line).len() != R::field_count() {
            warn!(
                "{} record {:?} contains a '{}' and will not read back as one record",
                R::KIND,
                line,
                crate::schema::DELIMITER
            );
        }

        debug!("collected {}", line);
        lines.push(line);

        if prompter.confirm("Are you done")? {
            break;
        }
    }

    Ok(lines)
}

/// Create or truncate `dest` and write one line per entry.
pub fn write_batch(lines: &[String], dest: &Path) -> Result<(), BatchError> {
    let write_err = |source: std::io::Error| BatchError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let file = File::create(dest).map_err(|source| BatchError::Open {
        path: dest.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{}", line).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    info!("wrote {} lines to {}", lines.len(), dest.display());
    Ok(())
}

pub fn collect_and_write<R, P, W>(
    prompter: &mut P,
    dest: &Path,
    out: &mut W,
) -> Result<usize, BatchError>
where
    R: RecordSchema,
    P: FieldPrompter + ?Sized,
    W: Write,
{
    let lines = collect_records::<R, P>(prompter)?;
    write_batch(&lines, dest)?;
    writeln!(out, "Data file written!")?;
    Ok(lines.len())
}
