use csv::StringRecord;

use crate::{
    error::RecordError,
    schema::{ColumnKind, RecordSchema, DELIMITER},
};

/// Split on every delimiter and trim each field.
///
/// Empty fields at the end of the line are dropped, and a line without any
/// delimiter is a single field, even when blank.
fn split_record(line: &str) -> StringRecord {
    let mut fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() > 1 {
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
    }

    fields.iter().map(|f| f.trim()).collect()
}

pub fn split_fields(line: &str) -> Vec<String> {
    split_record(line).iter().map(str::to_owned).collect()
}

pub fn parse_line<R: RecordSchema>(line: &str) -> Result<R, RecordError> {
    let record = split_record(line);

    let expected = R::field_count();
    if record.len() != expected {
        return Err(RecordError::Malformed {
            expected,
            found: record.len(),
        });
    }

    record.deserialize::<R>(None).map_err(|e| invalid_field::<R>(&record, e))
}

fn invalid_field<R: RecordSchema>(record: &StringRecord, error: csv::Error) -> RecordError {
    let (index, reason) = match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => (
            err.field().map(|i| i as usize),
            err.to_string(),
        ),
        _ => (None, error.to_string()),
    };

    // Errors raised by a field deserializer carry no position; only typed
    // columns can fail, so blame the first of those.
    let index = index
        .or_else(|| R::COLUMNS.iter().position(|c| c.kind != ColumnKind::Text))
        .unwrap_or(0)
        .min(R::field_count() - 1);
    RecordError::InvalidField {
        field: R::COLUMNS[index].header,
        value: record.get(index).unwrap_or_default().to_owned(),
        reason,
    }
}
