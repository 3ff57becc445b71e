use serde::de::DeserializeOwned;

use crate::{error::PromptError, prompt::FieldPrompter};

pub const DELIMITER: char = ',';
pub const OUTPUT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Text,
    Integer,
    Currency(char),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    /// Display width. Zero leaves the value unpadded.
    pub width: usize,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn text(header: &'static str, width: usize) -> Self {
        Column {
            header,
            width,
            kind: ColumnKind::Text,
        }
    }

    pub const fn integer(header: &'static str, width: usize) -> Self {
        Column {
            header,
            width,
            kind: ColumnKind::Integer,
        }
    }

    pub const fn currency(header: &'static str, width: usize, symbol: char) -> Self {
        Column {
            header,
            width,
            kind: ColumnKind::Currency(symbol),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Integer(i64),
    Currency(f64),
}

pub trait RecordSchema: DeserializeOwned + Sized {
    const KIND: &'static str;
    const COLUMNS: &'static [Column];
    const RULE_WIDTH: usize;

    fn cells(&self) -> Vec<Cell<'_>>;

    fn collect<P: FieldPrompter + ?Sized>(prompter: &mut P) -> Result<Self, PromptError>;

    fn field_count() -> usize {
        Self::COLUMNS.len()
    }
}
