use serde::Deserialize;

use crate::{
    error::PromptError,
    prompt::FieldPrompter,
    schema::{Cell, Column, RecordSchema},
};

pub const CURRENCY_SYMBOL: char = '$';

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PersonRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    #[serde(deserialize_with = "trim_and_parse_i32")]
    pub year_of_birth: i32,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "trim_and_parse_cost")]
    pub cost: f64,
}

impl RecordSchema for PersonRecord {
    const KIND: &'static str = "person";
    const COLUMNS: &'static [Column] = &[
        Column::text("ID#", 10),
        Column::text("Firstname", 20),
        Column::text("Lastname", 20),
        Column::text("Title", 8),
        Column::integer("YOB", 0),
    ];
    const RULE_WIDTH: usize = 80;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(&self.id),
            Cell::Text(&self.first_name),
            Cell::Text(&self.last_name),
            Cell::Text(&self.title),
            Cell::Integer(i64::from(self.year_of_birth)),
        ]
    }

    fn collect<P: FieldPrompter + ?Sized>(prompter: &mut P) -> Result<Self, PromptError> {
        Ok(PersonRecord {
            id: prompter.text("Enter the person ID")?,
            first_name: prompter.text("Enter the first name")?,
            last_name: prompter.text("Enter the last name")?,
            title: prompter.text("Enter the title")?,
            year_of_birth: prompter.integer("Enter the year of birth")?,
        })
    }
}

impl RecordSchema for ProductRecord {
    const KIND: &'static str = "product";
    const COLUMNS: &'static [Column] = &[
        Column::text("ID#", 10),
        Column::text("Name", 25),
        Column::text("Description", 40),
        Column::currency("Cost", 8, CURRENCY_SYMBOL),
    ];
    const RULE_WIDTH: usize = 85;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(&self.id),
            Cell::Text(&self.name),
            Cell::Text(&self.description),
            Cell::Currency(self.cost),
        ]
    }

    fn collect<P: FieldPrompter + ?Sized>(prompter: &mut P) -> Result<Self, PromptError> {
        Ok(ProductRecord {
            id: prompter.text("Enter the product ID")?,
            name: prompter.text("Enter the product name")?,
            description: prompter.text("Enter the product description")?,
            cost: prompter.decimal("Enter the product cost")?,
        })
    }
}

fn trim_and_parse_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    trimmed.parse::<i32>().map_err(serde::de::Error::custom)
}

fn trim_and_parse_cost<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    // Only one symbol is stripped; "$$5" stays invalid.
    let amount = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
    let value: f64 = amount.parse().map_err(serde::de::Error::custom)?;

    if !value.is_finite() {
        return Err(serde::de::Error::custom("cost must be a finite number"));
    }
    if value < 0.0 {
        return Err(serde::de::Error::custom("cost must not be negative"));
    }

    Ok(value)
}
