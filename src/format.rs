use crate::schema::{Cell, Column, ColumnKind, RecordSchema, OUTPUT_SEPARATOR};

pub fn header_line<R: RecordSchema>() -> String {
    let line = R::COLUMNS
        .iter()
        .map(|c| format!("{:<width$}", c.header, width = c.width))
        .collect::<Vec<_>>()
        .join(" ");
    line.trim_end().to_owned()
}

pub fn rule_line<R: RecordSchema>() -> String {
    "=".repeat(R::RULE_WIDTH)
}

/// Fixed-width display row: text left-justified, numbers right-aligned.
pub fn display_row<R: RecordSchema>(record: &R) -> String {
    R::COLUMNS
        .iter()
        .zip(record.cells())
        .map(|(column, cell)| display_cell(column, cell))
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_cell(column: &Column, cell: Cell<'_>) -> String {
    let width = column.width;
    match (column.kind, cell) {
        (ColumnKind::Currency(symbol), Cell::Currency(value)) => {
            format!("{}{:>width$.2}", symbol, value)
        }
        (_, Cell::Text(value)) => format!("{:<width$}", value),
        (_, Cell::Integer(value)) => format!("{:>width$}", value),
        (_, Cell::Currency(value)) => format!("{:>width$.2}", value),
    }
}

/// Output file line: fields joined with `", "`, no escaping.
pub fn delimited_line<R: RecordSchema>(record: &R) -> String {
    R::COLUMNS
        .iter()
        .zip(record.cells())
        .map(|(column, cell)| match (column.kind, cell) {
            (ColumnKind::Currency(symbol), Cell::Currency(value)) => {
                format!("{}{}", symbol, value)
            }
            (_, Cell::Text(value)) => value.to_owned(),
            (_, Cell::Integer(value)) => value.to_string(),
            (_, Cell::Currency(value)) => value.to_string(),
        })
        .collect::<Vec<_>>()
        .join(OUTPUT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        parser::parse_line,
        records::{PersonRecord, ProductRecord},
    };

    fn jane() -> PersonRecord {
        PersonRecord {
            id: "12".to_owned(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            title: "Dr.".to_owned(),
            year_of_birth: 1980,
        }
    }

    fn widget() -> ProductRecord {
        ProductRecord {
            id: "P1".to_owned(),
            name: "Widget".to_owned(),
            description: "A small widget".to_owned(),
            cost: 19.99,
        }
    }

    #[test]
    fn person_header_and_rule() {
        assert_eq!(
            header_line::<PersonRecord>(),
            format!("{:<10} {:<20} {:<20} {:<8} YOB", "ID#", "Firstname", "Lastname", "Title")
        );
        assert_eq!(rule_line::<PersonRecord>().len(), 80);
        assert!(rule_line::<PersonRecord>().chars().all(|c| c == '='));
    }

    #[test]
    fn product_header_and_rule() {
        assert_eq!(
            header_line::<ProductRecord>(),
            format!("{:<10} {:<25} {:<40} Cost", "ID#", "Name", "Description")
        );
        assert_eq!(rule_line::<ProductRecord>().len(), 85);
    }

    #[test]
    fn person_row() {
        assert_eq!(
            display_row(&jane()),
            format!("{:<10} {:<20} {:<20} {:<8} 1980", "12", "Jane", "Doe", "Dr.")
        );
    }

    #[test]
    fn product_row_has_fixed_width_cost() {
        let row = display_row(&widget());

        assert!(row.ends_with("$   19.99"));
        assert_eq!(
            row,
            format!("{:<10} {:<25} {:<40} $   19.99", "P1", "Widget", "A small widget")
        );
    }

    #[test]
    fn cost_rounds_to_two_places() {
        let mut product = widget();
        product.cost = 5.0;
        assert!(display_row(&product).ends_with("$    5.00"));

        product.cost = 1234.567;
        assert!(display_row(&product).ends_with("$ 1234.57"));
    }

    #[test]
    fn long_values_are_not_truncated() {
        let mut person = jane();
        person.first_name = "Bartholomew-Maximilian".to_owned();
        assert!(display_row(&person).contains("Bartholomew-Maximilian Doe"));
    }

    #[test]
    fn delimited_lines() {
        assert_eq!(delimited_line(&jane()), "12, Jane, Doe, Dr., 1980");
        assert_eq!(delimited_line(&widget()), "P1, Widget, A small widget, $19.99");
    }

    #[test]
    fn delimited_line_reads_back() {
        let mut product = widget();
        product.cost = 0.1 + 0.2;

        let back: ProductRecord = parse_line(&delimited_line(&product)).unwrap();
        assert_eq!(back, product);

        let back: PersonRecord = parse_line(&delimited_line(&jane())).unwrap();
        assert_eq!(back, jane());
    }
}
