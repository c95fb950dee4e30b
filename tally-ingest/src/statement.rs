//! Load bank-statement CSV exports into typed transactions.
//!
//! Expected header (any order, case-insensitive):
//!   id,date,description,amount,direction[,category]
//! `id`, `direction` and `category` are optional. Without a direction the
//! sign of the amount decides (negative = expense).

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tally_core::{BookedTransaction, Direction, Transaction};
use tracing::debug;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '€' | ' '))
        .collect();
    cleaned.parse().ok()
}

struct Columns {
    id: Option<usize>,
    date: usize,
    description: usize,
    amount: usize,
    direction: Option<usize>,
    category: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let (Some(date), Some(description), Some(amount)) =
            (find("date"), find("description"), find("amount"))
        else {
            bail!("statement header must include date, description and amount columns");
        };

        Ok(Self {
            id: find("id"),
            date,
            description,
            amount,
            direction: find("direction"),
            category: find("category"),
        })
    }
}

/// Parse statement CSV from any reader, keeping any booked category.
/// Rows with an unparseable date or amount are skipped.
pub fn parse_statement<R: Read>(reader: R) -> Result<Vec<BookedTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers().context("reading header row")?)?;
    let mut out = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading row {}", row + 1))?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let Some(date) = parse_date(field(columns.date)) else {
            debug!(row = row + 1, value = field(columns.date), "skipping row with bad date");
            continue;
        };
        let Some(amount) = parse_amount(field(columns.amount)) else {
            debug!(row = row + 1, value = field(columns.amount), "skipping row with bad amount");
            continue;
        };

        let direction = columns
            .direction
            .and_then(|idx| Direction::parse(field(idx)))
            .unwrap_or_else(|| Direction::from_signed_amount(amount));

        let id = columns
            .id
            .map(field)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{}", row + 1));

        let category = columns
            .category
            .map(field)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        out.push(BookedTransaction::new(
            Transaction::new(id, field(columns.description), amount, date, direction),
            category,
        ));
    }

    Ok(out)
}

/// Load a statement CSV file with booked categories
pub fn read_booked_csv(path: impl AsRef<Path>) -> Result<Vec<BookedTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_statement(file).with_context(|| format!("parsing {}", path.display()))
}

/// Load a statement CSV file as plain transactions
pub fn read_transactions_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    Ok(read_booked_csv(path)?
        .into_iter()
        .map(|b| b.transaction)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "\
Date,Description,Amount,Direction,ID,Category
2024-06-01,VDP-CHADWICKS DUBLIN 12345678 01/06/2024,120.50,expense,t1,
03/06/2024,BGC ACME LTD,\"1,500.00\",income,t2,Sales
not-a-date,JUNK,1.00,expense,t3,
2024-06-04,POS CENTRA GALWAY,-8.40,,,Subsistence
";

    #[test]
    fn test_parse_statement() {
        let rows = parse_statement(STATEMENT.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].transaction.id, "t1");
        assert_eq!(rows[0].transaction.direction, Direction::Expense);
        assert_eq!(rows[0].category, None);

        assert_eq!(rows[1].transaction.amount, 1500.0);
        assert_eq!(
            rows[1].transaction.date,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
        );
        assert_eq!(rows[1].category.as_deref(), Some("Sales"));
    }

    #[test]
    fn test_direction_from_sign_and_generated_id() {
        let rows = parse_statement(STATEMENT.as_bytes()).unwrap();
        let centra = &rows[2];
        assert_eq!(centra.transaction.direction, Direction::Expense);
        assert_eq!(centra.transaction.id, "row-4");
    }

    #[test]
    fn test_missing_columns_rejected() {
        let err = parse_statement("when,what\n2024-01-01,x\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("date, description and amount"));
    }
}
