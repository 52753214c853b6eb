use crate::error::{Error, Result};
use crate::models::record::Record;
use crate::utils::time::parse_input_date;
use csv::{ReaderBuilder, StringRecord, Trim};

pub const COL_PROGRAM: &str = "Program Name";
pub const COL_DATE: &str = "Date Received";
pub const COL_RECIPIENT: &str = "Recipient Name";
pub const COL_GIVER: &str = "Giver Name";
pub const COL_AMOUNT: &str = "Award Amount";
pub const COL_AWARD_TYPE: &str = "Award Type";
pub const COL_COMMENT: &str = "Submitter Comments";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_PROGRAM,
    COL_DATE,
    COL_RECIPIENT,
    COL_GIVER,
    COL_AMOUNT,
    COL_AWARD_TYPE,
    COL_COMMENT,
];

struct ColumnIndex {
    program: usize,
    date: usize,
    recipient: usize,
    giver: usize,
    amount: usize,
    award_type: usize,
    comment: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let idx = |name: &str| find(name).ok_or_else(|| Error::MissingColumns(vec![name.to_string()]));
        Ok(Self {
            program: idx(COL_PROGRAM)?,
            date: idx(COL_DATE)?,
            recipient: idx(COL_RECIPIENT)?,
            giver: idx(COL_GIVER)?,
            amount: idx(COL_AMOUNT)?,
            award_type: idx(COL_AWARD_TYPE)?,
            comment: idx(COL_COMMENT)?,
        })
    }
}

pub struct DataService;

impl DataService {
    /// Parses the uploaded CSV into prepared records.
    ///
    /// Missing columns and dates outside `MM/DD/YYYY` abort the load. Award
    /// amounts that are not a non-negative number become `0.0`.
    pub fn load_csv(bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Fields)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            let row_number = idx + 1;
            let cell = |i: usize| row.get(i).unwrap_or("").trim();

            let raw_date = cell(columns.date);
            let date = parse_input_date(raw_date).ok_or_else(|| Error::InvalidDate {
                row: row_number,
                value: raw_date.to_string(),
            })?;

            records.push(Record::new(
                cell(columns.recipient),
                cell(columns.giver),
                cell(columns.program),
                non_empty(cell(columns.award_type)),
                coerce_amount(cell(columns.amount)),
                date,
                non_empty(cell(columns.comment)),
            ));
        }

        tracing::info!("Loaded {} recognition records", records.len());
        Ok(records)
    }

    pub fn preview(records: &[Record], rows: usize) -> &[Record] {
        &records[..rows.min(records.len())]
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn coerce_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Program Name,Date Received,Recipient Name,Giver Name,Award Amount,Award Type,Submitter Comments";

    #[test]
    fn loads_and_derives_calendar_fields() {
        let csv = format!(
            "{}\nKudos,02/10/2025,Ann Lee,Bob Ray,50,Points,Great work\nSpot,11/03/2024,Cy Dee,Ann Lee,,,\n",
            HEADER
        );
        let records = DataService::load_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.recipient, "Ann Lee");
        assert_eq!(first.giver, "Bob Ray");
        assert_eq!(first.award_amount, 50.0);
        assert_eq!(first.award_type.as_deref(), Some("Points"));
        assert_eq!(first.month, 2);
        assert_eq!(first.quarter, 1);
        assert_eq!(first.month_name, "February");

        let second = &records[1];
        assert_eq!(second.award_amount, 0.0);
        assert_eq!(second.award_type, None);
        assert_eq!(second.comment, None);
        assert_eq!(second.quarter, 4);
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let csv = "Submitter Comments,Award Type,Award Amount,Giver Name,Recipient Name,Date Received,Program Name\n\
                   \"Nice, really\",Cash,25,Bob,Ann,3/1/2025,Spot\n";
        let records = DataService::load_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].program, "Spot");
        assert_eq!(records[0].comment.as_deref(), Some("Nice, really"));
        assert_eq!(records[0].award_amount, 25.0);
    }

    #[test]
    fn missing_columns_are_fatal() {
        let csv = "Program Name,Date Received,Recipient Name\nKudos,01/01/2025,Ann\n";
        match DataService::load_csv(csv.as_bytes()) {
            Err(Error::MissingColumns(cols)) => {
                assert_eq!(
                    cols,
                    vec!["Giver Name", "Award Amount", "Award Type", "Submitter Comments"]
                );
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn bad_date_is_fatal_with_row_number() {
        let csv = format!(
            "{}\nKudos,01/05/2025,Ann,Bob,10,,\nKudos,2025-01-06,Ann,Bob,10,,\n",
            HEADER
        );
        match DataService::load_csv(csv.as_bytes()) {
            Err(Error::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2025-01-06");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn amount_coercion_is_lenient() {
        assert_eq!(coerce_amount("125.5"), 125.5);
        assert_eq!(coerce_amount("$100"), 0.0);
        assert_eq!(coerce_amount("1,000"), 0.0);
        assert_eq!(coerce_amount("-5"), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
        assert_eq!(coerce_amount(""), 0.0);
    }

    #[test]
    fn preview_is_bounded() {
        let csv = format!("{}\nKudos,01/05/2025,Ann,Bob,10,,\n", HEADER);
        let records = DataService::load_csv(csv.as_bytes()).unwrap();
        assert_eq!(DataService::preview(&records, 5).len(), 1);
    }
}
