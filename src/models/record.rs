use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One recognition event, with the calendar fields derived from `date_received`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub recipient: String,
    pub giver: String,
    pub program: String,
    pub award_type: Option<String>,
    pub award_amount: f64,
    pub date_received: NaiveDate,
    pub comment: Option<String>,
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    pub month_name: String,
}

impl Record {
    pub fn new(
        recipient: impl Into<String>,
        giver: impl Into<String>,
        program: impl Into<String>,
        award_type: Option<String>,
        award_amount: f64,
        date_received: NaiveDate,
        comment: Option<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            giver: giver.into(),
            program: program.into(),
            award_type,
            award_amount,
            date_received,
            comment,
            year: date_received.year(),
            month: date_received.month(),
            quarter: (date_received.month() - 1) / 3 + 1,
            month_name: date_received.format("%B").to_string(),
        }
    }
}
