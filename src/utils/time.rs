use chrono::NaiveDate;

pub const INPUT_DATE_FORMAT: &str = "%m/%d/%Y";

pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_DATE_FORMAT).ok()
}

/// `January 05, 2025`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// `January 2025`
pub fn month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub fn month_name(month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(2000, month, 1).map(|d| d.format("%B").to_string())
}
