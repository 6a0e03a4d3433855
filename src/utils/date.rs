use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `YYYY-MM-DD`, the only date format written to the data file.
pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}
