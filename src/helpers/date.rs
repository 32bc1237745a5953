//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "DD/MM/YYYY") // -> "15/01/2024"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Short pt-BR date, `dd/mm/yyyy`
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_date(date, "DD/MM/YYYY")
}

/// Long pt-BR date, e.g. "15 de janeiro de 2024"
pub fn long_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let month = MONTHS_PT[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Format a date in ISO 8601, for `<time datetime>`
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Reading time label, e.g. "5 min de leitura"
pub fn reading_time(minutes: i64) -> String {
    format!("{} min de leitura", minutes)
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
