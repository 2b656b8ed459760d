//! Browser-clock helpers. Everything date-pure lives in
//! `shared::dates`; this module only reads the local clock and turns
//! day keys into display text.

use chrono::Datelike;
use js_sys::Date;

/// Current local calendar day as a `YYYY-MM-DD` key. Built from the
/// local year/month/day components, never from a UTC-shifted ISO
/// timestamp.
pub fn current_day_key() -> String {
    let now = Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// Local year and 1-based month, for the initial calendar cursor.
pub fn current_year_month() -> (i32, u32) {
    let now = Date::new_0();
    (now.get_full_year() as i32, now.get_month() + 1)
}

pub fn month_name_es(month: u32) -> &'static str {
    match month {
        1 => "enero",
        2 => "febrero",
        3 => "marzo",
        4 => "abril",
        5 => "mayo",
        6 => "junio",
        7 => "julio",
        8 => "agosto",
        9 => "septiembre",
        10 => "octubre",
        11 => "noviembre",
        12 => "diciembre",
        _ => "enero",
    }
}

pub fn format_month_title(year: i32, month: u32) -> String {
    format!("{} {}", month_name_es(month), year)
}

/// `2025-06-05` -> `5 de junio de 2025`; unparseable input is shown
/// as-is.
pub fn format_day_display(day: &str) -> String {
    match shared::dates::parse_day(day) {
        Ok(date) => format!(
            "{} de {} de {}",
            date.day(),
            month_name_es(date.month()),
            date.year()
        ),
        Err(_) => day.to_string(),
    }
}
