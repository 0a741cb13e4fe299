//! Formatting helpers for ratings, dates, runtimes and money.
//!
//! Everything here is pure. Absent values come back as `None` so the caller
//! can drop the element instead of printing a placeholder.

use chrono::{Datelike, NaiveDate};

const PT_BR_MONTHS: [&str; 12] = [
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

const PT_BR_MONTHS_SHORT: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

const EN_US_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const EN_US_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Locale used for dates and numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayLocale {
    /// Brazilian Portuguese.
    #[default]
    PtBr,
    /// US English.
    EnUs,
}

impl DisplayLocale {
    /// Derives the locale from a TMDB language tag (`pt-BR`, `en-US`, ...).
    ///
    /// Portuguese tags map to [`Self::PtBr`]; everything else to [`Self::EnUs`].
    #[must_use]
    pub fn from_language(language: &str) -> Self {
        let primary = language.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("pt") {
            Self::PtBr
        } else {
            Self::EnUs
        }
    }

    const fn thousands_separator(self) -> char {
        match self {
            Self::PtBr => '.',
            Self::EnUs => ',',
        }
    }
}

/// Date rendering form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Day, full month name and year (detail view).
    Long,
    /// Abbreviated month and year (list view).
    Short,
}

/// Converts a 0-10 vote average to the 0-5 display scale.
///
/// ```
/// assert_eq!(watchme_core::display::format_rating(7.2), "3.6");
/// ```
#[must_use]
pub fn format_rating(vote_average: f64) -> String {
    format!("{:.1}", vote_average / 2.0)
}

/// Formats a runtime in minutes as `"{h}h {m}min"`.
///
/// Returns `None` when the runtime is unknown or zero.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn format_runtime(minutes: Option<u32>) -> Option<String> {
    let minutes = minutes.filter(|&m| m > 0)?;
    Some(format!("{}h {}min", minutes / 60, minutes % 60))
}

/// Formats an ISO `YYYY-MM-DD` release date.
///
/// Returns `None` for empty or unparsable input.
#[must_use]
pub fn format_release_date(date: &str, style: DateStyle, locale: DisplayLocale) -> Option<String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let month = usize::try_from(date.month0()).ok()?;
    let (day, year) = (date.day(), date.year());

    let formatted = match (locale, style) {
        (DisplayLocale::PtBr, DateStyle::Long) => {
            format!("{day} de {} de {year}", PT_BR_MONTHS.get(month)?)
        }
        (DisplayLocale::PtBr, DateStyle::Short) => {
            format!("{} de {year}", PT_BR_MONTHS_SHORT.get(month)?)
        }
        (DisplayLocale::EnUs, DateStyle::Long) => {
            format!("{} {day}, {year}", EN_US_MONTHS.get(month)?)
        }
        (DisplayLocale::EnUs, DateStyle::Short) => {
            format!("{} {year}", EN_US_MONTHS_SHORT.get(month)?)
        }
    };
    Some(formatted)
}

/// Formats a USD amount (budget, revenue) with thousands separators.
///
/// Returns `None` when the amount is unknown or zero.
#[must_use]
pub fn format_money(amount: Option<u64>, locale: DisplayLocale) -> Option<String> {
    let amount = amount.filter(|&a| a > 0)?;
    let digits = group_thousands(amount, locale.thousands_separator());
    Some(match locale {
        DisplayLocale::PtBr => format!("US$ {digits}"),
        DisplayLocale::EnUs => format!("${digits}"),
    })
}

/// Inserts `sep` every three digits (e.g. 169940 -> "169,940").
#[allow(clippy::arithmetic_side_effects)]
fn group_thousands(n: u64, sep: char) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(sep);
        }
        result.push(c);
    }
    result
}
