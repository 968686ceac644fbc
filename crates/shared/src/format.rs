use chrono::{DateTime, Locale, Utc};

use crate::i18n::Language;

pub const DEFAULT_CURRENCY: &str = "XAF";

const FR_GROUP_SEPARATOR: char = '\u{202f}';
const NO_BREAK_SPACE: char = '\u{a0}';

pub fn format_date(date: &DateTime<Utc>, language: Language) -> String {
    match language {
        Language::Fr => date.format_localized("%-d %B %Y", Locale::fr_FR).to_string(),
        Language::En => date.format("%B %-d, %Y").to_string(),
    }
}

pub fn format_date_time(date: &DateTime<Utc>, language: Language) -> String {
    match language {
        Language::Fr => format!(
            "{} à {}",
            format_date(date, language),
            date.format("%H:%M")
        ),
        Language::En => format!(
            "{} at {}",
            format_date(date, language),
            date.format("%I:%M %p")
        ),
    }
}

/// Whole-unit currency amount; `currency` is an ISO code.
pub fn format_currency(amount: u64, currency: &str, language: Language) -> String {
    let symbol = currency_symbol(currency);
    match language {
        Language::Fr => format!(
            "{}{NO_BREAK_SPACE}{symbol}",
            group_digits(amount, FR_GROUP_SEPARATOR)
        ),
        Language::En => {
            let digits = group_digits(amount, ',');
            if symbol.chars().all(char::is_alphabetic) {
                format!("{symbol}{NO_BREAK_SPACE}{digits}")
            } else {
                format!("{symbol}{digits}")
            }
        }
    }
}

fn currency_symbol(currency: &str) -> &str {
    match currency {
        "XAF" => "FCFA",
        "EUR" => "€",
        "USD" => "$",
        other => other,
    }
}

fn group_digits(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
