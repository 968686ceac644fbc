use super::*;
use chrono::TimeZone;

fn evening_show() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 19, 0, 0).unwrap()
}

#[test]
fn formats_dates_per_language() {
    assert_eq!(format_date(&evening_show(), Language::Fr), "15 juin 2025");
    assert_eq!(format_date(&evening_show(), Language::En), "June 15, 2025");
}

#[test]
fn formats_date_times_per_language() {
    assert_eq!(
        format_date_time(&evening_show(), Language::Fr),
        "15 juin 2025 à 19:00"
    );
    assert_eq!(
        format_date_time(&evening_show(), Language::En),
        "June 15, 2025 at 07:00 PM"
    );
}

#[test]
fn formats_cfa_francs() {
    assert_eq!(
        format_currency(15_000, DEFAULT_CURRENCY, Language::Fr),
        "15\u{202f}000\u{a0}FCFA"
    );
    assert_eq!(
        format_currency(15_000, DEFAULT_CURRENCY, Language::En),
        "FCFA\u{a0}15,000"
    );
}

#[test]
fn symbol_currencies_are_prefixed_without_space_in_english() {
    assert_eq!(format_currency(1_500, "USD", Language::En), "$1,500");
    assert_eq!(format_currency(1_500, "EUR", Language::Fr), "1\u{202f}500\u{a0}€");
}

#[test]
fn groups_large_and_small_amounts() {
    assert_eq!(group_digits(0, ','), "0");
    assert_eq!(group_digits(999, ','), "999");
    assert_eq!(group_digits(1_234_567, ','), "1,234,567");
}
