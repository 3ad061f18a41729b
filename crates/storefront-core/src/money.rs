//! Price display helpers

use rust_decimal::Decimal;

/// Card descriptions longer than this are cut with an ellipsis
pub const DESCRIPTION_MAX_CHARS: usize = 140;

/// Currency symbols used when formatting, keyed by upper-case ISO code
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("AUD", "A$"),
    ("CAD", "CA$"),
    ("EUR", "\u{20ac}"),
    ("GBP", "\u{a3}"),
    ("INR", "\u{20b9}"),
    ("JPY", "\u{a5}"),
    ("USD", "$"),
];

/// Format an amount given in the smallest currency unit.
///
/// The amount is divided by 100 and shown with two decimals and thousands
/// separators, prefixed by the currency symbol when one is known and by the
/// ISO code otherwise.
pub fn format_amount(unit_amount: i64, currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    let value = Decimal::new(unit_amount, 2);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let digits = group_thousands(&value.abs().round_dp(2).to_string());

    match CURRENCY_SYMBOLS.iter().find(|(iso, _)| *iso == code) {
        Some((_, symbol)) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{code}\u{a0}{digits}"),
    }
}

/// Shorten a description for a product card
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    let trimmed = description.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }

    let mut cut: String = trimmed.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('\u{2026}');
    cut
}

fn group_thousands(plain: &str) -> String {
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{grouped}.{fraction:0<2}")
}
