//! Internal helpers for record validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! parsing of stored values and input normalization so every record kind
//! enforces the same rules.

use chrono::NaiveDate;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, MoneyCents, ResultEngine};

/// Storage format for calendar dates.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an amount read back from the store.
///
/// Anything that is not a non-negative decimal with at most two fractional
/// digits is reported as a malformed record.
pub(crate) fn parse_stored_amount(label: &str, id: &str, raw: &str) -> ResultEngine<MoneyCents> {
    let amount = raw.parse::<MoneyCents>().map_err(|_| {
        EngineError::MalformedRecord(format!("{label} {id}: invalid amount '{raw}'"))
    })?;
    if amount.is_negative() {
        return Err(EngineError::MalformedRecord(format!(
            "{label} {id}: negative amount '{raw}'"
        )));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date read back from the store.
pub(crate) fn parse_stored_date(label: &str, id: &str, raw: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::MalformedRecord(format!("{label} {id}: invalid date '{raw}'")))
}

pub(crate) fn format_stored_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reject negative amounts on input.
pub(crate) fn ensure_non_negative(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::Validation(format!(
            "{label} amount must be >= 0"
        )));
    }
    Ok(())
}

/// Trim a required field; empty input is a validation error.
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional field; blank input becomes `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Collapse internal whitespace for display (`"  Office   rent "` → `"Office rent"`).
pub(crate) fn normalize_display(input: &str) -> Option<String> {
    let out = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if out.is_empty() { None } else { Some(out) }
}

/// Comparison key: NFKD, diacritics stripped, lowercase, punctuation folded
/// into single spaces.
pub(crate) fn normalize_key(input: &str) -> Option<String> {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_amount_rejects_negative_and_garbage() {
        assert_eq!(
            parse_stored_amount("payable", "p1", "10.50").unwrap(),
            MoneyCents::new(1050)
        );
        assert!(matches!(
            parse_stored_amount("payable", "p1", "-1"),
            Err(EngineError::MalformedRecord(_))
        ));
        assert!(matches!(
            parse_stored_amount("payable", "p1", "abc"),
            Err(EngineError::MalformedRecord(_))
        ));
    }

    #[test]
    fn stored_date_round_trips() {
        let date = parse_stored_date("transaction", "t1", "2024-02-29").unwrap();
        assert_eq!(format_stored_date(date), "2024-02-29");
        assert!(parse_stored_date("transaction", "t1", "2023-02-29").is_err());
        assert!(parse_stored_date("transaction", "t1", "29/02/2024").is_err());
    }

    #[test]
    fn key_strips_diacritics_and_case() {
        assert_eq!(normalize_key("Alimentação").as_deref(), Some("alimentacao"));
        assert_eq!(normalize_key("  Software/Sistemas ").as_deref(), Some("software sistemas"));
        assert_eq!(normalize_key("  !! "), None);
        assert_eq!(normalize_display("  Office   rent ").as_deref(), Some("Office rent"));
    }
}
