// src/process/normalize.rs

use crate::error::{Result, ScrapeError};

/// `"R$ 1.234,56"` → `"1234.56"`.
///
/// Drops the currency token, then turns the Brazilian thousands and decimal
/// separators into a plain decimal string. Only a single space separates the
/// currency from the amount.
pub fn normalize_currency(label: &str, value: &str) -> Result<String> {
    let amount = value
        .split(' ')
        .nth(1)
        .ok_or_else(|| malformed(label, value))?;
    Ok(amount.replace('.', "").replace(',', "."))
}

/// `"2020 / 03"` → `("2020", "03")`, in source order.
pub fn split_reference<'a>(label: &str, value: &'a str) -> Result<(&'a str, &'a str)> {
    let mut parts = value.split(" / ");
    match (parts.next(), parts.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(malformed(label, value)),
    }
}

fn malformed(label: &str, value: &str) -> ScrapeError {
    ScrapeError::MalformedField {
        label: label.to_string(),
        value: value.to_string(),
    }
}
