use crate::error::{EngineError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use inspection_types::Quarter;
use std::fmt::Write;

pub const DEFAULT_DAILY_LABEL: &str = "%b %-d";

/// Parse a daily series key, which must be ISO `YYYY-MM-DD`
pub fn parse_iso_date(key: &str) -> Result<NaiveDate> {
    // chrono tolerates padding spaces and signs, which break lexicographic order
    let bytes = key.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(EngineError::invalid_data("daily date", key));
    }

    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|_| EngineError::invalid_data("daily date", key))?;
    if date.format("%Y-%m-%d").to_string() != key {
        return Err(EngineError::invalid_data("daily date", key));
    }
    Ok(date)
}

pub fn parse_quarter(label: &str) -> Result<Quarter> {
    Quarter::from_label(label.trim()).ok_or_else(|| EngineError::invalid_data("quarter", label))
}

/// Check a strftime pattern before it is used for labels
pub fn validate_label_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(EngineError::invalid_data("daily label format", pattern));
    }
    Ok(())
}

/// Short label for a chart axis, `Mar 1` with the default pattern
pub fn date_label(date: NaiveDate, pattern: &str) -> Result<String> {
    validate_label_format(pattern)?;
    let mut label = String::new();
    write!(label, "{}", date.format(pattern))
        .map_err(|_| EngineError::invalid_data("daily label format", pattern))?;
    Ok(label)
}
