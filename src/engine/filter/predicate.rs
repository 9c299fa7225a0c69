use chrono::NaiveDate;

use super::spec::{DateRange, NumberRange};

/// True iff `allowed` is absent or empty, or contains `value`.
pub fn matches_categorical(value: &str, allowed: Option<&[String]>) -> bool {
    match allowed {
        None => true,
        Some(a) if a.is_empty() => true,
        Some(a) => a.iter().any(|v| v == value),
    }
}

/// Inclusive bounds check. A range with `min > max` matches nothing.
pub fn in_numeric_range(value: f64, range: Option<&NumberRange>) -> bool {
    let Some(range) = range else {
        return true;
    };
    if let Some(min) = range.min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = range.max {
        if value > max {
            return false;
        }
    }
    true
}

/// Day-granular bounds check; time of day on the range ends is ignored.
pub fn in_date_range(date: NaiveDate, range: Option<&DateRange>) -> bool {
    let Some(range) = range else {
        return true;
    };
    if range.start().is_none() && range.end().is_none() {
        return true;
    }
    if let Some(start) = range.start() {
        if date < start.date() {
            return false;
        }
    }
    if !range.no_end() {
        if let Some(end) = range.end() {
            if date > end.date() {
                return false;
            }
        }
    }
    true
}
