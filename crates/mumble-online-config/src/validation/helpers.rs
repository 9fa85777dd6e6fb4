//! Shared validation helpers used by the section validators.

/// Push an error if `value` is outside `[min, max]`. NaN is always out of range.
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is not strictly positive or exceeds `max`.
pub(crate) fn validate_positive_f64(errors: &mut Vec<String>, name: &str, value: f64, max: f64) {
    if !(value > 0.0 && value <= max) {
        errors.push(format!("{name} = {value} is out of range (0, {max}]"));
    }
}

pub(crate) fn validate_port(errors: &mut Vec<String>, name: &str, value: u16) {
    if value == 0 {
        errors.push(format!("{name} must not be 0"));
    }
}

pub(crate) fn validate_not_blank(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}
