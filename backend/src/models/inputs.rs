//! Calculator inputs and normalization
//!
//! The presentation layer hands over three raw values: monthly customers,
//! average order value, and returning customers. They arrive either as text
//! typed into a form or as loosely-typed numbers. Normalization never fails:
//! anything that cannot be read as a non-negative number becomes 0.
//!
//! `returning_customers > monthly_customers` is NOT corrected here. The
//! projection tolerates it and produces a retention rate above 100%.

use serde::{Deserialize, Serialize};

/// Normalized engine inputs
///
/// # Example
/// ```
/// use retention_roi_core_rs::CalculatorInputs;
///
/// let inputs = CalculatorInputs::from_raw("100", "2500.50", "20 customers");
/// assert_eq!(inputs.monthly_customers, 100);
/// assert_eq!(inputs.average_order_value, 2500.5);
/// assert_eq!(inputs.returning_customers, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatorInputs {
    /// Customers transacting per month
    pub monthly_customers: u64,

    /// Currency units per transaction (finite, >= 0)
    pub average_order_value: f64,

    /// Repeat buyers among `monthly_customers`
    pub returning_customers: u64,
}

impl CalculatorInputs {
    /// Build inputs from already-typed values
    ///
    /// `average_order_value` is passed through [`amount_from_f64`], so NaN,
    /// infinities and negatives become 0.
    pub fn new(monthly_customers: u64, average_order_value: f64, returning_customers: u64) -> Self {
        Self {
            monthly_customers,
            average_order_value: amount_from_f64(average_order_value),
            returning_customers,
        }
    }

    /// Build inputs from loosely-typed numbers (e.g. JSON or Python floats)
    pub fn from_f64(monthly_customers: f64, average_order_value: f64, returning_customers: f64) -> Self {
        Self {
            monthly_customers: count_from_f64(monthly_customers),
            average_order_value: amount_from_f64(average_order_value),
            returning_customers: count_from_f64(returning_customers),
        }
    }

    /// Build inputs from form text
    pub fn from_raw(monthly_customers: &str, average_order_value: &str, returning_customers: &str) -> Self {
        Self {
            monthly_customers: normalize_count(monthly_customers),
            average_order_value: normalize_amount(average_order_value),
            returning_customers: normalize_count(returning_customers),
        }
    }

    /// True when returning customers do not exceed monthly customers
    pub fn is_consistent(&self) -> bool {
        self.returning_customers <= self.monthly_customers
    }
}

/// Read a customer count from text
///
/// Uses the longest leading integer: `"42"` → 42, `"12abc"` → 12,
/// `"12.9"` → 12, `"-5"` → 0, `"abc"` → 0.
pub fn normalize_count(raw: &str) -> u64 {
    numeric_prefix(raw, false).map(count_from_f64).unwrap_or(0)
}

/// Read a money amount from text
///
/// Uses the longest leading decimal number: `"19.99"` → 19.99,
/// `"2.5e3"` → 2500, `"$20"` → 0, `"-1"` → 0.
pub fn normalize_amount(raw: &str) -> f64 {
    numeric_prefix(raw, true).map(amount_from_f64).unwrap_or(0.0)
}

/// Convert a float to a non-negative count, truncating any fraction
pub fn count_from_f64(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // `as` saturates at u64::MAX
    value.trunc() as u64
}

/// Clamp a float into the finite, non-negative domain
pub fn amount_from_f64(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        return 0.0;
    }
    value
}

/// Parse the longest numeric prefix of `raw` after leading whitespace
fn numeric_prefix(raw: &str, allow_fraction: bool) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if allow_fraction {
        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if digits > 0 || frac_end > frac_start {
                digits += frac_end - frac_start;
                end = frac_end;
            }
        }

        // Exponent only counts when followed by at least one digit
        if digits > 0 && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }
    }

    if digits == 0 {
        return None;
    }

    s[..end].parse::<f64>().ok()
}
