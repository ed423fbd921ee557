/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percent change from `base` to `current`. `None` if either is missing or `base` is zero.
pub fn pct_change(base: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (base, current) {
        (Some(b), Some(c)) if b != 0.0 => Some((c / b - 1.0) * 100.0),
        _ => None,
    }
}

/// Formats a dollar amount with thousands separators: `$1,234,568`.
pub fn format_dollars(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
