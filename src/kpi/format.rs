//! Number formatting for KPI cards.

/// Percentage change from `previous` to `current`, rounded to one decimal.
/// Zero when there is no positive baseline to compare against.
pub fn trend_percent(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        return 0.0;
    }
    round1((current - previous) / previous * 100.0)
}

/// `"{currency} {amount}"` with thousands separators and no decimals.
pub fn fmt_money(amount: f64, currency: &str) -> String {
    format!("{} {}", currency, group_thousands(amount.round() as i64))
}

/// One-decimal percentage, e.g. `"92.5%"`.
pub fn fmt_percent(value: f64) -> String {
    format!("{:.1}%", round1(value))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
