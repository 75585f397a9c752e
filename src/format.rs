//! Display formatting for raw API values.

use serde_json::Value;

/// Shown for absent or unreadable amounts.
pub const ZERO_CURRENCY: &str = "Q. 0.00";

/// Placeholder for absent optional fields.
pub const EMPTY_FIELD: &str = "-";

/// Format an amount as quetzales, e.g. `Q1,234.50`.
///
/// Numbers and numeric strings are accepted. Anything else, including
/// `null`, non-finite values and missing fields, yields [`ZERO_CURRENCY`].
pub fn format_currency(value: Option<&Value>) -> String {
    match value.and_then(amount) {
        Some(n) => quetzales(n),
        None => ZERO_CURRENCY.to_string(),
    }
}

fn amount(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn quetzales(n: f64) -> String {
    let fixed = format!("{:.2}", round_half_away(n.abs()));
    let (int_part, frac_part) = fixed
        .split_once('.')
        .unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.001 rounds to 0.00 and must not keep its sign
    let sign = if n < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}Q{grouped}.{frac_part}")
}

/// `{:.2}` rounds exact midpoints to even; amounts round them up instead.
/// The only cent midpoints a binary float can hold exactly are odd eighths
/// (x.125, x.375, x.625, x.875), so those are nudged past the midpoint.
fn round_half_away(abs: f64) -> f64 {
    let eighths = abs * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        abs + 0.001
    } else {
        abs
    }
}

/// Display category of a free-text status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Completed,
    Suspended,
    InProcess,
    Active,
}

impl StatusClass {
    /// CSS-style class name used by the backend's web page.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusClass::Completed => "status-completado",
            StatusClass::Suspended => "status-suspendido",
            StatusClass::InProcess => "status-proceso",
            StatusClass::Active => "status-activo",
        }
    }
}

/// Classify a status by case-insensitive substring, first match wins:
/// activo/complet, then suspend, then proceso/plan, else active.
/// An absent or empty status is in process.
pub fn status_class(status: Option<&str>) -> StatusClass {
    let Some(status) = status.filter(|s| !s.is_empty()) else {
        return StatusClass::InProcess;
    };

    let lower = status.to_lowercase();
    if lower.contains("activo") || lower.contains("complet") {
        StatusClass::Completed
    } else if lower.contains("suspend") {
        StatusClass::Suspended
    } else if lower.contains("proceso") || lower.contains("plan") {
        StatusClass::InProcess
    } else {
        StatusClass::Active
    }
}

pub fn or_dash(field: Option<&str>) -> String {
    field.unwrap_or(EMPTY_FIELD).to_string()
}
