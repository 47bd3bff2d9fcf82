//! Float text forms shared by the dialects.

/// Shortest round-trip decimal.
///
/// Plain notation while the decimal exponent is in `[-4, 6)`, scientific
/// with a signed two-digit-minimum exponent otherwise: `1.23`, `1e+06`,
/// `5e-324`. Callers handle NaN and infinities.
pub(crate) fn shortest_f64(v: f64) -> String {
    shortest(format!("{v:e}"), || format!("{v}"))
}

/// Same as [`shortest_f64`] but with the digits of the 32-bit value.
pub(crate) fn shortest_f32(v: f32) -> String {
    shortest(format!("{v:e}"), || format!("{v}"))
}

fn shortest(scientific: String, plain: impl FnOnce() -> String) -> String {
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return scientific;
    };
    if (-4..6).contains(&exp) {
        return plain();
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

/// `NaN`, `+Inf` or `-Inf`; `None` for finite values.
pub(crate) fn non_finite(v: f64) -> Option<&'static str> {
    if v.is_nan() {
        Some("NaN")
    } else if v.is_infinite() {
        Some(if v > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        None
    }
}

/// Fixed point with six fraction digits.
pub(crate) fn fixed6(v: f64) -> String {
    match non_finite(v) {
        Some(s) => s.to_string(),
        None => format!("{v:.6}"),
    }
}
