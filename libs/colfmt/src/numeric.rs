use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════
//  Numeric
// ═══════════════════════════════════════════════════════════════

/// Fraction digits carried by NUMERIC.
pub const SCALE: u32 = 9;
/// Integer digits allowed by NUMERIC.
pub const PRECISION: u32 = 38;

const UNIT: i128 = 10i128.pow(SCALE);
const LIMIT: i128 = 10i128.pow(PRECISION);

/// Exact NUMERIC value: an integer scaled by 10^9.
///
/// Range is ±(10^38 − 1) × 10^-9, i.e. 29 integer and 9 fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeric(i128);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNumericError {
    #[error("empty numeric string")]
    Empty,
    #[error("invalid numeric syntax: {0:?}")]
    Syntax(String),
    #[error("more than 9 fraction digits: {0:?}")]
    Scale(String),
    #[error("numeric out of range: {0:?}")]
    Range(String),
}

impl Numeric {
    pub const ZERO: Numeric = Numeric(0);

    /// From a value already scaled by 10^9. `None` when out of range.
    pub fn from_scaled(scaled: i128) -> Option<Self> {
        (scaled.abs() < LIMIT).then_some(Self(scaled))
    }

    pub fn scaled(&self) -> i128 {
        self.0
    }

    pub fn from_i64(v: i64) -> Self {
        Self(i128::from(v) * UNIT)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Decimal string with trailing fraction zeros and a bare trailing
    /// point removed: `1234.56789`, `100`, `0`.
    pub fn to_trimmed_string(&self) -> String {
        let full = self.to_string();
        let trimmed = full.trim_end_matches('0');
        trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
    }
}

/// Always exactly nine fraction digits: `1234.567890000`.
impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let unit = UNIT.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:09}", abs / unit, abs % unit)
    }
}

impl FromStr for Numeric {
    type Err = ParseNumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseNumericError::Empty);
        }
        let (negative, body) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(ParseNumericError::Syntax(s.to_string()));
        }

        let frac_digits = frac_part.trim_end_matches('0');
        if frac_digits.len() > SCALE as usize {
            return Err(ParseNumericError::Scale(s.to_string()));
        }

        let int_digits = int_part.trim_start_matches('0');
        if int_digits.len() > (PRECISION - SCALE) as usize {
            return Err(ParseNumericError::Range(s.to_string()));
        }

        // At most 29 + 9 digits, so neither step can overflow i128.
        let mut scaled: i128 = 0;
        for b in int_digits.bytes().chain(frac_digits.bytes()) {
            scaled = scaled * 10 + i128::from(b - b'0');
        }
        scaled *= 10i128.pow(SCALE - frac_digits.len() as u32);

        Ok(Self(if negative { -scaled } else { scaled }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_string() {
        let n: Numeric = "1234.123456789".parse().unwrap();
        assert_eq!(n.to_string(), "1234.123456789");
        let n: Numeric = "1234.56789".parse().unwrap();
        assert_eq!(n.to_string(), "1234.567890000");
        assert_eq!(n.to_trimmed_string(), "1234.56789");
        let n: Numeric = "-0.5".parse().unwrap();
        assert_eq!(n.to_string(), "-0.500000000");
        assert_eq!(Numeric::from_i64(100).to_trimmed_string(), "100");
        assert_eq!(Numeric::ZERO.to_trimmed_string(), "0");
    }

    #[test]
    fn bounds() {
        let max = "99999999999999999999999999999.999999999";
        let n: Numeric = max.parse().unwrap();
        assert_eq!(n.to_string(), max);
        let min: Numeric = format!("-{max}").parse().unwrap();
        assert_eq!(min.to_string(), format!("-{max}"));
        assert_eq!(
            "100000000000000000000000000000".parse::<Numeric>(),
            Err(ParseNumericError::Range("100000000000000000000000000000".into()))
        );
        assert!(Numeric::from_scaled(10i128.pow(38)).is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<Numeric>(), Err(ParseNumericError::Empty));
        assert!(matches!("1.2.3".parse::<Numeric>(), Err(ParseNumericError::Syntax(_))));
        assert!(matches!("abc".parse::<Numeric>(), Err(ParseNumericError::Syntax(_))));
        assert!(matches!(".".parse::<Numeric>(), Err(ParseNumericError::Syntax(_))));
        assert!(matches!("0.1234567891".parse::<Numeric>(), Err(ParseNumericError::Scale(_))));
        assert_eq!("1.5000000000".parse::<Numeric>().unwrap().to_string(), "1.500000000");
    }
}
