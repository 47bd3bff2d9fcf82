use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

// ═══════════════════════════════════════════════════════════════
//  Interval
// ═══════════════════════════════════════════════════════════════

/// INTERVAL value: months, days and nanoseconds kept apart, as the database
/// does, since none of them converts exactly into another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Interval {
    pub months: i32,
    pub days: i32,
    pub nanos: i128,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid interval {input:?}: {reason}")]
pub struct ParseIntervalError {
    input: String,
    reason: &'static str,
}

impl Interval {
    pub fn new(months: i32, days: i32, nanos: i128) -> Self {
        Self { months, days, nanos }
    }
}

/// Canonical ISO-8601 form: `P1Y2M3DT4H5M6.5S`.
///
/// Months split into years and months, nanoseconds into hours, minutes and
/// seconds. Zero parts are omitted; the zero interval is `P0Y`. The fraction
/// of a second has 3, 6 or 9 digits.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("P");
        let years = self.months / 12;
        let months = self.months % 12;
        if years != 0 {
            write!(out, "{years}Y")?;
        }
        if months != 0 {
            write!(out, "{months}M")?;
        }
        if self.days != 0 {
            write!(out, "{}D", self.days)?;
        }

        let hours = self.nanos / NANOS_PER_HOUR;
        let minutes = self.nanos % NANOS_PER_HOUR / NANOS_PER_MINUTE;
        let seconds = self.nanos % NANOS_PER_MINUTE / NANOS_PER_SECOND;
        let frac = self.nanos % NANOS_PER_SECOND;
        if self.nanos != 0 {
            out.push('T');
            if hours != 0 {
                write!(out, "{hours}H")?;
            }
            if minutes != 0 {
                write!(out, "{minutes}M")?;
            }
            if seconds != 0 || frac != 0 {
                if seconds == 0 && frac < 0 {
                    out.push_str("-0");
                } else {
                    write!(out, "{seconds}")?;
                }
                if frac != 0 {
                    let frac = frac.unsigned_abs();
                    if frac % 1_000_000 == 0 {
                        write!(out, ".{:03}", frac / 1_000_000)?;
                    } else if frac % 1_000 == 0 {
                        write!(out, ".{:06}", frac / 1_000)?;
                    } else {
                        write!(out, ".{frac:09}")?;
                    }
                }
                out.push('S');
            }
        }

        if out.len() == 1 {
            out.push_str("0Y");
        }
        f.write_str(&out)
    }
}

impl FromStr for Interval {
    type Err = ParseIntervalError;

    /// Accepts `P[nY][nM][nW][nD][T[nH][nM][n[.f]S]]`, each number optionally
    /// signed, with an optional leading `-` negating the whole interval.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParseIntervalError { input: s.to_string(), reason };

        let (negate, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let mut rest = rest.strip_prefix('P').ok_or_else(|| err("missing 'P' designator"))?;
        if rest.is_empty() {
            return Err(err("no components"));
        }

        let mut months: i128 = 0;
        let mut days: i128 = 0;
        let mut nanos: i128 = 0;
        let mut in_time = false;
        // Position of the last unit seen, to enforce Y M W D / H M S order.
        let mut last_rank = 0u8;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('T') {
                if in_time || after.is_empty() {
                    return Err(err("misplaced 'T' designator"));
                }
                in_time = true;
                rest = after;
                continue;
            }

            let (number, unit, after) = split_component(rest).ok_or_else(|| err("malformed component"))?;
            rest = after;

            let rank = match (in_time, unit) {
                (false, 'Y') => 1,
                (false, 'M') => 2,
                (false, 'W') => 3,
                (false, 'D') => 4,
                (true, 'H') => 5,
                (true, 'M') => 6,
                (true, 'S') => 7,
                _ => return Err(err("unknown unit")),
            };
            if rank <= last_rank {
                return Err(err("components out of order"));
            }
            last_rank = rank;

            let (whole, frac) = parse_number(number).ok_or_else(|| err("bad number"))?;
            if frac != 0 && unit != 'S' {
                return Err(err("fraction allowed only on seconds"));
            }
            match rank {
                1 => months += whole * 12,
                2 => months += whole,
                3 => days += whole * 7,
                4 => days += whole,
                5 => nanos += whole * NANOS_PER_HOUR,
                6 => nanos += whole * NANOS_PER_MINUTE,
                _ => nanos += whole * NANOS_PER_SECOND + frac,
            }
        }

        if negate {
            months = -months;
            days = -days;
            nanos = -nanos;
        }
        Ok(Self {
            months: i32::try_from(months).map_err(|_| err("months out of range"))?,
            days: i32::try_from(days).map_err(|_| err("days out of range"))?,
            nanos,
        })
    }
}

/// Split `"-12.5S..."` into (`"-12.5"`, `'S'`, `"..."`).
fn split_component(s: &str) -> Option<(&str, char, &str)> {
    let end = s.find(|c: char| c.is_ascii_alphabetic())?;
    let unit = s[end..].chars().next()?;
    Some((&s[..end], unit, &s[end + 1..]))
}

/// Parse a signed decimal with at most 9 fraction digits into
/// (whole part, fraction in nanoseconds), both carrying the sign.
fn parse_number(s: &str) -> Option<(i128, i128)> {
    let (negative, body) = match *s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (whole, frac) = match body.split_once(['.', ',']) {
        Some((w, f)) => (w, f),
        None => (body, ""),
    };
    if whole.is_empty() || whole.len() > 20 || frac.len() > 9 {
        return None;
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: i128 = whole.parse().ok()?;
    let frac: i128 = if frac.is_empty() {
        0
    } else {
        frac.parse::<i128>().ok()? * 10i128.pow(9 - frac.len() as u32)
    };
    Some(if negative { (-whole, -frac) } else { (whole, frac) })
}
