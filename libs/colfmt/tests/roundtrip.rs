//! Literal output parses back to the value it came from.

use chrono::{DateTime, Utc};
use colfmt::TypedValue;
use colfmt::ctor::{bytes_value, float32_value, float64_value, int64_value, numeric_value, string_value, timestamp_value};
use colfmt::dialect::literal;
use colfmt::interval::Interval;
use colfmt::numeric::Numeric;
use proptest::prelude::*;

/// Reads back a quoted string or bytes literal as code points (bytes are
/// code points below 256).
fn unquote(literal: &str) -> Vec<u32> {
    let body = literal.strip_prefix('b').unwrap_or(literal);
    let quote = body.chars().next().expect("opening quote");
    assert!(quote == '"' || quote == '\'', "bad quote in {literal:?}");
    let inner = body
        .strip_prefix(quote)
        .and_then(|s| s.strip_suffix(quote))
        .expect("closing quote");

    let mut out = Vec::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        assert!(c != quote, "unescaped quote in {literal:?}");
        if c != '\\' {
            out.push(u32::from(c));
            continue;
        }
        let esc = chars.next().expect("escape");
        let hex_len = match esc {
            'n' => {
                out.push(u32::from('\n'));
                continue;
            }
            'r' => {
                out.push(u32::from('\r'));
                continue;
            }
            't' => {
                out.push(u32::from('\t'));
                continue;
            }
            '\\' | '"' | '\'' => {
                out.push(u32::from(esc));
                continue;
            }
            'x' => 2,
            'u' => 4,
            'U' => 8,
            other => panic!("unknown escape \\{other} in {literal:?}"),
        };
        let hex: String = chars.by_ref().take(hex_len).collect();
        out.push(u32::from_str_radix(&hex, 16).expect("hex escape"));
    }
    out
}

/// Payload of a `KEYWORD "..."` literal.
fn keyword_payload<'a>(text: &'a str, keyword: &str) -> &'a str {
    text.strip_prefix(keyword)
        .and_then(|s| s.strip_prefix(" \""))
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or_else(|| panic!("not a {keyword} literal: {text}"))
}

fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO | prop::num::f64::NEGATIVE
}

const MAX_SCALED: i128 = 10i128.pow(38) - 1;
// 0001-01-01T00:00:00Z ..= 9999-12-31T23:59:59Z
const MIN_UNIX: i64 = -62_135_596_800;
const MAX_UNIX: i64 = 253_402_300_799;

proptest! {
    #[test]
    fn strings_round_trip(s in any::<String>()) {
        let text = literal::format_column(&string_value(s.clone())).unwrap();
        let expected: Vec<u32> = s.chars().map(u32::from).collect();
        prop_assert_eq!(unquote(&text), expected);
    }

    #[test]
    fn bytes_round_trip(b in prop::collection::vec(any::<u8>(), 0..64)) {
        let text = literal::format_column(&bytes_value(&b)).unwrap();
        prop_assert!(text.starts_with('b'));
        prop_assert!(text.is_ascii());
        let expected: Vec<u32> = b.iter().map(|&x| u32::from(x)).collect();
        prop_assert_eq!(unquote(&text), expected);
    }

    #[test]
    fn floats_round_trip(v in finite_f64()) {
        prop_assume!(v.is_finite());
        let text = literal::format_column(&float64_value(v)).unwrap();
        let back: f64 = text.parse().unwrap();
        prop_assert_eq!(back.to_bits(), v.to_bits());
    }

    #[test]
    fn int64_round_trip(v in any::<i64>()) {
        let text = literal::format_column(&int64_value(v)).unwrap();
        prop_assert_eq!(text.parse::<i64>().unwrap(), v);
    }

    #[test]
    fn floats_read_from_json_text_round_trip(v in finite_f64()) {
        prop_assume!(v.is_finite());
        for wire in [format!("{v:e}"), format!("{v:.16e}")] {
            let text = format!(r#"{{"type":{{"code":"FLOAT64"}},"value":{wire}}}"#);
            let value: TypedValue = serde_json::from_str(&text).unwrap();
            let literal = literal::format_column(&value).unwrap();
            let back: f64 = literal.parse().unwrap();
            prop_assert_eq!(back.to_bits(), v.to_bits(), "wire {} -> literal {}", wire, literal);
        }
    }

    #[test]
    fn float32_round_trip(
        v in prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO | prop::num::f32::NEGATIVE
    ) {
        prop_assume!(v.is_finite());
        let text = literal::format_column(&float32_value(v)).unwrap();
        let payload = text
            .strip_prefix("CAST(")
            .and_then(|s| s.strip_suffix(" AS FLOAT32)"))
            .unwrap_or_else(|| panic!("not a FLOAT32 cast: {text}"));
        let back: f32 = payload.parse().unwrap();
        prop_assert_eq!(back.to_bits(), v.to_bits());
    }

    #[test]
    fn numeric_round_trip(scaled in -MAX_SCALED..=MAX_SCALED) {
        let n = Numeric::from_scaled(scaled).unwrap();
        let text = literal::format_column(&numeric_value(n)).unwrap();
        let back: Numeric = keyword_payload(&text, "NUMERIC").parse().unwrap();
        prop_assert_eq!(back, n);
    }

    #[test]
    fn interval_text_round_trip(
        months in any::<i32>(),
        days in any::<i32>(),
        nanos in -10i128.pow(20)..10i128.pow(20),
    ) {
        let i = Interval::new(months, days, nanos);
        let back: Interval = i.to_string().parse().unwrap();
        prop_assert_eq!(back, i);
    }

    #[test]
    fn timestamp_round_trip(secs in MIN_UNIX..=MAX_UNIX, nanos in 0u32..1_000_000_000) {
        let ts = DateTime::<Utc>::from_timestamp(secs, nanos).unwrap();
        let text = literal::format_column(&timestamp_value(ts)).unwrap();
        let back = DateTime::parse_from_rfc3339(keyword_payload(&text, "TIMESTAMP")).unwrap();
        prop_assert_eq!(back, ts);
    }
}
