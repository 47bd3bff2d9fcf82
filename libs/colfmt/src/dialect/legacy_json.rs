//! JSON text as the legacy CLI prints it: the document decoded into generic
//! values and re-marshalled.
//!
//! Every number goes through a 64-bit float (`1.0` prints `1`, large
//! integers lose digits), and `<`, `>`, `&`, U+2028 and U+2029 are written
//! as `\u` escapes. Object keys come out sorted.

use std::io;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::Formatter;

use crate::error::FormatError;
use crate::types::Type;

pub(crate) fn to_legacy_json(value: &Value) -> Result<String, FormatError> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, LegacyFormatter);
    value
        .serialize(&mut ser)
        .map_err(|e| FormatError::decode(&Type::Json, e.to_string()))?;
    String::from_utf8(out).map_err(|e| FormatError::decode(&Type::Json, e.to_string()))
}

struct LegacyFormatter;

impl Formatter for LegacyFormatter {
    fn write_i64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: i64) -> io::Result<()> {
        writer.write_all(float_text(value as f64).as_bytes())
    }

    fn write_u64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: u64) -> io::Result<()> {
        writer.write_all(float_text(value as f64).as_bytes())
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_text(value).as_bytes())
    }

    fn write_number_str<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: &str) -> io::Result<()> {
        match value.parse::<f64>() {
            Ok(f) if f.is_finite() => writer.write_all(float_text(f).as_bytes()),
            _ => writer.write_all(value.as_bytes()),
        }
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escape = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Shortest float text, plain unless the magnitude is below 1e-6 or at
/// least 1e21: `1`, `0.000001`, `1e-7`, `1e+21`.
fn float_text(v: f64) -> String {
    let abs = v.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let scientific = format!("{v:e}");
        if let Some((mantissa, exp)) = scientific.split_once('e') {
            if let Ok(exp) = exp.parse::<i32>() {
                return if exp < 0 {
                    format!("{mantissa}e-{}", exp.unsigned_abs())
                } else {
                    format!("{mantissa}e+{exp:02}")
                };
            }
        }
        return scientific;
    }
    format!("{v}")
}
