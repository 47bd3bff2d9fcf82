//! Minimal escaping and quote selection for string and bytes literals.
//!
//! Text strings keep every printable code point as is and use `\n`, `\r`,
//! `\t` mnemonics; bytes keep only printable 7-bit characters. Everything
//! else becomes `\xHH`, `\uHHHH` or `\UHHHHHHHH`. The active quote and the
//! backslash are always escaped.

use std::fmt::Write;

/// Pick the quote that avoids escaping: `'` only when the data contains `"`
/// but no `'`, otherwise `"`.
pub fn choose_quote(units: impl IntoIterator<Item = u32>) -> char {
    let mut has_double = false;
    let mut has_single = false;
    for u in units {
        match u {
            0x22 => has_double = true,
            0x27 => has_single = true,
            _ => {}
        }
        if has_double && has_single {
            break;
        }
    }
    if has_double && !has_single { '\'' } else { '"' }
}

/// Append the shortest escape sequence for `code_point` to `out`.
///
/// `is_text` selects text-string rules; otherwise `code_point` is a byte
/// value and only printable 7-bit characters pass through.
pub fn push_escaped(out: &mut String, code_point: u32, quote: char, is_text: bool) {
    let c = char::from_u32(code_point);

    if let Some(c) = c {
        if c == quote || c == '\\' {
            out.push('\\');
            out.push(c);
            return;
        }
        if (' '..='~').contains(&c) {
            out.push(c);
            return;
        }
        if is_text {
            match c {
                '\n' => return out.push_str("\\n"),
                '\r' => return out.push_str("\\r"),
                '\t' => return out.push_str("\\t"),
                c if is_print(c) => return out.push(c),
                _ => {}
            }
        }
    }

    // `write!` into a String cannot fail.
    let _ = match code_point {
        0..0x100 => write!(out, "\\x{code_point:02x}"),
        0x100..0x10000 => write!(out, "\\u{code_point:04x}"),
        _ => write!(out, "\\U{code_point:08x}"),
    };
}

/// Escape a single code point; see [`push_escaped`].
pub fn escape(code_point: u32, quote: char, is_text: bool) -> String {
    let mut out = String::new();
    push_escaped(&mut out, code_point, quote, is_text);
    out
}

/// Quoted string literal: `"foo"`, `'say "hi"'`.
pub fn quote_string(s: &str) -> String {
    let quote = choose_quote(s.chars().map(u32::from));
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        push_escaped(&mut out, u32::from(c), quote, true);
    }
    out.push(quote);
    out
}

/// Text string always wrapped in double quotes, whatever it contains.
pub fn double_quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        push_escaped(&mut out, u32::from(c), '"', true);
    }
    out.push('"');
    out
}

/// Bytes literal with `b` prefix: `b"abc\x01"`.
pub fn quote_bytes(bytes: &[u8]) -> String {
    let quote = choose_quote(bytes.iter().map(|&b| u32::from(b)));
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);
    for &b in bytes {
        push_escaped(&mut out, u32::from(b), quote, false);
    }
    out.push(quote);
    out
}

/// Bytes as readable text without surrounding quotes. Quotes and backslashes
/// are left alone since nothing delimits the result.
pub fn readable_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if (0x20..0x7f).contains(&b) {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "\\x{b:02x}");
        }
    }
    out
}

/// Printable in the sense of letters, marks, numbers, punctuation, symbols
/// and the ASCII space. Unassigned code points are treated as printable.
pub(crate) fn is_print(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    let cp = u32::from(c);
    let noncharacter = (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE;
    let private_use =
        (0xE000..=0xF8FF).contains(&cp) || (0xF0000..=0xFFFFD).contains(&cp) || (0x100000..=0x10FFFD).contains(&cp);
    !(noncharacter || private_use || is_format(cp))
}

/// General category Cf.
fn is_format(cp: u32) -> bool {
    matches!(
        cp,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
    )
}
