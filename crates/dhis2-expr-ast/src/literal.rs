//! Decoding of literal source text into typed values

use chrono::NaiveDate;
use dhis2_expr_diagnostics::{EXP0002, EXP0003, EXP0004, EXP0005, EXP0006, ExprError, Result};
use std::borrow::Cow;
use std::str::Chars;

/// Decode the escape sequences of a quoted string literal (quotes already
/// removed).
///
/// Text without a backslash is returned as is. Supported escapes are
/// `\uXXXX` (hex code point), `\ddd` (octal code point), `\b`, `\t`, `\n`,
/// `\f` and `\r`; any other escaped character stands for itself.
pub fn decode(raw: &str) -> Result<Cow<'_, str>> {
    if !raw.contains('\\') {
        return Ok(Cow::Borrowed(raw));
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = chars.next().ok_or_else(|| invalid_escape(raw))?;
        match escaped {
            'u' => out.push(utf16_escape(&mut chars, raw)?),
            '0'..='9' => {
                let mut digits = String::from(escaped);
                digits.push_str(&take(&mut chars, 2, raw)?);
                out.push(code_point(&digits, 8, raw)?);
            }
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'f' => out.push('\u{c}'),
            'r' => out.push('\r'),
            other => out.push(other),
        }
    }
    Ok(Cow::Owned(out))
}

fn take(chars: &mut Chars<'_>, n: usize, raw: &str) -> Result<String> {
    let taken: String = chars.by_ref().take(n).collect();
    if taken.chars().count() == n {
        Ok(taken)
    } else {
        Err(invalid_escape(raw))
    }
}

/// The character of a `\uXXXX` escape. A high surrogate must be followed
/// by the `\uXXXX` escape of a low surrogate and combines with it.
fn utf16_escape(chars: &mut Chars<'_>, raw: &str) -> Result<char> {
    let high = utf16_unit(chars, raw)?;
    let decoded = if (0xD800..0xDC00).contains(&high) {
        if chars.next() != Some('\\') || chars.next() != Some('u') {
            return Err(invalid_escape(raw));
        }
        let low = utf16_unit(chars, raw)?;
        char::decode_utf16([high, low]).next()
    } else {
        char::decode_utf16([high]).next()
    };
    decoded
        .and_then(std::result::Result::ok)
        .ok_or_else(|| invalid_escape(raw))
}

fn utf16_unit(chars: &mut Chars<'_>, raw: &str) -> Result<u16> {
    let digits = take(chars, 4, raw)?;
    u16::from_str_radix(&digits, 16).map_err(|_| invalid_escape(raw))
}

fn code_point(digits: &str, radix: u32, raw: &str) -> Result<char> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| invalid_escape(raw))
}

fn invalid_escape(raw: &str) -> ExprError {
    ExprError::literal(EXP0006, format!("Invalid escape sequence in '{raw}'"), raw)
}

/// Boolean literals are `true` or `false` in any letter case
pub fn parse_boolean(raw: &str) -> Result<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ExprError::literal(EXP0002, format!("Invalid boolean: '{raw}'"), raw))
    }
}

pub fn parse_number(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|e| ExprError::literal(EXP0003, format!("Invalid number '{raw}': {e}"), raw))
}

pub fn parse_integer(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|e| ExprError::literal(EXP0004, format!("Invalid integer '{raw}': {e}"), raw))
}

/// Argument positions are non-negative integers
pub fn parse_index(raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .map_err(|e| ExprError::literal(EXP0004, format!("Invalid argument index '{raw}': {e}"), raw))
}

/// Dates use the ISO `YYYY-MM-DD` form
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ExprError::literal(EXP0005, format!("Invalid date '{raw}': {e}"), raw))
}
