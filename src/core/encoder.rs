//! logfmt value encoding
//!
//! Text goes through a two-path scheme. Clean text (no `=`, space, `"` or
//! invalid UTF-8) is appended as-is after a single scan. Anything else is
//! quoted and escaped, copying unescaped runs in one append each.

use super::fields::FieldValue;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Written in place of a value whose formatter returned an error.
pub const FMT_ERROR_MARKER: &str = "!FMT_ERROR";

/// `fmt::Write` adapter appending to a byte buffer.
///
/// Formatting through `fmt::Write` lets a failing `Display` impl surface as
/// `fmt::Error` instead of an io error or panic.
pub(crate) struct ByteWriter<'a>(pub(crate) &'a mut Vec<u8>);

impl fmt::Write for ByteWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

/// True if `s` must be quoted before it can appear as a key or value.
#[inline]
pub fn needs_quoting(s: &[u8]) -> bool {
    s.iter().any(|&b| b == b'=' || b == b' ' || b == b'"') || std::str::from_utf8(s).is_err()
}

#[inline]
fn str_needs_quoting(s: &str) -> bool {
    s.bytes().any(|b| b == b'=' || b == b' ' || b == b'"')
}

/// Append `s`, quoting it if needed.
#[inline]
pub fn write_str(buf: &mut Vec<u8>, s: &str) {
    if str_needs_quoting(s) {
        write_quoted(buf, s.as_bytes());
    } else {
        buf.extend_from_slice(s.as_bytes());
    }
}

/// Append raw bytes, quoting them if needed.
#[inline]
pub fn write_bytes(buf: &mut Vec<u8>, s: &[u8]) {
    if needs_quoting(s) {
        write_quoted(buf, s);
    } else {
        buf.extend_from_slice(s);
    }
}

/// Append `s` wrapped in double quotes with escapes applied.
///
/// `\` and `"` are backslash-escaped, `\n` `\r` `\t` use their short forms,
/// other bytes below 0x20 become `\u00XX`, and every byte of an invalid
/// UTF-8 sequence becomes `\ufffd`.
pub fn write_quoted(buf: &mut Vec<u8>, s: &[u8]) {
    buf.reserve(s.len() + 2);
    buf.push(b'"');

    let mut start = 0;
    let mut i = 0;
    while i < s.len() {
        let b = s[i];
        if b < 0x80 {
            if b >= 0x20 && b != b'\\' && b != b'"' {
                i += 1;
                continue;
            }
            buf.extend_from_slice(&s[start..i]);
            match b {
                b'\\' | b'"' => buf.extend_from_slice(&[b'\\', b]),
                b'\n' => buf.extend_from_slice(b"\\n"),
                b'\r' => buf.extend_from_slice(b"\\r"),
                b'\t' => buf.extend_from_slice(b"\\t"),
                _ => buf.extend_from_slice(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX[(b >> 4) as usize],
                    HEX[(b & 0xf) as usize],
                ]),
            }
            i += 1;
            start = i;
            continue;
        }

        match utf8_char_width(&s[i..]) {
            Some(width) => i += width,
            None => {
                buf.extend_from_slice(&s[start..i]);
                buf.extend_from_slice(b"\\ufffd");
                i += 1;
                start = i;
            }
        }
    }

    buf.extend_from_slice(&s[start..]);
    buf.push(b'"');
}

/// Width of the valid multi-byte UTF-8 character at the start of `s`.
fn utf8_char_width(s: &[u8]) -> Option<usize> {
    let width = match s[0] {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let candidate = s.get(..width)?;
    std::str::from_utf8(candidate).ok().map(|_| width)
}

/// Append the logfmt form of `value`.
pub fn write_value(buf: &mut Vec<u8>, value: &FieldValue, timestamp_format: &TimestampFormat) {
    match value {
        FieldValue::String(s) => write_str(buf, s),
        FieldValue::Bytes(b) => write_bytes(buf, b),
        FieldValue::Int(i) => write_int(buf, *i),
        FieldValue::Float32(v) => write_float(buf, *v, v.is_nan(), v.is_infinite()),
        FieldValue::Float64(v) => write_float(buf, *v, v.is_nan(), v.is_infinite()),
        FieldValue::Display(d) => write_formatted(buf, |out| write!(ByteWriter(out), "{}", d)),
        FieldValue::Debug(d) => write_formatted(buf, |out| write!(ByteWriter(out), "{:?}", d)),
        FieldValue::Timestamp(t) => write_timestamp(buf, timestamp_format, t),
    }
}

/// Append a float in shortest round-trip decimal form.
///
/// Non-finite values are written as `NaN`, `+Inf` and `-Inf`.
fn write_float<F>(buf: &mut Vec<u8>, value: F, nan: bool, infinite: bool)
where
    F: fmt::Display + PartialOrd + Default,
{
    if nan {
        buf.extend_from_slice(b"NaN");
    } else if infinite {
        let sign: &[u8] = if value > F::default() { b"+Inf" } else { b"-Inf" };
        buf.extend_from_slice(sign);
    } else {
        write_formatted(buf, |out| write!(ByteWriter(out), "{}", value));
    }
}

/// Append preformatted text, quoting it if needed.
pub fn write_args(buf: &mut Vec<u8>, args: fmt::Arguments<'_>) {
    write_formatted(buf, |out| ByteWriter(out).write_fmt(args));
}

/// Append a timestamp rendered with `format`, quoting it if needed.
pub fn write_timestamp(buf: &mut Vec<u8>, format: &TimestampFormat, at: &DateTime<Utc>) {
    write_formatted(buf, |out| format.write_to(out, at));
}

/// Append a signed integer in minimal decimal form.
pub fn write_int(buf: &mut Vec<u8>, value: i64) {
    let mut digits = [0u8; 20];
    let mut pos = digits.len();
    let mut n = value.unsigned_abs();
    loop {
        pos -= 1;
        digits[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if value < 0 {
        buf.push(b'-');
    }
    buf.extend_from_slice(&digits[pos..]);
}

/// Run `format` against the tail of `buf`, then quote what it produced if needed.
///
/// The clean case costs no extra allocation; only output that needs quoting
/// is split off and re-encoded.
fn write_formatted<F>(buf: &mut Vec<u8>, format: F)
where
    F: FnOnce(&mut Vec<u8>) -> fmt::Result,
{
    let start = buf.len();
    if format(buf).is_err() {
        buf.truncate(start);
        buf.extend_from_slice(FMT_ERROR_MARKER.as_bytes());
        return;
    }
    if needs_quoting(&buf[start..]) {
        let raw = buf.split_off(start);
        write_quoted(buf, &raw);
    }
}
