//! JSON serializer.
//!
//! Printing goes through a [`Sink`]: a growable `Vec<u8>` for the managed
//! and capacity-hinted modes, or a caller-supplied slice for allocation-free
//! output. Pretty form matches the classic tab style: objects break across
//! lines with one tab per depth and a tab after each colon, arrays stay on
//! one line with a space after each comma.

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;

use crate::error::PrintError;
use crate::tracing_macros::trace;
use crate::tree::{Items, Members};
use crate::value::Value;

/// Starting capacity for the managed print modes.
const INITIAL_CAPACITY: usize = 256;

/// Print a value as compact JSON.
pub fn to_string(value: &Value<'_>) -> String {
    vec_to_string(to_vec(value))
}

/// Print a value as pretty JSON.
pub fn to_string_pretty(value: &Value<'_>) -> String {
    vec_to_string(to_vec_pretty(value))
}

/// Print a value into a buffer pre-sized to `capacity`, growing if the
/// estimate was short.
pub fn to_string_with_capacity(value: &Value<'_>, capacity: usize, pretty: bool) -> String {
    vec_to_string(print_to_vec(value, capacity, pretty))
}

/// Print a value as compact JSON bytes.
pub fn to_vec(value: &Value<'_>) -> Vec<u8> {
    print_to_vec(value, INITIAL_CAPACITY, false)
}

/// Print a value as pretty JSON bytes.
pub fn to_vec_pretty(value: &Value<'_>) -> Vec<u8> {
    print_to_vec(value, INITIAL_CAPACITY, true)
}

/// Print a value into a fixed-size buffer without allocating.
///
/// On success returns the printed text as a view into `buf`. When the output
/// does not fit, [`PrintError::BufferFull`] reports how many bytes were
/// written; the buffer holds a truncated byte prefix of the output.
pub fn to_slice<'buf>(
    value: &Value<'_>,
    buf: &'buf mut [u8],
    pretty: bool,
) -> Result<&'buf str, PrintError> {
    let mut sink = SliceSink { buf, written: 0 };
    let mut printer = Printer {
        out: &mut sink,
        pretty,
        depth: 0,
    };
    printer.print_value(value)?;
    let written = sink.written;
    let buf: &'buf [u8] = sink.buf;
    // the printer only emits `str` content and ASCII syntax
    Ok(core::str::from_utf8(&buf[..written]).unwrap())
}

fn print_to_vec(value: &Value<'_>, capacity: usize, pretty: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(capacity);
    let mut printer = Printer {
        out: &mut out,
        pretty,
        depth: 0,
    };
    match printer.print_value(value) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    trace!("printed {} bytes", out.len());
    out.shrink_to_fit();
    out
}

fn vec_to_string(bytes: Vec<u8>) -> String {
    // the printer only emits `str` content and ASCII syntax
    String::from_utf8(bytes).unwrap()
}

/// Where printed bytes go. `Vec` cannot fail; a fixed slice reports
/// overflow.
trait Sink {
    type Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
    fn put(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl Sink for Vec<u8> {
    type Error = Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn put(&mut self, byte: u8) -> Result<(), Infallible> {
        self.push(byte);
        Ok(())
    }
}

struct SliceSink<'buf> {
    buf: &'buf mut [u8],
    written: usize,
}

impl Sink for SliceSink<'_> {
    type Error = PrintError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), PrintError> {
        let end = self
            .written
            .checked_add(bytes.len())
            .filter(|&end| end <= self.buf.len())
            .ok_or(PrintError::BufferFull {
                written: self.written,
            })?;
        self.buf[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }

    fn put(&mut self, byte: u8) -> Result<(), PrintError> {
        self.write(&[byte])
    }
}

struct Printer<'s, S: Sink> {
    out: &'s mut S,
    pretty: bool,
    depth: usize,
}

impl<S: Sink> Printer<'_, S> {
    fn print_value(&mut self, value: &Value<'_>) -> Result<(), S::Error> {
        match value {
            Value::Null => self.out.write(b"null"),
            Value::Bool(true) => self.out.write(b"true"),
            Value::Bool(false) => self.out.write(b"false"),
            Value::Number(n) => self.print_number(*n),
            Value::String(s) => write_json_string(self.out, s),
            Value::Raw(s) => self.out.write(s.as_bytes()),
            Value::Array(items) => self.print_array(items),
            Value::Object(members) => self.print_object(members),
        }
    }

    /// JSON has no lexeme for non-finite doubles, so those print as `null`.
    /// A value that equals its saturated 32-bit integer mirror prints as
    /// that integer; everything else (including `-0.0`, whose sign would
    /// not survive the integer path) goes through shortest-round-trip
    /// formatting.
    fn print_number(&mut self, value: f64) -> Result<(), S::Error> {
        if !value.is_finite() {
            return self.out.write(b"null");
        }
        let mirror = value as i32;
        let integral = f64::from(mirror) == value && !(value == 0.0 && value.is_sign_negative());
        if integral {
            self.out.write(itoa::Buffer::new().format(mirror).as_bytes())
        } else {
            self.out
                .write(ryu::Buffer::new().format_finite(value).as_bytes())
        }
    }

    fn print_array(&mut self, items: &Items<'_>) -> Result<(), S::Error> {
        self.out.put(b'[')?;
        let mut first = true;
        for item in items.iter() {
            if !first {
                self.out.put(b',')?;
                if self.pretty {
                    self.out.put(b' ')?;
                }
            }
            first = false;
            self.print_value(item)?;
        }
        self.out.put(b']')
    }

    fn print_object(&mut self, members: &Members<'_>) -> Result<(), S::Error> {
        self.out.put(b'{')?;
        self.depth += 1;
        if self.pretty {
            self.out.put(b'\n')?;
        }
        let mut remaining = members.len();
        for member in members.iter() {
            if self.pretty {
                self.indent(self.depth)?;
            }
            write_json_string(self.out, &member.key)?;
            self.out.put(b':')?;
            if self.pretty {
                self.out.put(b'\t')?;
            }
            self.print_value(&member.value)?;
            remaining -= 1;
            if remaining > 0 {
                self.out.put(b',')?;
            }
            if self.pretty {
                self.out.put(b'\n')?;
            }
        }
        if self.pretty {
            self.indent(self.depth - 1)?;
        }
        self.depth -= 1;
        self.out.put(b'}')
    }

    fn indent(&mut self, levels: usize) -> Result<(), S::Error> {
        for _ in 0..levels {
            self.out.put(b'\t')?;
        }
        Ok(())
    }
}

/// Write a string literal with enclosing quotes, escaping as needed.
///
/// Scans 16 bytes at a time; an all-ASCII window with no quote, backslash,
/// or control byte is copied wholesale. The all-ASCII condition keeps the
/// window edge on a character boundary.
fn write_json_string<S: Sink>(out: &mut S, s: &str) -> Result<(), S::Error> {
    const STEP_SIZE: usize = 16;
    type Chunk = [u8; STEP_SIZE];

    out.put(b'"')?;

    let mut s = s;
    while let Some(Ok(chunk)) = s.as_bytes().get(..STEP_SIZE).map(Chunk::try_from) {
        let window = u128::from_ne_bytes(chunk);
        let all_ascii = window & 0x80808080808080808080808080808080 == 0;
        if all_ascii
            && !contains_byte(window, b'"')
            && !contains_byte(window, b'\\')
            && no_control_bytes(window)
        {
            out.write(&chunk)?;
            s = &s[STEP_SIZE..];
        } else {
            // escape character by character through this window
            let mut chars = s.chars();
            let mut budget = STEP_SIZE;
            for c in &mut chars {
                write_escaped_char(out, c)?;
                budget = budget.saturating_sub(c.len_utf8());
                if budget == 0 {
                    break;
                }
            }
            s = chars.as_str();
        }
    }

    for c in s.chars() {
        write_escaped_char(out, c)?;
    }

    out.put(b'"')
}

fn write_escaped_char<S: Sink>(out: &mut S, c: char) -> Result<(), S::Error> {
    match c {
        '"' => out.write(b"\\\""),
        '\\' => out.write(b"\\\\"),
        '\n' => out.write(b"\\n"),
        '\r' => out.write(b"\\r"),
        '\t' => out.write(b"\\t"),
        '\u{08}' => out.write(b"\\b"),
        '\u{0C}' => out.write(b"\\f"),
        c if (c as u32) < 0x20 => {
            let code_point = c as u32;
            let to_hex = |d: u32| {
                if d < 10 {
                    b'0' + d as u8
                } else {
                    b'a' + (d - 10) as u8
                }
            };
            out.write(&[
                b'\\',
                b'u',
                to_hex((code_point >> 12) & 0xF),
                to_hex((code_point >> 8) & 0xF),
                to_hex((code_point >> 4) & 0xF),
                to_hex(code_point & 0xF),
            ])
        }
        c => {
            let mut buf = [0u8; 4];
            out.write(c.encode_utf8(&mut buf).as_bytes())
        }
    }
}

/// Check if any byte in the window equals the target byte, SWAR-style.
#[inline]
const fn contains_byte(window: u128, byte: u8) -> bool {
    let mask = 0x01010101010101010101010101010101u128 * (byte as u128);
    let xor = window ^ mask;
    let has_zero = (xor.wrapping_sub(0x01010101010101010101010101010101))
        & !xor
        & 0x80808080808080808080808080808080;
    has_zero != 0
}

/// Check that every byte in the window has one of its top three bits set,
/// i.e. none is a control byte below 0x20.
#[inline]
const fn no_control_bytes(window: u128) -> bool {
    let masked = window & 0xe0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0;
    let has_zero = (masked.wrapping_sub(0x01010101010101010101010101010101))
        & !masked
        & 0x80808080808080808080808080808080;
    has_zero == 0
}
