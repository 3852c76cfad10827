//! Recursive-descent JSON parser.
//!
//! The parser walks a byte slice with an explicit cursor and depth counter.
//! String content without escapes is borrowed straight out of the input;
//! escaped strings are decoded into owned buffers. Errors carry the byte
//! offset at which parsing stopped.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use lexical_parse_float::FromLexical as _;

use crate::error::{ParseError, ParseErrorKind, Span};
use crate::tracing_macros::trace;
use crate::tree::{Items, Member, Members};
use crate::value::Value;
use crate::NESTING_LIMIT;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a complete JSON document.
///
/// After the value, only whitespace may remain; anything else is
/// [`ParseErrorKind::TrailingCharacters`]. Use [`parse_partial`] to parse a
/// value off the front of a larger buffer.
pub fn from_str(input: &str) -> Result<Value<'_>, ParseError> {
    from_slice(input.as_bytes())
}

/// Parse a complete JSON document from bytes.
///
/// String content is validated as UTF-8; everything else about the input is
/// treated as raw bytes.
pub fn from_slice(input: &[u8]) -> Result<Value<'_>, ParseError> {
    trace!("parsing {} bytes", input.len());
    let mut parser = Parser::new(input);
    let value = parser.parse_document()?;
    parser.skip_whitespace();
    if parser.pos < parser.input.len() {
        return Err(ParseError::new(
            ParseErrorKind::TrailingCharacters,
            Span::new(parser.pos, 1),
        ));
    }
    Ok(value)
}

/// Parse one JSON value off the front of `input`.
///
/// Returns the value and the number of bytes consumed; trailing content is
/// left for the caller.
pub fn parse_partial(input: &str) -> Result<(Value<'_>, usize), ParseError> {
    let mut parser = Parser::new(input.as_bytes());
    let value = parser.parse_document()?;
    Ok((value, parser.pos))
}

struct Parser<'de> {
    input: &'de [u8],
    pos: usize,
    depth: usize,
}

impl<'de> Parser<'de> {
    fn new(input: &'de [u8]) -> Self {
        Parser {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> Result<Value<'de>, ParseError> {
        if self.input.starts_with(BOM) {
            self.pos = BOM.len();
        }
        self.skip_whitespace();
        self.parse_value()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Whitespace per the wire format: every byte `<= 0x20`.
    fn skip_whitespace(&mut self) {
        while matches!(self.input.get(self.pos), Some(&b) if b <= 0x20) {
            self.pos += 1;
        }
    }

    fn eof(&self, context: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedEof(context),
            Span::new(self.input.len(), 0),
        )
    }

    fn unexpected(&self, byte: u8) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedCharacter(byte as char),
            Span::new(self.pos, 1),
        )
    }

    fn parse_value(&mut self) -> Result<Value<'de>, ParseError> {
        match self.peek() {
            None => Err(self.eof("expecting a value")),
            Some(b'n') => self.parse_literal(b"null", Value::Null),
            Some(b't') => self.parse_literal(b"true", Value::Bool(true)),
            Some(b'f') => self.parse_literal(b"false", Value::Bool(false)),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(other) => Err(self.unexpected(other)),
        }
    }

    fn parse_literal(
        &mut self,
        literal: &'static [u8],
        value: Value<'de>,
    ) -> Result<Value<'de>, ParseError> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else if self.input.len() - self.pos < literal.len() {
            Err(self.eof("in literal"))
        } else {
            Err(self.unexpected(self.input[self.pos]))
        }
    }

    /// Scan the contiguous numeric slice, then let the float converter decide
    /// how much of it is a number. The cursor advances by what the converter
    /// consumed, so `1.2.3` leaves `.3` behind as a syntax error.
    fn parse_number(&mut self) -> Result<Value<'de>, ParseError> {
        let start = self.pos;
        let mut end = self.pos;
        while let Some(b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E') = self.input.get(end) {
            end += 1;
        }
        let (value, consumed) = f64::from_lexical_partial(&self.input[start..end])
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidNumber, Span::new(start, end - start)))?;
        self.pos = start + consumed;
        Ok(Value::Number(value))
    }

    /// Parse a string literal, cursor on the opening quote.
    ///
    /// Escape-free content is borrowed from the input; otherwise the content
    /// is decoded into an owned buffer.
    fn parse_string(&mut self) -> Result<Cow<'de, str>, ParseError> {
        self.pos += 1; // consume the opening quote
        let content_start = self.pos;
        let mut has_escapes = false;

        let content_end = loop {
            match memchr::memchr2(b'"', b'\\', &self.input[self.pos..]) {
                None => {
                    self.pos = self.input.len();
                    return Err(self.eof("in string"));
                }
                Some(offset) => {
                    let at = self.pos + offset;
                    if self.input[at] == b'"' {
                        self.pos = at + 1;
                        break at;
                    }
                    // A `\x` escape is a two-byte unit, so a trailing
                    // backslash cannot hide the closing quote.
                    has_escapes = true;
                    if at + 2 > self.input.len() {
                        self.pos = self.input.len();
                        return Err(self.eof("in string escape"));
                    }
                    self.pos = at + 2;
                }
            }
        };

        let content = &self.input[content_start..content_end];
        if !has_escapes {
            return match core::str::from_utf8(content) {
                Ok(s) => Ok(Cow::Borrowed(s)),
                Err(e) => Err(ParseError::new(
                    ParseErrorKind::InvalidUtf8,
                    Span::new(content_start + e.valid_up_to(), 1),
                )),
            };
        }
        decode_escaped(content, content_start).map(Cow::Owned)
    }

    fn parse_array(&mut self) -> Result<Value<'de>, ParseError> {
        self.depth += 1;
        if self.depth > NESTING_LIMIT {
            return Err(ParseError::new(
                ParseErrorKind::DepthLimitExceeded,
                Span::new(self.pos, 1),
            ));
        }
        self.pos += 1; // consume '['
        self.skip_whitespace();

        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(Items::from(items)));
        }

        loop {
            self.skip_whitespace();
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(other) => return Err(self.unexpected(other)),
                None => return Err(self.eof("in array")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(Items::from(items)))
    }

    fn parse_object(&mut self) -> Result<Value<'de>, ParseError> {
        self.depth += 1;
        if self.depth > NESTING_LIMIT {
            return Err(ParseError::new(
                ParseErrorKind::DepthLimitExceeded,
                Span::new(self.pos, 1),
            ));
        }
        self.pos += 1; // consume '{'
        self.skip_whitespace();

        let mut members = Vec::new();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(Members::from(members)));
        }

        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some(b'"') => self.parse_string()?,
                Some(other) => return Err(self.unexpected(other)),
                None => return Err(self.eof("expecting an object key")),
            };
            self.skip_whitespace();
            match self.peek() {
                Some(b':') => self.pos += 1,
                Some(other) => return Err(self.unexpected(other)),
                None => return Err(self.eof("expecting ':'")),
            }
            self.skip_whitespace();
            let value = self.parse_value()?;
            members.push(Member { key, value });
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(other) => return Err(self.unexpected(other)),
                None => return Err(self.eof("in object")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(Members::from(members)))
    }
}

/// Decode string content that contains at least one escape.
///
/// `base` is the content's absolute offset, for error spans.
fn decode_escaped(content: &[u8], base: usize) -> Result<String, ParseError> {
    let mut out = Vec::with_capacity(content.len());
    let mut i = 0;

    while i < content.len() {
        if content[i] != b'\\' {
            // bulk-copy the run up to the next escape
            match memchr::memchr(b'\\', &content[i..]) {
                Some(next) => {
                    out.extend_from_slice(&content[i..i + next]);
                    i += next;
                }
                None => {
                    out.extend_from_slice(&content[i..]);
                    break;
                }
            }
            continue;
        }

        let escape_start = base + i;
        let Some(&introducer) = content.get(i + 1) else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEof("in string escape"),
                Span::new(escape_start, 1),
            ));
        };
        match introducer {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'/' => out.push(b'/'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let code_point = decode_unicode_escape(content, &mut i, escape_start)?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(code_point.encode_utf8(&mut buf).as_bytes());
                continue; // cursor already advanced
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidEscape,
                    Span::new(escape_start, 2),
                ));
            }
        }
        i += 2;
    }

    String::from_utf8(out).map_err(|e| {
        ParseError::new(
            ParseErrorKind::InvalidUtf8,
            Span::new(base + e.utf8_error().valid_up_to(), 1),
        )
    })
}

/// Decode `\uXXXX` at `content[*i..]`, combining surrogate pairs.
///
/// Advances `*i` past everything consumed.
fn decode_unicode_escape(
    content: &[u8],
    i: &mut usize,
    escape_start: usize,
) -> Result<char, ParseError> {
    let invalid = |at: usize| ParseError::new(ParseErrorKind::InvalidEscape, Span::new(at, 6));

    let first = hex4(content, *i + 2).ok_or_else(|| invalid(escape_start))?;
    *i += 6;

    let code_point = if (0xD800..=0xDBFF).contains(&first) {
        // high surrogate: the low half must follow immediately
        if !content[*i..].starts_with(b"\\u") {
            return Err(ParseError::new(
                ParseErrorKind::LoneSurrogate,
                Span::new(escape_start, 6),
            ));
        }
        let second = hex4(content, *i + 2).ok_or_else(|| invalid(escape_start + 6))?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err(ParseError::new(
                ParseErrorKind::LoneSurrogate,
                Span::new(escape_start, 6),
            ));
        }
        *i += 6;
        0x10000 + (((first & 0x3FF) << 10) | (second & 0x3FF))
    } else if (0xDC00..=0xDFFF).contains(&first) {
        return Err(ParseError::new(
            ParseErrorKind::LoneSurrogate,
            Span::new(escape_start, 6),
        ));
    } else {
        first
    };

    // surrogates are excluded above and a combined pair tops out at U+10FFFF
    char::from_u32(code_point).ok_or_else(|| invalid(escape_start))
}

/// Read four hex digits at `content[i..]`. `None` when short or non-hex.
fn hex4(content: &[u8], i: usize) -> Option<u32> {
    let digits = content.get(i..i + 4)?;
    let mut h = 0u32;
    for &b in digits {
        h = (h << 4) | (b as char).to_digit(16)?;
    }
    Some(h)
}
