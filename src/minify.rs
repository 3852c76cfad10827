//! In-place JSON minification.
//!
//! Strips whitespace and comments outside string literals; string content is
//! copied verbatim. The rewrite is single-pass, with the write cursor
//! trailing the read cursor, so no allocation happens.

use alloc::string::String;
use alloc::vec::Vec;

/// Minify JSON text in place.
///
/// Removes spaces, tabs, carriage returns, newlines, `// …` line comments,
/// and `/* … */` block comments (matched shallowly; an unterminated block
/// comment swallows the rest of the input). String literals pass through
/// untouched; `\"` inside a literal is a two-byte unit and does not close
/// it. The input is not validated: invalid JSON comes out rearranged but no
/// less invalid.
#[allow(unsafe_code)]
pub fn minify(json: &mut String) {
    // SAFETY: the rewrite only removes whole ASCII bytes outside string
    // literals and copies literal content verbatim, so the buffer stays
    // valid UTF-8.
    let bytes = unsafe { json.as_mut_vec() };
    let len = minify_in_place(bytes);
    bytes.truncate(len);
}

/// Byte-buffer form of [`minify`].
pub fn minify_bytes(json: &mut Vec<u8>) {
    let len = minify_in_place(json);
    json.truncate(len);
}

fn minify_in_place(buf: &mut [u8]) -> usize {
    let mut read = 0;
    let mut write = 0;

    while read < buf.len() {
        match buf[read] {
            b' ' | b'\t' | b'\r' | b'\n' => read += 1,
            b'/' if buf.get(read + 1) == Some(&b'/') => {
                while read < buf.len() && buf[read] != b'\n' {
                    read += 1;
                }
            }
            b'/' if buf.get(read + 1) == Some(&b'*') => {
                read += 2;
                loop {
                    if read + 1 >= buf.len() {
                        read = buf.len();
                        break;
                    }
                    if buf[read] == b'*' && buf[read + 1] == b'/' {
                        read += 2;
                        break;
                    }
                    read += 1;
                }
            }
            b'"' => {
                buf[write] = b'"';
                write += 1;
                read += 1;
                while read < buf.len() {
                    let byte = buf[read];
                    buf[write] = byte;
                    write += 1;
                    read += 1;
                    if byte == b'\\' {
                        // an escape is a two-byte unit
                        if read < buf.len() {
                            buf[write] = buf[read];
                            write += 1;
                            read += 1;
                        }
                    } else if byte == b'"' {
                        break;
                    }
                }
            }
            byte => {
                buf[write] = byte;
                write += 1;
                read += 1;
            }
        }
    }

    write
}
