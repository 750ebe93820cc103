//! Backslash-escape decoding for string literals embedded in inline scripts.
//!
//! Works at byte level: `\xHH` and octal escapes produce raw bytes, which may
//! combine into multi-byte UTF-8 sequences. Unknown escapes are kept verbatim,
//! backslash included.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("invalid \\x escape at byte {0}")]
    InvalidHex(usize),

    #[error("trailing backslash at byte {0}")]
    TrailingBackslash(usize),
}

pub fn unescape_bytes(input: &[u8]) -> Result<Vec<u8>, UnescapeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let b = input[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }

        let Some(&next) = input.get(i + 1) else {
            return Err(UnescapeError::TrailingBackslash(i));
        };
        match next {
            // line continuation
            b'\n' => {}
            b'\\' => out.push(b'\\'),
            b'\'' => out.push(b'\''),
            b'"' => out.push(b'"'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'0'..=b'7' => {
                let mut value: u32 = 0;
                let mut len = 0;
                while len < 3 {
                    match input.get(i + 1 + len) {
                        Some(&d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            len += 1;
                        }
                        _ => break,
                    }
                }
                out.push((value & 0xff) as u8);
                i += 1 + len;
                continue;
            }
            b'x' => {
                let hi = input.get(i + 2).and_then(|c| hex_value(*c));
                let lo = input.get(i + 3).and_then(|c| hex_value(*c));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                    _ => return Err(UnescapeError::InvalidHex(i)),
                }
                i += 4;
                continue;
            }
            other => {
                out.push(b'\\');
                out.push(other);
            }
        }
        i += 2;
    }

    Ok(out)
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_escapes() {
        let decoded = unescape_bytes(br"\x7B\x22id\x22\x3A\x2222256\x22\x7D").unwrap();
        assert_eq!(decoded, br#"{"id":"22256"}"#);
    }

    #[test]
    fn test_simple_escapes() {
        let decoded = unescape_bytes(br#"it\'s a \"quote\"\n\t\\"#).unwrap();
        assert_eq!(decoded, b"it's a \"quote\"\n\t\\");
    }

    #[test]
    fn test_octal_escapes() {
        assert_eq!(unescape_bytes(br"\101\102").unwrap(), b"AB");
        assert_eq!(unescape_bytes(br"\0").unwrap(), b"\0");
        // at most three digits are consumed
        assert_eq!(unescape_bytes(br"\1011").unwrap(), b"A1");
    }

    #[test]
    fn test_hex_escapes_build_utf8() {
        let decoded = unescape_bytes(br"M\xc3\xbcller").unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "Müller");
    }

    #[test]
    fn test_unknown_escape_kept_verbatim() {
        assert_eq!(unescape_bytes(br"a\qb").unwrap(), br"a\qb");
        assert_eq!(unescape_bytes(br"\d+").unwrap(), br"\d+");
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(unescape_bytes(b"ab\\\ncd").unwrap(), b"abcd");
    }

    #[test]
    fn test_invalid_sequences() {
        assert_eq!(unescape_bytes(br"\x4"), Err(UnescapeError::InvalidHex(0)));
        assert_eq!(unescape_bytes(br"ab\xZZ"), Err(UnescapeError::InvalidHex(2)));
        assert_eq!(unescape_bytes(br"abc\"), Err(UnescapeError::TrailingBackslash(3)));
    }

    #[test]
    fn test_non_escaped_utf8_passes_through() {
        assert_eq!(unescape_bytes("Ødegaard".as_bytes()).unwrap(), "Ødegaard".as_bytes());
    }
}
