//! RFC 8259 string escaping.
//!
//! [escape] and [unescape] are inverses: `unescape(&escape(s)) == s` for every `&str`. Unescaping
//! is lenient, so input that was not produced by [escape] never fails: unrecognized escapes and
//! unpaired surrogate escapes are kept as written.

use std::borrow::Cow;

/// How much of the input to escape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EscapeMode {
    /// Only `"`, `\` and control characters.
    #[default]
    Minimal,
    /// Also every non-ASCII character, as `\uXXXX` UTF-16 code units.
    AsciiOnly,
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

#[inline]
fn needs_escape(c: char, mode: EscapeMode) -> bool {
    c == '"' || c == '\\' || c < '\u{20}' || (mode == EscapeMode::AsciiOnly && !c.is_ascii())
}

fn push_unit(out: &mut String, unit: u16) {
    out.push_str("\\u");
    for shift in [12, 8, 4, 0] {
        out.push(HEX[((unit >> shift) & 0xF) as usize] as char);
    }
}

/// Escapes `s` with [EscapeMode::Minimal].
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, EscapeMode::Minimal)
}

/// Escapes `s`, borrowing it when nothing needs escaping.
pub fn escape_with(s: &str, mode: EscapeMode) -> Cow<'_, str> {
    let Some(first) = s.find(|c| needs_escape(c, mode)) else {
        return Cow::Borrowed(s);
    };
    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    escape_into(&s[first..], mode, &mut out);
    Cow::Owned(out)
}

/// Appends the escaped form of `s` to `out`.
pub fn escape_into(s: &str, mode: EscapeMode, out: &mut String) {
    let mut start = 0;
    for (index, c) in s.char_indices() {
        if !needs_escape(c, mode) {
            continue;
        }
        out.push_str(&s[start..index]);
        start = index + c.len_utf8();
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    push_unit(out, *unit);
                }
            }
        }
    }
    out.push_str(&s[start..]);
}

/// Parses exactly four hex digits.
pub(crate) fn parse_hex4(digits: &[u8]) -> Option<u16> {
    if digits.len() < 4 {
        return None;
    }
    digits[..4].iter().try_fold(0u16, |acc, &b| {
        let digit = (b as char).to_digit(16)?;
        Some((acc << 4) | digit as u16)
    })
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

/// Reverses [escape], borrowing `s` when it contains no escapes.
pub fn unescape(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find('\\') else {
        return Cow::Borrowed(s);
    };
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);

    let mut index = first;
    let mut literal = first;
    while index < bytes.len() {
        if bytes[index] != b'\\' {
            index += 1;
            continue;
        }
        out.push_str(&s[literal..index]);
        let (decoded, consumed) = unescape_one(&bytes[index..]);
        match decoded {
            Some(c) => out.push(c),
            // Unrecognized: keep the backslash and let the rest copy through as text.
            None => out.push('\\'),
        }
        index += consumed;
        literal = index;
    }
    out.push_str(&s[literal..]);
    Cow::Owned(out)
}

/// Decodes the escape at the start of `bytes`, returning the character and bytes consumed.
///
/// Returns `None` with a consumed count of one when the escape is not recognized.
fn unescape_one(bytes: &[u8]) -> (Option<char>, usize) {
    let simple = match bytes.get(1) {
        Some(b'"') => '"',
        Some(b'\\') => '\\',
        Some(b'/') => '/',
        Some(b'b') => '\u{08}',
        Some(b'f') => '\u{0C}',
        Some(b'n') => '\n',
        Some(b'r') => '\r',
        Some(b't') => '\t',
        Some(b'u') => return unescape_unicode(bytes),
        _ => return (None, 1),
    };
    (Some(simple), 2)
}

fn unescape_unicode(bytes: &[u8]) -> (Option<char>, usize) {
    let Some(unit) = parse_hex4(&bytes[2..]) else {
        return (None, 1);
    };
    if is_high_surrogate(unit) {
        let low = bytes
            .get(6..8)
            .filter(|marker| *marker == b"\\u")
            .and_then(|_| parse_hex4(&bytes[8..]))
            .filter(|low| is_low_surrogate(*low));
        if let Some(low) = low {
            let code = 0x10000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);
            return (char::from_u32(code), 12);
        }
        return (None, 1);
    }
    if is_low_surrogate(unit) {
        return (None, 1);
    }
    (char::from_u32(unit as u32), 6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use test_case::test_case;

    #[test_case("plain" => "plain"; "nothing to escape")]
    #[test_case("a\"b" => "a\\\"b"; "quote")]
    #[test_case("back\\slash" => "back\\\\slash"; "backslash")]
    #[test_case("\u{08}\u{0C}\n\r\t" => "\\b\\f\\n\\r\\t"; "short forms")]
    #[test_case("\u{00}\u{1F}" => "\\u0000\\u001F"; "other controls")]
    #[test_case("héllo 🦀" => "héllo 🦀"; "non-ascii kept")]
    #[test_case("/" => "/"; "solidus kept")]
    fn test_escape(s: &str) -> String {
        escape(s).into_owned()
    }

    #[test_case("é" => "\\u00E9"; "latin")]
    #[test_case("🦀" => "\\uD83E\\uDD80"; "surrogate pair")]
    #[test_case("a\"€" => "a\\\"\\u20AC"; "mixed")]
    fn test_escape_ascii(s: &str) -> String {
        escape_with(s, EscapeMode::AsciiOnly).into_owned()
    }

    #[test]
    fn test_borrowed_fast_path() {
        assert!(matches!(escape("no escapes"), Cow::Borrowed(_)));
        assert!(matches!(unescape("no escapes"), Cow::Borrowed(_)));
        assert!(matches!(escape("\n"), Cow::Owned(_)));
    }

    #[test_case("\\u0041\\/" => "A/"; "basic")]
    #[test_case("\\uD83E\\uDD80" => "🦀"; "pair")]
    #[test_case("\\ud83e\\udd80" => "🦀"; "lowercase pair")]
    #[test_case("\\q" => "\\q"; "unknown escape kept")]
    #[test_case("\\uD800x" => "\\uD800x"; "lone high kept")]
    #[test_case("\\uDC00" => "\\uDC00"; "lone low kept")]
    #[test_case("\\uD800\\u0041" => "\\uD800A"; "high then non-low")]
    #[test_case("\\u12" => "\\u12"; "short unicode kept")]
    #[test_case("end\\" => "end\\"; "trailing backslash")]
    fn test_unescape(s: &str) -> String {
        unescape(s).into_owned()
    }

    #[test]
    fn test_inverse_fixed() {
        let cases = [
            "",
            "\"",
            "\\",
            "\\u0041",
            "\u{0}\u{1}\u{1f}\u{7f}",
            "tab\tnew\nline",
            "𝄞 music",
            "日本語",
            "\u{FFFF}\u{10FFFF}",
        ];
        for s in cases {
            assert_eq!(unescape(&escape(s)), s);
            assert_eq!(unescape(&escape_with(s, EscapeMode::AsciiOnly)), s);
        }
    }

    #[test]
    fn test_inverse_random() {
        let mut rng = StdRng::seed_from_u64(0);
        let alphabet: Vec<char> = ['"', '\\', '/', 'u', 'a', 'é', '€', '🦀', '\u{10FFFF}']
            .into_iter()
            .chain((0u8..0x20).map(char::from))
            .collect();
        for _ in 0..2_000 {
            let len = rng.gen_range(0..24);
            let s: String = (0..len)
                .map(|_| {
                    if rng.gen_bool(0.5) {
                        alphabet[rng.gen_range(0..alphabet.len())]
                    } else {
                        rng.gen::<char>()
                    }
                })
                .collect();
            assert_eq!(unescape(&escape(&s)), s);
            let ascii = escape_with(&s, EscapeMode::AsciiOnly);
            assert!(ascii.is_ascii());
            assert_eq!(unescape(&ascii), s);
        }
    }
}
