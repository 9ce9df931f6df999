//! Charmap parsing and map construction.
//!
//! A charmap is a line-oriented description of a single-byte character set:
//! `<byte-code> <unicode-scalar>` mapping lines plus `canonical is a <name>`
//! and `alias is a <name>` naming directives. Lines matching none of the
//! three forms are ignored, which lets ordinary charmap comments pass
//! through untouched.

/// Highest codepoint a single-byte charset may map to, with the sole
/// exception of U+FFFE.
pub const MAX_CODEPOINT: i64 = 0xFEFE;

/// Errors raised while reading a charmap.
///
/// Only numeric range violations are fatal; every other irregularity
/// (unknown lines, duplicate directives) is tolerated silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A mapping line names a byte code outside 0-255
    ByteCodeOutOfRange { line: usize, value: i64 },
    /// A mapping line names a codepoint above U+FEFE (other than U+FFFE)
    /// or below zero
    CodepointOutOfRange { line: usize, value: i64 },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::ByteCodeOutOfRange { line, value } => {
                write!(f, "Byte code {} out of range 0-255 (line {})", value, line)
            }
            ParseError::CodepointOutOfRange { line, value } => {
                write!(f, "Codepoint {} out of range (line {})", value, line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// An in-memory single-byte character set: the forward byte-to-codepoint
/// map, the declared names, and the derived codepoint-to-byte reverse map.
///
/// Built once by [`CharsetDefinition::parse`] and immutable afterwards. The
/// reverse map is split on the codepoint's high byte into 256 buckets of
/// 256 slots, with `0` as the "no mapping" sentinel; buckets with every
/// slot at the sentinel are skipped during emission.
#[derive(Debug, Clone)]
pub struct CharsetDefinition {
    names: Vec<String>,
    forward: [Option<u32>; 256],
    reverse: [[u8; 256]; 256],
}

impl CharsetDefinition {
    /// Reads a charmap and builds the forward and reverse maps.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on the first mapping line whose byte code
    /// falls outside `0..=255` or whose codepoint falls outside
    /// `0..=0xFEFE` (U+FFFE excepted). The whole input is rejected; no
    /// partial definition is produced.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut names = Vec::new();
        let mut forward = [None; 256];

        for (idx, line) in input.lines().enumerate() {
            let lineno = idx + 1;

            if let Some((code, scalar)) = scan_pair(line) {
                if !(0..=255).contains(&code) {
                    return Err(ParseError::ByteCodeOutOfRange {
                        line: lineno,
                        value: code,
                    });
                }
                if scalar < 0 || (scalar > MAX_CODEPOINT && scalar != 0xFFFE) {
                    return Err(ParseError::CodepointOutOfRange {
                        line: lineno,
                        value: scalar,
                    });
                }
                // Later lines overwrite earlier ones for the same byte code.
                forward[code as usize] = Some(scalar as u32);
            } else if let Some(name) = directive_token(line, &["canonical", "is", "a"]) {
                // Last canonical line wins the front slot.
                names.insert(0, name.to_string());
            } else if let Some(name) = directive_token(line, &["alias", "is", "a"]) {
                names.push(name.to_string());
            }
        }

        // Derive the reverse map in ascending byte-code order, so the
        // highest byte code wins when two of them share a codepoint.
        let mut reverse = [[0u8; 256]; 256];
        for code in 0..256 {
            if let Some(u) = forward[code] {
                reverse[(u >> 8) as usize & 0xff][u as usize & 0xff] = code as u8;
            }
        }

        Ok(CharsetDefinition {
            names,
            forward,
            reverse,
        })
    }

    /// Returns the declared names, canonical name first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the codepoint a byte code maps to, if any.
    pub fn codepoint(&self, code: u8) -> Option<u32> {
        self.forward[code as usize]
    }

    /// Returns the 256-slot reverse bucket for a codepoint high byte.
    pub fn bucket(&self, outer: usize) -> &[u8; 256] {
        &self.reverse[outer]
    }

    /// Iterates the outer indices of reverse buckets holding at least one
    /// mapped slot.
    pub fn occupied_buckets(&self) -> impl Iterator<Item = usize> + '_ {
        self.reverse
            .iter()
            .enumerate()
            .filter(|(_, bucket)| bucket.iter().any(|&slot| slot != 0))
            .map(|(outer, _)| outer)
    }

    /// Number of byte codes with a forward mapping.
    pub fn mapped_count(&self) -> usize {
        self.forward.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Scans a mapping line the way `sscanf("%i %li")` does: the line is one
/// character stream, and the second conversion resumes right where the
/// first one stopped. So `08 65` reads as `(0, 8)` (the `8` terminates the
/// octal literal and feeds the second conversion), `65; 66` matches
/// nothing (the second conversion fails on `;`), and anything after a
/// successful second integer is ignored, which accepts trailing charmap
/// comments such as `0x41 0x0041 # LATIN CAPITAL LETTER A`.
fn scan_pair(line: &str) -> Option<(i64, i64)> {
    let (code, rest) = scan_int(line)?;
    let (scalar, _) = scan_int(rest)?;
    Some((code, scalar))
}

/// Scans a C-style integer literal: leading whitespace, optional sign,
/// then `0x`/`0X` hex, leading-`0` octal, or decimal. Returns the value
/// and the unconsumed residue of the input. A committed hex prefix with no
/// digit after it fails the whole conversion, as it does in C scanning.
fn scan_int(input: &str) -> Option<(i64, &str)> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let mut radix: u32 = 10;
    let mut seen = false;
    if bytes.get(pos) == Some(&b'0') {
        pos += 1;
        seen = true; // the zero is a digit in its own right
        match bytes.get(pos) {
            Some(b'x') | Some(b'X') if bytes.get(pos + 1).is_some_and(u8::is_ascii_hexdigit) => {
                pos += 1;
                radix = 16;
                seen = false;
            }
            Some(b'x') | Some(b'X') => return None,
            _ => radix = 8,
        }
    }

    let mut value: i64 = 0;
    while let Some(&b) = bytes.get(pos) {
        match (b as char).to_digit(radix) {
            Some(d) => {
                value = value.checked_mul(radix as i64)?.checked_add(d as i64)?;
                seen = true;
                pos += 1;
            }
            None => break,
        }
    }

    if !seen {
        return None;
    }
    let value = if negative { -value } else { value };
    Some((value, &s[pos..]))
}

/// Matches a naming directive and returns its first trailing token, if
/// any. Keyword separators match whitespace runs the way literal spaces in
/// a `scanf` format do, so `canonical  is a latin1` is a valid directive
/// while an indented line is not (the first keyword must sit at column 0).
fn directive_token<'a>(line: &'a str, words: &[&str]) -> Option<&'a str> {
    let mut rest = line;
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            rest = rest.trim_start();
        }
        rest = rest.strip_prefix(word)?;
    }
    rest.split_whitespace().next()
}
