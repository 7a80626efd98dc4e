//! Tokenizer for PostScript-style CMap programs.
//!
//! CMap streams (and the cleartext part of Type1 font programs) share the
//! PostScript token syntax: numbers, `/Names`, `<hex>` and `(literal)`
//! strings, `[ ]` arrays, `<< >>` dictionaries, `{ }` procedures and bare
//! keywords such as `beginbfchar` or `def`.
//!
//! The lexer never fails: malformed input produces [`Token::Malformed`] and
//! lexing resumes after it.

/// A single lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer number.
    Integer(i64),
    /// Real number.
    Real(f64),
    /// `/Name` (without the slash, `#XX` escapes decoded).
    Name(String),
    /// `<...>` hex string, decoded to bytes.
    HexString(Vec<u8>),
    /// `(...)` literal string, escapes decoded.
    LiteralString(Vec<u8>),
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `<<`
    DictStart,
    /// `>>`
    DictEnd,
    /// `{`
    ProcStart,
    /// `}`
    ProcEnd,
    /// Bare keyword (operator).
    Keyword(String),
    /// Unparseable input, with a description.
    Malformed(String),
}

/// Iterator over `(byte offset, token)` pairs.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        let pos = &mut self.pos;
        skip_whitespace_and_comments(input, pos);
        if *pos >= input.len() {
            return None;
        }
        let start = *pos;
        let b = input[*pos];
        let token = match b {
            b'(' => parse_literal_string(input, pos),
            b'<' if input.get(*pos + 1) == Some(&b'<') => {
                *pos += 2;
                Token::DictStart
            }
            b'<' => parse_hex_string(input, pos),
            b'>' if input.get(*pos + 1) == Some(&b'>') => {
                *pos += 2;
                Token::DictEnd
            }
            b'[' => {
                *pos += 1;
                Token::ArrayStart
            }
            b']' => {
                *pos += 1;
                Token::ArrayEnd
            }
            b'{' => {
                *pos += 1;
                Token::ProcStart
            }
            b'}' => {
                *pos += 1;
                Token::ProcEnd
            }
            b'/' => Token::Name(parse_name(input, pos)),
            b')' | b'>' => {
                *pos += 1;
                Token::Malformed(format!("unexpected '{}'", b as char))
            }
            _ if starts_number(input, *pos) => parse_number(input, pos),
            _ => Token::Keyword(parse_keyword(input, pos)),
        };
        Some((start, token))
    }
}

/// Returns `true` if `b` is a PDF whitespace character.
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

/// Returns `true` if `b` is a PDF delimiter character.
fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_regular(b: u8) -> bool {
    !is_whitespace(b) && !is_delimiter(b)
}

/// Skip whitespace and comments.
fn skip_whitespace_and_comments(input: &[u8], pos: &mut usize) {
    while *pos < input.len() {
        if is_whitespace(input[*pos]) {
            *pos += 1;
        } else if input[*pos] == b'%' {
            // Comment: skip to end of line
            while *pos < input.len() && input[*pos] != b'\n' && input[*pos] != b'\r' {
                *pos += 1;
            }
        } else {
            break;
        }
    }
}

fn starts_number(input: &[u8], pos: usize) -> bool {
    let digit_at = |i: usize| input.get(i).is_some_and(u8::is_ascii_digit);
    match input[pos] {
        b'0'..=b'9' => true,
        b'+' | b'-' => {
            digit_at(pos + 1) || (input.get(pos + 1) == Some(&b'.') && digit_at(pos + 2))
        }
        b'.' => digit_at(pos + 1),
        _ => false,
    }
}

/// Parse a literal string `(...)` with balanced parentheses and escape
/// sequences. Raw bytes (tabs, control bytes) are kept verbatim.
fn parse_literal_string(input: &[u8], pos: &mut usize) -> Token {
    *pos += 1; // skip opening '('

    let mut result = Vec::new();
    let mut depth = 1u32;

    while *pos < input.len() {
        let b = input[*pos];
        match b {
            b'(' => {
                depth += 1;
                result.push(b'(');
                *pos += 1;
            }
            b')' => {
                depth -= 1;
                *pos += 1;
                if depth == 0 {
                    return Token::LiteralString(result);
                }
                result.push(b')');
            }
            b'\\' => {
                *pos += 1;
                let Some(&escaped) = input.get(*pos) else {
                    break;
                };
                match escaped {
                    b'n' => result.push(b'\n'),
                    b'r' => result.push(b'\r'),
                    b't' => result.push(b'\t'),
                    b'b' => result.push(0x08),
                    b'f' => result.push(0x0C),
                    b'\r' => {
                        // Backslash + CR (or CR+LF) = line continuation
                        if input.get(*pos + 1) == Some(&b'\n') {
                            *pos += 1;
                        }
                    }
                    b'\n' => {}
                    b'0'..=b'7' => {
                        // Octal escape (1-3 digits)
                        let mut val = u32::from(escaped - b'0');
                        for _ in 0..2 {
                            match input.get(*pos + 1) {
                                Some(&d @ b'0'..=b'7') => {
                                    *pos += 1;
                                    val = val * 8 + u32::from(d - b'0');
                                }
                                _ => break,
                            }
                        }
                        result.push((val & 0xFF) as u8);
                    }
                    // `\(`, `\)`, `\\` and unknown escapes keep the character
                    other => result.push(other),
                }
                *pos += 1;
            }
            _ => {
                result.push(b);
                *pos += 1;
            }
        }
    }

    Token::Malformed("unterminated literal string".to_string())
}

/// Parse a hex string `<...>`. An odd digit count is padded with a trailing 0.
fn parse_hex_string(input: &[u8], pos: &mut usize) -> Token {
    *pos += 1; // skip '<'

    let mut digits = Vec::new();
    let mut invalid = None;
    let mut terminated = false;
    while *pos < input.len() {
        let b = input[*pos];
        *pos += 1;
        if b == b'>' {
            terminated = true;
            break;
        }
        if is_whitespace(b) {
            continue;
        }
        match hex_digit(b) {
            Some(d) => digits.push(d),
            None => {
                invalid.get_or_insert(b);
            }
        }
    }

    if !terminated {
        return Token::Malformed("unterminated hex string".to_string());
    }
    if let Some(b) = invalid {
        return Token::Malformed(format!("invalid hex digit {:?}", b as char));
    }

    if digits.len() % 2 != 0 {
        digits.push(0);
    }
    Token::HexString(
        digits
            .chunks(2)
            .map(|pair| (pair[0] << 4) | pair[1])
            .collect(),
    )
}

/// Convert a hex digit character to its value (0-15).
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parse a `/Name` token. Assumes current byte is `/`.
fn parse_name(input: &[u8], pos: &mut usize) -> String {
    *pos += 1; // skip '/'

    let start = *pos;
    while *pos < input.len() && is_regular(input[*pos]) {
        *pos += 1;
    }

    // Handle #XX hex escapes in names
    let raw = &input[start..*pos];
    let mut name = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'#' && i + 2 < raw.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(raw[i + 1]), hex_digit(raw[i + 2])) {
                name.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        name.push(raw[i]);
        i += 1;
    }

    String::from_utf8_lossy(&name).into_owned()
}

/// Parse a number (integer or real).
fn parse_number(input: &[u8], pos: &mut usize) -> Token {
    let start = *pos;
    let mut has_dot = false;

    if matches!(input[*pos], b'+' | b'-') {
        *pos += 1;
    }
    while *pos < input.len() {
        let b = input[*pos];
        if b == b'.' && !has_dot {
            has_dot = true;
            *pos += 1;
        } else if b.is_ascii_digit() {
            *pos += 1;
        } else {
            break;
        }
    }

    let text = String::from_utf8_lossy(&input[start..*pos]);
    if has_dot {
        match text.parse::<f64>() {
            Ok(v) => Token::Real(v),
            Err(_) => Token::Malformed(format!("invalid real number: {text}")),
        }
    } else {
        match text.parse::<i64>() {
            Ok(v) => Token::Integer(v),
            Err(_) => Token::Malformed(format!("invalid integer: {text}")),
        }
    }
}

/// Parse a keyword: a run of regular characters.
fn parse_keyword(input: &[u8], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < input.len() && is_regular(input[*pos]) {
        *pos += 1;
    }
    if *pos == start {
        // A lone delimiter we do not otherwise handle (e.g. a stray '%' is
        // impossible here, but keep the lexer advancing regardless).
        *pos += 1;
    }
    String::from_utf8_lossy(&input[start..*pos]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &[u8]) -> Vec<Token> {
        Lexer::new(input).map(|(_, t)| t).collect()
    }

    fn hex(bytes: &[u8]) -> Token {
        Token::HexString(bytes.to_vec())
    }

    fn literal(bytes: &[u8]) -> Token {
        Token::LiteralString(bytes.to_vec())
    }

    fn name(text: &str) -> Token {
        Token::Name(text.to_string())
    }

    #[test]
    fn keywords_and_numbers() {
        assert_eq!(
            tokens(b"2 beginbfchar -1 .5 endbfchar"),
            vec![
                Token::Integer(2),
                Token::Keyword("beginbfchar".to_string()),
                Token::Integer(-1),
                Token::Real(0.5),
                Token::Keyword("endbfchar".to_string()),
            ]
        );
    }

    #[test]
    fn hex_strings() {
        assert_eq!(tokens(b"<0041>"), vec![hex(&[0x00, 0x41])]);
        assert_eq!(tokens(b"<00 4 1>"), vec![hex(&[0x00, 0x41])]);
        // Odd digit count pads with zero
        assert_eq!(tokens(b"<F>"), vec![hex(&[0xF0])]);
        assert_eq!(tokens(b"<>"), vec![hex(&[])]);
    }

    #[test]
    fn bad_hex_strings_are_malformed() {
        assert!(matches!(tokens(b"<00ZZ>")[0], Token::Malformed(_)));
        assert!(matches!(tokens(b"<0041")[0], Token::Malformed(_)));
    }

    #[test]
    fn hex_after_malformed_is_still_lexed() {
        let toks = tokens(b"<0G> <41>");
        assert!(matches!(toks[0], Token::Malformed(_)));
        assert_eq!(toks[1], hex(&[0x41]));
    }

    #[test]
    fn dictionary_delimiters() {
        assert_eq!(
            tokens(b"<< /Registry (Adobe) >>"),
            vec![
                Token::DictStart,
                name("Registry"),
                literal(b"Adobe"),
                Token::DictEnd,
            ]
        );
    }

    #[test]
    fn literal_string_escapes() {
        assert_eq!(tokens(br"(a\(b\)c\\\101\n)"), vec![literal(b"a(b)c\\A\n")]);
        assert_eq!(tokens(b"(a(b)c)"), vec![literal(b"a(b)c")]);
    }

    #[test]
    fn literal_string_keeps_raw_tabs() {
        assert_eq!(tokens(b"(a\tb)"), vec![literal(b"a\tb")]);
    }

    #[test]
    fn literal_string_line_continuation() {
        assert_eq!(tokens(b"(ab\\\r\ncd)"), vec![literal(b"abcd")]);
    }

    #[test]
    fn unterminated_literal_is_malformed() {
        assert!(matches!(tokens(b"(abc")[0], Token::Malformed(_)));
    }

    #[test]
    fn names_with_escapes() {
        assert_eq!(tokens(b"/A#20B"), vec![name("A B")]);
        assert_eq!(tokens(b"/CMapName"), vec![name("CMapName")]);
    }

    #[test]
    fn arrays_and_procs() {
        assert_eq!(
            tokens(b"[<01>]{dup}"),
            vec![
                Token::ArrayStart,
                hex(&[0x01]),
                Token::ArrayEnd,
                Token::ProcStart,
                Token::Keyword("dup".to_string()),
                Token::ProcEnd,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            tokens(b"%!PS-Adobe-3.0 Resource-CMap\n/CIDInit"),
            vec![name("CIDInit")]
        );
    }

    #[test]
    fn offsets_are_reported() {
        let offsets: Vec<usize> = Lexer::new(b"  <01> def").map(|(o, _)| o).collect();
        assert_eq!(offsets, vec![2, 7]);
    }

    #[test]
    fn stray_closers_do_not_stall() {
        let toks = tokens(b") > x");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[2], Token::Keyword("x".to_string()));
    }
}
