//! Built-in encoding of embedded Type1 font programs.
//!
//! Only the cleartext portion (before `eexec`) is read. The encoding is
//! either `/Encoding StandardEncoding def` or an array filled by entries of
//! the form `dup <code> /<glyph> put`.

use charmap_core::{BaseEncoding, FontEncoding};

use crate::cmap_lexer::{Lexer, Token};

/// Read the built-in encoding of a Type1 program (`/FontFile`).
///
/// Returns `None` when the program declares no usable encoding.
pub fn builtin_encoding(program: &[u8]) -> Option<FontEncoding> {
    let cleartext = cleartext(program);
    let tokens: Vec<Token> = Lexer::new(cleartext).map(|(_, token)| token).collect();

    let encoding_at = tokens
        .iter()
        .position(|t| matches!(t, Token::Name(name) if name == "Encoding"))?;
    let tokens = &tokens[encoding_at + 1..];

    if matches!(tokens.first(), Some(Token::Keyword(k)) if k == "StandardEncoding") {
        return Some(FontEncoding::new(BaseEncoding::Standard));
    }

    let mut encoding = FontEncoding::builtin();
    let mut found = false;
    let mut i = 0;
    while i < tokens.len() {
        if let Some((code, glyph, consumed)) = dup_put(&tokens[i..]) {
            encoding.set_glyph(code, glyph);
            found = true;
            i += consumed;
        } else {
            i += 1;
        }
    }
    found.then_some(encoding)
}

/// Match `dup <code> /<glyph> [readonly|noaccess] put` at the start of `tokens`.
fn dup_put(tokens: &[Token]) -> Option<(u8, &str, usize)> {
    let [Token::Keyword(dup), Token::Integer(code), Token::Name(glyph), rest @ ..] = tokens else {
        return None;
    };
    if dup != "dup" {
        return None;
    }
    let code = u8::try_from(*code).ok()?;
    let consumed = match rest {
        [Token::Keyword(k), ..] if k == "put" => 4,
        [Token::Keyword(q), Token::Keyword(k), ..]
            if (q == "readonly" || q == "noaccess") && k == "put" =>
        {
            5
        }
        _ => return None,
    };
    Some((code, glyph.as_str(), consumed))
}

/// The cleartext part of a PFA or PFB program.
fn cleartext(program: &[u8]) -> &[u8] {
    // PFB segment header: 0x80, type, 4-byte little-endian length.
    let program = match program {
        [0x80, 0x01, a, b, c, d, rest @ ..] => {
            let len = u32::from_le_bytes([*a, *b, *c, *d]) as usize;
            &rest[..len.min(rest.len())]
        }
        _ => program,
    };
    match program.windows(5).position(|w| w == b"eexec") {
        Some(end) => &program[..end],
        None => program,
    }
}
