//! Adobe Glyph List lookup.
//!
//! Resolves PostScript glyph names (as they appear in encodings and
//! `/Differences` arrays) to Unicode text. Besides the table lookup it
//! implements the algorithmic forms defined by the AGL:
//! `uniXXXX[XXXX..]`, `uXXXX`..`uXXXXXX`, `.suffix` stripping and `_`
//! ligature components.

use std::collections::HashMap;
use std::sync::LazyLock;

static GLYPH_MAP: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    ADOBE_GLYPH_LIST
        .iter()
        .chain(EXPERT_GLYPHS.iter())
        .chain(ZAPF_DINGBATS_GLYPHS.iter())
        .copied()
        .collect()
});

/// Resolve a glyph name to its Unicode text.
///
/// Returns `None` when the name is not in the glyph list and matches none of
/// the algorithmic forms (e.g. `g123` or `.notdef`).
pub fn glyph_name_to_unicode(name: &str) -> Option<String> {
    let name = name.strip_prefix('/').unwrap_or(name);
    if let Some(&c) = GLYPH_MAP.get(name) {
        return Some(c.to_string());
    }

    // Variant suffixes (`a.sc`, `one.oldstyle`) carry no Unicode meaning.
    let base = match name.find('.') {
        Some(0) => return None,
        Some(idx) => &name[..idx],
        None => name,
    };

    let mut text = String::new();
    for component in base.split('_') {
        if let Some(part) = component_to_unicode(component) {
            text.push_str(&part);
        }
    }
    if text.is_empty() { None } else { Some(text) }
}

/// Resolve a glyph name to a single character, if it maps to exactly one.
pub fn glyph_name_to_char(name: &str) -> Option<char> {
    let text = glyph_name_to_unicode(name)?;
    let mut chars = text.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        None
    } else {
        Some(first)
    }
}

fn component_to_unicode(component: &str) -> Option<String> {
    if let Some(&c) = GLYPH_MAP.get(component) {
        return Some(c.to_string());
    }
    if let Some(hex) = component.strip_prefix("uni") {
        return parse_uni_sequence(hex);
    }
    if let Some(hex) = component.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) && hex.bytes().all(is_upper_hex) {
            let value = u32::from_str_radix(hex, 16).ok()?;
            return char::from_u32(value).map(String::from);
        }
    }
    None
}

/// `uni` followed by one or more groups of four uppercase hex digits, each
/// naming a BMP scalar outside the surrogate range.
fn parse_uni_sequence(hex: &str) -> Option<String> {
    if hex.is_empty() || hex.len() % 4 != 0 || !hex.bytes().all(is_upper_hex) {
        return None;
    }
    let mut text = String::with_capacity(hex.len() / 4);
    for chunk in hex.as_bytes().chunks(4) {
        let group = std::str::from_utf8(chunk).ok()?;
        let value = u32::from_str_radix(group, 16).ok()?;
        text.push(char::from_u32(value)?);
    }
    Some(text)
}

fn is_upper_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'A'..=b'F').contains(&b)
}

/// Common Adobe Glyph List entries (Latin, Greek, punctuation, math, and the
/// private-use glyphs of the Symbol font).
static ADOBE_GLYPH_LIST: &[(&str, char)] = &[
    ("A", 'A'),
    ("a", 'a'),
    ("Aacute", '\u{00C1}'),
    ("aacute", '\u{00E1}'),
    ("Abreve", '\u{0102}'),
    ("abreve", '\u{0103}'),
    ("Acircumflex", '\u{00C2}'),
    ("acircumflex", '\u{00E2}'),
    ("acute", '\u{00B4}'),
    ("Adieresis", '\u{00C4}'),
    ("adieresis", '\u{00E4}'),
    ("AE", '\u{00C6}'),
    ("ae", '\u{00E6}'),
    ("afii61289", '\u{2113}'),
    ("afii61352", '\u{2116}'),
    ("Agrave", '\u{00C0}'),
    ("agrave", '\u{00E0}'),
    ("aleph", '\u{2135}'),
    ("Alpha", '\u{0391}'),
    ("alpha", '\u{03B1}'),
    ("Amacron", '\u{0100}'),
    ("amacron", '\u{0101}'),
    ("ampersand", '&'),
    ("angle", '\u{2220}'),
    ("angleleft", '\u{2329}'),
    ("angleright", '\u{232A}'),
    ("Aogonek", '\u{0104}'),
    ("aogonek", '\u{0105}'),
    ("apple", '\u{F8FF}'),
    ("approxequal", '\u{2248}'),
    ("Aring", '\u{00C5}'),
    ("aring", '\u{00E5}'),
    ("arrowboth", '\u{2194}'),
    ("arrowdblboth", '\u{21D4}'),
    ("arrowdbldown", '\u{21D3}'),
    ("arrowdblleft", '\u{21D0}'),
    ("arrowdblright", '\u{21D2}'),
    ("arrowdblup", '\u{21D1}'),
    ("arrowdown", '\u{2193}'),
    ("arrowhorizex", '\u{F8E7}'),
    ("arrowleft", '\u{2190}'),
    ("arrowright", '\u{2192}'),
    ("arrowup", '\u{2191}'),
    ("arrowvertex", '\u{F8E6}'),
    ("asciicircum", '^'),
    ("asciitilde", '~'),
    ("asterisk", '*'),
    ("asteriskmath", '\u{2217}'),
    ("at", '@'),
    ("Atilde", '\u{00C3}'),
    ("atilde", '\u{00E3}'),
    ("B", 'B'),
    ("b", 'b'),
    ("backslash", '\\'),
    ("bar", '|'),
    ("Beta", '\u{0392}'),
    ("beta", '\u{03B2}'),
    ("block", '\u{2588}'),
    ("braceex", '\u{F8F4}'),
    ("braceleft", '{'),
    ("braceleftbt", '\u{F8F3}'),
    ("braceleftmid", '\u{F8F2}'),
    ("bracelefttp", '\u{F8F1}'),
    ("braceright", '}'),
    ("bracerightbt", '\u{F8FE}'),
    ("bracerightmid", '\u{F8FD}'),
    ("bracerighttp", '\u{F8FC}'),
    ("bracketleft", '['),
    ("bracketleftbt", '\u{F8F0}'),
    ("bracketleftex", '\u{F8EF}'),
    ("bracketlefttp", '\u{F8EE}'),
    ("bracketright", ']'),
    ("bracketrightbt", '\u{F8FB}'),
    ("bracketrightex", '\u{F8FA}'),
    ("bracketrighttp", '\u{F8F9}'),
    ("breve", '\u{02D8}'),
    ("brokenbar", '\u{00A6}'),
    ("bullet", '\u{2022}'),
    ("C", 'C'),
    ("c", 'c'),
    ("Cacute", '\u{0106}'),
    ("cacute", '\u{0107}'),
    ("caron", '\u{02C7}'),
    ("carriagereturn", '\u{21B5}'),
    ("Ccaron", '\u{010C}'),
    ("ccaron", '\u{010D}'),
    ("Ccedilla", '\u{00C7}'),
    ("ccedilla", '\u{00E7}'),
    ("cedilla", '\u{00B8}'),
    ("cent", '\u{00A2}'),
    ("checkmark", '\u{2713}'),
    ("Chi", '\u{03A7}'),
    ("chi", '\u{03C7}'),
    ("circle", '\u{25CB}'),
    ("circlemultiply", '\u{2297}'),
    ("circleplus", '\u{2295}'),
    ("circumflex", '\u{02C6}'),
    ("club", '\u{2663}'),
    ("colon", ':'),
    ("colonmonetary", '\u{20A1}'),
    ("comma", ','),
    ("congruent", '\u{2245}'),
    ("copyright", '\u{00A9}'),
    ("copyrightsans", '\u{F8E9}'),
    ("copyrightserif", '\u{F6D9}'),
    ("currency", '\u{00A4}'),
    ("D", 'D'),
    ("d", 'd'),
    ("dagger", '\u{2020}'),
    ("daggerdbl", '\u{2021}'),
    ("Dcaron", '\u{010E}'),
    ("dcaron", '\u{010F}'),
    ("Dcroat", '\u{0110}'),
    ("dcroat", '\u{0111}'),
    ("degree", '\u{00B0}'),
    ("Delta", '\u{0394}'),
    ("delta", '\u{03B4}'),
    ("diamond", '\u{2666}'),
    ("dieresis", '\u{00A8}'),
    ("divide", '\u{00F7}'),
    ("dkshade", '\u{2593}'),
    ("dollar", '$'),
    ("dong", '\u{20AB}'),
    ("dotaccent", '\u{02D9}'),
    ("dotlessi", '\u{0131}'),
    ("dotlessj", '\u{0237}'),
    ("dotmath", '\u{22C5}'),
    ("E", 'E'),
    ("e", 'e'),
    ("Eacute", '\u{00C9}'),
    ("eacute", '\u{00E9}'),
    ("Ebreve", '\u{0114}'),
    ("ebreve", '\u{0115}'),
    ("Ecaron", '\u{011A}'),
    ("ecaron", '\u{011B}'),
    ("Ecircumflex", '\u{00CA}'),
    ("ecircumflex", '\u{00EA}'),
    ("Edieresis", '\u{00CB}'),
    ("edieresis", '\u{00EB}'),
    ("Edotaccent", '\u{0116}'),
    ("edotaccent", '\u{0117}'),
    ("Egrave", '\u{00C8}'),
    ("egrave", '\u{00E8}'),
    ("eight", '8'),
    ("element", '\u{2208}'),
    ("ellipsis", '\u{2026}'),
    ("Emacron", '\u{0112}'),
    ("emacron", '\u{0113}'),
    ("emdash", '\u{2014}'),
    ("emptyset", '\u{2205}'),
    ("endash", '\u{2013}'),
    ("Eng", '\u{014A}'),
    ("eng", '\u{014B}'),
    ("Eogonek", '\u{0118}'),
    ("eogonek", '\u{0119}'),
    ("Epsilon", '\u{0395}'),
    ("epsilon", '\u{03B5}'),
    ("equal", '='),
    ("equivalence", '\u{2261}'),
    ("estimated", '\u{212E}'),
    ("Eta", '\u{0397}'),
    ("eta", '\u{03B7}'),
    ("Eth", '\u{00D0}'),
    ("eth", '\u{00F0}'),
    ("Euro", '\u{20AC}'),
    ("exclam", '!'),
    ("exclamdbl", '\u{203C}'),
    ("exclamdown", '\u{00A1}'),
    ("existential", '\u{2203}'),
    ("F", 'F'),
    ("f", 'f'),
    ("female", '\u{2640}'),
    ("ff", '\u{FB00}'),
    ("ffi", '\u{FB03}'),
    ("ffl", '\u{FB04}'),
    ("fi", '\u{FB01}'),
    ("figuredash", '\u{2012}'),
    ("filledbox", '\u{25A0}'),
    ("filledrect", '\u{25AC}'),
    ("five", '5'),
    ("fiveeighths", '\u{215D}'),
    ("fl", '\u{FB02}'),
    ("florin", '\u{0192}'),
    ("four", '4'),
    ("fraction", '\u{2044}'),
    ("franc", '\u{20A3}'),
    ("G", 'G'),
    ("g", 'g'),
    ("Gamma", '\u{0393}'),
    ("gamma", '\u{03B3}'),
    ("Gbreve", '\u{011E}'),
    ("gbreve", '\u{011F}'),
    ("Gcommaaccent", '\u{0122}'),
    ("gcommaaccent", '\u{0123}'),
    ("Gdotaccent", '\u{0120}'),
    ("gdotaccent", '\u{0121}'),
    ("germandbls", '\u{00DF}'),
    ("gradient", '\u{2207}'),
    ("grave", '`'),
    ("greater", '>'),
    ("greaterequal", '\u{2265}'),
    ("guillemotleft", '\u{00AB}'),
    ("guillemotright", '\u{00BB}'),
    ("guilsinglleft", '\u{2039}'),
    ("guilsinglright", '\u{203A}'),
    ("H", 'H'),
    ("h", 'h'),
    ("Hbar", '\u{0126}'),
    ("hbar", '\u{0127}'),
    ("heart", '\u{2665}'),
    ("house", '\u{2302}'),
    ("hungarumlaut", '\u{02DD}'),
    ("hyphen", '-'),
    ("I", 'I'),
    ("i", 'i'),
    ("Iacute", '\u{00CD}'),
    ("iacute", '\u{00ED}'),
    ("Icircumflex", '\u{00CE}'),
    ("icircumflex", '\u{00EE}'),
    ("Idieresis", '\u{00CF}'),
    ("idieresis", '\u{00EF}'),
    ("Idotaccent", '\u{0130}'),
    ("Ifraktur", '\u{2111}'),
    ("Igrave", '\u{00CC}'),
    ("igrave", '\u{00EC}'),
    ("IJ", '\u{0132}'),
    ("ij", '\u{0133}'),
    ("Imacron", '\u{012A}'),
    ("imacron", '\u{012B}'),
    ("increment", '\u{2206}'),
    ("infinity", '\u{221E}'),
    ("integral", '\u{222B}'),
    ("integralbt", '\u{2321}'),
    ("integralex", '\u{F8F5}'),
    ("integraltp", '\u{2320}'),
    ("intersection", '\u{2229}'),
    ("invbullet", '\u{25D8}'),
    ("Iogonek", '\u{012E}'),
    ("iogonek", '\u{012F}'),
    ("Iota", '\u{0399}'),
    ("iota", '\u{03B9}'),
    ("Itilde", '\u{0128}'),
    ("itilde", '\u{0129}'),
    ("J", 'J'),
    ("j", 'j'),
    ("K", 'K'),
    ("k", 'k'),
    ("Kappa", '\u{039A}'),
    ("kappa", '\u{03BA}'),
    ("Kcommaaccent", '\u{0136}'),
    ("kcommaaccent", '\u{0137}'),
    ("L", 'L'),
    ("l", 'l'),
    ("Lacute", '\u{0139}'),
    ("lacute", '\u{013A}'),
    ("Lambda", '\u{039B}'),
    ("lambda", '\u{03BB}'),
    ("Lcaron", '\u{013D}'),
    ("lcaron", '\u{013E}'),
    ("Lcommaaccent", '\u{013B}'),
    ("lcommaaccent", '\u{013C}'),
    ("Ldot", '\u{013F}'),
    ("ldot", '\u{0140}'),
    ("less", '<'),
    ("lessequal", '\u{2264}'),
    ("lira", '\u{20A4}'),
    ("logicaland", '\u{2227}'),
    ("logicalnot", '\u{00AC}'),
    ("logicalor", '\u{2228}'),
    ("longs", '\u{017F}'),
    ("lozenge", '\u{25CA}'),
    ("Lslash", '\u{0141}'),
    ("lslash", '\u{0142}'),
    ("ltshade", '\u{2591}'),
    ("M", 'M'),
    ("m", 'm'),
    ("macron", '\u{00AF}'),
    ("male", '\u{2642}'),
    ("minus", '\u{2212}'),
    ("minute", '\u{2032}'),
    ("Mu", '\u{039C}'),
    ("mu", '\u{00B5}'),
    ("multiply", '\u{00D7}'),
    ("musicalnote", '\u{266A}'),
    ("N", 'N'),
    ("n", 'n'),
    ("Nacute", '\u{0143}'),
    ("nacute", '\u{0144}'),
    ("napostrophe", '\u{0149}'),
    ("nbspace", '\u{00A0}'),
    ("Ncaron", '\u{0147}'),
    ("ncaron", '\u{0148}'),
    ("Ncommaaccent", '\u{0145}'),
    ("ncommaaccent", '\u{0146}'),
    ("nine", '9'),
    ("notelement", '\u{2209}'),
    ("notequal", '\u{2260}'),
    ("notsubset", '\u{2284}'),
    ("Ntilde", '\u{00D1}'),
    ("ntilde", '\u{00F1}'),
    ("Nu", '\u{039D}'),
    ("nu", '\u{03BD}'),
    ("numbersign", '#'),
    ("O", 'O'),
    ("o", 'o'),
    ("Oacute", '\u{00D3}'),
    ("oacute", '\u{00F3}'),
    ("Obreve", '\u{014E}'),
    ("obreve", '\u{014F}'),
    ("Ocircumflex", '\u{00D4}'),
    ("ocircumflex", '\u{00F4}'),
    ("Odieresis", '\u{00D6}'),
    ("odieresis", '\u{00F6}'),
    ("OE", '\u{0152}'),
    ("oe", '\u{0153}'),
    ("ogonek", '\u{02DB}'),
    ("Ograve", '\u{00D2}'),
    ("ograve", '\u{00F2}'),
    ("Ohungarumlaut", '\u{0150}'),
    ("ohungarumlaut", '\u{0151}'),
    ("Omacron", '\u{014C}'),
    ("omacron", '\u{014D}'),
    ("Omega", '\u{03A9}'),
    ("omega", '\u{03C9}'),
    ("omega1", '\u{03D6}'),
    ("Omicron", '\u{039F}'),
    ("omicron", '\u{03BF}'),
    ("one", '1'),
    ("onedotenleader", '\u{2024}'),
    ("oneeighth", '\u{215B}'),
    ("onehalf", '\u{00BD}'),
    ("onequarter", '\u{00BC}'),
    ("onesuperior", '\u{00B9}'),
    ("onethird", '\u{2153}'),
    ("openbullet", '\u{25E6}'),
    ("ordfeminine", '\u{00AA}'),
    ("ordmasculine", '\u{00BA}'),
    ("Oslash", '\u{00D8}'),
    ("oslash", '\u{00F8}'),
    ("Otilde", '\u{00D5}'),
    ("otilde", '\u{00F5}'),
    ("P", 'P'),
    ("p", 'p'),
    ("paragraph", '\u{00B6}'),
    ("parenleft", '('),
    ("parenleftbt", '\u{F8ED}'),
    ("parenleftex", '\u{F8EC}'),
    ("parenlefttp", '\u{F8EB}'),
    ("parenright", ')'),
    ("parenrightbt", '\u{F8F8}'),
    ("parenrightex", '\u{F8F7}'),
    ("parenrighttp", '\u{F8F6}'),
    ("partialdiff", '\u{2202}'),
    ("percent", '%'),
    ("period", '.'),
    ("periodcentered", '\u{00B7}'),
    ("perpendicular", '\u{22A5}'),
    ("perthousand", '\u{2030}'),
    ("peseta", '\u{20A7}'),
    ("Phi", '\u{03A6}'),
    ("phi", '\u{03C6}'),
    ("phi1", '\u{03D5}'),
    ("Pi", '\u{03A0}'),
    ("pi", '\u{03C0}'),
    ("plus", '+'),
    ("plusminus", '\u{00B1}'),
    ("product", '\u{220F}'),
    ("propersubset", '\u{2282}'),
    ("propersuperset", '\u{2283}'),
    ("proportional", '\u{221D}'),
    ("Psi", '\u{03A8}'),
    ("psi", '\u{03C8}'),
    ("Q", 'Q'),
    ("q", 'q'),
    ("question", '?'),
    ("questiondown", '\u{00BF}'),
    ("quotedbl", '"'),
    ("quotedblbase", '\u{201E}'),
    ("quotedblleft", '\u{201C}'),
    ("quotedblright", '\u{201D}'),
    ("quoteleft", '\u{2018}'),
    ("quotereversed", '\u{201B}'),
    ("quoteright", '\u{2019}'),
    ("quotesinglbase", '\u{201A}'),
    ("quotesingle", '\''),
    ("R", 'R'),
    ("r", 'r'),
    ("Racute", '\u{0154}'),
    ("racute", '\u{0155}'),
    ("radical", '\u{221A}'),
    ("radicalex", '\u{F8E5}'),
    ("Rcaron", '\u{0158}'),
    ("rcaron", '\u{0159}'),
    ("Rcommaaccent", '\u{0156}'),
    ("rcommaaccent", '\u{0157}'),
    ("reflexsubset", '\u{2286}'),
    ("reflexsuperset", '\u{2287}'),
    ("registered", '\u{00AE}'),
    ("registersans", '\u{F8E8}'),
    ("registerserif", '\u{F6DA}'),
    ("Rfraktur", '\u{211C}'),
    ("Rho", '\u{03A1}'),
    ("rho", '\u{03C1}'),
    ("ring", '\u{02DA}'),
    ("S", 'S'),
    ("s", 's'),
    ("Sacute", '\u{015A}'),
    ("sacute", '\u{015B}'),
    ("Scaron", '\u{0160}'),
    ("scaron", '\u{0161}'),
    ("Scedilla", '\u{015E}'),
    ("scedilla", '\u{015F}'),
    ("Scommaaccent", '\u{0218}'),
    ("scommaaccent", '\u{0219}'),
    ("second", '\u{2033}'),
    ("section", '\u{00A7}'),
    ("semicolon", ';'),
    ("seven", '7'),
    ("seveneighths", '\u{215E}'),
    ("sfthyphen", '\u{00AD}'),
    ("shade", '\u{2592}'),
    ("Sigma", '\u{03A3}'),
    ("sigma", '\u{03C3}'),
    ("sigma1", '\u{03C2}'),
    ("similar", '\u{223C}'),
    ("six", '6'),
    ("slash", '/'),
    ("smileface", '\u{263A}'),
    ("space", '\u{0020}'),
    ("spade", '\u{2660}'),
    ("sterling", '\u{00A3}'),
    ("suchthat", '\u{220B}'),
    ("summation", '\u{2211}'),
    ("sun", '\u{263C}'),
    ("T", 'T'),
    ("t", 't'),
    ("Tau", '\u{03A4}'),
    ("tau", '\u{03C4}'),
    ("Tbar", '\u{0166}'),
    ("tbar", '\u{0167}'),
    ("Tcaron", '\u{0164}'),
    ("tcaron", '\u{0165}'),
    ("Tcommaaccent", '\u{0162}'),
    ("tcommaaccent", '\u{0163}'),
    ("therefore", '\u{2234}'),
    ("Theta", '\u{0398}'),
    ("theta", '\u{03B8}'),
    ("theta1", '\u{03D1}'),
    ("Thorn", '\u{00DE}'),
    ("thorn", '\u{00FE}'),
    ("three", '3'),
    ("threeeighths", '\u{215C}'),
    ("threequarters", '\u{00BE}'),
    ("threesuperior", '\u{00B3}'),
    ("tilde", '\u{02DC}'),
    ("trademark", '\u{2122}'),
    ("trademarksans", '\u{F8EA}'),
    ("trademarkserif", '\u{F6DB}'),
    ("triagdn", '\u{25BC}'),
    ("triagup", '\u{25B2}'),
    ("two", '2'),
    ("twodotenleader", '\u{2025}'),
    ("twosuperior", '\u{00B2}'),
    ("twothirds", '\u{2154}'),
    ("U", 'U'),
    ("u", 'u'),
    ("Uacute", '\u{00DA}'),
    ("uacute", '\u{00FA}'),
    ("Ubreve", '\u{016C}'),
    ("ubreve", '\u{016D}'),
    ("Ucircumflex", '\u{00DB}'),
    ("ucircumflex", '\u{00FB}'),
    ("Udieresis", '\u{00DC}'),
    ("udieresis", '\u{00FC}'),
    ("Ugrave", '\u{00D9}'),
    ("ugrave", '\u{00F9}'),
    ("Uhungarumlaut", '\u{0170}'),
    ("uhungarumlaut", '\u{0171}'),
    ("Umacron", '\u{016A}'),
    ("umacron", '\u{016B}'),
    ("underscore", '_'),
    ("union", '\u{222A}'),
    ("universal", '\u{2200}'),
    ("Uogonek", '\u{0172}'),
    ("uogonek", '\u{0173}'),
    ("Upsilon", '\u{03A5}'),
    ("upsilon", '\u{03C5}'),
    ("Upsilon1", '\u{03D2}'),
    ("Uring", '\u{016E}'),
    ("uring", '\u{016F}'),
    ("Utilde", '\u{0168}'),
    ("utilde", '\u{0169}'),
    ("V", 'V'),
    ("v", 'v'),
    ("W", 'W'),
    ("w", 'w'),
    ("Wcircumflex", '\u{0174}'),
    ("wcircumflex", '\u{0175}'),
    ("weierstrass", '\u{2118}'),
    ("X", 'X'),
    ("x", 'x'),
    ("Xi", '\u{039E}'),
    ("xi", '\u{03BE}'),
    ("Y", 'Y'),
    ("y", 'y'),
    ("Yacute", '\u{00DD}'),
    ("yacute", '\u{00FD}'),
    ("Ycircumflex", '\u{0176}'),
    ("ycircumflex", '\u{0177}'),
    ("Ydieresis", '\u{0178}'),
    ("ydieresis", '\u{00FF}'),
    ("yen", '\u{00A5}'),
    ("Z", 'Z'),
    ("z", 'z'),
    ("Zacute", '\u{0179}'),
    ("zacute", '\u{017A}'),
    ("Zcaron", '\u{017D}'),
    ("zcaron", '\u{017E}'),
    ("Zdotaccent", '\u{017B}'),
    ("zdotaccent", '\u{017C}'),
    ("zero", '0'),
    ("Zeta", '\u{0396}'),
    ("zeta", '\u{03B6}'),
];

/// Expert-set glyphs: small capitals, oldstyle figures, superiors and
/// inferiors. Most live in Adobe's private-use area.
static EXPERT_GLYPHS: &[(&str, char)] = &[
    ("Aacutesmall", '\u{F7E1}'),
    ("Acircumflexsmall", '\u{F7E2}'),
    ("Acutesmall", '\u{F7B4}'),
    ("Adieresissmall", '\u{F7E4}'),
    ("AEsmall", '\u{F7E6}'),
    ("Agravesmall", '\u{F7E0}'),
    ("ampersandsmall", '\u{F726}'),
    ("Aringsmall", '\u{F7E5}'),
    ("Asmall", '\u{F761}'),
    ("asuperior", '\u{F6E9}'),
    ("Atildesmall", '\u{F7E3}'),
    ("Brevesmall", '\u{F6F4}'),
    ("Bsmall", '\u{F762}'),
    ("bsuperior", '\u{F6EA}'),
    ("Caronsmall", '\u{F6F5}'),
    ("Ccedillasmall", '\u{F7E7}'),
    ("Cedillasmall", '\u{F7B8}'),
    ("centinferior", '\u{F6DF}'),
    ("centoldstyle", '\u{F7A2}'),
    ("centsuperior", '\u{F6E0}'),
    ("Circumflexsmall", '\u{F6F6}'),
    ("commainferior", '\u{F6E1}'),
    ("commasuperior", '\u{F6E2}'),
    ("Csmall", '\u{F763}'),
    ("Dieresissmall", '\u{F7A8}'),
    ("dollarinferior", '\u{F6E3}'),
    ("dollaroldstyle", '\u{F724}'),
    ("dollarsuperior", '\u{F6E4}'),
    ("Dotaccentsmall", '\u{F6F7}'),
    ("Dsmall", '\u{F764}'),
    ("dsuperior", '\u{F6EB}'),
    ("Eacutesmall", '\u{F7E9}'),
    ("Ecircumflexsmall", '\u{F7EA}'),
    ("Edieresissmall", '\u{F7EB}'),
    ("Egravesmall", '\u{F7E8}'),
    ("eightinferior", '\u{2088}'),
    ("eightoldstyle", '\u{F738}'),
    ("eightsuperior", '\u{2078}'),
    ("Esmall", '\u{F765}'),
    ("esuperior", '\u{F6EC}'),
    ("Ethsmall", '\u{F7F0}'),
    ("exclamdownsmall", '\u{F7A1}'),
    ("exclamsmall", '\u{F721}'),
    ("fiveinferior", '\u{2085}'),
    ("fiveoldstyle", '\u{F735}'),
    ("fivesuperior", '\u{2075}'),
    ("fourinferior", '\u{2084}'),
    ("fouroldstyle", '\u{F734}'),
    ("foursuperior", '\u{2074}'),
    ("Fsmall", '\u{F766}'),
    ("Gravesmall", '\u{F760}'),
    ("Gsmall", '\u{F767}'),
    ("Hsmall", '\u{F768}'),
    ("Hungarumlautsmall", '\u{F6F8}'),
    ("hypheninferior", '\u{F6E5}'),
    ("hyphensuperior", '\u{F6E6}'),
    ("Iacutesmall", '\u{F7ED}'),
    ("Icircumflexsmall", '\u{F7EE}'),
    ("Idieresissmall", '\u{F7EF}'),
    ("Igravesmall", '\u{F7EC}'),
    ("Ismall", '\u{F769}'),
    ("isuperior", '\u{F6ED}'),
    ("Jsmall", '\u{F76A}'),
    ("Ksmall", '\u{F76B}'),
    ("Lslashsmall", '\u{F6F9}'),
    ("Lsmall", '\u{F76C}'),
    ("lsuperior", '\u{F6EE}'),
    ("Macronsmall", '\u{F7AF}'),
    ("Msmall", '\u{F76D}'),
    ("msuperior", '\u{F6EF}'),
    ("nineinferior", '\u{2089}'),
    ("nineoldstyle", '\u{F739}'),
    ("ninesuperior", '\u{2079}'),
    ("Nsmall", '\u{F76E}'),
    ("nsuperior", '\u{207F}'),
    ("Ntildesmall", '\u{F7F1}'),
    ("Oacutesmall", '\u{F7F3}'),
    ("Ocircumflexsmall", '\u{F7F4}'),
    ("Odieresissmall", '\u{F7F6}'),
    ("OEsmall", '\u{F6FA}'),
    ("Ogoneksmall", '\u{F6FB}'),
    ("Ogravesmall", '\u{F7F2}'),
    ("onefitted", '\u{F6DC}'),
    ("oneinferior", '\u{2081}'),
    ("oneoldstyle", '\u{F731}'),
    ("Oslashsmall", '\u{F7F8}'),
    ("Osmall", '\u{F76F}'),
    ("osuperior", '\u{F6F0}'),
    ("Otildesmall", '\u{F7F5}'),
    ("parenleftinferior", '\u{208D}'),
    ("parenleftsuperior", '\u{207D}'),
    ("parenrightinferior", '\u{208E}'),
    ("parenrightsuperior", '\u{207E}'),
    ("periodinferior", '\u{F6E7}'),
    ("periodsuperior", '\u{F6E8}'),
    ("Psmall", '\u{F770}'),
    ("Qsmall", '\u{F771}'),
    ("questiondownsmall", '\u{F7BF}'),
    ("questionsmall", '\u{F73F}'),
    ("Ringsmall", '\u{F6FC}'),
    ("Rsmall", '\u{F772}'),
    ("rsuperior", '\u{F6F1}'),
    ("rupiah", '\u{F6DD}'),
    ("Scaronsmall", '\u{F6FD}'),
    ("seveninferior", '\u{2087}'),
    ("sevenoldstyle", '\u{F737}'),
    ("sevensuperior", '\u{2077}'),
    ("sixinferior", '\u{2086}'),
    ("sixoldstyle", '\u{F736}'),
    ("sixsuperior", '\u{2076}'),
    ("Ssmall", '\u{F773}'),
    ("ssuperior", '\u{F6F2}'),
    ("Thornsmall", '\u{F7FE}'),
    ("threeinferior", '\u{2083}'),
    ("threeoldstyle", '\u{F733}'),
    ("threequartersemdash", '\u{F6DE}'),
    ("Tildesmall", '\u{F6FE}'),
    ("Tsmall", '\u{F774}'),
    ("tsuperior", '\u{F6F3}'),
    ("twoinferior", '\u{2082}'),
    ("twooldstyle", '\u{F732}'),
    ("Uacutesmall", '\u{F7FA}'),
    ("Ucircumflexsmall", '\u{F7FB}'),
    ("Udieresissmall", '\u{F7FC}'),
    ("Ugravesmall", '\u{F7F9}'),
    ("Usmall", '\u{F775}'),
    ("Vsmall", '\u{F776}'),
    ("Wsmall", '\u{F777}'),
    ("Xsmall", '\u{F778}'),
    ("Yacutesmall", '\u{F7FD}'),
    ("Ydieresissmall", '\u{F7FF}'),
    ("Ysmall", '\u{F779}'),
    ("Zcaronsmall", '\u{F6FF}'),
    ("zeroinferior", '\u{2080}'),
    ("zerooldstyle", '\u{F730}'),
    ("zerosuperior", '\u{2070}'),
    ("Zsmall", '\u{F77A}'),
];

/// ITC Zapf Dingbats glyph names (`a1` .. `a206`).
static ZAPF_DINGBATS_GLYPHS: &[(&str, char)] = &[
    ("a1", '\u{2701}'),
    ("a2", '\u{2702}'),
    ("a3", '\u{2704}'),
    ("a4", '\u{260E}'),
    ("a5", '\u{2706}'),
    ("a6", '\u{271D}'),
    ("a7", '\u{271E}'),
    ("a8", '\u{271F}'),
    ("a9", '\u{2720}'),
    ("a10", '\u{2721}'),
    ("a11", '\u{261B}'),
    ("a12", '\u{261E}'),
    ("a13", '\u{270C}'),
    ("a14", '\u{270D}'),
    ("a15", '\u{270E}'),
    ("a16", '\u{270F}'),
    ("a17", '\u{2711}'),
    ("a18", '\u{2712}'),
    ("a19", '\u{2713}'),
    ("a20", '\u{2714}'),
    ("a21", '\u{2715}'),
    ("a22", '\u{2716}'),
    ("a23", '\u{2717}'),
    ("a24", '\u{2718}'),
    ("a25", '\u{2719}'),
    ("a26", '\u{271A}'),
    ("a27", '\u{271B}'),
    ("a28", '\u{271C}'),
    ("a29", '\u{2722}'),
    ("a30", '\u{2723}'),
    ("a31", '\u{2724}'),
    ("a32", '\u{2725}'),
    ("a33", '\u{2726}'),
    ("a34", '\u{2727}'),
    ("a35", '\u{2605}'),
    ("a36", '\u{2729}'),
    ("a37", '\u{272A}'),
    ("a38", '\u{272B}'),
    ("a39", '\u{272C}'),
    ("a40", '\u{272D}'),
    ("a41", '\u{272E}'),
    ("a42", '\u{272F}'),
    ("a43", '\u{2730}'),
    ("a44", '\u{2731}'),
    ("a45", '\u{2732}'),
    ("a46", '\u{2733}'),
    ("a47", '\u{2734}'),
    ("a48", '\u{2735}'),
    ("a49", '\u{2736}'),
    ("a50", '\u{2737}'),
    ("a51", '\u{2738}'),
    ("a52", '\u{2739}'),
    ("a53", '\u{273A}'),
    ("a54", '\u{273B}'),
    ("a55", '\u{273C}'),
    ("a56", '\u{273D}'),
    ("a57", '\u{273E}'),
    ("a58", '\u{273F}'),
    ("a59", '\u{2740}'),
    ("a60", '\u{2741}'),
    ("a61", '\u{2742}'),
    ("a62", '\u{2743}'),
    ("a63", '\u{2744}'),
    ("a64", '\u{2745}'),
    ("a65", '\u{2746}'),
    ("a66", '\u{2747}'),
    ("a67", '\u{2748}'),
    ("a68", '\u{2749}'),
    ("a69", '\u{274A}'),
    ("a70", '\u{274B}'),
    ("a71", '\u{25CF}'),
    ("a72", '\u{274D}'),
    ("a73", '\u{25A0}'),
    ("a74", '\u{274F}'),
    ("a75", '\u{2751}'),
    ("a76", '\u{25B2}'),
    ("a77", '\u{25BC}'),
    ("a78", '\u{25C6}'),
    ("a79", '\u{2756}'),
    ("a81", '\u{25D7}'),
    ("a82", '\u{2758}'),
    ("a83", '\u{2759}'),
    ("a84", '\u{275A}'),
    ("a85", '\u{276F}'),
    ("a86", '\u{2771}'),
    ("a87", '\u{2772}'),
    ("a88", '\u{2773}'),
    ("a89", '\u{2768}'),
    ("a90", '\u{2769}'),
    ("a91", '\u{276C}'),
    ("a92", '\u{276D}'),
    ("a93", '\u{276A}'),
    ("a94", '\u{276B}'),
    ("a95", '\u{2774}'),
    ("a96", '\u{2775}'),
    ("a97", '\u{275B}'),
    ("a98", '\u{275C}'),
    ("a99", '\u{275D}'),
    ("a100", '\u{275E}'),
    ("a101", '\u{2761}'),
    ("a102", '\u{2762}'),
    ("a103", '\u{2763}'),
    ("a104", '\u{2764}'),
    ("a105", '\u{2710}'),
    ("a106", '\u{2765}'),
    ("a107", '\u{2766}'),
    ("a108", '\u{2767}'),
    ("a109", '\u{2660}'),
    ("a110", '\u{2665}'),
    ("a111", '\u{2666}'),
    ("a112", '\u{2663}'),
    ("a117", '\u{2709}'),
    ("a118", '\u{2708}'),
    ("a119", '\u{2707}'),
    ("a120", '\u{2460}'),
    ("a121", '\u{2461}'),
    ("a122", '\u{2462}'),
    ("a123", '\u{2463}'),
    ("a124", '\u{2464}'),
    ("a125", '\u{2465}'),
    ("a126", '\u{2466}'),
    ("a127", '\u{2467}'),
    ("a128", '\u{2468}'),
    ("a129", '\u{2469}'),
    ("a130", '\u{2776}'),
    ("a131", '\u{2777}'),
    ("a132", '\u{2778}'),
    ("a133", '\u{2779}'),
    ("a134", '\u{277A}'),
    ("a135", '\u{277B}'),
    ("a136", '\u{277C}'),
    ("a137", '\u{277D}'),
    ("a138", '\u{277E}'),
    ("a139", '\u{277F}'),
    ("a140", '\u{2780}'),
    ("a141", '\u{2781}'),
    ("a142", '\u{2782}'),
    ("a143", '\u{2783}'),
    ("a144", '\u{2784}'),
    ("a145", '\u{2785}'),
    ("a146", '\u{2786}'),
    ("a147", '\u{2787}'),
    ("a148", '\u{2788}'),
    ("a149", '\u{2789}'),
    ("a150", '\u{278A}'),
    ("a151", '\u{278B}'),
    ("a152", '\u{278C}'),
    ("a153", '\u{278D}'),
    ("a154", '\u{278E}'),
    ("a155", '\u{278F}'),
    ("a156", '\u{2790}'),
    ("a157", '\u{2791}'),
    ("a158", '\u{2792}'),
    ("a159", '\u{2793}'),
    ("a160", '\u{2794}'),
    ("a161", '\u{2192}'),
    ("a162", '\u{27A3}'),
    ("a163", '\u{2194}'),
    ("a164", '\u{2195}'),
    ("a165", '\u{2799}'),
    ("a166", '\u{279B}'),
    ("a167", '\u{279C}'),
    ("a168", '\u{279D}'),
    ("a169", '\u{279E}'),
    ("a170", '\u{279F}'),
    ("a171", '\u{27A0}'),
    ("a172", '\u{27A1}'),
    ("a173", '\u{27A2}'),
    ("a174", '\u{27A4}'),
    ("a175", '\u{27A5}'),
    ("a176", '\u{27A6}'),
    ("a177", '\u{27A7}'),
    ("a178", '\u{27A8}'),
    ("a179", '\u{27A9}'),
    ("a180", '\u{27AB}'),
    ("a181", '\u{27AD}'),
    ("a182", '\u{27AF}'),
    ("a183", '\u{27B2}'),
    ("a184", '\u{27B3}'),
    ("a185", '\u{27B5}'),
    ("a186", '\u{27B8}'),
    ("a187", '\u{27BA}'),
    ("a188", '\u{27BB}'),
    ("a189", '\u{27BC}'),
    ("a190", '\u{27BD}'),
    ("a191", '\u{27BE}'),
    ("a192", '\u{279A}'),
    ("a193", '\u{27AA}'),
    ("a194", '\u{27B6}'),
    ("a195", '\u{27B9}'),
    ("a196", '\u{2798}'),
    ("a197", '\u{27B4}'),
    ("a198", '\u{27B7}'),
    ("a199", '\u{27AC}'),
    ("a200", '\u{27AE}'),
    ("a201", '\u{27B1}'),
    ("a202", '\u{2703}'),
    ("a203", '\u{2750}'),
    ("a204", '\u{2752}'),
    ("a205", '\u{276E}'),
    ("a206", '\u{2770}'),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn unicode(name: &str) -> Option<String> {
        glyph_name_to_unicode(name)
    }

    #[test]
    fn list_lookup() {
        assert_eq!(unicode("A").as_deref(), Some("A"));
        assert_eq!(unicode("Udieresis").as_deref(), Some("\u{00DC}"));
        assert_eq!(unicode("quoteright").as_deref(), Some("\u{2019}"));
        assert_eq!(unicode("Euro").as_deref(), Some("\u{20AC}"));
        assert_eq!(unicode("space").as_deref(), Some(" "));
    }

    #[test]
    fn leading_slash_is_ignored() {
        assert_eq!(unicode("/eacute").as_deref(), Some("\u{00E9}"));
    }

    #[test]
    fn ligatures_from_list() {
        assert_eq!(unicode("fi").as_deref(), Some("\u{FB01}"));
        assert_eq!(unicode("ffl").as_deref(), Some("\u{FB04}"));
    }

    #[test]
    fn uni_forms() {
        assert_eq!(unicode("uni00DC").as_deref(), Some("\u{00DC}"));
        assert_eq!(unicode("uni00660069").as_deref(), Some("fi"));
        // Lowercase hex and surrogates are not valid uni names.
        assert_eq!(unicode("uni00dc"), None);
        assert_eq!(unicode("uniD800"), None);
        assert_eq!(unicode("uni123"), None);
    }

    #[test]
    fn u_forms() {
        assert_eq!(unicode("u1F600").as_deref(), Some("\u{1F600}"));
        assert_eq!(unicode("u00E9").as_deref(), Some("\u{00E9}"));
        assert_eq!(unicode("u12"), None);
    }

    #[test]
    fn suffix_stripping() {
        assert_eq!(unicode("a.sc").as_deref(), Some("a"));
        assert_eq!(unicode("one.oldstyle").as_deref(), Some("1"));
        assert_eq!(unicode(".notdef"), None);
    }

    #[test]
    fn underscore_components() {
        assert_eq!(unicode("f_f_i").as_deref(), Some("ffi"));
        assert_eq!(unicode("T_h.alt").as_deref(), Some("Th"));
    }

    #[test]
    fn unknown_names() {
        assert_eq!(unicode("g123"), None);
        assert_eq!(unicode("Cone"), None);
        assert_eq!(unicode(""), None);
    }

    #[test]
    fn zapf_dingbats_names() {
        assert_eq!(glyph_name_to_char("a1"), Some('\u{2701}'));
        assert_eq!(glyph_name_to_char("a35"), Some('\u{2605}'));
        assert_eq!(glyph_name_to_char("a109"), Some('\u{2660}'));
    }

    #[test]
    fn symbol_font_names() {
        assert_eq!(glyph_name_to_char("alpha"), Some('\u{03B1}'));
        assert_eq!(glyph_name_to_char("Omega"), Some('\u{03A9}'));
        assert_eq!(glyph_name_to_char("summation"), Some('\u{2211}'));
        assert_eq!(glyph_name_to_char("bracerightbt"), Some('\u{F8FE}'));
    }

    #[test]
    fn expert_set_names() {
        assert_eq!(glyph_name_to_char("Asmall"), Some('\u{F761}'));
        assert_eq!(glyph_name_to_char("Ydieresissmall"), Some('\u{F7FF}'));
        assert_eq!(glyph_name_to_char("zerooldstyle"), Some('\u{F730}'));
        assert_eq!(glyph_name_to_char("dollarsuperior"), Some('\u{F6E4}'));
        assert_eq!(glyph_name_to_char("nsuperior"), Some('\u{207F}'));
        assert_eq!(glyph_name_to_char("parenleftinferior"), Some('\u{208D}'));
    }

    #[test]
    fn glyph_name_to_char_rejects_multi_char() {
        assert_eq!(glyph_name_to_char("f_f"), None);
    }
}
