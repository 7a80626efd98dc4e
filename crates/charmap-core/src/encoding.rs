//! Built-in PDF text encodings and Differences handling.
//!
//! Encodings are stored as code → glyph-name tables; Unicode text comes from
//! resolving the glyph name through [`crate::glyph_list`]. This keeps a
//! `/Differences` override and a base-table entry on the same footing.

use std::collections::{BTreeMap, HashMap};

use crate::glyph_list::glyph_name_to_unicode;

/// A built-in single-byte encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseEncoding {
    /// StandardEncoding, the Adobe standard Latin encoding.
    Standard,
    /// WinAnsiEncoding (Windows code page 1252).
    WinAnsi,
    /// MacRomanEncoding (Mac OS Roman).
    MacRoman,
    /// MacExpertEncoding, the expert character set of Mac OS.
    MacExpert,
    /// Built-in encoding of the Symbol font.
    Symbol,
    /// Built-in encoding of the ZapfDingbats font.
    ZapfDingbats,
}

impl BaseEncoding {
    /// Look up an encoding by its PDF name (without the leading slash).
    ///
    /// Returns `None` for names that are not one of the predefined encodings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.strip_prefix('/').unwrap_or(name) {
            "StandardEncoding" => Some(BaseEncoding::Standard),
            "WinAnsiEncoding" => Some(BaseEncoding::WinAnsi),
            "MacRomanEncoding" => Some(BaseEncoding::MacRoman),
            "MacExpertEncoding" => Some(BaseEncoding::MacExpert),
            "SymbolEncoding" => Some(BaseEncoding::Symbol),
            "ZapfDingbatsEncoding" => Some(BaseEncoding::ZapfDingbats),
            _ => None,
        }
    }

    /// Default encoding for a simple font without `/Encoding`.
    ///
    /// Symbol and ZapfDingbats use their built-in encodings, everything else
    /// StandardEncoding. A subset prefix (`ABCDEF+`) is ignored.
    pub fn for_base_font(base_font: &str) -> Self {
        let family = strip_subset_prefix(base_font);
        let family = family.split([',', '-']).next().unwrap_or(family);
        match family {
            "Symbol" => BaseEncoding::Symbol,
            "ZapfDingbats" | "Dingbats" => BaseEncoding::ZapfDingbats,
            _ => BaseEncoding::Standard,
        }
    }

    /// The PDF name of this encoding.
    pub fn name(&self) -> &'static str {
        match self {
            BaseEncoding::Standard => "StandardEncoding",
            BaseEncoding::WinAnsi => "WinAnsiEncoding",
            BaseEncoding::MacRoman => "MacRomanEncoding",
            BaseEncoding::MacExpert => "MacExpertEncoding",
            BaseEncoding::Symbol => "SymbolEncoding",
            BaseEncoding::ZapfDingbats => "ZapfDingbatsEncoding",
        }
    }

    /// Glyph name assigned to `code`, or `None` for undefined codes.
    pub fn glyph_name(&self, code: u8) -> Option<&'static str> {
        let table = match self {
            BaseEncoding::Standard => &STANDARD_TABLE,
            BaseEncoding::WinAnsi => &WIN_ANSI_TABLE,
            BaseEncoding::MacRoman => &MAC_ROMAN_TABLE,
            BaseEncoding::MacExpert => &MAC_EXPERT_TABLE,
            BaseEncoding::Symbol => &SYMBOL_TABLE,
            BaseEncoding::ZapfDingbats => &ZAPF_DINGBATS_TABLE,
        };
        table[code as usize]
    }

    /// Unicode text for `code`, or `None` for undefined codes.
    pub fn decode(&self, code: u8) -> Option<String> {
        self.glyph_name(code).and_then(glyph_name_to_unicode)
    }
}

/// Strip a font subset tag (`ABCDEF+Helvetica` → `Helvetica`).
pub fn strip_subset_prefix(name: &str) -> &str {
    let name = name.strip_prefix('/').unwrap_or(name);
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

/// The encoding of a simple font: a base table overlaid with `/Differences`.
///
/// A `None` base stands for the font program's own built-in encoding, whose
/// entries are supplied as differences (see the Type1 `dup … put` reader).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontEncoding {
    base: Option<BaseEncoding>,
    differences: BTreeMap<u8, String>,
}

impl FontEncoding {
    /// Create an encoding from a built-in base table.
    pub fn new(base: BaseEncoding) -> Self {
        Self {
            base: Some(base),
            differences: BTreeMap::new(),
        }
    }

    /// Create an encoding with no base table; every code comes from differences.
    pub fn builtin() -> Self {
        Self {
            base: None,
            differences: BTreeMap::new(),
        }
    }

    /// The base table, if any.
    pub fn base(&self) -> Option<BaseEncoding> {
        self.base
    }

    /// The overridden code → glyph-name entries.
    pub fn differences(&self) -> &BTreeMap<u8, String> {
        &self.differences
    }

    /// Assign `glyph` to `code`, replacing the base entry.
    pub fn set_glyph(&mut self, code: u8, glyph: impl Into<String>) {
        self.differences.insert(code, glyph.into());
    }

    /// Apply a list of `(code, glyph name)` overrides in order.
    pub fn apply_differences<S: AsRef<str>>(&mut self, differences: &[(u8, S)]) {
        for (code, glyph) in differences {
            self.set_glyph(*code, glyph.as_ref());
        }
    }

    /// Glyph name assigned to `code` after differences.
    pub fn glyph_name(&self, code: u8) -> Option<&str> {
        match self.differences.get(&code) {
            Some(name) => Some(name.as_str()),
            None => self.base.and_then(|base| base.glyph_name(code)),
        }
    }

    /// Code of `glyph`: the lowest `/Differences` entry naming it, else the
    /// lowest code of the base table.
    pub fn code_for_glyph(&self, glyph: &str) -> Option<u8> {
        self.differences
            .iter()
            .find(|(_, name)| name.as_str() == glyph)
            .map(|(&code, _)| code)
            .or_else(|| (0..=255u8).find(|&code| self.glyph_name(code) == Some(glyph)))
    }

    /// Unicode text for `code`.
    ///
    /// A code assigned a glyph name that cannot be resolved yields `""`
    /// (never the literal name); an unassigned code yields `None`.
    pub fn decode(&self, code: u8) -> Option<String> {
        self.glyph_name(code)
            .map(|name| glyph_name_to_unicode(name).unwrap_or_default())
    }

    /// Materialize the full code → Unicode table.
    pub fn to_unicode_map(&self) -> HashMap<u32, String> {
        (0..=255u8)
            .filter_map(|code| self.decode(code).map(|text| (u32::from(code), text)))
            .collect()
    }
}

const fn layer(
    mut table: [Option<&'static str>; 256],
    start: usize,
    names: &[&'static str],
) -> [Option<&'static str>; 256] {
    let mut i = 0;
    while i < names.len() {
        if !names[i].is_empty() {
            table[start + i] = Some(names[i]);
        }
        i += 1;
    }
    table
}

const EMPTY: [Option<&str>; 256] = [None; 256];

static STANDARD_TABLE: [Option<&str>; 256] = layer(
    layer(
        layer(layer(EMPTY, 0x20, &ASCII_PRINTABLE), 0x27, &["quoteright"]),
        0x60,
        &["quoteleft"],
    ),
    0xA1,
    &STANDARD_HIGH,
);

static WIN_ANSI_TABLE: [Option<&str>; 256] =
    layer(layer(EMPTY, 0x20, &ASCII_PRINTABLE), 0x80, &WIN_ANSI_HIGH);

static MAC_ROMAN_TABLE: [Option<&str>; 256] =
    layer(layer(EMPTY, 0x20, &ASCII_PRINTABLE), 0x80, &MAC_ROMAN_HIGH);

static MAC_EXPERT_TABLE: [Option<&str>; 256] = layer(EMPTY, 0x20, &MAC_EXPERT_GLYPHS);

static SYMBOL_TABLE: [Option<&str>; 256] =
    layer(layer(EMPTY, 0x20, &SYMBOL_LOW), 0xA0, &SYMBOL_HIGH);

static ZAPF_DINGBATS_TABLE: [Option<&str>; 256] = layer(
    layer(
        layer(EMPTY, 0x20, &ZAPF_DINGBATS_LOW),
        0x80,
        &ZAPF_DINGBATS_MID,
    ),
    0xA1,
    &ZAPF_DINGBATS_HIGH,
);

/// Codes 0x20..=0x7E shared by StandardEncoding, WinAnsiEncoding and MacRomanEncoding.
#[rustfmt::skip]
const ASCII_PRINTABLE: [&str; 95] = [
    "space", "exclam", "quotedbl", "numbersign", "dollar", "percent", "ampersand", "quotesingle",
    "parenleft", "parenright", "asterisk", "plus", "comma", "hyphen", "period", "slash", "zero",
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "colon", "semicolon",
    "less", "equal", "greater", "question", "at", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J",
    "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "bracketleft",
    "backslash", "bracketright", "asciicircum", "underscore", "grave", "a", "b", "c", "d", "e", "f",
    "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y",
    "z", "braceleft", "bar", "braceright", "asciitilde",
];

/// StandardEncoding codes 0xA1..=0xFB.
#[rustfmt::skip]
const STANDARD_HIGH: [&str; 91] = [
    "exclamdown", "cent", "sterling", "fraction", "yen", "florin", "section", "currency",
    "quotesingle", "quotedblleft", "guillemotleft", "guilsinglleft", "guilsinglright", "fi", "fl",
    "", "endash", "dagger", "daggerdbl", "periodcentered", "", "paragraph", "bullet",
    "quotesinglbase", "quotedblbase", "quotedblright", "guillemotright", "ellipsis", "perthousand",
    "", "questiondown", "", "grave", "acute", "circumflex", "tilde", "macron", "breve", "dotaccent",
    "dieresis", "", "ring", "cedilla", "", "hungarumlaut", "ogonek", "caron", "emdash", "", "", "",
    "", "", "", "", "", "", "", "", "", "", "", "", "", "AE", "", "ordfeminine", "", "", "", "",
    "Lslash", "Oslash", "OE", "ordmasculine", "", "", "", "", "", "ae", "", "", "", "dotlessi", "",
    "", "lslash", "oslash", "oe", "germandbls",
];

/// WinAnsiEncoding codes 0x80..=0xFF.
#[rustfmt::skip]
const WIN_ANSI_HIGH: [&str; 128] = [
    "Euro", "", "quotesinglbase", "florin", "quotedblbase", "ellipsis", "dagger", "daggerdbl",
    "circumflex", "perthousand", "Scaron", "guilsinglleft", "OE", "", "Zcaron", "", "", "quoteleft",
    "quoteright", "quotedblleft", "quotedblright", "bullet", "endash", "emdash", "tilde",
    "trademark", "scaron", "guilsinglright", "oe", "", "zcaron", "Ydieresis", "space", "exclamdown",
    "cent", "sterling", "currency", "yen", "brokenbar", "section", "dieresis", "copyright",
    "ordfeminine", "guillemotleft", "logicalnot", "hyphen", "registered", "macron", "degree",
    "plusminus", "twosuperior", "threesuperior", "acute", "mu", "paragraph", "periodcentered",
    "cedilla", "onesuperior", "ordmasculine", "guillemotright", "onequarter", "onehalf",
    "threequarters", "questiondown", "Agrave", "Aacute", "Acircumflex", "Atilde", "Adieresis",
    "Aring", "AE", "Ccedilla", "Egrave", "Eacute", "Ecircumflex", "Edieresis", "Igrave", "Iacute",
    "Icircumflex", "Idieresis", "Eth", "Ntilde", "Ograve", "Oacute", "Ocircumflex", "Otilde",
    "Odieresis", "multiply", "Oslash", "Ugrave", "Uacute", "Ucircumflex", "Udieresis", "Yacute",
    "Thorn", "germandbls", "agrave", "aacute", "acircumflex", "atilde", "adieresis", "aring", "ae",
    "ccedilla", "egrave", "eacute", "ecircumflex", "edieresis", "igrave", "iacute", "icircumflex",
    "idieresis", "eth", "ntilde", "ograve", "oacute", "ocircumflex", "otilde", "odieresis",
    "divide", "oslash", "ugrave", "uacute", "ucircumflex", "udieresis", "yacute", "thorn",
    "ydieresis",
];

/// MacRomanEncoding codes 0x80..=0xFF (Mac OS Roman, including the math glyphs).
#[rustfmt::skip]
const MAC_ROMAN_HIGH: [&str; 128] = [
    "Adieresis", "Aring", "Ccedilla", "Eacute", "Ntilde", "Odieresis", "Udieresis", "aacute",
    "agrave", "acircumflex", "adieresis", "atilde", "aring", "ccedilla", "eacute", "egrave",
    "ecircumflex", "edieresis", "iacute", "igrave", "icircumflex", "idieresis", "ntilde", "oacute",
    "ograve", "ocircumflex", "odieresis", "otilde", "uacute", "ugrave", "ucircumflex", "udieresis",
    "dagger", "degree", "cent", "sterling", "section", "bullet", "paragraph", "germandbls",
    "registered", "copyright", "trademark", "acute", "dieresis", "notequal", "AE", "Oslash",
    "infinity", "plusminus", "lessequal", "greaterequal", "yen", "mu", "partialdiff", "summation",
    "product", "pi", "integral", "ordfeminine", "ordmasculine", "Omega", "ae", "oslash",
    "questiondown", "exclamdown", "logicalnot", "radical", "florin", "approxequal", "Delta",
    "guillemotleft", "guillemotright", "ellipsis", "space", "Agrave", "Atilde", "Otilde", "OE",
    "oe", "endash", "emdash", "quotedblleft", "quotedblright", "quoteleft", "quoteright", "divide",
    "lozenge", "ydieresis", "Ydieresis", "fraction", "currency", "guilsinglleft", "guilsinglright",
    "fi", "fl", "daggerdbl", "periodcentered", "quotesinglbase", "quotedblbase", "perthousand",
    "Acircumflex", "Ecircumflex", "Aacute", "Edieresis", "Egrave", "Iacute", "Icircumflex",
    "Idieresis", "Igrave", "Oacute", "Ocircumflex", "apple", "Ograve", "Uacute", "Ucircumflex",
    "Ugrave", "dotlessi", "circumflex", "tilde", "macron", "breve", "dotaccent", "ring", "cedilla",
    "hungarumlaut", "ogonek", "caron",
];

/// MacExpertEncoding, codes 0x20..=0xFB.
#[rustfmt::skip]
const MAC_EXPERT_GLYPHS: [&str; 220] = [
    "space", "exclamsmall", "Hungarumlautsmall", "centoldstyle", "dollaroldstyle", "dollarsuperior",
    "ampersandsmall", "Acutesmall", "parenleftsuperior", "parenrightsuperior", "twodotenleader",
    "onedotenleader", "comma", "hyphen", "period", "fraction", "zerooldstyle", "oneoldstyle",
    "twooldstyle", "threeoldstyle", "fouroldstyle", "fiveoldstyle", "sixoldstyle", "sevenoldstyle",
    "eightoldstyle", "nineoldstyle", "colon", "semicolon", "", "threequartersemdash", "",
    "questionsmall", "", "", "", "", "Ethsmall", "", "", "onequarter", "onehalf", "threequarters",
    "oneeighth", "threeeighths", "fiveeighths", "seveneighths", "onethird", "twothirds", "", "", "",
    "", "", "", "ff", "fi", "fl", "ffi", "ffl", "parenleftinferior", "", "parenrightinferior",
    "Circumflexsmall", "hypheninferior", "Gravesmall", "Asmall", "Bsmall", "Csmall", "Dsmall",
    "Esmall", "Fsmall", "Gsmall", "Hsmall", "Ismall", "Jsmall", "Ksmall", "Lsmall", "Msmall",
    "Nsmall", "Osmall", "Psmall", "Qsmall", "Rsmall", "Ssmall", "Tsmall", "Usmall", "Vsmall",
    "Wsmall", "Xsmall", "Ysmall", "Zsmall", "colonmonetary", "onefitted", "rupiah", "Tildesmall",
    "", "", "asuperior", "centsuperior", "", "", "", "", "Aacutesmall", "Agravesmall",
    "Acircumflexsmall", "Adieresissmall", "Atildesmall", "Aringsmall", "Ccedillasmall",
    "Eacutesmall", "Egravesmall", "Ecircumflexsmall", "Edieresissmall", "Iacutesmall",
    "Igravesmall", "Icircumflexsmall", "Idieresissmall", "Ntildesmall", "Oacutesmall",
    "Ogravesmall", "Ocircumflexsmall", "Odieresissmall", "Otildesmall", "Uacutesmall",
    "Ugravesmall", "Ucircumflexsmall", "Udieresissmall", "", "eightsuperior", "fourinferior",
    "threeinferior", "sixinferior", "eightinferior", "seveninferior", "Scaronsmall", "",
    "centinferior", "twoinferior", "", "Dieresissmall", "", "Caronsmall", "osuperior",
    "fiveinferior", "", "commainferior", "periodinferior", "Yacutesmall", "", "dollarinferior", "",
    "", "Thornsmall", "", "nineinferior", "zeroinferior", "Zcaronsmall", "AEsmall", "Oslashsmall",
    "questiondownsmall", "oneinferior", "Lslashsmall", "", "", "", "", "", "", "Cedillasmall", "",
    "", "", "", "", "OEsmall", "figuredash", "hyphensuperior", "", "", "", "", "exclamdownsmall",
    "", "Ydieresissmall", "", "onesuperior", "twosuperior", "threesuperior", "foursuperior",
    "fivesuperior", "sixsuperior", "sevensuperior", "ninesuperior", "zerosuperior", "", "esuperior",
    "rsuperior", "tsuperior", "", "", "isuperior", "ssuperior", "dsuperior", "", "", "", "", "",
    "lsuperior", "Ogoneksmall", "Brevesmall", "Macronsmall", "bsuperior", "nsuperior", "msuperior",
    "commasuperior", "periodsuperior", "Dotaccentsmall", "Ringsmall",
];

/// Symbol font built-in encoding, codes 0x20..=0x7E.
#[rustfmt::skip]
const SYMBOL_LOW: [&str; 95] = [
    "space", "exclam", "universal", "numbersign", "existential", "percent", "ampersand", "suchthat",
    "parenleft", "parenright", "asteriskmath", "plus", "comma", "minus", "period", "slash", "zero",
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "colon", "semicolon",
    "less", "equal", "greater", "question", "congruent", "Alpha", "Beta", "Chi", "Delta", "Epsilon",
    "Phi", "Gamma", "Eta", "Iota", "theta1", "Kappa", "Lambda", "Mu", "Nu", "Omicron", "Pi",
    "Theta", "Rho", "Sigma", "Tau", "Upsilon", "sigma1", "Omega", "Xi", "Psi", "Zeta",
    "bracketleft", "therefore", "bracketright", "perpendicular", "underscore", "radicalex", "alpha",
    "beta", "chi", "delta", "epsilon", "phi", "gamma", "eta", "iota", "phi1", "kappa", "lambda",
    "mu", "nu", "omicron", "pi", "theta", "rho", "sigma", "tau", "upsilon", "omega1", "omega", "xi",
    "psi", "zeta", "braceleft", "bar", "braceright", "similar",
];

/// Symbol font built-in encoding, codes 0xA0..=0xFE.
#[rustfmt::skip]
const SYMBOL_HIGH: [&str; 95] = [
    "Euro", "Upsilon1", "minute", "lessequal", "fraction", "infinity", "florin", "club", "diamond",
    "heart", "spade", "arrowboth", "arrowleft", "arrowup", "arrowright", "arrowdown", "degree",
    "plusminus", "second", "greaterequal", "multiply", "proportional", "partialdiff", "bullet",
    "divide", "notequal", "equivalence", "approxequal", "ellipsis", "arrowvertex", "arrowhorizex",
    "carriagereturn", "aleph", "Ifraktur", "Rfraktur", "weierstrass", "circlemultiply",
    "circleplus", "emptyset", "intersection", "union", "propersuperset", "reflexsuperset",
    "notsubset", "propersubset", "reflexsubset", "element", "notelement", "angle", "gradient",
    "registerserif", "copyrightserif", "trademarkserif", "product", "radical", "dotmath",
    "logicalnot", "logicaland", "logicalor", "arrowdblboth", "arrowdblleft", "arrowdblup",
    "arrowdblright", "arrowdbldown", "lozenge", "angleleft", "registersans", "copyrightsans",
    "trademarksans", "summation", "parenlefttp", "parenleftex", "parenleftbt", "bracketlefttp",
    "bracketleftex", "bracketleftbt", "bracelefttp", "braceleftmid", "braceleftbt", "braceex", "",
    "angleright", "integral", "integraltp", "integralex", "integralbt", "parenrighttp",
    "parenrightex", "parenrightbt", "bracketrighttp", "bracketrightex", "bracketrightbt",
    "bracerighttp", "bracerightmid", "bracerightbt",
];

/// ZapfDingbats built-in encoding, codes 0x20..=0x7E.
#[rustfmt::skip]
const ZAPF_DINGBATS_LOW: [&str; 95] = [
    "space", "a1", "a2", "a202", "a3", "a4", "a5", "a119", "a118", "a117", "a11", "a12", "a13",
    "a14", "a15", "a16", "a105", "a17", "a18", "a19", "a20", "a21", "a22", "a23", "a24", "a25",
    "a26", "a27", "a28", "a6", "a7", "a8", "a9", "a10", "a29", "a30", "a31", "a32", "a33", "a34",
    "a35", "a36", "a37", "a38", "a39", "a40", "a41", "a42", "a43", "a44", "a45", "a46", "a47",
    "a48", "a49", "a50", "a51", "a52", "a53", "a54", "a55", "a56", "a57", "a58", "a59", "a60",
    "a61", "a62", "a63", "a64", "a65", "a66", "a67", "a68", "a69", "a70", "a71", "a72", "a73",
    "a74", "a203", "a75", "a204", "a76", "a77", "a78", "a79", "a81", "a82", "a83", "a84", "a97",
    "a98", "a99", "a100",
];

/// ZapfDingbats built-in encoding, codes 0x80..=0x8D.
#[rustfmt::skip]
const ZAPF_DINGBATS_MID: [&str; 14] = [
    "a89", "a90", "a93", "a94", "a91", "a92", "a205", "a85", "a206", "a86", "a87", "a88", "a95",
    "a96",
];

/// ZapfDingbats built-in encoding, codes 0xA1..=0xFE.
#[rustfmt::skip]
const ZAPF_DINGBATS_HIGH: [&str; 94] = [
    "a101", "a102", "a103", "a104", "a106", "a107", "a108", "a112", "a111", "a110", "a109", "a120",
    "a121", "a122", "a123", "a124", "a125", "a126", "a127", "a128", "a129", "a130", "a131", "a132",
    "a133", "a134", "a135", "a136", "a137", "a138", "a139", "a140", "a141", "a142", "a143", "a144",
    "a145", "a146", "a147", "a148", "a149", "a150", "a151", "a152", "a153", "a154", "a155", "a156",
    "a157", "a158", "a159", "a160", "a161", "a163", "a164", "a196", "a165", "a192", "a166", "a167",
    "a168", "a169", "a170", "a171", "a172", "a173", "a162", "a174", "a175", "a176", "a177", "a178",
    "a179", "a193", "a180", "a199", "a181", "a200", "a182", "", "a201", "a183", "a184", "a197",
    "a185", "a194", "a198", "a186", "a195", "a187", "a188", "a189", "a190", "a191",
];
