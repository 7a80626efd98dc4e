//! CMap program parser.
//!
//! Parses the PostScript-like programs found in `/ToUnicode` streams and in
//! embedded `Type0` `/Encoding` CMaps. Supports `begincodespacerange`,
//! `beginbfchar`, `beginbfrange` (numeric and array destinations),
//! `begincidchar`, `begincidrange` and `usecmap`, plus the `/CMapName` and
//! `/WMode` definitions.
//!
//! Parsing is best-effort. Tokens outside recognized blocks are skipped,
//! malformed entries are dropped one at a time, and unbalanced or unknown
//! blocks are discarded, each with a warning reported through
//! [`Diagnostics`].

use std::collections::{BTreeMap, HashMap};

use charmap_core::{
    CodespaceRange, CodespaceTable, ExtractOptions, ExtractWarning, ExtractWarningCode,
    MAX_CODE_LENGTH, UnicodeFallback, WritingMode, code_value, decode_utf16be,
    glyph_name_to_unicode,
};
use lopdf::Stream;

use crate::cmap_lexer::{Lexer, Token};
use crate::diagnostics::Diagnostics;
use crate::error::BackendError;
use crate::predefined::PredefinedCMap;
use crate::resolver::{ObjectResolver, name_of};

/// A parsed CMap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CMap {
    /// `/CMapName`, when defined.
    pub name: Option<String>,
    /// `/WMode`, when defined.
    pub writing_mode: Option<WritingMode>,
    /// Declared (or inferred) codespace ranges.
    pub codespaces: CodespaceTable,
    /// Code → Unicode text from `bfchar`/`bfrange`.
    pub unicode: HashMap<u32, String>,
    /// Code → CID from `cidchar`/`cidrange`.
    pub cids: HashMap<u32, u32>,
    /// Rendering of codes absent from `unicode`, inherited from a predefined base.
    pub fallback: UnicodeFallback,
}

impl CMap {
    /// Parse a CMap program.
    ///
    /// Only fails in strict mode, on the first recoverable issue.
    pub fn parse(
        data: &[u8],
        options: &ExtractOptions,
        diag: &mut Diagnostics,
    ) -> Result<Self, BackendError> {
        Self::parse_at_depth(data, 0, options, diag)
    }

    /// Parse a CMap program reached through `depth` levels of `usecmap`.
    pub fn parse_at_depth(
        data: &[u8],
        depth: usize,
        options: &ExtractOptions,
        diag: &mut Diagnostics,
    ) -> Result<Self, BackendError> {
        let mut parser = Parser {
            cmap: CMap::default(),
            options,
            diag,
            depth,
            operands: Vec::new(),
            arrays: Vec::new(),
            nesting: 0,
            block: None,
            source_bounds: BTreeMap::new(),
        };
        for (offset, token) in Lexer::new(data) {
            parser.token(offset, token)?;
        }
        parser.finish(data.len())
    }

    /// Overlay `base` underneath this map: entries already present win.
    pub fn inherit(&mut self, base: CMap) {
        for (code, text) in base.unicode {
            self.unicode.entry(code).or_insert(text);
        }
        for (code, cid) in base.cids {
            self.cids.entry(code).or_insert(cid);
        }
        self.codespaces.extend_from(&base.codespaces);
        if self.fallback == UnicodeFallback::Empty {
            self.fallback = base.fallback;
        }
        if self.writing_mode.is_none() {
            self.writing_mode = base.writing_mode;
        }
        if self.name.is_none() {
            self.name = base.name;
        }
    }

    /// Number of Unicode and CID entries.
    pub fn len(&self) -> usize {
        self.unicode.len() + self.cids.len()
    }

    /// Returns true if the map defines no entries.
    pub fn is_empty(&self) -> bool {
        self.unicode.is_empty() && self.cids.is_empty()
    }
}

/// Parse an embedded CMap stream, following `/UseCMap` on its dictionary.
///
/// `/UseCMap` may name a predefined CMap or reference another CMap stream.
/// Chains deeper than [`ExtractOptions::max_usecmap_depth`] are cut with a
/// warning. Returns `Ok(None)` when the stream data cannot be decoded.
pub fn load_cmap_stream<R: ObjectResolver + ?Sized>(
    resolver: &R,
    stream: &Stream,
    depth: usize,
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> Result<Option<CMap>, BackendError> {
    let data = match resolver.stream_data(stream) {
        Ok(data) => data,
        Err(e) => {
            diag.warn(
                ExtractWarningCode::ReferenceResolution,
                format!("CMap stream: {e}"),
            )?;
            return Ok(None);
        }
    };
    let mut cmap = CMap::parse_at_depth(&data, depth, options, diag)?;

    let base = match resolver.lookup(&stream.dict, b"UseCMap") {
        Ok(Some(obj)) => obj,
        Ok(None) => return Ok(Some(cmap)),
        Err(e) => {
            diag.warn(
                ExtractWarningCode::ReferenceResolution,
                format!("/UseCMap: {e}"),
            )?;
            return Ok(Some(cmap));
        }
    };
    if depth + 1 > options.max_usecmap_depth {
        diag.warn(
            ExtractWarningCode::ResourceLimitReached,
            format!(
                "usecmap chain deeper than max_usecmap_depth ({})",
                options.max_usecmap_depth
            ),
        )?;
        return Ok(Some(cmap));
    }

    if let Some(name) = name_of(base) {
        match PredefinedCMap::lookup(&name) {
            Some(predefined) => cmap.inherit(predefined.to_cmap()),
            None => diag.unsupported_encoding(&name, "no base CMap")?,
        }
    } else if let lopdf::Object::Stream(parent) = base {
        if let Some(parent) = load_cmap_stream(resolver, parent, depth + 1, options, diag)? {
            cmap.inherit(parent);
        }
    } else {
        diag.warn(
            ExtractWarningCode::MalformedObject,
            "/UseCMap is neither a name nor a stream",
        )?;
    }
    Ok(Some(cmap))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Codespace,
    BfChar,
    BfRange,
    CidChar,
    CidRange,
    NotDef,
}

#[derive(Debug)]
struct Block {
    kind: Option<BlockKind>,
    keyword: String,
    offset: usize,
}

impl Block {
    fn open(keyword: &str, offset: usize) -> Self {
        let kind = match keyword {
            "begincodespacerange" => Some(BlockKind::Codespace),
            "beginbfchar" => Some(BlockKind::BfChar),
            "beginbfrange" => Some(BlockKind::BfRange),
            "begincidchar" => Some(BlockKind::CidChar),
            "begincidrange" => Some(BlockKind::CidRange),
            "beginnotdefchar" | "beginnotdefrange" => Some(BlockKind::NotDef),
            _ => None,
        };
        Self {
            kind,
            keyword: keyword.to_string(),
            offset,
        }
    }

    fn closed_by(&self, keyword: &str) -> bool {
        keyword.strip_prefix("end") == self.keyword.strip_prefix("begin")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Integer(i64),
    Real(f64),
    Name(String),
    Hex(Vec<u8>),
    Literal(Vec<u8>),
    Array(Vec<Operand>),
    /// Dictionaries, procedures and malformed tokens.
    Opaque,
}

struct Parser<'o, 'd> {
    cmap: CMap,
    options: &'o ExtractOptions,
    diag: &'d mut Diagnostics,
    depth: usize,
    operands: Vec<(usize, Operand)>,
    arrays: Vec<Vec<Operand>>,
    /// Depth of `<< >>` / `{ }` nesting being skipped.
    nesting: usize,
    block: Option<Block>,
    /// Per-length, per-byte bounds of every source code seen.
    source_bounds: BTreeMap<usize, (Vec<u8>, Vec<u8>)>,
}

/// Keywords that look like blocks but delimit the whole program.
fn is_program_delimiter(keyword: &str) -> bool {
    matches!(
        keyword,
        "begin" | "end" | "begincmap" | "endcmap" | "beginresource" | "endresource"
    )
}

impl Parser<'_, '_> {
    fn warn(&mut self, offset: usize, description: String) -> Result<(), BackendError> {
        self.diag.push(
            ExtractWarning::with_code(ExtractWarningCode::CMapSyntax, description)
                .at_offset(offset),
        )
    }

    fn token(&mut self, offset: usize, token: Token) -> Result<(), BackendError> {
        if self.nesting > 0 {
            match token {
                Token::DictStart | Token::ProcStart => self.nesting += 1,
                Token::DictEnd | Token::ProcEnd => {
                    self.nesting -= 1;
                    if self.nesting == 0 {
                        self.push_operand(offset, Operand::Opaque);
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        let operand = match token {
            Token::Integer(i) => Operand::Integer(i),
            Token::Real(r) => Operand::Real(r),
            Token::Name(name) => Operand::Name(name),
            Token::HexString(bytes) => Operand::Hex(bytes),
            Token::LiteralString(bytes) => Operand::Literal(bytes),
            Token::ArrayStart => {
                self.arrays.push(Vec::new());
                return Ok(());
            }
            Token::ArrayEnd => {
                match self.arrays.pop() {
                    Some(items) => self.push_operand(offset, Operand::Array(items)),
                    None => self.warn(offset, "unbalanced ']'".to_string())?,
                }
                return Ok(());
            }
            Token::DictStart | Token::ProcStart => {
                self.nesting = 1;
                return Ok(());
            }
            Token::DictEnd | Token::ProcEnd => {
                return self.warn(offset, "unbalanced '>>' or '}'".to_string());
            }
            Token::Malformed(reason) => {
                self.warn(offset, reason)?;
                Operand::Opaque
            }
            Token::Keyword(keyword) => return self.keyword(offset, &keyword),
        };
        self.push_operand(offset, operand);
        Ok(())
    }

    fn push_operand(&mut self, offset: usize, operand: Operand) {
        match self.arrays.last_mut() {
            Some(items) => items.push(operand),
            None => self.operands.push((offset, operand)),
        }
    }

    fn keyword(&mut self, offset: usize, keyword: &str) -> Result<(), BackendError> {
        if !self.arrays.is_empty() {
            self.warn(offset, format!("unterminated array before '{keyword}'"))?;
            while let Some(items) = self.arrays.pop() {
                self.push_operand(offset, Operand::Array(items));
            }
        }

        if is_program_delimiter(keyword) {
            return Ok(());
        }

        if keyword.starts_with("begin") {
            if let Some(open) = self.block.take() {
                self.warn(
                    open.offset,
                    format!(
                        "'{}' not closed before '{keyword}'; block discarded",
                        open.keyword
                    ),
                )?;
            }
            let block = Block::open(keyword, offset);
            if block.kind.is_none() {
                self.warn(
                    offset,
                    format!("unknown block '{keyword}'; contents discarded"),
                )?;
            }
            self.block = Some(block);
            self.operands.clear();
            return Ok(());
        }

        if keyword.starts_with("end") {
            let Some(block) = self.block.take() else {
                self.operands.clear();
                return self.warn(offset, format!("'{keyword}' without matching begin"));
            };
            let operands = std::mem::take(&mut self.operands);
            if !block.closed_by(keyword) {
                return self.warn(
                    block.offset,
                    format!("'{}' closed by '{keyword}'; block discarded", block.keyword),
                );
            }
            return match block.kind {
                Some(BlockKind::Codespace) => self.codespace_block(&operands),
                Some(BlockKind::BfChar) => self.bfchar_block(&operands),
                Some(BlockKind::BfRange) => self.bfrange_block(&operands),
                Some(BlockKind::CidChar) => self.cidchar_block(&operands),
                Some(BlockKind::CidRange) => self.cidrange_block(&operands),
                Some(BlockKind::NotDef) | None => Ok(()),
            };
        }

        if self.block.is_some() {
            // Stray operator inside a block: keep collecting entries.
            return Ok(());
        }

        match keyword {
            "def" => self.define(),
            "usecmap" => self.usecmap(offset)?,
            _ => {}
        }
        self.operands.clear();
        Ok(())
    }

    fn define(&mut self) {
        let [.., (_, key), (_, value)] = self.operands.as_slice() else {
            return;
        };
        match (key, value) {
            (Operand::Name(key), Operand::Name(name)) if key == "CMapName" => {
                self.cmap.name = Some(name.clone());
            }
            (Operand::Name(key), Operand::Integer(mode)) if key == "WMode" => {
                self.cmap.writing_mode = Some(if *mode == 1 {
                    WritingMode::Vertical
                } else {
                    WritingMode::Horizontal
                });
            }
            _ => {}
        }
    }

    fn usecmap(&mut self, offset: usize) -> Result<(), BackendError> {
        let Some((_, Operand::Name(name))) = self.operands.last() else {
            return self.warn(offset, "usecmap without a CMap name".to_string());
        };
        let name = name.clone();
        if self.depth + 1 > self.options.max_usecmap_depth {
            return self.diag.push(
                ExtractWarning::with_code(
                    ExtractWarningCode::ResourceLimitReached,
                    format!(
                        "usecmap chain deeper than max_usecmap_depth ({})",
                        self.options.max_usecmap_depth
                    ),
                )
                .at_offset(offset),
            );
        }
        match PredefinedCMap::lookup(&name) {
            Some(base) => {
                self.cmap.inherit(base.to_cmap());
                Ok(())
            }
            None => self.diag.unsupported_encoding(&name, "no base CMap"),
        }
    }

    fn record_source(&mut self, code: &[u8]) {
        let (low, high) = self
            .source_bounds
            .entry(code.len())
            .or_insert_with(|| (code.to_vec(), code.to_vec()));
        for (k, &b) in code.iter().enumerate() {
            low[k] = low[k].min(b);
            high[k] = high[k].max(b);
        }
    }

    fn codespace_block(&mut self, operands: &[(usize, Operand)]) -> Result<(), BackendError> {
        let mut i = 0;
        while i < operands.len() {
            let (offset, low) = &operands[i];
            let range = match (low, operands.get(i + 1)) {
                (Operand::Hex(low), Some((_, Operand::Hex(high)))) => {
                    CodespaceRange::new(low, high)
                }
                _ => {
                    self.warn(*offset, "malformed codespace range entry".to_string())?;
                    i += 1;
                    continue;
                }
            };
            i += 2;
            match range {
                Some(range) => {
                    if !self.cmap.codespaces.insert(range) {
                        self.warn(*offset, "overlapping codespace range".to_string())?;
                    }
                }
                None => self.warn(*offset, "invalid codespace range bounds".to_string())?,
            }
        }
        Ok(())
    }

    fn bfchar_block(&mut self, operands: &[(usize, Operand)]) -> Result<(), BackendError> {
        let mut i = 0;
        while i < operands.len() {
            let (offset, src) = &operands[i];
            let Some(src) = source_code(src) else {
                self.warn(*offset, "malformed bfchar source code".to_string())?;
                i += 1;
                continue;
            };
            let Some((_, dst)) = operands.get(i + 1) else {
                self.warn(*offset, "bfchar entry without destination".to_string())?;
                break;
            };
            i += 2;
            match destination_text(dst) {
                Some(text) => {
                    self.record_source(src);
                    self.cmap.unicode.insert(code_value(src), text);
                }
                None => self.warn(*offset, "malformed bfchar destination".to_string())?,
            }
        }
        Ok(())
    }

    /// Validate a `lo hi` pair. Returns the code span on success.
    fn range_bounds(
        &mut self,
        offset: usize,
        low: &Operand,
        high: &Operand,
    ) -> Result<Option<(u32, u32)>, BackendError> {
        let (Some(low), Some(high)) = (source_code(low), source_code(high)) else {
            self.warn(offset, "malformed range bounds".to_string())?;
            return Ok(None);
        };
        if low.len() != high.len() {
            self.warn(offset, "range bounds differ in length".to_string())?;
            return Ok(None);
        }
        let (lo, hi) = (code_value(low), code_value(high));
        if hi < lo {
            self.warn(offset, format!("range end {hi:#X} below start {lo:#X}"))?;
            return Ok(None);
        }
        let count = u64::from(hi - lo) + 1;
        if count > u64::from(self.options.max_cmap_range) {
            self.diag.push(
                ExtractWarning::with_code(
                    ExtractWarningCode::ResourceLimitReached,
                    format!(
                        "range of {count} codes exceeds max_cmap_range ({})",
                        self.options.max_cmap_range
                    ),
                )
                .at_offset(offset),
            )?;
            return Ok(None);
        }
        self.record_source(low);
        self.record_source(high);
        Ok(Some((lo, hi)))
    }

    fn bfrange_block(&mut self, operands: &[(usize, Operand)]) -> Result<(), BackendError> {
        let mut i = 0;
        while i < operands.len() {
            let offset = operands[i].0;
            let (Some((_, low)), Some((_, high)), Some((_, dst))) =
                (operands.get(i), operands.get(i + 1), operands.get(i + 2))
            else {
                self.warn(offset, "truncated bfrange entry".to_string())?;
                break;
            };
            if source_code(low).is_none() {
                self.warn(offset, "malformed bfrange source code".to_string())?;
                i += 1;
                continue;
            }
            i += 3;
            let Some((lo, hi)) = self.range_bounds(offset, low, high)? else {
                continue;
            };

            match dst {
                Operand::Hex(_) | Operand::Literal(_) => match destination_units(dst) {
                    Some(mut current) if !current.is_empty() => {
                        for code in lo..=hi {
                            self.cmap.unicode.insert(code, decode_utf16be(&current));
                            increment(&mut current);
                        }
                    }
                    _ => self.warn(offset, "malformed bfrange destination".to_string())?,
                },
                Operand::Array(items) => {
                    for (code, item) in (lo..=hi).zip(items) {
                        match destination_text(item) {
                            Some(text) => {
                                self.cmap.unicode.insert(code, text);
                            }
                            None => self.warn(
                                offset,
                                format!("malformed bfrange destination for code {code:#X}"),
                            )?,
                        }
                    }
                }
                _ => self.warn(offset, "malformed bfrange destination".to_string())?,
            }
        }
        Ok(())
    }

    fn cidchar_block(&mut self, operands: &[(usize, Operand)]) -> Result<(), BackendError> {
        let mut i = 0;
        while i < operands.len() {
            let (offset, src) = &operands[i];
            let Some(src) = source_code(src) else {
                self.warn(*offset, "malformed cidchar source code".to_string())?;
                i += 1;
                continue;
            };
            let cid = operands.get(i + 1).and_then(|(_, dst)| cid_value(dst));
            i += 2;
            match cid {
                Some(cid) => {
                    self.record_source(src);
                    self.cmap.cids.insert(code_value(src), cid);
                }
                None => self.warn(*offset, "malformed cidchar destination".to_string())?,
            }
        }
        Ok(())
    }

    fn cidrange_block(&mut self, operands: &[(usize, Operand)]) -> Result<(), BackendError> {
        let mut i = 0;
        while i < operands.len() {
            let offset = operands[i].0;
            let (Some((_, low)), Some((_, high)), Some((_, dst))) =
                (operands.get(i), operands.get(i + 1), operands.get(i + 2))
            else {
                self.warn(offset, "truncated cidrange entry".to_string())?;
                break;
            };
            if source_code(low).is_none() {
                self.warn(offset, "malformed cidrange source code".to_string())?;
                i += 1;
                continue;
            }
            i += 3;
            let Some(start) = cid_value(dst) else {
                self.warn(offset, "malformed cidrange destination".to_string())?;
                continue;
            };
            let Some((lo, hi)) = self.range_bounds(offset, low, high)? else {
                continue;
            };
            for (k, code) in (lo..=hi).enumerate() {
                // Saturating: a CID beyond u32 cannot name a glyph anyway.
                let cid = start.saturating_add(k as u32);
                self.cmap.cids.insert(code, cid);
            }
        }
        Ok(())
    }

    fn finish(mut self, end: usize) -> Result<CMap, BackendError> {
        if let Some(block) = self.block.take() {
            self.warn(
                block.offset,
                format!(
                    "'{}' not closed before end of data; block discarded",
                    block.keyword
                ),
            )?;
        }
        if self.nesting > 0 || !self.arrays.is_empty() {
            self.warn(
                end,
                "unterminated dictionary, procedure or array".to_string(),
            )?;
        }
        if self.cmap.codespaces.is_empty() {
            self.cmap.codespaces = infer_codespace(&self.source_bounds);
        }
        Ok(self.cmap)
    }
}

/// Codespace implied by the source codes of a CMap that declares none.
fn infer_codespace(bounds: &BTreeMap<usize, (Vec<u8>, Vec<u8>)>) -> CodespaceTable {
    if bounds.len() == 1 {
        if let Some(&len) = bounds.keys().next() {
            return CodespaceTable::fixed(len);
        }
    }
    let mut table = CodespaceTable::new();
    for (low, high) in bounds.values() {
        if let Some(range) = CodespaceRange::new(low, high) {
            table.insert(range);
        }
    }
    table
}

/// Validate a source code operand; `None` means the entry is skipped.
fn source_code(operand: &Operand) -> Option<&[u8]> {
    match operand {
        Operand::Hex(bytes) if !bytes.is_empty() && bytes.len() <= MAX_CODE_LENGTH => Some(bytes),
        _ => None,
    }
}

/// Unicode text of a `bfchar` or array-form `bfrange` destination.
fn destination_text(operand: &Operand) -> Option<String> {
    match operand {
        Operand::Name(name) => Some(glyph_name_to_unicode(name).unwrap_or_default()),
        _ => destination_units(operand).map(|units| decode_utf16be(&units)),
    }
}

/// A string destination as whole UTF-16BE code units.
///
/// A 1-byte hex string and a literal without a byte-order mark are Latin-1;
/// a trailing odd byte is dropped.
fn destination_units(operand: &Operand) -> Option<Vec<u8>> {
    let mut units = match operand {
        Operand::Hex(bytes) => match bytes.as_slice() {
            [] => return None,
            [b] => vec![0, *b],
            _ => bytes.clone(),
        },
        Operand::Literal(bytes) => match bytes.as_slice() {
            [0xFE, 0xFF, rest @ ..] => rest.to_vec(),
            _ => bytes.iter().flat_map(|&b| [0, b]).collect(),
        },
        _ => return None,
    };
    units.truncate(units.len() & !1);
    Some(units)
}

fn cid_value(operand: &Operand) -> Option<u32> {
    match operand {
        Operand::Integer(i) => u32::try_from(*i).ok(),
        Operand::Real(r) if *r >= 0.0 && r.fract() == 0.0 => Some(*r as u32),
        _ => None,
    }
}

/// Big-endian increment with carry; wraps at the top.
fn increment(bytes: &mut [u8]) {
    for b in bytes.iter_mut().rev() {
        let (next, overflow) = b.overflowing_add(1);
        *b = next;
        if !overflow {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> (CMap, Vec<ExtractWarning>) {
        let mut diag = Diagnostics::new(&ExtractOptions::default());
        let cmap = CMap::parse(data, &ExtractOptions::default(), &mut diag).unwrap();
        (cmap, diag.into_warnings())
    }

    fn parse_clean(data: &[u8]) -> CMap {
        let (cmap, warnings) = parse(data);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        cmap
    }

    // --- beginbfchar ---

    #[test]
    fn bfchar_single_mapping() {
        let cmap = parse_clean(b"1 beginbfchar\n<0041> <0041>\nendbfchar\n");
        assert_eq!(cmap.unicode.get(&0x0041).map(String::as_str), Some("A"));
    }

    #[test]
    fn bfchar_latin1_destination() {
        let cmap = parse_clean(b"beginbfchar <01> <00DC> endbfchar");
        assert_eq!(cmap.unicode[&1], "\u{00DC}");
        let cmap = parse_clean(b"beginbfchar <02> <DC> endbfchar");
        assert_eq!(cmap.unicode[&2], "\u{00DC}");
    }

    #[test]
    fn bfchar_ligature_and_surrogates() {
        let cmap = parse_clean(b"beginbfchar <0005> <00660069> <0006> <D835DC00> endbfchar");
        assert_eq!(cmap.unicode[&5], "fi");
        assert_eq!(cmap.unicode[&6], "\u{1D400}");
    }

    #[test]
    fn bfchar_literal_destination_keeps_tabs() {
        let cmap = parse_clean(b"beginbfchar <09> (\t) <0A> (a\tb) endbfchar");
        assert_eq!(cmap.unicode[&0x09], "\t");
        assert_eq!(cmap.unicode[&0x0A], "a\tb");
    }

    #[test]
    fn bfchar_literal_with_bom_is_utf16() {
        let cmap = parse_clean(b"beginbfchar <01> (\xFE\xFF\x00A) endbfchar");
        assert_eq!(cmap.unicode[&1], "A");
    }

    #[test]
    fn bfchar_glyph_name_destination() {
        let cmap = parse_clean(b"beginbfchar <01> /Adieresis <02> /notaglyph endbfchar");
        assert_eq!(cmap.unicode[&1], "\u{00C4}");
        assert_eq!(cmap.unicode[&2], "");
    }

    #[test]
    fn bfchar_entries_span_lines() {
        let input = b"beginbfchar\r\n<0041>\r\n<0061>\r\n<0042>\n\n<0062>\nendbfchar";
        let cmap = parse_clean(input);
        assert_eq!(cmap.unicode[&0x41], "a");
        assert_eq!(cmap.unicode[&0x42], "b");
    }

    #[test]
    fn bfchar_malformed_entry_skipped_individually() {
        let (cmap, warnings) = parse(b"beginbfchar <0041> <0G> <0042> <0042> endbfchar");
        assert!(!cmap.unicode.contains_key(&0x41));
        assert_eq!(cmap.unicode.get(&0x42).map(String::as_str), Some("B"));
        assert_eq!(warnings.len(), 2);
        for warning in &warnings {
            assert_eq!(warning.code, ExtractWarningCode::CMapSyntax);
        }
    }

    // --- beginbfrange ---

    #[test]
    fn bfrange_numeric_increment() {
        let cmap = parse_clean(b"beginbfrange <0020> <0022> <0041> endbfrange");
        assert_eq!(cmap.unicode[&0x20], "A");
        assert_eq!(cmap.unicode[&0x21], "B");
        assert_eq!(cmap.unicode[&0x22], "C");
    }

    #[test]
    fn bfrange_increment_carries() {
        let cmap = parse_clean(b"beginbfrange <01> <02> <00FF> endbfrange");
        assert_eq!(cmap.unicode[&1], "\u{00FF}");
        assert_eq!(cmap.unicode[&2], "\u{0100}");
    }

    #[test]
    fn bfrange_increments_trailing_char_of_multichar_destination() {
        let cmap = parse_clean(b"beginbfrange <01> <02> <00660069> endbfrange");
        assert_eq!(cmap.unicode[&1], "fi");
        assert_eq!(cmap.unicode[&2], "fj");
    }

    #[test]
    fn bfrange_array_form() {
        let cmap = parse_clean(
            b"beginbfrange <0001> <0003> [<0058> <00660066> /Yacute] endbfrange",
        );
        assert_eq!(cmap.unicode[&1], "X");
        assert_eq!(cmap.unicode[&2], "ff");
        assert_eq!(cmap.unicode[&3], "\u{00DD}");
    }

    #[test]
    fn bfrange_array_extra_entries_ignored_short_array_partial() {
        let cmap = parse_clean(b"beginbfrange <01> <02> [<0041> <0042> <0043>] endbfrange");
        assert_eq!(cmap.unicode.len(), 2);
        let cmap = parse_clean(b"beginbfrange <01> <03> [<0041>] endbfrange");
        assert_eq!(cmap.unicode.len(), 1);
        assert_eq!(cmap.unicode[&1], "A");
    }

    #[test]
    fn bfrange_reversed_bounds_skipped() {
        let input = b"beginbfrange <0005> <0001> <0041> <0010> <0010> <0061> endbfrange";
        let (cmap, warnings) = parse(input);
        assert_eq!(cmap.unicode.len(), 1);
        assert_eq!(cmap.unicode[&0x10], "a");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].description.contains("below start"));
    }

    #[test]
    fn bfrange_length_mismatch_skipped() {
        let (cmap, warnings) = parse(b"beginbfrange <01> <0005> <0041> endbfrange");
        assert!(cmap.unicode.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn bfrange_limit_is_enforced() {
        let options = ExtractOptions {
            max_cmap_range: 4,
            ..ExtractOptions::default()
        };
        let mut diag = Diagnostics::new(&options);
        let cmap = CMap::parse(
            b"beginbfrange <0000> <00FF> <0041> <0100> <0101> <0041> endbfrange",
            &options,
            &mut diag,
        )
        .unwrap();
        assert_eq!(cmap.unicode.len(), 2);
        let warnings = diag.into_warnings();
        assert_eq!(warnings[0].code, ExtractWarningCode::ResourceLimitReached);
    }

    // --- cid blocks ---

    #[test]
    fn cidchar_and_cidrange() {
        let cmap = parse_clean(
            b"begincidchar <0041> 7 endcidchar\nbegincidrange <0100> <0102> 500 endcidrange",
        );
        assert_eq!(cmap.cids[&0x41], 7);
        assert_eq!(cmap.cids[&0x100], 500);
        assert_eq!(cmap.cids[&0x102], 502);
        assert!(cmap.unicode.is_empty());
    }

    // --- codespace ---

    #[test]
    fn declared_codespace() {
        let cmap = parse_clean(
            b"2 begincodespacerange <00> <80> <8140> <FEFE> endcodespacerange",
        );
        assert_eq!(cmap.codespaces.ranges().len(), 2);
        assert_eq!(cmap.codespaces.code_length(&[0x81, 0x40]), 2);
        assert_eq!(cmap.codespaces.code_length(&[0x41, 0x40]), 1);
    }

    #[test]
    fn codespace_inferred_from_source_codes() {
        let cmap = parse_clean(b"beginbfchar <0102> <0041> endbfchar");
        assert_eq!(cmap.codespaces, CodespaceTable::fixed(2));
    }

    #[test]
    fn codespace_inferred_for_mixed_lengths() {
        let cmap = parse_clean(b"beginbfchar <20> <0020> <8141> <4E2D> endbfchar");
        assert_eq!(cmap.codespaces.code_length(&[0x81, 0x41]), 2);
        assert_eq!(cmap.codespaces.code_length(&[0x20, 0x81]), 1);
    }

    // --- structure ---

    #[test]
    fn full_program_with_boilerplate() {
        let data = b"%!PS-Adobe-3.0 Resource-CMap\n\
            /CIDInit /ProcSet findresource begin\n\
            12 dict begin\n\
            begincmap\n\
            /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
            /CMapName /Adobe-Identity-UCS def\n\
            /CMapType 2 def\n\
            /WMode 1 def\n\
            1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n\
            1 beginbfchar\n<0003> <0020>\nendbfchar\n\
            endcmap\n\
            CMapName currentdict /CMap defineresource pop\n\
            end\nend\n";
        let cmap = parse_clean(data);
        assert_eq!(cmap.name.as_deref(), Some("Adobe-Identity-UCS"));
        assert_eq!(cmap.writing_mode, Some(WritingMode::Vertical));
        assert_eq!(cmap.unicode[&3], " ");
        assert_eq!(cmap.codespaces, CodespaceTable::fixed(2));
    }

    #[test]
    fn unbalanced_block_is_discarded() {
        let input = b"beginbfchar <01> <0041> beginbfrange <02> <03> <0061> endbfrange";
        let (cmap, warnings) = parse(input);
        assert!(!cmap.unicode.contains_key(&1));
        assert_eq!(cmap.unicode[&2], "a");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].description.contains("beginbfchar"));
    }

    #[test]
    fn mismatched_end_discards_block() {
        let (cmap, warnings) = parse(b"beginbfchar <01> <0041> endbfrange");
        assert!(cmap.unicode.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unknown_block_is_discarded_with_warning() {
        let input = b"beginfoo <01> <0041> endfoo beginbfchar <02> <0042> endbfchar";
        let (cmap, warnings) = parse(input);
        assert!(!cmap.unicode.contains_key(&1));
        assert_eq!(cmap.unicode[&2], "B");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].description.contains("beginfoo"));
    }

    #[test]
    fn unterminated_block_at_end_of_data() {
        let (cmap, warnings) = parse(b"beginbfchar <01> <0041>");
        assert!(cmap.unicode.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].offset, Some(0));
    }

    #[test]
    fn notdef_blocks_are_ignored_silently() {
        let cmap = parse_clean(b"beginnotdefrange <00> <1F> 1 endnotdefrange");
        assert!(cmap.is_empty());
    }

    #[test]
    fn garbage_outside_blocks_is_skipped() {
        let input = b"foo bar 12 /x [1 2] pop beginbfchar <01> <0041> endbfchar baz";
        let cmap = parse_clean(input);
        assert_eq!(cmap.len(), 1);
    }

    #[test]
    fn strict_mode_escalates_syntax_errors() {
        let options = ExtractOptions::strict();
        let mut diag = Diagnostics::new(&options);
        let err = CMap::parse(b"beginbfchar <01> <0041>", &options, &mut diag).unwrap_err();
        assert!(matches!(err, BackendError::Strict(_)));
    }

    #[test]
    fn empty_input() {
        let cmap = parse_clean(b"");
        assert!(cmap.is_empty());
        assert!(cmap.codespaces.is_empty());
    }

    // --- usecmap ---

    #[test]
    fn usecmap_local_definitions_win() {
        let cmap = parse_clean(b"/Identity-H usecmap\nbegincidchar <0041> 9 endcidchar");
        assert_eq!(cmap.cids[&0x41], 9);
        assert_eq!(cmap.codespaces, CodespaceTable::fixed(2));
        assert_eq!(cmap.fallback, UnicodeFallback::RawCode);
    }

    #[test]
    fn usecmap_base_supplies_fallback_and_writing_mode() {
        let cmap = parse_clean(b"/UniGB-UCS2-V usecmap beginbfchar <0001> <0058> endbfchar");
        assert_eq!(cmap.fallback, UnicodeFallback::Utf16Be);
        assert_eq!(cmap.writing_mode, Some(WritingMode::Vertical));
        assert_eq!(cmap.unicode[&1], "X");
    }

    #[test]
    fn usecmap_unknown_name_warns() {
        let (_, warnings) = parse(b"/NoSuch-H usecmap");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, ExtractWarningCode::UnsupportedEncoding);
        assert!(warnings[0].description.contains("NoSuch-H"));
    }

    #[test]
    fn usecmap_depth_limit() {
        let options = ExtractOptions {
            max_usecmap_depth: 0,
            ..ExtractOptions::default()
        };
        let mut diag = Diagnostics::new(&options);
        let cmap = CMap::parse(b"/Identity-H usecmap", &options, &mut diag).unwrap();
        assert!(cmap.codespaces.is_empty());
        assert_eq!(
            diag.warnings()[0].code,
            ExtractWarningCode::ResourceLimitReached
        );
    }

    #[test]
    fn inherit_keeps_existing_entries() {
        let mut local = parse_clean(b"beginbfchar <01> <0061> endbfchar");
        let base = parse_clean(b"beginbfchar <01> <0041> <02> <0042> endbfchar");
        local.inherit(base);
        assert_eq!(local.unicode[&1], "a");
        assert_eq!(local.unicode[&2], "B");
    }

    #[test]
    fn bfrange_odd_length_destination_increments_last_unit() {
        let (cmap, warnings) = parse(b"beginbfrange <01> <03> <004100> endbfrange");
        assert!(warnings.is_empty());
        assert_eq!(cmap.unicode[&1], "A");
        assert_eq!(cmap.unicode[&2], "B");
        assert_eq!(cmap.unicode[&3], "C");
    }

    #[test]
    fn literal_destinations_agree_between_bfchar_and_bfrange() {
        let input = b"beginbfchar <01> (AB) endbfchar beginbfrange <02> <03> (AB) endbfrange";
        let (cmap, warnings) = parse(input);
        assert!(warnings.is_empty());
        assert_eq!(cmap.unicode[&1], "AB");
        assert_eq!(cmap.unicode[&2], "AB");
        assert_eq!(cmap.unicode[&3], "AC");
    }

    #[test]
    fn empty_bfrange_destination_is_skipped() {
        let (cmap, warnings) = parse(b"beginbfrange <01> <02> <> endbfrange");
        assert!(cmap.unicode.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn increment_helper() {
        let mut bytes = [0x00, 0xFF];
        increment(&mut bytes);
        assert_eq!(bytes, [0x01, 0x00]);
        let mut bytes = [0xFF, 0xFF];
        increment(&mut bytes);
        assert_eq!(bytes, [0x00, 0x00]);
    }
}
