//! Table parser: turns rows into node-kind descriptors.
//!
//! Failures are row-local. An unparsable row is dropped with a diagnostic and
//! parsing moves to the next row; the table parse never aborts.

use indexmap::IndexMap;
use rowan::TextRange;

use strata_model::{KindKey, Modifiers, Param, RawKind, Registry, RegistryError, Repeat, Tag};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::source_map::SourceId;
use crate::table::lexer::{self, Token, TokenKind};
use crate::table::reader::{self, RowRecord, TableItem};

/// Where each registry entry came from, kept aside so the registry itself
/// stays free of text positions.
#[derive(Debug, Clone, Default)]
pub struct SpanTable {
    kinds: IndexMap<KindKey, Span>,
    modules: IndexMap<String, Span>,
}

impl SpanTable {
    /// Span of a kind's signature cell.
    pub fn kind(&self, key: &KindKey) -> Option<Span> {
        self.kinds.get(key).copied()
    }

    /// Span of the first header that opened a module.
    pub fn module(&self, name: &str) -> Option<Span> {
        self.modules.get(name).copied()
    }
}

/// Accumulates descriptors from one or more table sources into a registry.
///
/// Module state does not leak across sources: every call to [`parse`] starts
/// outside any module, so each file must open its own `module` header.
///
/// [`parse`]: TableParser::parse
#[derive(Debug, Default)]
pub struct TableParser {
    registry: Registry,
    spans: SpanTable,
    diagnostics: Diagnostics,
}

impl TableParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one table source, accumulating into the shared registry.
    pub fn parse(&mut self, source: SourceId, text: &str) {
        let mut current: Option<String> = None;
        for item in reader::read(text) {
            match item {
                TableItem::Header {
                    name,
                    upstream,
                    range,
                } => {
                    let name = reader::item_text(text, name).to_string();
                    let upstream = upstream.map(|r| reader::item_text(text, r));
                    self.open_module(source, &name, upstream, range);
                    current = Some(name);
                }
                TableItem::Row(row) => self.parse_row(source, text, row, current.as_deref()),
            }
        }
    }

    /// Finishes parsing, handing out everything accumulated so far.
    pub fn finish(self) -> (Registry, SpanTable, Diagnostics) {
        (self.registry, self.spans, self.diagnostics)
    }

    fn open_module(
        &mut self,
        source: SourceId,
        name: &str,
        upstream: Option<&str>,
        range: TextRange,
    ) {
        let span = Span::new(source, range);
        match self.registry.open_module(name, upstream) {
            Ok(()) => {}
            Err(RegistryError::ConflictingUpstream { old, .. }) => {
                let mut report = self
                    .diagnostics
                    .report(DiagnosticKind::ConflictingUpstream, span)
                    .message(name);
                if let Some(first) = self.spans.module(name) {
                    report = report.related_to(first, format!("opened here with upstream `{old}`"));
                }
                report.emit();
            }
            Err(_) => {}
        }
        self.spans.modules.entry(name.to_string()).or_insert(span);
    }

    fn parse_row(&mut self, source: SourceId, text: &str, row: RowRecord, module: Option<&str>) {
        let row_span = Span::new(source, row.range);
        let Some(module) = module else {
            self.diagnostics
                .report(DiagnosticKind::RowOutsideModule, row_span)
                .emit();
            return;
        };
        if row.cols.len() != 3 {
            self.diagnostics
                .report(DiagnosticKind::MalformedRow, row_span)
                .message(format!("found {}", row.cols.len()))
                .emit();
            return;
        }

        let tag_span = Span::new(source, row.cols[0]);
        let Some((tag, modifiers)) = self.parse_tag_cell(reader::item_text(text, row.cols[0]), tag_span)
        else {
            return;
        };

        let sig_cell = reader::item_text(text, row.cols[1]);
        let sig = match parse_signature(sig_cell) {
            Ok(sig) => sig,
            Err(err) => {
                let range = err.range + row.cols[1].start();
                self.diagnostics
                    .report(DiagnosticKind::InvalidSignature, Span::new(source, range))
                    .message(err.detail)
                    .emit();
                return;
            }
        };

        let raw = RawKind {
            name: sig.name.clone(),
            tag: Tag::new(tag),
            qualifier: sig.qualifier,
            superclass: sig.superclass,
            params: sig.params,
            modifiers,
            description: reader::item_text(text, row.cols[2]).to_string(),
        };
        let key = KindKey {
            module: module.to_string(),
            name: sig.name,
        };
        let sig_span = Span::new(source, row.cols[1]);

        match self.registry.add_kind(module, raw) {
            Ok(()) => {
                self.spans.kinds.insert(key, sig_span);
            }
            Err(RegistryError::DuplicateKind { name, .. }) => {
                let mut report = self
                    .diagnostics
                    .report(DiagnosticKind::DuplicateKind, sig_span)
                    .message(&name);
                if let Some(first) = self.spans.kind(&key) {
                    report = report.related_to(first, "first declared here");
                }
                report.emit();
            }
            // The header above already opened the module.
            Err(_) => {}
        }
    }

    /// `TAG` or `TAG SO`: first word is the discriminant, remaining letters
    /// are modifier flags.
    fn parse_tag_cell(&mut self, cell: &str, span: Span) -> Option<(String, Modifiers)> {
        let mut words = cell.split_whitespace();
        let Some(tag) = words.next() else {
            self.diagnostics
                .report(DiagnosticKind::MalformedRow, span)
                .message("empty tag cell")
                .emit();
            return None;
        };
        let mut modifiers = Modifiers::default();
        for word in words {
            for c in word.chars() {
                match c {
                    'S' => modifiers.reach_via_superclass = true,
                    'O' => modifiers.pinned = true,
                    other => {
                        self.diagnostics
                            .report(DiagnosticKind::UnknownModifier, span)
                            .message(other.to_string())
                            .emit();
                        return None;
                    }
                }
            }
        }
        Some((tag.to_string(), modifiers))
    }
}

// ============================================================================
// Signature parsing
// ============================================================================

#[derive(Debug)]
struct ParsedSig {
    name: String,
    qualifier: Option<String>,
    params: Vec<Param>,
    superclass: Option<String>,
}

/// Parse failure local to one signature cell. `range` is cell-relative.
#[derive(Debug)]
struct SigError {
    range: TextRange,
    detail: String,
}

/// `name(p1: type, p2: type*) : superclass`, all pieces optional except the
/// name. `*`/`+` mark repetition, `?` marks the guarded parameter.
fn parse_signature(cell: &str) -> Result<ParsedSig, SigError> {
    let mut cur = SigCursor::new(cell);

    let (name, qualifier) = cur.qualified_name("constructor name")?;
    let mut params = Vec::new();
    if cur.eat(TokenKind::LParen) {
        if !cur.at(TokenKind::RParen) {
            loop {
                params.push(cur.param()?);
                if !cur.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        cur.expect(TokenKind::RParen, "`)`")?;
    }
    let superclass = if cur.eat(TokenKind::Colon) {
        let (name, _) = cur.qualified_name("superclass name")?;
        Some(name)
    } else {
        None
    };
    cur.expect_end()?;

    if params.iter().filter(|p| p.guarded).count() > 1 {
        return Err(SigError {
            range: TextRange::new(0.into(), (cell.len() as u32).into()),
            detail: "at most one parameter may be guarded with `?`".to_string(),
        });
    }
    // Repeated names would collide in the generated accessors.
    for (i, param) in params.iter().enumerate() {
        if params[..i].iter().any(|earlier| earlier.name == param.name) {
            return Err(SigError {
                range: TextRange::new(0.into(), (cell.len() as u32).into()),
                detail: format!("parameter `{}` is declared twice", param.name),
            });
        }
    }

    Ok(ParsedSig {
        name,
        qualifier,
        params,
        superclass,
    })
}

struct SigCursor<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> SigCursor<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = lexer::lex(text)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            text,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, SigError> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(*token)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn expect_end(&mut self) -> Result<(), SigError> {
        if self.pos == self.tokens.len() {
            return Ok(());
        }
        Err(self.unexpected("end of signature"))
    }

    /// `IDENT (:: IDENT)*` → (last segment, qualifier prefix).
    fn qualified_name(&mut self, what: &str) -> Result<(String, Option<String>), SigError> {
        let first = self.expect(TokenKind::Ident, what)?;
        let mut name = lexer::token_text(self.text, &first).to_string();
        let mut prefix: Vec<String> = Vec::new();
        while self.eat(TokenKind::PathSep) {
            let next = self.expect(TokenKind::Ident, what)?;
            let segment = lexer::token_text(self.text, &next).to_string();
            prefix.push(std::mem::replace(&mut name, segment));
        }
        let qualifier = (!prefix.is_empty()).then(|| prefix.join("::"));
        Ok((name, qualifier))
    }

    fn param(&mut self) -> Result<Param, SigError> {
        let name_token = self.expect(TokenKind::Ident, "parameter name")?;
        self.expect(TokenKind::Colon, "`:`")?;
        let (ty, _) = self.qualified_name("parameter type")?;
        let (repeat, guarded) = match self.peek() {
            Some(TokenKind::Star) => {
                self.pos += 1;
                (Repeat::ZeroOrMore, false)
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                (Repeat::OneOrMore, false)
            }
            Some(TokenKind::Question) => {
                self.pos += 1;
                (Repeat::One, true)
            }
            _ => (Repeat::One, false),
        };
        Ok(Param {
            name: lexer::token_text(self.text, &name_token).to_string(),
            ty,
            repeat,
            guarded,
        })
    }

    fn unexpected(&self, what: &str) -> SigError {
        match self.tokens.get(self.pos) {
            Some(token) => SigError {
                range: token.span,
                detail: format!(
                    "expected {what}, found `{}`",
                    lexer::token_text(self.text, token)
                ),
            },
            None => SigError {
                range: TextRange::empty((self.text.len() as u32).into()),
                detail: format!("expected {what}, found end of cell"),
            },
        }
    }
}
