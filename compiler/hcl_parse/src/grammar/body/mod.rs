//! Body parsing.
//!
//! A body is a sequence of items, one per line:
//!
//! ```text
//! name = expr
//! type "label" "label" {
//!   ...
//! }
//! type { name = expr }
//! ```
//!
//! The last form is a single-line block, which may hold exactly one
//! attribute.

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Attribute, Block, Body, SourceRange, Token, TokenKind};
use rustc_hash::FxHashMap;

use crate::literal::decode_string_lit;
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

/// One parsed body item.
enum BodyItem {
    Attribute(Attribute),
    Block(Block),
}

impl<'a> Parser<'a> {
    /// Parse items until `end`, consuming the terminator.
    ///
    /// The body's range starts at the token before it (the opening brace, for
    /// a nested body) and ends at the terminator.
    pub(crate) fn parse_body(&mut self, end: TokenKind) -> (Body, Diagnostics) {
        ensure_sufficient_stack(|| self.parse_body_inner(end))
    }

    fn parse_body_inner(&mut self, end: TokenKind) -> (Body, Diagnostics) {
        let mut attributes: FxHashMap<String, Attribute> = FxHashMap::default();
        let mut blocks = Vec::new();
        let mut diags = Diagnostics::new();
        let start_range = self.prev_range();

        let end_range = loop {
            let next = self.peek();
            if next.kind == end {
                self.read();
                break next.range.clone();
            }

            match next.kind {
                TokenKind::Newline => {
                    self.read();
                }
                TokenKind::Ident => {
                    let ident = self.read();
                    let (item, item_diags) = self.parse_body_item(ident);
                    diags.extend(item_diags);
                    match item {
                        Some(BodyItem::Block(block)) => blocks.push(block),
                        Some(BodyItem::Attribute(attr)) => {
                            if let Some(existing) = attributes.get(&attr.name) {
                                diags.push(
                                    Diagnostic::error(ErrorCode::E1002, attr.name_range.clone())
                                        .with_summary("Attribute redefined")
                                        .with_detail(format!(
                                            "The attribute {:?} was already defined at {}. \
                                             Each attribute may be defined only once.",
                                            attr.name, existing.name_range
                                        ))
                                        .with_context(existing.name_range.clone()),
                                );
                            } else {
                                attributes.insert(attr.name.clone(), attr);
                            }
                        }
                        // The item parser already reported and recovered.
                        None => {}
                    }
                }
                _ => {
                    let bad = self.read();
                    if !self.recovery {
                        diags.push(unexpected_in_body(bad, &start_range));
                    }
                    let end_range = self.prev_range();
                    self.recover(end);
                    break end_range;
                }
            }
        };

        let body = Body {
            attributes,
            blocks,
            range: SourceRange::between(&start_range, &end_range),
            end_range: end_range.end_point(),
        };
        (body, diags)
    }

    /// Parse one item whose leading identifier has already been read.
    fn parse_body_item(&mut self, ident: &'a Token) -> (Option<BodyItem>, Diagnostics) {
        match self.peek_kind() {
            TokenKind::Equal => {
                let equals = self.read();
                let (attr, diags) = self.finish_attribute(ident, equals, false);
                (Some(BodyItem::Attribute(attr)), diags)
            }
            TokenKind::OQuote | TokenKind::OBrace => {
                let (block, diags) = self.finish_block(ident);
                (Some(BodyItem::Block(block)), diags)
            }
            _ => {
                self.recover_after_body_item();
                let diag = Diagnostic::error(ErrorCode::E1001, ident.range.clone())
                    .with_summary("Attribute or block definition required")
                    .with_detail(
                        "An attribute or block definition is required here. To define an \
                         attribute, use the equals sign \"=\" to introduce the attribute value.",
                    );
                (None, Diagnostics::from(diag))
            }
        }
    }

    /// Parse the value of `ident = ...` after the equals sign.
    ///
    /// A multi-line attribute must be followed by a newline (or EOF); a
    /// single-line block's attribute is followed by the closing brace, which
    /// the caller checks.
    fn finish_attribute(
        &mut self,
        ident: &'a Token,
        equals: &'a Token,
        single_line: bool,
    ) -> (Attribute, Diagnostics) {
        let (expr, mut diags) = self.parse_expression();
        let end_range = self.prev_range();

        if self.recovery && diags.has_errors() {
            // Expression recovery can stop anywhere; resync on the item
            // boundary. A single-line block resyncs on its own brace.
            if !single_line {
                self.recover_after_body_item();
            }
        } else if !single_line {
            let end = self.peek();
            match end.kind {
                TokenKind::Newline | TokenKind::Eof => {
                    self.read();
                }
                _ => {
                    if !self.recovery {
                        let (summary, detail) = if end.kind == TokenKind::Comma {
                            (
                                "Unexpected comma after attribute",
                                "Attribute definitions must be separated by newlines, not commas. \
                                 An attribute definition must end with a newline.",
                            )
                        } else {
                            (
                                "Missing newline after attribute definition",
                                "An attribute definition must end with a newline.",
                            )
                        };
                        diags.push(
                            Diagnostic::error(ErrorCode::E1003, end.range.clone())
                                .with_summary(summary)
                                .with_detail(detail)
                                .with_context(SourceRange::between(&ident.range, &end.range)),
                        );
                    }
                    self.recover_after_body_item();
                }
            }
        }

        let attr = Attribute {
            name: ident.text().into_owned(),
            expr,
            range: SourceRange::between(&ident.range, &end_range),
            name_range: ident.range.clone(),
            equals_range: equals.range.clone(),
        };
        (attr, diags)
    }

    /// Parse labels and body of a block whose type identifier has been read.
    fn finish_block(&mut self, ident: &'a Token) -> (Block, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut labels = Vec::new();
        let mut label_ranges = Vec::new();

        let open_brace = loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::OBrace => break self.read(),
                TokenKind::OQuote => {
                    let open = self.read();
                    let (label, range, label_diags) = self.parse_quoted_string_literal(open);
                    let failed = label_diags.has_errors();
                    diags.extend(label_diags);
                    labels.push(label);
                    label_ranges.push(range);
                    if failed {
                        self.recover_after_body_item();
                        return (headless_block(ident, labels, label_ranges), diags);
                    }
                }
                _ => {
                    let detail = match tok.kind {
                        TokenKind::Equal => Some(
                            "The equals sign \"=\" indicates an attribute definition, and must \
                             not be used when defining a block.",
                        ),
                        TokenKind::Newline => Some(
                            "A block definition must have block content delimited by \"{\" and \
                             \"}\", starting on the same line as the block header.",
                        ),
                        _ if !self.recovery => Some(
                            "Either a quoted string block label or an opening brace (\"{\") is \
                             expected here.",
                        ),
                        _ => None,
                    };
                    if let Some(detail) = detail {
                        diags.push(
                            Diagnostic::error(ErrorCode::E1004, tok.range.clone())
                                .with_summary("Invalid block definition")
                                .with_detail(detail)
                                .with_context(SourceRange::between(&ident.range, &tok.range)),
                        );
                    }
                    self.recover_after_body_item();
                    return (headless_block(ident, labels, label_ranges), diags);
                }
            }
        };

        let body = match self.peek_kind() {
            TokenKind::Newline | TokenKind::Eof | TokenKind::CBrace => {
                let (body, body_diags) = self.parse_body(TokenKind::CBrace);
                diags.extend(body_diags);
                Some(body)
            }
            _ => {
                let (body, body_diags) = self.parse_single_attribute_body();
                diags.extend(body_diags);
                body
            }
        };
        let close_brace_range = self.prev_range();

        let eol = self.peek();
        match eol.kind {
            TokenKind::Newline | TokenKind::Eof => {
                self.read();
            }
            _ => {
                if !self.recovery {
                    diags.push(
                        Diagnostic::error(ErrorCode::E1003, eol.range.clone())
                            .with_summary("Missing newline after block definition")
                            .with_detail("A block definition must end with a newline.")
                            .with_context(SourceRange::between(&ident.range, &eol.range)),
                    );
                }
                self.recover_after_body_item();
            }
        }

        // A broken single-line body still gets an (empty) body so the block
        // can be walked.
        let body = body.unwrap_or_else(|| {
            Body::empty(SourceRange::between(&open_brace.range, &close_brace_range))
        });

        let block = Block {
            block_type: ident.text().into_owned(),
            labels,
            label_ranges,
            body: Some(body),
            type_range: ident.range.clone(),
            open_brace_range: open_brace.range.clone(),
            close_brace_range,
        };
        (block, diags)
    }

    /// Parse `{ name = expr }` after the opening brace, through the closing
    /// brace.
    fn parse_single_attribute_body(&mut self) -> (Option<Body>, Diagnostics) {
        let ident = self.read();
        if ident.kind != TokenKind::Ident {
            let mut diags = Diagnostics::new();
            if !self.recovery {
                diags.push(
                    Diagnostic::error(ErrorCode::E1001, ident.range.clone())
                        .with_summary("Attribute or block definition required")
                        .with_detail("An attribute or block definition is required here."),
                );
            }
            self.recover(TokenKind::CBrace);
            return (None, diags);
        }

        let next = self.peek();
        let (attr, mut diags) = match next.kind {
            TokenKind::Equal => {
                let equals = self.read();
                self.finish_attribute(ident, equals, true)
            }
            TokenKind::OQuote | TokenKind::OBrace | TokenKind::Ident => {
                let diag = Diagnostic::error(
                    ErrorCode::E1001,
                    SourceRange::between(&ident.range, &next.range),
                )
                .with_summary("Attribute definition required")
                .with_detail(format!(
                    "A single-line block definition can contain only a single attribute. If you \
                     meant to define attribute {:?}, use an equals sign to assign it a value. To \
                     define a nested block, place it on a line of its own within its parent block.",
                    ident.text()
                ));
                self.recover(TokenKind::CBrace);
                return (None, Diagnostics::from(diag));
            }
            _ => {
                let diag = Diagnostic::error(ErrorCode::E1001, ident.range.clone())
                    .with_summary("Attribute or block definition required")
                    .with_detail(
                        "An attribute or block definition is required here. To define an \
                         attribute, use the equals sign \"=\" to introduce the attribute value.",
                    );
                self.recover(TokenKind::CBrace);
                return (None, Diagnostics::from(diag));
            }
        };

        let close = self.peek();
        match close.kind {
            TokenKind::CBrace => {
                self.read();
            }
            _ => {
                let detail = match close.kind {
                    TokenKind::Comma => Some(
                        "Single-line block syntax can include only one attribute definition. To \
                         define multiple attributes, use the multi-line block syntax with one \
                         attribute definition per line.",
                    ),
                    TokenKind::Newline => Some(
                        "An attribute definition on the same line as its containing block \
                         creates a single-line block definition, which must also be closed on \
                         the same line. Place the block's closing brace immediately after the \
                         attribute definition.",
                    ),
                    _ if !self.recovery => Some(
                        "A single-line block definition must end with a closing brace \
                         immediately after its single attribute definition.",
                    ),
                    _ => None,
                };
                if let Some(detail) = detail {
                    diags.push(
                        Diagnostic::error(ErrorCode::E1004, close.range.clone())
                            .with_summary("Invalid single-attribute block definition")
                            .with_detail(detail),
                    );
                }
                self.recover(TokenKind::CBrace);
            }
        }

        let mut attributes = FxHashMap::default();
        let range = attr.range.clone();
        attributes.insert(attr.name.clone(), attr);
        let body = Body {
            attributes,
            blocks: Vec::new(),
            end_range: range.end_point(),
            range,
        };
        (Some(body), diags)
    }

    /// Parse a quoted string with no template sequences, after its opening
    /// quote. Used for block labels and static traversal keys.
    ///
    /// Returns the decoded value and the range from quote to quote.
    pub(crate) fn parse_quoted_string_literal(
        &mut self,
        open: &'a Token,
    ) -> (String, SourceRange, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut value = String::new();

        let end_range = loop {
            let tok = self.read();
            match tok.kind {
                TokenKind::CQuote => break tok.range.clone(),
                TokenKind::QuotedLit => {
                    let (chunk, chunk_diags) = decode_string_lit(tok);
                    diags.extend(chunk_diags);
                    value.push_str(&chunk);
                }
                TokenKind::TemplateInterp | TokenKind::TemplateControl => {
                    let which = if tok.kind == TokenKind::TemplateControl {
                        "!"
                    } else {
                        "$"
                    };
                    diags.push(
                        Diagnostic::error(ErrorCode::E2003, tok.range.clone())
                            .with_summary("Invalid string literal")
                            .with_detail(format!(
                                "Template sequences are not allowed in this string. To include \
                                 a literal {which:?}, double it (as \"{which}{which}\") to escape it."
                            ))
                            .with_context(SourceRange::between(&open.range, &tok.range)),
                    );
                    // Mark the partial value so it is not mistaken for the
                    // literal text.
                    value.push_str(which);
                    value.push_str("{ ... }");
                    self.recover(TokenKind::TemplateSeqEnd);
                }
                TokenKind::Eof => {
                    diags.push(
                        Diagnostic::error(ErrorCode::E2004, tok.range.clone())
                            .with_summary("Unterminated string literal")
                            .with_detail(
                                "Unable to find the closing quote mark before the end of the file.",
                            )
                            .with_context(SourceRange::between(&open.range, &tok.range)),
                    );
                    break tok.range.clone();
                }
                _ => {
                    diags.push(
                        Diagnostic::error(ErrorCode::E2003, tok.range.clone())
                            .with_summary("Invalid string literal")
                            .with_detail("This item is not valid in a string literal.")
                            .with_context(SourceRange::between(&open.range, &tok.range)),
                    );
                    self.recover(TokenKind::CQuote);
                    break tok.range.clone();
                }
            }
        };

        (value, SourceRange::between(&open.range, &end_range), diags)
    }
}

/// A block whose header could not be parsed far enough to reach a body.
fn headless_block(ident: &Token, labels: Vec<String>, label_ranges: Vec<SourceRange>) -> Block {
    Block {
        block_type: ident.text().into_owned(),
        labels,
        label_ranges,
        body: None,
        type_range: ident.range.clone(),
        open_brace_range: ident.range.clone(),
        close_brace_range: ident.range.clone(),
    }
}

/// Diagnostic for a token that cannot start a body item.
fn unexpected_in_body(bad: &Token, start_range: &SourceRange) -> Diagnostic {
    match bad.kind {
        TokenKind::OQuote => Diagnostic::error(ErrorCode::E1006, bad.range.clone())
            .with_summary("Invalid attribute name")
            .with_detail("Attribute names must not be quoted."),
        TokenKind::Eof => Diagnostic::error(ErrorCode::E1005, bad.range.clone())
            .with_summary("Unclosed configuration block")
            .with_detail(
                "There is no closing brace for this block before the end of the file. This may \
                 be caused by incorrect brace nesting elsewhere in this file.",
            )
            .with_context(SourceRange::between(start_range, &bad.range)),
        _ => Diagnostic::error(ErrorCode::E1001, bad.range.clone())
            .with_summary("Attribute or block definition required")
            .with_detail("An attribute or block definition is required here."),
    }
}
