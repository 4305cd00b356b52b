//! Traversal suffixes and splats.
//!
//! After every term the parser consumes any number of:
//!
//! - `.name`: attribute access
//! - `[key]`: index; a constant key becomes a traversal step, anything else
//!   an `Index` expression
//! - `.*.a.b`: attribute-only splat
//! - `[*].a[0]...`: full splat, which takes every following suffix
//!
//! Consecutive steps off a variable fold into one flat `ScopeTraversal`, and
//! steps off any other expression into one `RelativeTraversal`. The steps are
//! collected in a [`Chain`] and the node is only built once the suffix loop
//! is done with it.

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Expr, ExprKind, SourceRange, Token, TokenKind, Traversal, Traverser, Value};

use crate::grammar::number_lit_value;
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

/// An expression that traversal steps are still being appended to.
enum Chain {
    /// Not a traversal (yet).
    Expr(Expr),
    /// Steps off a root variable. The first step is always the root.
    Scope { steps: Traversal, range: SourceRange },
    /// Steps off an arbitrary expression.
    Relative {
        source: Box<Expr>,
        steps: Traversal,
        range: SourceRange,
    },
}

impl Chain {
    fn new(expr: Expr) -> Self {
        match expr.kind {
            ExprKind::ScopeTraversal(steps) => Chain::Scope {
                steps,
                range: expr.range,
            },
            ExprKind::RelativeTraversal { source, traversal } => Chain::Relative {
                source,
                steps: traversal,
                range: expr.range,
            },
            kind => Chain::Expr(Expr::new(kind, expr.range)),
        }
    }

    /// Append one step, starting a relative traversal if needed.
    fn push_step(self, step: Traverser) -> Self {
        let step_range = step.range().clone();
        match self {
            Chain::Expr(source) => Chain::Relative {
                range: SourceRange::between(&source.range, &step_range),
                source: Box::new(source),
                steps: vec![step],
            },
            Chain::Scope { mut steps, range } => {
                steps.push(step);
                Chain::Scope {
                    steps,
                    range: SourceRange::between(&range, &step_range),
                }
            }
            Chain::Relative {
                source,
                mut steps,
                range,
            } => {
                steps.push(step);
                Chain::Relative {
                    source,
                    steps,
                    range: SourceRange::between(&range, &step_range),
                }
            }
        }
    }

    fn finish(self) -> Expr {
        match self {
            Chain::Expr(expr) => expr,
            Chain::Scope { steps, range } => Expr::new(ExprKind::ScopeTraversal(steps), range),
            Chain::Relative {
                source,
                steps,
                range,
            } => Expr::new(
                ExprKind::RelativeTraversal {
                    source,
                    traversal: steps,
                },
                range,
            ),
        }
    }
}

/// The constant value of an index key, if it has one: a literal, or a
/// template that is exactly one literal string.
fn static_key(key: &Expr) -> Option<&Value> {
    match &key.kind {
        ExprKind::Literal(value) => Some(value),
        ExprKind::Template(parts) => match parts.as_slice() {
            [Expr {
                kind: ExprKind::Literal(value @ Value::String(_)),
                ..
            }] => Some(value),
            _ => None,
        },
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// A term followed by any traversal suffixes.
    pub(super) fn parse_expression_with_traversals(&mut self) -> (Expr, Diagnostics) {
        let (term, mut diags) = self.parse_expression_term();
        let (expr, suffix_diags) = self.parse_traversals(term);
        diags.extend(suffix_diags);
        (expr, diags)
    }

    /// Apply every `.` and `[` suffix that follows to `from`.
    fn parse_traversals(&mut self, from: Expr) -> (Expr, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut chain = Chain::new(from);

        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    let dot = self.read();
                    let next = self.peek();
                    match next.kind {
                        TokenKind::Ident => {
                            let attr = self.read();
                            chain = chain.push_step(Traverser::Attr {
                                name: attr.text().into_owned(),
                                range: SourceRange::between(&dot.range, &attr.range),
                            });
                        }
                        TokenKind::Star => {
                            let marker = self.read();
                            let (splat, splat_diags) =
                                self.finish_attribute_splat(chain.finish(), dot, marker);
                            diags.extend(splat_diags);
                            chain = Chain::Expr(splat);
                        }
                        _ => {
                            diags.push(invalid_attribute_name(next));
                            // The peeker is in a bad place; later items may
                            // misparse until something resyncs.
                            self.set_recovery();
                        }
                    }
                }
                TokenKind::OBrack => {
                    let open = self.read();
                    if self.peek_kind() == TokenKind::Star {
                        self.read();
                        let (splat, splat_diags) = self.finish_full_splat(chain.finish(), open);
                        diags.extend(splat_diags);
                        chain = Chain::Expr(splat);
                    } else {
                        let (next_chain, index_diags) = self.finish_index(chain, open);
                        diags.extend(index_diags);
                        chain = next_chain;
                    }
                }
                _ => break,
            }
        }

        (chain.finish(), diags)
    }

    /// `[key]` after the opening bracket.
    fn finish_index(&mut self, chain: Chain, open: &'a Token) -> (Chain, Diagnostics) {
        self.push_include_newlines(false);
        let (key, mut diags) = self.parse_expression();
        let close = if self.recovery && diags.has_errors() {
            self.recover(TokenKind::CBrack)
        } else {
            let close = self.read();
            if close.kind != TokenKind::CBrack && !self.recovery {
                diags.push(
                    Diagnostic::error(ErrorCode::E1011, close.range.clone())
                        .with_summary("Missing close bracket on index")
                        .with_detail("The index operator must end with a closing bracket (\"]\")."),
                );
                self.recover(TokenKind::CBrack)
            } else {
                close
            }
        };
        self.pop_include_newlines();

        let range = SourceRange::between(&open.range, &close.range);
        if let Some(value) = static_key(&key).cloned() {
            return (chain.push_step(Traverser::Index { key: value, range }), diags);
        }

        let collection = chain.finish();
        let whole = SourceRange::between(&collection.range, &range);
        let expr = Expr::new(
            ExprKind::Index {
                collection: Box::new(collection),
                key: Box::new(key),
                open_range: open.range.clone(),
            },
            whole,
        );
        (Chain::Expr(expr), diags)
    }

    /// `[*]` after the star, then every following suffix applied per item.
    fn finish_full_splat(&mut self, source: Expr, open: &'a Token) -> (Expr, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut close = self.read();
        if close.kind != TokenKind::CBrack && !self.recovery {
            diags.push(
                Diagnostic::error(ErrorCode::E1011, close.range.clone())
                    .with_summary("Missing close bracket on splat index")
                    .with_detail(
                        "The star for a full splat operator must be immediately followed by a \
                         closing bracket (\"]\").",
                    ),
            );
            close = self.recover(TokenKind::CBrack);
        }

        let marker_range = SourceRange::between(&open.range, &close.range);
        let item = Expr::new(ExprKind::AnonSymbol, marker_range.clone());
        let (each, each_diags) = ensure_sufficient_stack(|| self.parse_traversals(item));
        diags.extend(each_diags);

        let range = SourceRange::between(&source.range, &each.range);
        let expr = Expr::new(
            ExprKind::Splat {
                source: Box::new(source),
                each: Box::new(each),
                item_range: marker_range.clone(),
                marker_range,
            },
            range,
        );
        (expr, diags)
    }

    /// `.*` after the star, then any `.name` or `.0` steps applied per item.
    fn finish_attribute_splat(
        &mut self,
        source: Expr,
        dot: &'a Token,
        marker: &'a Token,
    ) -> (Expr, Diagnostics) {
        let mut diags = Diagnostics::new();
        let marker_range = SourceRange::between(&dot.range, &marker.range);
        let mut last_range = marker.range.clone();
        let mut steps = Traversal::new();

        while self.peek_kind() == TokenKind::Dot {
            let step_dot = self.read();
            let name = self.peek();
            match name.kind {
                TokenKind::Ident => {
                    self.read();
                    steps.push(Traverser::Attr {
                        name: name.text().into_owned(),
                        range: SourceRange::between(&step_dot.range, &name.range),
                    });
                }
                // `.0` inside a splat indexes each item.
                TokenKind::NumberLit => {
                    self.read();
                    let (key, key_diags) = number_lit_value(name);
                    diags.extend(key_diags);
                    steps.push(Traverser::Index {
                        key,
                        range: SourceRange::between(&step_dot.range, &name.range),
                    });
                }
                _ => {
                    if !self.recovery {
                        if name.kind == TokenKind::Star {
                            diags.push(
                                Diagnostic::error(ErrorCode::E1015, name.range.clone())
                                    .with_summary("Nested splat expression not allowed")
                                    .with_detail(
                                        "A splat expression (*) cannot be used inside another \
                                         attribute-only splat expression.",
                                    ),
                            );
                        } else {
                            diags.push(invalid_attribute_name(name));
                        }
                    }
                    self.set_recovery();
                    break;
                }
            }
            last_range = name.range.clone();
        }

        let item = Expr::new(ExprKind::AnonSymbol, marker_range.clone());
        let each = if steps.is_empty() {
            item
        } else {
            let range = SourceRange::between(&marker_range, &last_range);
            Expr::new(
                ExprKind::RelativeTraversal {
                    source: Box::new(item),
                    traversal: steps,
                },
                range,
            )
        };

        let range = SourceRange::between(&source.range, &last_range);
        let expr = Expr::new(
            ExprKind::Splat {
                source: Box::new(source),
                each: Box::new(each),
                item_range: marker_range.clone(),
                marker_range,
            },
            range,
        );
        (expr, diags)
    }

    /// A static traversal: `root`, then `.name`, `[number]` or `["string"]`
    /// steps up to EOF.
    pub(crate) fn parse_static_traversal(&mut self) -> (Traversal, Diagnostics) {
        let mut traversal = Traversal::new();
        let mut diags = Diagnostics::new();

        let root = self.read();
        if root.kind != TokenKind::Ident {
            diags.push(
                Diagnostic::error(ErrorCode::E1018, root.range.clone())
                    .with_summary("Variable name required")
                    .with_detail("Must begin with a variable name."),
            );
            return (traversal, diags);
        }
        traversal.push(Traverser::Root {
            name: root.text().into_owned(),
            range: root.range.clone(),
        });

        loop {
            let next = self.peek();
            match next.kind {
                TokenKind::Eof => return (traversal, diags),
                TokenKind::Dot => {
                    let dot = self.read();
                    let name = self.read();
                    if name.kind != TokenKind::Ident {
                        let detail = if name.kind == TokenKind::Star {
                            "Splat expressions (.*) may not be used here."
                        } else {
                            "Dot must be followed by attribute name."
                        };
                        diags.push(
                            Diagnostic::error(ErrorCode::E1018, name.range.clone())
                                .with_summary("Attribute name required")
                                .with_detail(detail)
                                .with_context(SourceRange::between(&root.range, &name.range)),
                        );
                        return (traversal, diags);
                    }
                    traversal.push(Traverser::Attr {
                        name: name.text().into_owned(),
                        range: SourceRange::between(&dot.range, &name.range),
                    });
                }
                TokenKind::OBrack => {
                    let open = self.read();
                    let key_tok = self.peek();
                    let key = match key_tok.kind {
                        TokenKind::NumberLit => {
                            self.read();
                            let (value, value_diags) = number_lit_value(key_tok);
                            diags.extend(value_diags);
                            value
                        }
                        TokenKind::OQuote => {
                            let quote = self.read();
                            let (value, _, value_diags) = self.parse_quoted_string_literal(quote);
                            diags.extend(value_diags);
                            Value::String(value)
                        }
                        _ => {
                            let (summary, detail) = if key_tok.kind == TokenKind::Star {
                                (
                                    "Attribute name required",
                                    "Splat expressions ([*]) may not be used here.",
                                )
                            } else {
                                (
                                    "Index value required",
                                    "Index brackets must contain either a literal number or a \
                                     literal string.",
                                )
                            };
                            diags.push(
                                Diagnostic::error(ErrorCode::E1018, key_tok.range.clone())
                                    .with_summary(summary)
                                    .with_detail(detail)
                                    .with_context(SourceRange::between(
                                        &root.range,
                                        &key_tok.range,
                                    )),
                            );
                            return (traversal, diags);
                        }
                    };

                    let close = self.read();
                    if close.kind != TokenKind::CBrack {
                        diags.push(
                            Diagnostic::error(ErrorCode::E1011, close.range.clone())
                                .with_summary("Unclosed index brackets")
                                .with_detail("Index key must be followed by a closing bracket.")
                                .with_context(SourceRange::between(&open.range, &close.range)),
                        );
                    }
                    traversal.push(Traverser::Index {
                        key,
                        range: SourceRange::between(&open.range, &close.range),
                    });
                    if diags.has_errors() {
                        return (traversal, diags);
                    }
                }
                _ => {
                    diags.push(
                        Diagnostic::error(ErrorCode::E1018, next.range.clone())
                            .with_summary("Invalid character")
                            .with_detail("Expected an attribute access or an index operator.")
                            .with_context(SourceRange::between(&root.range, &next.range)),
                    );
                    return (traversal, diags);
                }
            }
        }
    }
}

fn invalid_attribute_name(at: &Token) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1016, at.range.clone())
        .with_summary("Invalid attribute name")
        .with_detail("An attribute name is required after a dot.")
}
