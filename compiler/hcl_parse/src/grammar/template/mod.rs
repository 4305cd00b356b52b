//! Template parsing.
//!
//! Templates are parsed in two passes. The first reads tokens into a flat
//! list of [`Part`]s: literal chunks, interpolations, and one part per
//! control directive. The second pairs up `if`/`else`/`endif` and
//! `for`/`endfor` directives and builds the nested expression tree, so that
//! unbalanced directives can be reported with the location of the directive
//! they fail to close.
//!
//! `${~` and `!{~` strip trailing whitespace from the literal before them,
//! and `~}` strips leading whitespace from the literal after.

use std::iter::Peekable;
use std::vec;

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Expr, ExprKind, ForExpr, SourceRange, Token, TokenKind, Value};

use crate::grammar::keyword;
use crate::literal::decode_string_lit;
use crate::stack::ensure_sufficient_stack;
use crate::suggest::suggest_keyword;
use crate::Parser;

/// One element of a template before directives are paired.
enum Part {
    Literal {
        value: String,
        range: SourceRange,
    },
    Interp {
        expr: Expr,
        range: SourceRange,
    },
    If {
        condition: Expr,
        range: SourceRange,
    },
    Else {
        range: SourceRange,
    },
    EndIf {
        range: SourceRange,
    },
    For {
        key_var: Option<String>,
        val_var: String,
        collection: Expr,
        range: SourceRange,
    },
    EndFor {
        range: SourceRange,
    },
    /// Always the last part.
    End {
        range: SourceRange,
    },
}

impl Part {
    fn range(&self) -> &SourceRange {
        match self {
            Part::Literal { range, .. }
            | Part::Interp { range, .. }
            | Part::If { range, .. }
            | Part::Else { range }
            | Part::EndIf { range }
            | Part::For { range, .. }
            | Part::EndFor { range }
            | Part::End { range } => range,
        }
    }
}

/// A directive whose closing brace has not been read yet.
enum Directive {
    If(Expr),
    Else,
    EndIf,
    For {
        key_var: Option<String>,
        val_var: String,
        collection: Expr,
    },
    EndFor,
}

impl Directive {
    fn into_part(self, range: SourceRange) -> Part {
        match self {
            Directive::If(condition) => Part::If { condition, range },
            Directive::Else => Part::Else { range },
            Directive::EndIf => Part::EndIf { range },
            Directive::For {
                key_var,
                val_var,
                collection,
            } => Part::For {
                key_var,
                val_var,
                collection,
                range,
            },
            Directive::EndFor => Part::EndFor { range },
        }
    }
}

const DIRECTIVE_KEYWORDS: &[&str] = &[
    keyword::IF,
    keyword::FOR,
    keyword::ELSE,
    keyword::ENDIF,
    keyword::ENDFOR,
];

impl<'a> Parser<'a> {
    /// A quoted or heredoc template, after its opening token.
    pub(crate) fn parse_template_literal(&mut self, open: &'a Token) -> (Expr, Diagnostics) {
        let (parts, mut diags) = self.parse_template_parts(open.kind.opposite_bracket());
        let range = SourceRange::between(&open.range, &self.prev_range());
        let expr = finish_template(parts, range, &mut diags);
        (expr, diags)
    }

    /// A source unit that is template text up to EOF.
    pub(crate) fn parse_bare_template(&mut self) -> (Expr, Diagnostics) {
        let start = self.peek_range();
        let (parts, mut diags) = self.parse_template_parts(TokenKind::Eof);
        let range = SourceRange::between(&start, &self.prev_range());
        let expr = finish_template(parts, range, &mut diags);
        (expr, diags)
    }

    /// Read template tokens up to and including `end`.
    ///
    /// The result is never empty: a template with no content gets one empty
    /// literal, and [`Part::End`] always comes last.
    fn parse_template_parts(&mut self, end: TokenKind) -> (Vec<Part>, Diagnostics) {
        let start = self.peek_range();
        let mut parts = Vec::new();
        let mut diags = Diagnostics::new();
        let mut trim_next = false;

        let end_range = loop {
            let next = self.read();
            if next.kind == end {
                break next.range.clone();
            }
            match next.kind {
                TokenKind::QuotedLit | TokenKind::StringLit => {
                    let (mut value, lit_diags) = decode_string_lit(next);
                    diags.extend(lit_diags);
                    if trim_next {
                        value = value.trim_start().to_owned();
                        trim_next = false;
                    }
                    parts.push(Part::Literal {
                        value,
                        range: next.range.clone(),
                    });
                }
                TokenKind::TemplateInterp => {
                    if next.bytes.ends_with(b"~") {
                        trim_last_literal(&mut parts);
                    }
                    self.push_include_newlines(false);
                    let (expr, expr_diags) = self.parse_expression();
                    diags.extend(expr_diags);

                    let close = self.peek();
                    trim_next = false;
                    if close.kind == TokenKind::TemplateSeqEnd {
                        self.read();
                        trim_next = close.bytes.starts_with(b"~");
                    } else {
                        if !self.recovery {
                            diags.push(
                                Diagnostic::error(ErrorCode::E1011, close.range.clone())
                                    .with_summary("Extra characters after interpolation expression")
                                    .with_detail(
                                        "Expected a closing brace to end the interpolation \
                                         expression, but found extra characters.",
                                    )
                                    .with_context(SourceRange::between(&start, &close.range)),
                            );
                        }
                        self.recover(TokenKind::TemplateSeqEnd);
                    }
                    self.pop_include_newlines();

                    let range = SourceRange::between(&next.range, &self.prev_range());
                    parts.push(Part::Interp { expr, range });
                }
                TokenKind::TemplateControl => {
                    if next.bytes.ends_with(b"~") {
                        trim_last_literal(&mut parts);
                    }
                    self.push_include_newlines(false);
                    let (part, trim, directive_diags) = self.parse_template_directive(next);
                    self.pop_include_newlines();
                    diags.extend(directive_diags);
                    trim_next = trim;
                    parts.extend(part);
                }
                _ => {
                    if !self.recovery {
                        diags.push(
                            Diagnostic::error(ErrorCode::E1020, next.range.clone())
                                .with_summary("Unterminated template string")
                                .with_detail("No closing marker was found for the string.")
                                .with_context(SourceRange::between(&start, &next.range)),
                        );
                    }
                    let last = if next.kind == TokenKind::Eof {
                        next
                    } else {
                        self.recover(end)
                    };
                    self.set_recovery();
                    break last.range.clone();
                }
            }
        };

        if parts.is_empty() {
            parts.push(Part::Literal {
                value: String::new(),
                range: SourceRange::point(start.filename.clone(), start.start),
            });
        }
        parts.push(Part::End {
            range: SourceRange::point(end_range.filename.clone(), end_range.start),
        });

        (parts, diags)
    }

    /// One `!{ ... }` directive, after the opening marker.
    ///
    /// Returns the part (none if the directive was unusable) and whether the
    /// closer asked for the following literal to be trimmed.
    fn parse_template_directive(&mut self, open: &'a Token) -> (Option<Part>, bool, Diagnostics) {
        let mut diags = Diagnostics::new();

        let kw = self.peek();
        if kw.kind != TokenKind::Ident {
            if !self.recovery {
                diags.push(
                    Diagnostic::error(ErrorCode::E1021, kw.range.clone())
                        .with_summary("Invalid template directive")
                        .with_detail(
                            "A template directive keyword (\"if\", \"for\", etc) is expected at \
                             the beginning of a !{ sequence.",
                        )
                        .with_context(SourceRange::between(&open.range, &kw.range)),
                );
            }
            self.recover(TokenKind::TemplateSeqEnd);
            return (None, false, diags);
        }
        self.read();

        let name = kw.text();
        let directive = match name.as_ref() {
            keyword::IF => {
                let (condition, cond_diags) = self.parse_expression();
                diags.extend(cond_diags);
                Directive::If(condition)
            }
            keyword::ELSE => Directive::Else,
            keyword::ENDIF => Directive::EndIf,
            keyword::ENDFOR => Directive::EndFor,
            keyword::FOR => match self.parse_for_directive_header(&mut diags) {
                Some((key_var, val_var, collection)) => Directive::For {
                    key_var,
                    val_var,
                    collection,
                },
                None => {
                    self.recover(TokenKind::TemplateSeqEnd);
                    return (None, false, diags);
                }
            },
            given => {
                if !self.recovery {
                    let suggestion = suggest_keyword(given, DIRECTIVE_KEYWORDS)
                        .map(|s| format!(" Did you mean {s:?}?"))
                        .unwrap_or_default();
                    diags.push(
                        Diagnostic::error(ErrorCode::E1021, kw.range.clone())
                            .with_summary("Invalid template control keyword")
                            .with_detail(format!(
                                "{given:?} is not a valid template control keyword.{suggestion}"
                            ))
                            .with_context(SourceRange::between(&open.range, &kw.range)),
                    );
                }
                self.recover(TokenKind::TemplateSeqEnd);
                return (None, false, diags);
            }
        };

        let close = self.peek();
        let mut trim_next = false;
        if close.kind == TokenKind::TemplateSeqEnd {
            self.read();
            trim_next = close.bytes.starts_with(b"~");
        } else {
            if !self.recovery {
                diags.push(
                    Diagnostic::error(ErrorCode::E1021, close.range.clone())
                        .with_summary(format!("Extra characters in {name} marker"))
                        .with_detail(
                            "Expected a closing brace to end the sequence, but found extra \
                             characters.",
                        )
                        .with_context(SourceRange::between(&open.range, &close.range)),
                );
            }
            self.recover(TokenKind::TemplateSeqEnd);
        }

        let range = SourceRange::between(&open.range, &self.prev_range());
        (Some(directive.into_part(range)), trim_next, diags)
    }

    /// `k, v in coll` of a `for` directive, after the keyword.
    fn parse_for_directive_header(
        &mut self,
        diags: &mut Diagnostics,
    ) -> Option<(Option<String>, String, Expr)> {
        let first = self.read();
        if first.kind != TokenKind::Ident {
            self.push_for_directive_error(
                diags,
                first,
                "For directive requires variable name after 'for'.",
            );
            return None;
        }

        let mut key_var = None;
        let mut val_var = first.text().into_owned();
        if self.peek_kind() == TokenKind::Comma {
            self.read();
            let second = self.read();
            if second.kind != TokenKind::Ident {
                self.push_for_directive_error(
                    diags,
                    second,
                    "For directive requires value variable name after comma.",
                );
                return None;
            }
            key_var = Some(val_var);
            val_var = second.text().into_owned();
        }

        if !self.at_keyword(keyword::IN) {
            let at = self.peek();
            self.push_for_directive_error(
                diags,
                at,
                "For directive requires 'in' keyword after names.",
            );
            return None;
        }
        self.read();

        let (collection, coll_diags) = self.parse_expression();
        diags.extend(coll_diags);
        Some((key_var, val_var, collection))
    }

    fn push_for_directive_error(&self, diags: &mut Diagnostics, at: &Token, detail: &str) {
        if self.recovery {
            return;
        }
        diags.push(
            Diagnostic::error(ErrorCode::E1021, at.range.clone())
                .with_summary("Invalid 'for' directive")
                .with_detail(detail),
        );
    }
}

/// Strip trailing whitespace from the last part if it is a literal.
fn trim_last_literal(parts: &mut [Part]) {
    if let Some(Part::Literal { value, .. }) = parts.last_mut() {
        let kept = value.trim_end().len();
        value.truncate(kept);
    }
}

/// Build the template expression for `parts`.
///
/// A template that is a single interpolation and nothing else becomes a
/// `TemplateWrap`, so `"${x}"` keeps the type of `x`.
fn finish_template(parts: Vec<Part>, range: SourceRange, diags: &mut Diagnostics) -> Expr {
    let passthru = matches!(parts.as_slice(), [Part::Interp { .. }, Part::End { .. }]);
    let mut exprs = build_template(parts, diags);
    if passthru && exprs.len() == 1 {
        if let Some(inner) = exprs.pop() {
            return Expr::new(ExprKind::TemplateWrap(Box::new(inner)), range);
        }
    }
    Expr::new(ExprKind::Template(exprs), range)
}

/// Pair up directives and build the template's expressions.
fn build_template(parts: Vec<Part>, diags: &mut Diagnostics) -> Vec<Expr> {
    let mut builder = TemplateBuilder {
        parts: parts.into_iter().peekable(),
        diags,
    };
    let mut exprs = Vec::new();
    while let Some(part) = builder.next_content() {
        exprs.push(builder.build(part));
    }
    exprs
}

struct TemplateBuilder<'d> {
    parts: Peekable<vec::IntoIter<Part>>,
    diags: &'d mut Diagnostics,
}

impl TemplateBuilder<'_> {
    /// The next part, unless the template has ended.
    fn next_content(&mut self) -> Option<Part> {
        self.parts.next_if(|part| !matches!(part, Part::End { .. }))
    }

    fn end_range(&mut self, fallback: &SourceRange) -> SourceRange {
        self.parts
            .peek()
            .map_or_else(|| fallback.end_point(), |part| part.range().clone())
    }

    fn build(&mut self, part: Part) -> Expr {
        match part {
            Part::Literal { value, range } => Expr::literal(Value::String(value), range),
            Part::Interp { expr, .. } => expr,
            Part::If { condition, range } => {
                ensure_sufficient_stack(|| self.build_if(condition, range))
            }
            Part::For {
                key_var,
                val_var,
                collection,
                range,
            } => ensure_sufficient_stack(|| self.build_for(key_var, val_var, collection, range)),
            Part::End { range } => {
                self.diags.push(
                    Diagnostic::error(ErrorCode::E1021, range.clone())
                        .with_summary("Unexpected end of template")
                        .with_detail("The control directives within this template are unbalanced."),
                );
                Expr::placeholder(range)
            }
            Part::Else { range } => self.stray_directive(keyword::ELSE, range),
            Part::EndIf { range } => self.stray_directive(keyword::ENDIF, range),
            Part::EndFor { range } => self.stray_directive(keyword::ENDFOR, range),
        }
    }

    fn stray_directive(&mut self, name: &str, range: SourceRange) -> Expr {
        self.diags.push(
            Diagnostic::error(ErrorCode::E1021, range.clone())
                .with_summary(format!("Unexpected {name} directive"))
                .with_detail("The control directives within this template are unbalanced."),
        );
        Expr::placeholder(range)
    }

    fn build_if(&mut self, condition: Expr, if_range: SourceRange) -> Expr {
        let mut then_exprs = Vec::new();
        let mut else_exprs: Option<Vec<Expr>> = None;

        let endif_range = loop {
            let Some(part) = self.next_content() else {
                let at = self.end_range(&if_range);
                self.diags.push(
                    Diagnostic::error(ErrorCode::E1021, at.clone())
                        .with_summary("Unexpected end of template")
                        .with_detail(format!(
                            "The if directive at {if_range} is missing its corresponding endif \
                             directive."
                        )),
                );
                return Expr::placeholder(at);
            };

            match part {
                Part::EndIf { range } => break range,
                Part::Else { range } => {
                    if else_exprs.is_some() {
                        self.diags.push(
                            Diagnostic::error(ErrorCode::E1021, range.clone())
                                .with_summary("Unexpected else directive")
                                .with_detail(format!(
                                    "Already in the else clause for the if started at {if_range}."
                                )),
                        );
                        return Expr::placeholder(range);
                    }
                    else_exprs = Some(Vec::new());
                }
                Part::EndFor { range } => {
                    self.diags.push(
                        Diagnostic::error(ErrorCode::E1021, range.clone())
                            .with_summary("Unexpected endfor directive")
                            .with_detail(format!(
                                "Expecting an endif directive for the if started at {if_range}."
                            )),
                    );
                    return Expr::placeholder(range);
                }
                part => {
                    let expr = self.build(part);
                    match &mut else_exprs {
                        Some(exprs) => exprs.push(expr),
                        None => then_exprs.push(expr),
                    }
                }
            }
        };

        let true_result = branch(then_exprs, if_range.end_point());
        let false_result = branch(
            else_exprs.unwrap_or_default(),
            SourceRange::point(endif_range.filename.clone(), endif_range.start),
        );
        let range = SourceRange::between(&if_range, &endif_range);
        Expr::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                true_result: Box::new(true_result),
                false_result: Box::new(false_result),
            },
            range,
        )
    }

    fn build_for(
        &mut self,
        key_var: Option<String>,
        val_var: String,
        collection: Expr,
        for_range: SourceRange,
    ) -> Expr {
        let mut body = Vec::new();

        let endfor_range = loop {
            let Some(part) = self.next_content() else {
                let at = self.end_range(&for_range);
                self.diags.push(
                    Diagnostic::error(ErrorCode::E1021, at.clone())
                        .with_summary("Unexpected end of template")
                        .with_detail(format!(
                            "The for directive at {for_range} is missing its corresponding \
                             endfor directive."
                        )),
                );
                return Expr::placeholder(at);
            };

            match part {
                Part::EndFor { range } => break range,
                Part::Else { range } => {
                    self.diags.push(
                        Diagnostic::error(ErrorCode::E1021, range.clone())
                            .with_summary("Unexpected else directive")
                            .with_detail("An else clause is not expected for a for directive."),
                    );
                    return Expr::placeholder(range);
                }
                Part::EndIf { range } => {
                    self.diags.push(
                        Diagnostic::error(ErrorCode::E1021, range.clone())
                            .with_summary("Unexpected endif directive")
                            .with_detail(format!(
                                "Expecting an endfor directive corresponding to the for \
                                 directive at {for_range}."
                            )),
                    );
                    return Expr::placeholder(range);
                }
                part => body.push(self.build(part)),
            }
        };

        let val_expr = branch(body, for_range.end_point());
        let range = SourceRange::between(&for_range, &endfor_range);
        let tuple = Expr::new(
            ExprKind::For(Box::new(ForExpr {
                key_var,
                val_var,
                collection,
                key_expr: None,
                val_expr,
                cond_expr: None,
                group: false,
                open_range: for_range,
                close_range: endfor_range,
            })),
            range.clone(),
        );
        Expr::new(ExprKind::TemplateJoin(Box::new(tuple)), range)
    }
}

/// The template for one `if` branch or `for` body; an empty string when
/// there is no content.
fn branch(exprs: Vec<Expr>, empty_at: SourceRange) -> Expr {
    match (exprs.first(), exprs.last()) {
        (Some(first), Some(last)) => {
            let range = SourceRange::between(&first.range, &last.range);
            Expr::new(ExprKind::Template(exprs), range)
        }
        _ => Expr::literal(Value::String(String::new()), empty_at),
    }
}

#[cfg(test)]
mod tests;
