//! Function calls.

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Expr, ExprKind, SourceRange, Token, TokenKind};

use crate::Parser;

impl<'a> Parser<'a> {
    /// `name(arg, arg, ...)` after the opening parenthesis.
    ///
    /// A trailing comma is allowed. `...` after the last argument expands it
    /// and must be directly followed by `)`.
    pub(super) fn finish_function_call(
        &mut self,
        name: &'a Token,
        open: &'a Token,
    ) -> (Expr, Diagnostics) {
        let mut args = Vec::new();
        let mut diags = Diagnostics::new();
        let mut expand_final = false;

        // Newlines are insignificant between the parentheses.
        self.push_include_newlines(false);

        let close = loop {
            if self.peek_kind() == TokenKind::CParen {
                break self.read();
            }

            let (arg, arg_diags) = self.parse_expression();
            let failed = arg_diags.has_errors();
            args.push(arg);
            diags.extend(arg_diags);
            if self.recovery && failed {
                break self.recover(TokenKind::CParen);
            }

            let sep = self.read();
            match sep.kind {
                TokenKind::CParen => break sep,
                TokenKind::Ellipsis => {
                    expand_final = true;
                    if self.peek_kind() == TokenKind::CParen {
                        break self.read();
                    }
                    if !self.recovery {
                        diags.push(
                            Diagnostic::error(ErrorCode::E1011, sep.range.clone())
                                .with_summary("Missing closing parenthesis")
                                .with_detail(
                                    "An expanded function argument (with ...) must be \
                                     immediately followed by closing parentheses.",
                                )
                                .with_context(SourceRange::between(&name.range, &sep.range)),
                        );
                    }
                    break self.recover(TokenKind::CParen);
                }
                TokenKind::Comma => {
                    if self.peek_kind() == TokenKind::CParen {
                        break self.read();
                    }
                }
                TokenKind::Eof => {
                    diags.push(
                        Diagnostic::error(
                            ErrorCode::E1011,
                            SourceRange::between(&name.range, &open.range),
                        )
                        .with_summary("Unterminated function call")
                        .with_detail(
                            "There is no closing parenthesis for this function call before the \
                             end of the file. This may be caused by incorrect parenthesis \
                             nesting elsewhere in this file.",
                        ),
                    );
                    break self.recover(TokenKind::CParen);
                }
                _ => {
                    diags.push(
                        Diagnostic::error(ErrorCode::E1012, sep.range.clone())
                            .with_summary("Missing argument separator")
                            .with_detail(
                                "A comma is required to separate each function argument from \
                                 the next.",
                            )
                            .with_context(SourceRange::between(&name.range, &sep.range)),
                    );
                    break self.recover(TokenKind::CParen);
                }
            }
        };

        self.pop_include_newlines();

        let range = SourceRange::between(&name.range, &close.range);
        let expr = Expr::new(
            ExprKind::FunctionCall {
                name: name.text().into_owned(),
                args,
                expand_final,
                name_range: name.range.clone(),
                open_paren_range: open.range.clone(),
                close_paren_range: close.range.clone(),
            },
            range,
        );
        (expr, diags)
    }
}
