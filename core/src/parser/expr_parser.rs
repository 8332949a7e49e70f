use super::Parser;
use super::ast::Expr;
use crate::errors::SyntaxError;
use crate::lexer::token::TokenKind;
use crate::runtime::value::Value;

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_primary()?;

        loop {
            lhs = match self.peek() {
                TokenKind::LeftParen => {
                    self.advance();
                    let args = self.parse_list(&TokenKind::RightParen)?;
                    Expr::Call {
                        callee: Box::new(lhs),
                        args,
                    }
                }
                TokenKind::Dot => {
                    self.advance();
                    let property = self.expect_ident()?;
                    Expr::Member {
                        object: Box::new(lhs),
                        property,
                    }
                }
                _ => break,
            };
        }

        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.advance().clone();
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Literal(Value::Number(n))),
            TokenKind::String(s) => Ok(Expr::Literal(Value::String(s))),
            TokenKind::True => Ok(Expr::Literal(Value::Boolean(true))),
            TokenKind::False => Ok(Expr::Literal(Value::Boolean(false))),
            TokenKind::Null => Ok(Expr::Literal(Value::Null)),
            TokenKind::Ident(name) => Ok(Expr::Ident(name)),
            TokenKind::LeftBracket => Ok(Expr::Array(self.parse_list(&TokenKind::RightBracket)?)),
            TokenKind::Minus => match self.peek().clone() {
                TokenKind::Number(n) => {
                    self.advance();
                    Ok(Expr::Literal(Value::Number(-n)))
                }
                other => Err(self.error_here(format!("expected number after '-', found {other}"))),
            },
            other => Err(SyntaxError::new(
                format!("unexpected {other} in expression"),
                token.span.start,
                token.span.len().max(1),
            )),
        }
    }

    /// Comma separated expressions up to and including `close`. A trailing
    /// comma is accepted.
    fn parse_list(&mut self, close: &TokenKind) -> Result<Vec<Expr>, SyntaxError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_expr()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance(); // consume ','
        }
        self.expect(close)?;
        Ok(items)
    }
}
