//! Precedence-climbing parser over the token stream.

use serde_json::{Number, Value};

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ScriptError;
use crate::lexer::{tokenize, Token};

/// Deepest expression tree the parser accepts. Keeps evaluation and drop
/// recursion far away from the thread's stack limit.
pub const MAX_DEPTH: usize = 256;

/// Parse a complete expression.
pub fn parse(src: &str) -> Result<Expr, ScriptError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(ScriptError::EmptyExpression);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let (expr, _) = parser.expression(0)?;

    match parser.peek() {
        None => Ok(expr),
        Some((token, position)) => Err(ScriptError::UnexpectedToken {
            found: token.describe(),
            position: *position,
        }),
    }
}

/// An expression together with the height of its tree.
type Parsed = (Expr, usize);

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    /// Current recursion depth of the parser itself.
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<(Token, usize), ScriptError> {
        let item = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ScriptError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(item)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ScriptError> {
        let (token, position) = self.next()?;
        if token == expected {
            Ok(())
        } else {
            Err(ScriptError::UnexpectedToken {
                found: token.describe(),
                position,
            })
        }
    }

    fn eat(&mut self, expected: &Token) -> bool {
        match self.peek() {
            Some((token, _)) if token == expected => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        let op = match &self.peek()?.0 {
            Token::Or => BinaryOp::Or,
            Token::And => BinaryOp::And,
            Token::Eq => BinaryOp::Eq,
            Token::Ne => BinaryOp::Ne,
            Token::Lt => BinaryOp::Lt,
            Token::Le => BinaryOp::Le,
            Token::Gt => BinaryOp::Gt,
            Token::Ge => BinaryOp::Ge,
            Token::In => BinaryOp::In,
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            Token::Percent => BinaryOp::Rem,
            _ => return None,
        };
        Some(op)
    }

    /// Run `f` one recursion level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ScriptError>,
    ) -> Result<T, ScriptError> {
        if self.depth >= MAX_DEPTH {
            return Err(ScriptError::NestingTooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expression(&mut self, min_precedence: u8) -> Result<Parsed, ScriptError> {
        self.nested(|p| p.binary(min_precedence))
    }

    fn binary(&mut self, min_precedence: u8) -> Result<Parsed, ScriptError> {
        let (mut lhs, mut height) = self.unary()?;

        while let Some(op) = self.binary_op() {
            let precedence = op.precedence();
            if precedence <= min_precedence {
                break;
            }
            self.pos += 1;
            let (rhs, rhs_height) = self.expression(precedence)?;
            height = grow(height.max(rhs_height))?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }

        Ok((lhs, height))
    }

    fn unary(&mut self) -> Result<Parsed, ScriptError> {
        let op = if self.eat(&Token::Not) {
            UnaryOp::Not
        } else if self.eat(&Token::Minus) {
            UnaryOp::Neg
        } else {
            return self.postfix();
        };

        let (operand, height) = self.nested(Self::unary)?;
        Ok((Expr::Unary(op, Box::new(operand)), grow(height)?))
    }

    fn postfix(&mut self) -> Result<Parsed, ScriptError> {
        let (mut expr, mut height) = self.primary()?;

        while self.eat(&Token::Dot) {
            match self.next()? {
                (Token::Ident(name), _) => {
                    height = grow(height)?;
                    expr = Expr::Member(Box::new(expr), name);
                }
                (token, position) => {
                    return Err(ScriptError::UnexpectedToken {
                        found: token.describe(),
                        position,
                    })
                }
            }
        }

        Ok((expr, height))
    }

    fn primary(&mut self) -> Result<Parsed, ScriptError> {
        let (token, position) = self.next()?;
        let expr = match token {
            Token::True => Expr::Literal(Value::Bool(true)),
            Token::False => Expr::Literal(Value::Bool(false)),
            Token::Null => Expr::Literal(Value::Null),
            Token::Int(v) => Expr::Literal(Value::Number(v.into())),
            Token::Float(v) => Expr::Literal(Value::Number(
                Number::from_f64(v).ok_or(ScriptError::NumberOutOfRange)?,
            )),
            Token::Str(s) => Expr::Literal(Value::String(s)),
            Token::LParen => {
                let inner = self.expression(0)?;
                self.expect(Token::RParen)?;
                return Ok(inner);
            }
            Token::LBracket => {
                let (items, height) = self.list(Token::RBracket)?;
                return Ok((Expr::List(items), grow(height)?));
            }
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    let (args, height) = self.list(Token::RParen)?;
                    return Ok((Expr::Call(name, args), grow(height)?));
                }
                Expr::Ident(name)
            }
            other => {
                return Err(ScriptError::UnexpectedToken {
                    found: other.describe(),
                    position,
                })
            }
        };
        Ok((expr, 1))
    }

    /// Comma separated expressions up to the closing token, with the height
    /// of the tallest one.
    fn list(&mut self, close: Token) -> Result<(Vec<Expr>, usize), ScriptError> {
        let mut items = Vec::new();
        let mut height = 0;
        if self.eat(&close) {
            return Ok((items, height));
        }
        loop {
            let (item, item_height) = self.expression(0)?;
            items.push(item);
            height = height.max(item_height);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(close)?;
            return Ok((items, height));
        }
    }
}

/// Height of a node sitting on top of a subtree of `height`.
fn grow(height: usize) -> Result<usize, ScriptError> {
    if height >= MAX_DEPTH {
        Err(ScriptError::NestingTooDeep(MAX_DEPTH))
    } else {
        Ok(height + 1)
    }
}
