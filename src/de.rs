//! KODA text parsing.
//!
//! Consumes the token stream from [`crate::lexer`] and builds a [`Value`],
//! enforcing the depth limit, key uniqueness, and the input-length guard.
//!
//! The grammar is deliberately loose about separators: the colon between a
//! key and its value and the comma between entries are both optional, and a
//! document whose first token is a key with more tokens following is an
//! implicit brace-less object.
//!
//! ```rust
//! use koda::parse;
//!
//! let value = parse("name: \"my-app\" version: 1 enabled: true").unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("version").and_then(|v| v.as_i64()), Some(1));
//! ```

use crate::lexer::{Lexer, Position, Token, TokenKind};
use crate::options::ParseOptions;
use crate::{Error, KodaMap, Result, Value};

/// Parses a complete KODA document.
pub(crate) fn parse_document(text: &str, options: &ParseOptions) -> Result<Value> {
    if text.len() > options.max_input_length {
        return Err(Error::parse(1, 1, 0, "Input exceeds maximum length"));
    }
    let mut parser = Parser::new(text, options.max_depth)?;
    let value = parser.parse_document()?;
    parser.expect_eof()?;
    Ok(value)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    peeked: Option<Token>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, max_depth: usize) -> Result<Self> {
        let mut lexer = Lexer::new(text);
        let token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            token,
            peeked: None,
            max_depth,
        })
    }

    /// Replaces the current token with the next one, returning the old token.
    fn bump(&mut self) -> Result<Token> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn peek(&mut self) -> Result<&Token> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        Ok(self.peeked.as_ref().expect("token was just peeked"))
    }

    fn error_at<T>(&self, at: Position, msg: &str) -> Result<T> {
        Err(Error::parse(at.line, at.column, at.offset, msg))
    }

    fn expect_eof(&self) -> Result<()> {
        if self.token.kind == TokenKind::Eof {
            Ok(())
        } else {
            self.error_at(self.token.start, "Expected end of input")
        }
    }

    /// A document is an implicit root object when it opens with a key and
    /// more tokens follow; otherwise it is a single value.
    fn parse_document(&mut self) -> Result<Value> {
        if matches!(
            self.token.kind,
            TokenKind::Identifier(_) | TokenKind::String(_)
        ) && self.peek()?.kind != TokenKind::Eof
        {
            return self.parse_root_object();
        }
        self.parse_value(0)
    }

    fn parse_root_object(&mut self) -> Result<Value> {
        let mut object = KodaMap::new();
        while matches!(
            self.token.kind,
            TokenKind::Identifier(_) | TokenKind::String(_)
        ) {
            let (key, key_at) = self.parse_key()?;
            if object.contains_key(&key) {
                return self.error_at(key_at, "Duplicate key");
            }
            // Children of the implicit root sit at depth 1, as if braced.
            object.insert(key, self.parse_value(1)?);
        }
        Ok(Value::Object(object))
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        if depth > self.max_depth {
            return self.error_at(self.token.start, "Maximum nesting depth exceeded");
        }
        match self.token.kind {
            TokenKind::LBrace => self.parse_object(depth),
            TokenKind::LBracket => self.parse_array(depth),
            _ => {
                let token = self.bump()?;
                match token.kind {
                    TokenKind::String(s) | TokenKind::Identifier(s) => Ok(Value::String(s)),
                    TokenKind::Integer(i) => Ok(Value::Int(i)),
                    TokenKind::Float(f) => Ok(Value::Float(f)),
                    TokenKind::True => Ok(Value::Bool(true)),
                    TokenKind::False => Ok(Value::Bool(false)),
                    TokenKind::Null => Ok(Value::Null),
                    _ => self.error_at(token.start, "Expected value"),
                }
            }
        }
    }

    fn parse_key(&mut self) -> Result<(String, Position)> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::String(s) | TokenKind::Identifier(s) => {
                if self.token.kind == TokenKind::Colon {
                    self.bump()?;
                }
                Ok((s, token.start))
            }
            _ => self.error_at(token.start, "Expected key"),
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        self.bump()?;
        let mut object = KodaMap::new();
        while self.token.kind != TokenKind::RBrace {
            let (key, key_at) = self.parse_key()?;
            if object.contains_key(&key) {
                return self.error_at(key_at, "Duplicate key");
            }
            object.insert(key, self.parse_value(depth + 1)?);
            if self.token.kind == TokenKind::Comma {
                self.bump()?;
            }
        }
        self.bump()?;
        Ok(Value::Object(object))
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        self.bump()?;
        let mut elements = Vec::new();
        while self.token.kind != TokenKind::RBracket {
            elements.push(self.parse_value(depth + 1)?);
            if self.token.kind == TokenKind::Comma {
                self.bump()?;
            }
        }
        self.bump()?;
        Ok(Value::Array(elements))
    }
}
