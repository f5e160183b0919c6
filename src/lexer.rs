//! Text lexer for the KODA format.
//!
//! Converts source text into a stream of tokens, each carrying its start and
//! end position, and rejects malformed input early with the position of the
//! offending token. The parser in [`crate::de`] drives it one token at a
//! time; no token buffer is kept.

use crate::{Error, Result};

/// A source position: 1-based line and column plus the byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// What a token is, with the decoded payload for literals.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    String(String),
    Identifier(String),
    Integer(i64),
    Float(f64),
    True,
    False,
    Null,
    Eof,
}

#[derive(Clone, Debug)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: Position,
    pub end: Position,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    /// Start of the token currently being read; all lex errors point here.
    token_start: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let start = Position {
            line: 1,
            column: 1,
            offset: 0,
        };
        Lexer {
            input,
            offset: 0,
            line: 1,
            column: 1,
            token_start: start,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn peek_char2(&self) -> Option<char> {
        let mut chars = self.input[self.offset..].chars();
        chars.next();
        chars.next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.offset..].chars().next()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// A lex error carrying the start position of the offending token.
    fn error<T>(&self, msg: &str) -> Result<T> {
        Err(Error::parse(
            self.token_start.line,
            self.token_start.column,
            self.token_start.offset,
            msg,
        ))
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments()?;
        self.token_start = self.position();

        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Ok(self.token(TokenKind::Eof)),
        };

        match ch {
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),
            '"' | '\'' => self.read_string(ch),
            '-' | '0'..='9' => self.read_number(),
            'A'..='Z' | 'a'..='z' | '_' => self.read_identifier(),
            _ => self.error("Unexpected character"),
        }
    }

    fn token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            start: self.token_start,
            end: self.position(),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Result<Token> {
        self.next_char();
        Ok(self.token(kind))
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.next_char();
                }
                Some('/') => match self.peek_char2() {
                    Some('/') => {
                        self.next_char();
                        self.next_char();
                        while let Some(ch) = self.peek_char() {
                            if ch == '\n' {
                                break;
                            }
                            self.next_char();
                        }
                    }
                    Some('*') => self.skip_block_comment()?,
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Multi-line comments nest; an unterminated comment is an error at the
    /// position of its opening `/*`.
    fn skip_block_comment(&mut self) -> Result<()> {
        self.token_start = self.position();
        self.next_char();
        self.next_char();
        let mut depth = 1usize;
        while depth > 0 {
            match (self.peek_char(), self.peek_char2()) {
                (Some('*'), Some('/')) => {
                    self.next_char();
                    self.next_char();
                    depth -= 1;
                }
                (Some('/'), Some('*')) => {
                    self.next_char();
                    self.next_char();
                    depth += 1;
                }
                (Some(_), _) => {
                    self.next_char();
                }
                (None, _) => return self.error("Unclosed multi-line comment"),
            }
        }
        Ok(())
    }

    fn read_string(&mut self, quote: char) -> Result<Token> {
        self.next_char();
        let mut text = String::new();
        loop {
            let ch = match self.next_char() {
                Some(ch) => ch,
                None => return self.error("Unclosed string"),
            };
            if ch == quote {
                return Ok(self.token(TokenKind::String(text)));
            }
            if ch == '\\' {
                text.push(self.read_escape(quote)?);
            } else if (ch as u32) < 0x20 {
                return self.error("Control character in string");
            } else {
                text.push(ch);
            }
        }
    }

    fn read_escape(&mut self, quote: char) -> Result<char> {
        let ch = match self.next_char() {
            Some(ch) => ch,
            None => return self.error("Unclosed string"),
        };
        match ch {
            ch if ch == quote => Ok(quote),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = match self.next_char().and_then(|c| c.to_digit(16)) {
                        Some(d) => d,
                        None => return self.error("Invalid escape sequence"),
                    };
                    code = code * 16 + digit;
                }
                match char::from_u32(code) {
                    Some(ch) => Ok(ch),
                    None => self.error("Invalid escape sequence"),
                }
            }
            _ => self.error("Invalid escape sequence"),
        }
    }

    fn read_number(&mut self) -> Result<Token> {
        let start = self.offset;
        if self.peek_char() == Some('-') {
            self.next_char();
        }
        match self.peek_char() {
            Some('0') => {
                if matches!(self.peek_char2(), Some('0'..='9')) {
                    return self.error("Invalid number: leading zero");
                }
                self.next_char();
            }
            Some('1'..='9') => {
                while matches!(self.peek_char(), Some('0'..='9')) {
                    self.next_char();
                }
            }
            _ => return self.error("Invalid number"),
        }

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            is_float = true;
            self.next_char();
            if !matches!(self.peek_char(), Some('0'..='9')) {
                return self.error("Invalid number");
            }
            while matches!(self.peek_char(), Some('0'..='9')) {
                self.next_char();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.next_char();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.next_char();
            }
            if !matches!(self.peek_char(), Some('0'..='9')) {
                return self.error("Invalid exponent");
            }
            while matches!(self.peek_char(), Some('0'..='9')) {
                self.next_char();
            }
        }

        let text = &self.input[start..self.offset];
        if is_float {
            match text.parse::<f64>() {
                Ok(f) => Ok(self.token(TokenKind::Float(f))),
                Err(_) => self.error("Invalid number"),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => Ok(self.token(TokenKind::Integer(i))),
                Err(_) => self.error("Integer out of range"),
            }
        }
    }

    fn read_identifier(&mut self) -> Result<Token> {
        let start = self.offset;
        while matches!(
            self.peek_char(),
            Some('A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-')
        ) {
            self.next_char();
        }
        let text = &self.input[start..self.offset];
        let kind = match text {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier(text.to_string()),
        };
        Ok(self.token(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let eof = token.kind == TokenKind::Eof;
            out.push(token.kind);
            if eof {
                break;
            }
        }
        out
    }

    #[test]
    fn test_punctuation_and_keywords() {
        assert_eq!(
            kinds("{ } [ ] : , true false null"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\n\tA\/""#),
            vec![TokenKind::String("a\n\tA/".to_string()), TokenKind::Eof]
        );
        // Single quotes escape the single quote, not the double quote.
        assert_eq!(
            kinds(r"'it\'s'"),
            vec![TokenKind::String("it's".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("-12 0 3.5 1e3 2.5e-1"),
            vec![
                TokenKind::Integer(-12),
                TokenKind::Integer(0),
                TokenKind::Float(3.5),
                TokenKind::Float(1000.0),
                TokenKind::Float(0.25),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_nested_comments() {
        assert_eq!(
            kinds("/* outer /* inner */ still outer */ 1"),
            vec![TokenKind::Integer(1), TokenKind::Eof]
        );
    }

    #[test]
    fn test_token_positions() {
        let mut lexer = Lexer::new("a\n  b");
        let a = lexer.next_token().unwrap();
        assert_eq!(a.start, Position { line: 1, column: 1, offset: 0 });
        assert_eq!(a.end, Position { line: 1, column: 2, offset: 1 });
        let b = lexer.next_token().unwrap();
        assert_eq!(b.start, Position { line: 2, column: 3, offset: 4 });
    }

    #[test]
    fn test_lex_errors() {
        let mut lexer = Lexer::new("\"abc");
        let err = lexer.next_token().unwrap_err();
        assert!(err.to_string().contains("Unclosed string"));

        let mut lexer = Lexer::new("01");
        let err = lexer.next_token().unwrap_err();
        assert!(err.to_string().contains("Invalid number: leading zero"));

        let mut lexer = Lexer::new("1e+");
        let err = lexer.next_token().unwrap_err();
        assert!(err.to_string().contains("Invalid exponent"));

        let mut lexer = Lexer::new("@");
        let err = lexer.next_token().unwrap_err();
        assert!(err.to_string().contains("Unexpected character"));
    }
}
