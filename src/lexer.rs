//! Lexer for the Lak language.
//!
//! Scans a source string into a stream of [`Token`]s one at a time.
//! `next_token` is infallible: unrecognized bytes are surfaced as
//! `TokenKind::Illegal` tokens rather than an `Err`, so the parser (not the
//! lexer) is the place errors are recorded — matching the "no exceptions"
//! failure model used throughout this interpreter.

use crate::token::{lookup_ident, Span, Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the entire input, ending with (and including) `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c == ' ' || c == '\t' || c == '\r' || c == '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scans and returns the next token, advancing past it.
    ///
    /// Calling this after end-of-input repeatedly yields `Eof` tokens.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start_pos = self.pos;
        let start_line = self.line;
        let start_column = self.column;
        let span = |end: usize| Span::new(start_pos, end, start_line, start_column);

        let Some(c) = self.current_char() else {
            return Token::new(TokenKind::Eof, span(self.pos));
        };

        macro_rules! one_or_two {
            ($one:expr, $second_char:expr, $two:expr) => {{
                self.advance();
                if self.current_char() == Some($second_char) {
                    self.advance();
                    Token::new($two, span(self.pos))
                } else {
                    Token::new($one, span(self.pos))
                }
            }};
        }

        match c {
            '=' => one_or_two!(TokenKind::Assign, '=', TokenKind::Eq),
            '!' => one_or_two!(TokenKind::Bang, '=', TokenKind::NotEq),
            '<' => one_or_two!(TokenKind::Lt, '=', TokenKind::Lte),
            '>' => one_or_two!(TokenKind::Gt, '=', TokenKind::Gte),
            '+' => {
                self.advance();
                Token::new(TokenKind::Plus, span(self.pos))
            }
            '-' => {
                self.advance();
                Token::new(TokenKind::Minus, span(self.pos))
            }
            '*' => {
                self.advance();
                Token::new(TokenKind::Asterisk, span(self.pos))
            }
            '/' => {
                self.advance();
                Token::new(TokenKind::Slash, span(self.pos))
            }
            '(' => {
                self.advance();
                Token::new(TokenKind::LParen, span(self.pos))
            }
            ')' => {
                self.advance();
                Token::new(TokenKind::RParen, span(self.pos))
            }
            '{' => {
                self.advance();
                Token::new(TokenKind::LBrace, span(self.pos))
            }
            '}' => {
                self.advance();
                Token::new(TokenKind::RBrace, span(self.pos))
            }
            '[' => {
                self.advance();
                Token::new(TokenKind::LBracket, span(self.pos))
            }
            ']' => {
                self.advance();
                Token::new(TokenKind::RBracket, span(self.pos))
            }
            ',' => {
                self.advance();
                Token::new(TokenKind::Comma, span(self.pos))
            }
            ';' => {
                self.advance();
                Token::new(TokenKind::Semicolon, span(self.pos))
            }
            ':' => {
                self.advance();
                Token::new(TokenKind::Colon, span(self.pos))
            }
            '"' => self.read_string(start_pos, start_line, start_column),
            _ if c.is_ascii_digit() => self.read_number(start_pos, start_line, start_column),
            _ if c.is_alphabetic() || c == '_' => {
                self.read_identifier(start_pos, start_line, start_column)
            }
            _ => {
                self.advance();
                Token::new(TokenKind::Illegal, span(self.pos))
            }
        }
    }

    /// Reads a double-quoted string literal with no escape sequences:
    /// the string runs until the next `"` or the end of input.
    fn read_string(&mut self, start_pos: usize, start_line: usize, start_column: usize) -> Token {
        self.advance(); // skip opening quote
        let content_start = self.pos;

        while let Some(c) = self.current_char() {
            if c == '"' {
                break;
            }
            self.advance();
        }

        let value = self.input[content_start..self.pos].to_string();
        if self.current_char() == Some('"') {
            self.advance(); // skip closing quote
        }

        let span = Span::new(start_pos, self.pos, start_line, start_column);
        Token::new(TokenKind::Str(value), span)
    }

    fn read_number(&mut self, start_pos: usize, start_line: usize, start_column: usize) -> Token {
        while let Some(c) = self.current_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start_pos..self.pos];
        let span = Span::new(start_pos, self.pos, start_line, start_column);
        match text.parse::<i64>() {
            Ok(value) => Token::new(TokenKind::Int(value), span),
            Err(_) => Token::new(TokenKind::Illegal, span),
        }
    }

    /// Reads `[A-Za-z_][A-Za-z0-9_]*`.
    ///
    /// Digits are permitted after the first character; see DESIGN.md for
    /// the rationale (the original implementation this language is based
    /// on forbids digits inside identifiers entirely).
    fn read_identifier(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        while let Some(c) = self.current_char() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let value = &self.input[start_pos..self.pos];
        let span = Span::new(start_pos, self.pos, start_line, start_column);
        Token::new(lookup_ident(value), span)
    }
}
