use std::fmt;

use thiserror::Error;

use crate::ast::Token;

/// 1-based line and column of a character in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("unknown word '{word}' at {position} (keywords are lowercase)")]
    UnknownWord { word: String, position: Position },

    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

/// A token together with its source text and starting position.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub text: String,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Rewind to the start of the input.
    pub fn reset(&mut self) {
        self.position = 0;
        self.line = 1;
        self.column = 1;
        self.finished = false;
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.current_char() {
                Some(ch) if ch.is_whitespace() => self.advance(),
                Some('/') if self.peek_char(1) == Some('/') => {
                    while let Some(ch) = self.current_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Read a double-quoted string. No escapes: the literal ends at the next `"`.
    fn read_string(&mut self, start: Position) -> Result<String, LexError> {
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                return Ok(result);
            }
            result.push(ch);
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self, start: Position) -> Result<(f64, String), LexError> {
        let mut number = String::new();
        let mut is_decimal = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_decimal
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_decimal = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match number.parse::<f64>() {
            Ok(value) => Ok((value, number)),
            Err(_) => Err(LexError::InvalidNumber {
                text: number,
                position: start,
            }),
        }
    }

    fn single(&mut self, token: Token, text: &str) -> (Token, String) {
        for _ in text.chars() {
            self.advance();
        }
        (token, text.to_string())
    }

    /// Next token with its source text and position. Returns `Token::Eof`
    /// once the input is exhausted, and keeps returning it.
    pub fn next_lexeme(&mut self) -> Result<Lexeme, LexError> {
        self.skip_trivia();
        let position = self.here();

        let (token, text) = match self.current_char() {
            None => (Token::Eof, String::new()),
            Some(';') => self.single(Token::Semicolon, ";"),
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.single(Token::GtEq, ">=")
                } else {
                    self.single(Token::Gt, ">")
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.single(Token::LtEq, "<=")
                } else {
                    self.single(Token::Lt, "<")
                }
            }
            Some('=') if self.peek_char(1) == Some('=') => self.single(Token::EqEq, "=="),
            Some('!') if self.peek_char(1) == Some('=') => self.single(Token::NotEq, "!="),
            Some('"') => {
                let start = self.position;
                let value = self.read_string(position)?;
                let text: String = self.input[start..self.position].iter().collect();
                (Token::String(value), text)
            }
            Some(ch) if ch.is_ascii_digit() => {
                let (value, text) = self.read_number(position)?;
                (Token::Number(value), text)
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let word = self.read_word();
                match Token::keyword(&word) {
                    Some(token) => (token, word),
                    None => return Err(LexError::UnknownWord { word, position }),
                }
            }
            Some(ch) => return Err(LexError::UnexpectedChar { ch, position }),
        };

        Ok(Lexeme {
            token,
            text,
            position,
        })
    }

    /// Next token without position information.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_lexeme().map(|lexeme| lexeme.token)
    }

    /// Lex the whole input, ending with a single `Token::Eof` lexeme.
    pub fn tokenize(mut self) -> Result<Vec<Lexeme>, LexError> {
        self.reset();
        self.collect()
    }
}

/// Yields every lexeme up to and including `Eof`, then stops. A lexical
/// error is yielded once and ends the sequence.
impl Iterator for Lexer {
    type Item = Result<Lexeme, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_lexeme();
        match &item {
            Ok(lexeme) if lexeme.token == Token::Eof => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_track_lines() {
        let mut lexer = Lexer::new("print;\n  load \"a.csv\";");
        assert_eq!(lexer.next_lexeme().unwrap().position, Position { line: 1, column: 1 });
        assert_eq!(lexer.next_lexeme().unwrap().position, Position { line: 1, column: 6 });
        let load = lexer.next_lexeme().unwrap();
        assert_eq!(load.token, Token::Load);
        assert_eq!(load.position, Position { line: 2, column: 3 });
        let path = lexer.next_lexeme().unwrap();
        assert_eq!(path.text, "\"a.csv\"");
        assert_eq!(path.position, Position { line: 2, column: 8 });
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  ");
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_iterator_restarts_after_reset() {
        let mut lexer = Lexer::new("print;");
        assert_eq!(lexer.by_ref().count(), 3);
        assert!(lexer.next().is_none());
        lexer.reset();
        assert_eq!(lexer.count(), 3);
    }
}
