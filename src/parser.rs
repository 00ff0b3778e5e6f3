use std::fmt;

use thiserror::Error;

use crate::{
    ast::{
        AggregateFn, CompareOp, Comparison, Connective, FilterExpr, Program, Statement, Token,
        TokenKind, Value,
    },
    lexer::{LexError, Lexeme, Lexer, Position},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected {found} at {position}; expected {}", ExpectedList(.expected))]
    Unexpected {
        found: String,
        expected: Vec<TokenKind>,
        position: Position,
    },

    #[error("empty script: expected at least one statement")]
    EmptyProgram,
}

struct ExpectedList<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => f.write_str("nothing"),
            [only] => write!(f, "{only}"),
            kinds => {
                f.write_str("one of ")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{kind}")?;
                }
                Ok(())
            }
        }
    }
}

const STATEMENT_START: [TokenKind; 5] = [
    TokenKind::Load,
    TokenKind::Filter,
    TokenKind::Aggregate,
    TokenKind::Sort,
    TokenKind::Print,
];

const OPERATORS: [TokenKind; 7] = [
    TokenKind::Gt,
    TokenKind::Lt,
    TokenKind::GtEq,
    TokenKind::LtEq,
    TokenKind::EqEq,
    TokenKind::NotEq,
    TokenKind::Between,
];

/// Recursive-descent parser with one token of lookahead beyond the current
/// one (needed to tell `30 and 40` from `30 and column ...`).
pub struct Parser {
    lexer: Lexer,
    current: Lexeme,
    peeked: Option<Lexeme>,
}

/// Parse a complete script.
pub fn parse(script: &str) -> Result<Program, ParseError> {
    Parser::new(Lexer::new(script))?.parse_program()
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current = lexer.next_lexeme()?;
        Ok(Parser {
            lexer,
            current,
            peeked: None,
        })
    }

    fn advance(&mut self) -> Result<Lexeme, ParseError> {
        let next = match self.peeked.take() {
            Some(lexeme) => lexeme,
            None => self.lexer.next_lexeme()?,
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn peek(&mut self) -> Result<&Token, ParseError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_lexeme()?);
        }
        match &self.peeked {
            Some(lexeme) => Ok(&lexeme.token),
            None => unreachable!("peek buffer filled above"),
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.token.kind() == kind
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        let found = match &self.current.token {
            Token::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.current.text),
        };
        ParseError::Unexpected {
            found,
            expected: expected.to_vec(),
            position: self.current.position,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Lexeme, ParseError> {
        if !self.check(kind) {
            return Err(self.unexpected(&[kind]));
        }
        self.advance()
    }

    fn expect_string(&mut self) -> Result<String, ParseError> {
        match self.expect(TokenKind::String)?.token {
            Token::String(s) => Ok(s),
            _ => unreachable!("expect checked the token kind"),
        }
    }

    fn expect_number(&mut self) -> Result<f64, ParseError> {
        match self.expect(TokenKind::Number)?.token {
            Token::Number(n) => Ok(n),
            _ => unreachable!("expect checked the token kind"),
        }
    }

    /// Parse statements until end of input. At least one is required.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = vec![];

        while !self.check(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }

        if statements.is_empty() {
            return Err(ParseError::EmptyProgram);
        }
        Ok(Program { statements })
    }

    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = match self.current.token {
            Token::Load => self.parse_load()?,
            Token::Filter => self.parse_filter()?,
            Token::Aggregate => self.parse_aggregate()?,
            Token::Sort => self.parse_sort()?,
            Token::Print => {
                self.advance()?;
                Statement::Print
            }
            _ => return Err(self.unexpected(&STATEMENT_START)),
        };

        self.expect(TokenKind::Semicolon)?;
        Ok(statement)
    }

    fn parse_load(&mut self) -> Result<Statement, ParseError> {
        self.advance()?; // consume 'load'
        let path = self.expect_string()?;
        Ok(Statement::Load { path })
    }

    fn parse_filter(&mut self) -> Result<Statement, ParseError> {
        self.advance()?; // consume 'filter'
        let expr = self.parse_filter_expr(0)?;
        // the chain may go on as well as end here
        if !self.check(TokenKind::Semicolon) {
            return Err(self.unexpected(&[TokenKind::Semicolon, TokenKind::And, TokenKind::Or]));
        }
        Ok(Statement::Filter(expr))
    }

    /// Precedence climbing over `and`/`or`.
    ///
    /// Only connectives binding at least `min_precedence` are folded in here;
    /// the right operand is parsed one level tighter, which makes both
    /// connectives left-associative.
    fn parse_filter_expr(&mut self, min_precedence: u8) -> Result<FilterExpr, ParseError> {
        let mut left = FilterExpr::Comparison(self.parse_comparison()?);

        while let Some(connective) = Connective::from_token(&self.current.token) {
            let precedence = connective.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance()?;

            // `and filter column ...` and `and column ...` are both accepted
            if self.check(TokenKind::Filter) {
                self.advance()?;
            }

            let right = self.parse_filter_expr(precedence + 1)?;
            left = connective.join(left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        self.expect(TokenKind::Column)?;
        let column = self.expect_string()?;

        let op = match CompareOp::from_token(&self.current.token) {
            Some(op) => op,
            None => return Err(self.unexpected(&OPERATORS)),
        };
        self.advance()?;

        let value = self.parse_value()?;
        Ok(Comparison { column, op, value })
    }

    /// `NUMBER`, `STRING`, or `NUMBER and NUMBER`.
    ///
    /// The range form is chosen whenever a number is followed by `and` and
    /// another number, whatever the operator; pairing ranges with `between`
    /// is checked when the filter is applied.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match &self.current.token {
            Token::Number(n) => {
                let min = *n;
                self.advance()?;
                if self.check(TokenKind::And) && matches!(self.peek()?, Token::Number(_)) {
                    self.advance()?; // consume 'and'
                    let max = self.expect_number()?;
                    Ok(Value::Range { min, max })
                } else {
                    Ok(Value::Number(min))
                }
            }
            Token::String(_) => Ok(Value::Text(self.expect_string()?)),
            _ => Err(self.unexpected(&[TokenKind::Number, TokenKind::String])),
        }
    }

    fn parse_aggregate_fn(&mut self) -> Result<AggregateFn, ParseError> {
        let function = match self.current.token {
            Token::Count => AggregateFn::Count,
            Token::Sum => AggregateFn::Sum,
            Token::Average => AggregateFn::Average,
            _ => {
                return Err(self.unexpected(&[
                    TokenKind::Count,
                    TokenKind::Sum,
                    TokenKind::Average,
                ]));
            }
        };
        self.advance()?;
        Ok(function)
    }

    fn parse_aggregate(&mut self) -> Result<Statement, ParseError> {
        self.advance()?; // consume 'aggregate'
        let function = self.parse_aggregate_fn()?;
        self.expect(TokenKind::Column)?;
        let column = self.expect_string()?;
        Ok(Statement::Aggregate { function, column })
    }

    fn parse_sort(&mut self) -> Result<Statement, ParseError> {
        self.advance()?; // consume 'sort'
        self.expect(TokenKind::Column)?;
        let column = self.expect_string()?;

        let ascending = match self.current.token {
            Token::Asc => true,
            Token::Desc => false,
            _ => return Err(self.unexpected(&[TokenKind::Asc, TokenKind::Desc])),
        };
        self.advance()?;

        Ok(Statement::Sort { column, ascending })
    }
}
