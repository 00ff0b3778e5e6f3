use std::fmt;

/// Lexical token.
///
/// Keywords are case-sensitive; `LOAD` is not a keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Statement keywords
    /// `load`
    Load,
    /// `filter`
    Filter,
    /// `column`
    Column,
    /// `aggregate`
    Aggregate,
    /// `print`
    Print,
    /// `sort`
    Sort,

    // Sort direction
    /// `asc`
    Asc,
    /// `desc`
    Desc,

    // Aggregate functions
    /// `count`
    Count,
    /// `sum`
    Sum,
    /// `average`
    Average,

    // Comparison
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `between`
    Between,

    // Connectives
    /// Logical AND (word, not symbol)
    ///
    /// Also separates the two bounds of a range:
    ///
    /// ```text
    /// filter column "age" between 30 and 40;
    /// ```
    And,
    /// Logical OR (word, not symbol)
    Or,

    // Literals
    /// Integer or decimal number, without sign or exponent
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 2500.75
    /// ```
    Number(f64),

    /// String literal enclosed in double quotes, quotes stripped
    ///
    /// # Examples
    /// ```text
    /// "employees.csv"
    /// "Recursos Humanos"
    /// ```
    String(String),

    /// Statement terminator
    Semicolon,

    /// End of input
    Eof,
}

/// The payload-free shape of a [`Token`], used to describe what the parser
/// expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Load,
    Filter,
    Column,
    Aggregate,
    Print,
    Sort,
    Asc,
    Desc,
    Count,
    Sum,
    Average,
    Gt,
    Lt,
    GtEq,
    LtEq,
    EqEq,
    NotEq,
    Between,
    And,
    Or,
    Number,
    String,
    Semicolon,
    Eof,
}

impl Token {
    /// Map a bare word to its keyword token.
    pub fn keyword(word: &str) -> Option<Token> {
        let token = match word {
            "load" => Token::Load,
            "filter" => Token::Filter,
            "column" => Token::Column,
            "aggregate" => Token::Aggregate,
            "print" => Token::Print,
            "sort" => Token::Sort,
            "asc" => Token::Asc,
            "desc" => Token::Desc,
            "count" => Token::Count,
            "sum" => Token::Sum,
            "average" => Token::Average,
            "between" => Token::Between,
            "and" => Token::And,
            "or" => Token::Or,
            _ => return None,
        };
        Some(token)
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Load => TokenKind::Load,
            Token::Filter => TokenKind::Filter,
            Token::Column => TokenKind::Column,
            Token::Aggregate => TokenKind::Aggregate,
            Token::Print => TokenKind::Print,
            Token::Sort => TokenKind::Sort,
            Token::Asc => TokenKind::Asc,
            Token::Desc => TokenKind::Desc,
            Token::Count => TokenKind::Count,
            Token::Sum => TokenKind::Sum,
            Token::Average => TokenKind::Average,
            Token::Gt => TokenKind::Gt,
            Token::Lt => TokenKind::Lt,
            Token::GtEq => TokenKind::GtEq,
            Token::LtEq => TokenKind::LtEq,
            Token::EqEq => TokenKind::EqEq,
            Token::NotEq => TokenKind::NotEq,
            Token::Between => TokenKind::Between,
            Token::And => TokenKind::And,
            Token::Or => TokenKind::Or,
            Token::Number(_) => TokenKind::Number,
            Token::String(_) => TokenKind::String,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Eof => TokenKind::Eof,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Load => "'load'",
            TokenKind::Filter => "'filter'",
            TokenKind::Column => "'column'",
            TokenKind::Aggregate => "'aggregate'",
            TokenKind::Print => "'print'",
            TokenKind::Sort => "'sort'",
            TokenKind::Asc => "'asc'",
            TokenKind::Desc => "'desc'",
            TokenKind::Count => "'count'",
            TokenKind::Sum => "'sum'",
            TokenKind::Average => "'average'",
            TokenKind::Gt => "'>'",
            TokenKind::Lt => "'<'",
            TokenKind::GtEq => "'>='",
            TokenKind::LtEq => "'<='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Between => "'between'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}
