use std::cmp::Ordering;

/// One field of a table row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value (an empty CSV field)
    Null,

    /// Finite number
    Number(f64),

    /// UTF-8 text
    Text(String),
}

impl Cell {
    /// Parse a raw CSV field as a number, falling back to text.
    ///
    /// Only finite numbers count: `NaN` and `inf` stay text.
    pub fn infer(raw: &str) -> Cell {
        if raw.is_empty() {
            return Cell::Null;
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Ordering used by `sort`: numbers numerically, text lexicographically,
    /// and nulls after everything else.
    pub fn sort_cmp(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Null, Cell::Null) => Ordering::Equal,
            (Cell::Null, _) => Ordering::Greater,
            (_, Cell::Null) => Ordering::Less,
            // Columns are single-typed; keep numbers first if that ever breaks.
            (Cell::Number(_), Cell::Text(_)) => Ordering::Less,
            (Cell::Text(_), Cell::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(Cell::infer(""), Cell::Null);
        assert_eq!(Cell::infer("42"), Cell::Number(42.0));
        assert_eq!(Cell::infer("2500.75"), Cell::Number(2500.75));
        assert_eq!(Cell::infer("EMP0001"), Cell::Text("EMP0001".into()));
        assert_eq!(Cell::infer("NaN"), Cell::Text("NaN".into()));
    }

    #[test]
    fn test_nulls_sort_last() {
        assert_eq!(Cell::Null.sort_cmp(&Cell::Number(1.0)), Ordering::Greater);
        assert_eq!(Cell::Text("a".into()).sort_cmp(&Cell::Null), Ordering::Less);
    }
}
