//! Raw literal values

use std::fmt;

/// A raw value: what a cell holds when it is not a formula, and what a
/// constant operand looks like inside a formula.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Literal {
    /// Empty cell
    #[default]
    Empty,
    /// Numeric value (all numbers are f64)
    Number(f64),
    /// String value
    Text(String),
    /// Boolean value
    Bool(bool),
}

impl Literal {
    /// Token used when this literal appears inside a formula.
    ///
    /// Strings are double-quoted with inner quotes doubled, booleans use
    /// `TRUE`/`FALSE`, and non-finite numbers collapse to `#NUM!`.
    pub fn to_formula_token(&self) -> String {
        match self {
            Literal::Empty => "\"\"".to_string(),
            Literal::Number(n) => format_number(*n),
            Literal::Text(s) => format!("\"{}\"", s.replace('"', "\"\"")),
            Literal::Bool(true) => "TRUE".to_string(),
            Literal::Bool(false) => "FALSE".to_string(),
        }
    }

    /// Text a user would see in the cell, used for width estimation
    pub fn display_text(&self) -> String {
        match self {
            Literal::Empty => String::new(),
            Literal::Number(n) => format_number(*n),
            Literal::Text(s) => s.clone(),
            Literal::Bool(true) => "TRUE".to_string(),
            Literal::Bool(false) => "FALSE".to_string(),
        }
    }

    /// Check if this is an empty literal
    pub fn is_empty(&self) -> bool {
        matches!(self, Literal::Empty)
    }

    /// Check if this is a negative number
    pub fn is_negative_number(&self) -> bool {
        matches!(self, Literal::Number(n) if n.is_sign_negative() && *n != 0.0)
    }

    /// Get as number if numeric
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice if text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() {
        // f64's Display never uses exponent notation and drops a trailing ".0"
        format!("{}", n)
    } else {
        "#NUM!".to_string()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<f32> for Literal {
    fn from(n: f32) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<u32> for Literal {
    fn from(n: u32) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<usize> for Literal {
    fn from(n: usize) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Empty, Into::into)
    }
}
