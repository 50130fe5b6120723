//! Formula tree types

use crate::error::{FormulaError, FormulaResult};
use crate::value::Value;
use gridwright_core::Literal;

/// Precedence of references, literals, ranges and function calls
pub const ATOM_PRECEDENCE: u8 = 7;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,

    // Text
    Concat,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
}

impl BinaryOperator {
    /// Operator token
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
            BinaryOperator::Concat => "&",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterEqual => ">=",
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::LessThan
            | BinaryOperator::LessEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterEqual => 1,
            BinaryOperator::Concat => 2,
            BinaryOperator::Add | BinaryOperator::Subtract => 3,
            BinaryOperator::Multiply | BinaryOperator::Divide => 4,
            BinaryOperator::Power => 5,
        }
    }

    /// Whether `a op (b op2 c)` equals `a op b op2 c` for operators of the same precedence
    pub fn is_associative(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Multiply | BinaryOperator::Concat
        )
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    /// Operator token
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
        }
    }

    /// Binding strength; tighter than every binary operator
    pub fn precedence(&self) -> u8 {
        6
    }
}

/// One operand of a formula
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Constant written inline
    Literal(Literal),
    /// Another node, rendered as its cell reference
    Value(Value),
    /// Nested formula
    Formula(Formula),
    /// Ordered group of nodes, rendered as `A1:A5` when contiguous
    Range(Vec<Value>),
}

impl Operand {
    /// Build a range operand from nodes
    pub fn range<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        Operand::Range(values.into_iter().cloned().collect())
    }
}

impl From<Literal> for Operand {
    fn from(literal: Literal) -> Self {
        Operand::Literal(literal)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<&Value> for Operand {
    fn from(value: &Value) -> Self {
        Operand::Value(value.clone())
    }
}

impl From<Formula> for Operand {
    fn from(formula: Formula) -> Self {
        Operand::Formula(formula)
    }
}

impl From<Vec<Value>> for Operand {
    fn from(values: Vec<Value>) -> Self {
        Operand::Range(values)
    }
}

impl From<&[Value]> for Operand {
    fn from(values: &[Value]) -> Self {
        Operand::Range(values.to_vec())
    }
}

macro_rules! operand_from_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Literal(Literal::from(v))
                }
            }
        )*
    };
}

operand_from_literal!(f64, i32, i64, u32, bool, &str, String);

/// A formula: an operator or function applied to ordered operands
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// Binary operation
    Binary {
        op: BinaryOperator,
        lhs: Box<Operand>,
        rhs: Box<Operand>,
    },
    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Operand>,
    },
    /// Function call, e.g. `SUM(A1:A5)`
    Call { name: String, args: Vec<Operand> },
}

impl Formula {
    /// Build a binary operation
    pub fn binary(op: BinaryOperator, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Formula::Binary {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
    }

    /// Build a unary operation
    pub fn unary(op: UnaryOperator, operand: impl Into<Operand>) -> Self {
        Formula::Unary {
            op,
            operand: Box::new(operand.into()),
        }
    }

    /// Build a function call; the name is upper-cased.
    ///
    /// A call needs at least one operand, and so does every range among them.
    pub fn call<I, T>(name: &str, args: I) -> FormulaResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        let name = name.to_ascii_uppercase();
        let args: Vec<Operand> = args.into_iter().map(Into::into).collect();
        let has_empty_range = args
            .iter()
            .any(|a| matches!(a, Operand::Range(values) if values.is_empty()));
        if args.is_empty() || has_empty_range {
            return Err(FormulaError::EmptyOperands(name));
        }
        Ok(Formula::Call { name, args })
    }

    /// Binding strength of the formula's outermost operator
    pub fn precedence(&self) -> u8 {
        match self {
            Formula::Binary { op, .. } => op.precedence(),
            Formula::Unary { op, .. } => op.precedence(),
            Formula::Call { .. } => ATOM_PRECEDENCE,
        }
    }

    /// Direct operands in order
    pub fn operands(&self) -> Vec<&Operand> {
        match self {
            Formula::Binary { lhs, rhs, .. } => vec![&**lhs, &**rhs],
            Formula::Unary { operand, .. } => vec![&**operand],
            Formula::Call { args, .. } => args.iter().collect(),
        }
    }

    /// Every node this formula refers to, nested formulas and ranges included
    pub fn referenced_values(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        collect_values(self, &mut out);
        out
    }
}

fn collect_values<'a>(formula: &'a Formula, out: &mut Vec<&'a Value>) {
    for operand in formula.operands() {
        match operand {
            Operand::Literal(_) => {}
            Operand::Value(v) => out.push(v),
            Operand::Formula(f) => collect_values(f, out),
            Operand::Range(values) => out.extend(values.iter()),
        }
    }
}
