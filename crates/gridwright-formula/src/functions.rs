//! Spreadsheet function helpers
//!
//! Each helper returns a fresh node wrapping a function call. Variadic
//! helpers fail with [`FormulaError::EmptyOperands`] when given nothing.
//!
//! ```rust
//! use gridwright_formula::{functions, Operand, Value};
//!
//! let a = Value::new(1);
//! let b = Value::new(2);
//! let total = functions::sum([Operand::range([&a, &b])]).unwrap();
//! let positive = functions::if_(total.gt(0), "yes", "no");
//! assert!(positive.is_defined());
//! ```
//!
//! [`FormulaError::EmptyOperands`]: crate::FormulaError::EmptyOperands

use crate::ast::{Formula, Operand};
use crate::error::FormulaResult;
use crate::value::Value;

/// Call any function by name
pub fn call<I, T>(name: &str, args: I) -> FormulaResult<Value>
where
    I: IntoIterator<Item = T>,
    T: Into<Operand>,
{
    Formula::call(name, args).map(Value::formula)
}

fn fixed(name: &str, args: Vec<Operand>) -> Value {
    Value::formula(Formula::Call {
        name: name.to_string(),
        args,
    })
}

macro_rules! variadic {
    ($($(#[$doc:meta])* $fn_name:ident => $excel:literal),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name<I, T>(args: I) -> FormulaResult<Value>
            where
                I: IntoIterator<Item = T>,
                T: Into<Operand>,
            {
                call($excel, args)
            }
        )*

        const VARIADIC: &[&str] = &[$($excel),*];
    };
}

/// Check whether a function takes any number of arguments, so a list of
/// cells can be passed as separate arguments
pub(crate) fn is_variadic(name: &str) -> bool {
    VARIADIC.contains(&name)
}

variadic! {
    /// `SUM(...)`
    sum => "SUM",
    /// `AVERAGE(...)`
    average => "AVERAGE",
    /// `MIN(...)`
    min => "MIN",
    /// `MAX(...)`
    max => "MAX",
    /// `COUNT(...)`
    count => "COUNT",
    /// `AND(...)`
    and => "AND",
    /// `OR(...)`
    or => "OR",
}

/// `ROUND(value, digits)`
pub fn round(value: impl Into<Operand>, digits: impl Into<Operand>) -> Value {
    fixed("ROUND", vec![value.into(), digits.into()])
}

/// `ABS(value)`
pub fn abs(value: impl Into<Operand>) -> Value {
    fixed("ABS", vec![value.into()])
}

/// `NOT(value)`
pub fn not(value: impl Into<Operand>) -> Value {
    fixed("NOT", vec![value.into()])
}

/// `IF(condition, then, otherwise)`
pub fn if_(
    condition: impl Into<Operand>,
    then: impl Into<Operand>,
    otherwise: impl Into<Operand>,
) -> Value {
    fixed("IF", vec![condition.into(), then.into(), otherwise.into()])
}

/// `PMT(rate, periods, present_value)`: payment per period of a loan
pub fn pmt(
    rate: impl Into<Operand>,
    periods: impl Into<Operand>,
    present_value: impl Into<Operand>,
) -> Value {
    fixed("PMT", vec![rate.into(), periods.into(), present_value.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;
    use crate::value::Payload;

    #[test]
    fn test_is_variadic() {
        assert!(is_variadic("SUM"));
        assert!(is_variadic("OR"));
        assert!(!is_variadic("ROUND"));
        assert!(!is_variadic("NPV"));
    }

    #[test]
    fn test_variadic_needs_operands() {
        let err = sum(Vec::<Operand>::new()).unwrap_err();
        assert_eq!(err, FormulaError::EmptyOperands("SUM".to_string()));
    }

    #[test]
    fn test_call_uppercases_name() {
        let v = call("npv", [Operand::from(0.1), Operand::from(100)]).unwrap();
        match v.payload() {
            Some(Payload::Formula(Formula::Call { name, args })) => {
                assert_eq!(name, "NPV");
                assert_eq!(args.len(), 2);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
