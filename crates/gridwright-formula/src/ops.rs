//! Operator overloads that build formula nodes

use crate::ast::{BinaryOperator, Formula, Operand, UnaryOperator};
use crate::value::Value;
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Operand>> $trait<R> for Value {
            type Output = Value;

            fn $method(self, rhs: R) -> Value {
                Value::formula(Formula::binary($op, self, rhs))
            }
        }

        impl<R: Into<Operand>> $trait<R> for &Value {
            type Output = Value;

            fn $method(self, rhs: R) -> Value {
                Value::formula(Formula::binary($op, self, rhs))
            }
        }

        impl_binary_op!(@scalar $trait, $method, $op, f64, i32, i64);
    };
    (@scalar $trait:ident, $method:ident, $op:expr, $($scalar:ty),*) => {
        $(
            impl $trait<Value> for $scalar {
                type Output = Value;

                fn $method(self, rhs: Value) -> Value {
                    Value::formula(Formula::binary($op, self, rhs))
                }
            }

            impl $trait<&Value> for $scalar {
                type Output = Value;

                fn $method(self, rhs: &Value) -> Value {
                    Value::formula(Formula::binary($op, self, rhs))
                }
            }
        )*
    };
}

impl_binary_op!(Add, add, BinaryOperator::Add);
impl_binary_op!(Sub, sub, BinaryOperator::Subtract);
impl_binary_op!(Mul, mul, BinaryOperator::Multiply);
impl_binary_op!(Div, div, BinaryOperator::Divide);

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::formula(Formula::unary(UnaryOperator::Negate, self))
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::formula(Formula::unary(UnaryOperator::Negate, self))
    }
}

impl Value {
    fn binary(&self, op: BinaryOperator, rhs: impl Into<Operand>) -> Value {
        Value::formula(Formula::binary(op, self, rhs))
    }

    /// `self ^ rhs`
    pub fn pow(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::Power, rhs)
    }

    /// `self & rhs` (text concatenation)
    pub fn concat(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::Concat, rhs)
    }

    /// `self = rhs`
    pub fn equals(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::Equal, rhs)
    }

    /// `self <> rhs`
    pub fn not_equals(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::NotEqual, rhs)
    }

    /// `self < rhs`
    pub fn lt(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::LessThan, rhs)
    }

    /// `self <= rhs`
    pub fn le(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::LessEqual, rhs)
    }

    /// `self > rhs`
    pub fn gt(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::GreaterThan, rhs)
    }

    /// `self >= rhs`
    pub fn ge(&self, rhs: impl Into<Operand>) -> Value {
        self.binary(BinaryOperator::GreaterEqual, rhs)
    }
}
